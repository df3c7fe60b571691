//! Fuzz target for the data parser and the analysis behind it.
//!
//! This fuzzer tests that file analysis:
//! 1. Never panics on malformed delimited or JSON input
//! 2. Either rejects the input or yields finite insights

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Write;
use trendscope::Trendscope;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let engine = Trendscope::new();
    for suffix in [".csv", ".json"] {
        let Ok(mut temp_file) = tempfile::NamedTempFile::with_suffix(suffix) else {
            return;
        };
        if temp_file.write_all(data).is_err() {
            return;
        }

        if let Ok(report) = engine.analyze_file(temp_file.path()) {
            let insights = report.insights;
            assert!(insights.business_health.score.is_finite());
            assert!(insights.confidence_level.is_finite());
            assert!(insights.overall_trend.slope.is_finite());
        }
    }
});
