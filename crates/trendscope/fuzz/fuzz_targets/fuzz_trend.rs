//! Fuzz target for the trend analyzer.
//!
//! Feeds arbitrary series, including NaN, infinities and gaps, and checks
//! that the result stays finite and bounded.

#![no_main]

use libfuzzer_sys::fuzz_target;
use trendscope::TrendAnalyzer;

fuzz_target!(|values: Vec<Option<f64>>| {
    if values.len() > 10_000 {
        return;
    }

    let trend = TrendAnalyzer::new().analyze(&values);

    assert!(trend.slope.is_finite());
    assert!(trend.change_rate.is_finite());
    assert!(trend.volatility.is_finite());
    assert!((0.0..=1.0).contains(&trend.confidence));
    assert!((0.0..=1.0).contains(&trend.correlation));
    for idx in trend.outliers {
        assert!(idx < values.len());
    }
});
