//! Fuzz target for date detection and column kind inference.
//!
//! Regex-based detection and chrono parsing must not panic on pathological
//! input, and inference must agree with itself.

#![no_main]

use libfuzzer_sys::fuzz_target;
use trendscope::input::{infer_kind, looks_like_date, parse_date};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(content) = std::str::from_utf8(data) {
        let _ = looks_like_date(content);
        let _ = parse_date(content);

        let values: Vec<&str> = content.split(',').collect();
        assert_eq!(infer_kind(&values), infer_kind(&values));
    }
});
