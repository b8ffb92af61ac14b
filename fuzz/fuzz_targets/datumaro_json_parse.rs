//! Fuzz target for Datumaro JSON parsing and item decoding.
//!
//! Run with:
//!   cargo +nightly fuzz run datumaro_json_parse

#![no_main]

use datumaro2yolo::datumaro::fuzz_decode_document;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid OOM on very large inputs.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = fuzz_decode_document(data);
});
