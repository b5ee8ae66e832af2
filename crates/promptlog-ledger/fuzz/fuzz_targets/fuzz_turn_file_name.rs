#![no_main]

use libfuzzer_sys::fuzz_target;
use promptlog_ledger::{format_turn_file_name, parse_turn_file_name};

fuzz_target!(|data: &[u8]| {
    if let Ok(name) = std::str::from_utf8(data) {
        if let Some(parsed) = parse_turn_file_name(name) {
            // Anything that parses must survive a format/parse cycle.
            let formatted = format_turn_file_name(&parsed);
            assert_eq!(parse_turn_file_name(&formatted), Some(parsed));
        }
    }
});
