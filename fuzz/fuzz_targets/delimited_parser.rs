#![no_main]

use cyclecount::hysteresis::count_cycles;
use cyclecount::reader::text::parse_delimited;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must never panic; whatever parses must be countable
        if let Ok(record) = parse_delimited(input, ',') {
            for column in &record.columns {
                let _ = count_cycles(&column.samples, 10.0);
            }
        }
    }
});
