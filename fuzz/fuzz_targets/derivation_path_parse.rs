#![no_main]

use hdkeystore_core::DerivationPath;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsing must never panic, and anything that parses must survive
    // a Display round trip unchanged.
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(path) = s.parse::<DerivationPath>() {
            let reparsed: DerivationPath = path.to_string().parse().unwrap();
            assert_eq!(reparsed, path);
        }
    }
});
