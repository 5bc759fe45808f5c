#![no_main]

use hdkeystore_core::KeyMaterial;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Region accessors must hold for any accepted length.
    if let Ok(key) = KeyMaterial::from_bytes(data) {
        assert_eq!(key.seed_region().len(), 64);
        assert!(key.chain_code().len() >= 32);
        assert_eq!(key.seed_region().len() + key.chain_code().len(), key.len());
    }
});
