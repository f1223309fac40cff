#![no_main]

use libfuzzer_sys::fuzz_target;
use netoffice_compat::metadata::{attributes::parse_attribute_data, loader::LibraryMetadata};

fuzz_target!(|data: &[u8]| {
    let _ = LibraryMetadata::from_bytes(data);
    let _ = parse_attribute_data(data);
});
