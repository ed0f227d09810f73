#![no_main]
use libfuzzer_sys::fuzz_target;
use strtab::{Options, parse};

fuzz_target!(|data: &[u8]| {
    let r = parse(data, &Options::default());
    if r.ok {
        assert!(r.decl_begin < r.decl_end && r.decl_end <= data.len());
        assert_eq!(data[r.decl_end - 1], b';');
    } else {
        assert!(!r.diagnostics.is_empty());
    }
});
