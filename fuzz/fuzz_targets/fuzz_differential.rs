#![no_main]
use libfuzzer_sys::fuzz_target;
use strtab::{Options, parse};

// Relaxing a check must never turn a success into a failure or change the rows.
fuzz_target!(|data: &[u8]| {
    let strict = Options {
        allow_empty_dims: false,
        allow_empty_rows: false,
        require_full_rank: true,
        ..Options::default()
    };
    let lenient = Options {
        allow_empty_dims: true,
        allow_empty_rows: true,
        require_full_rank: false,
        ..Options::default()
    };

    let s = parse(data, &strict);
    if !s.ok {
        return;
    }
    let l = parse(data, &lenient);
    if !l.ok {
        panic!(
            "lenient parse failed where strict succeeded:\n{}\n{}",
            String::from_utf8_lossy(data),
            l.diagnostics
        );
    }
    assert_eq!(s.table, l.table);
    assert_eq!(s.declarator, l.declarator);
    assert_eq!((s.decl_begin, s.decl_end), (l.decl_begin, l.decl_end));
});
