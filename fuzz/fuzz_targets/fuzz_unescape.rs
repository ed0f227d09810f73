#![no_main]
use libfuzzer_sys::fuzz_target;
use strtab::encode::primitives::escape_and_quote;
use strtab::unescape;

fuzz_target!(|data: &[u8]| {
    let Ok(decoded) = unescape(data) else {
        return;
    };
    let quoted = escape_and_quote(&decoded);
    let body = &quoted.as_bytes()[1..quoted.len() - 1];
    let again = unescape(body).unwrap_or_else(|e| panic!("{quoted}: {e:?}"));
    assert_eq!(again, decoded);
});
