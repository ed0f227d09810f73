#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use strtab::{LineCommentPolicy, Options, parse, parse_range};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    promote: bool,
    allow_empty_dims: bool,
    allow_empty_rows: bool,
    require_full_rank: bool,
    hex_digits: u8,
    start: u16,
    end: u16,
    source: &'a [u8],
}

fuzz_target!(|input: Input| {
    let opts = Options {
        line_comments: if input.promote {
            LineCommentPolicy::PromoteBlock
        } else {
            LineCommentPolicy::Swallow
        },
        allow_empty_dims: input.allow_empty_dims,
        allow_empty_rows: input.allow_empty_rows,
        require_full_rank: input.require_full_rank,
        hex_escape_max_digits: usize::from(input.hex_digits % 8) + 1,
        ..Options::default()
    };
    let a = parse(input.source, &opts);
    let b = parse(input.source, &opts);
    assert_eq!(a, b);

    let end = usize::from(input.end).min(input.source.len());
    let start = usize::from(input.start).min(end);
    let r = parse_range(
        input.source,
        usize::from(input.start)..usize::from(input.end),
        &opts,
    );
    if r.ok {
        assert!(start <= r.decl_begin && r.decl_end <= end);
    }
});
