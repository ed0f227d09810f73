use std::fs;
use std::io::{Read, stdin};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::{Level, debug};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LineCommentArg {
    /// `/*` inside a `//` comment is plain comment text
    Swallow,
    /// `/*` inside a `//` comment opens a block comment
    Promote,
}

#[derive(Parser, Debug)]
#[command(
    name = "strtab-cli",
    about = "Extract a C string table declaration and print its decoded rows",
    version
)]
struct Args {
    /// Print the whole parse result as JSON instead of initializer text
    #[arg(long)]
    json: bool,

    /// Print the full `char* NAME[..] = ...;` statement, not just the initializer
    #[arg(long)]
    declaration: bool,

    /// Render everything on one line
    #[arg(long)]
    compact: bool,

    /// Indentation for the expanded layout
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Handling of `/*` inside line comments
    #[arg(long, value_enum, default_value_t = LineCommentArg::Swallow)]
    line_comments: LineCommentArg,

    /// Reject `[]` array dimensions
    #[arg(long)]
    no_empty_dims: bool,

    /// Accept `{}` rows
    #[arg(long)]
    allow_empty_rows: bool,

    /// Require pointer levels plus array dimensions to add up to three
    #[arg(long)]
    full_rank: bool,

    /// Most hex digits read after `\x`
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u8).range(1..=8))]
    hex_digits: u8,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut buf = Vec::new();
    match &args.input {
        Some(path) => {
            buf = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        }
        None => {
            stdin().read_to_end(&mut buf)?;
        }
    }
    debug!(bytes = buf.len(), "input loaded");

    let options = strtab::Options {
        line_comments: match args.line_comments {
            LineCommentArg::Swallow => strtab::LineCommentPolicy::Swallow,
            LineCommentArg::Promote => strtab::LineCommentPolicy::PromoteBlock,
        },
        allow_empty_dims: !args.no_empty_dims,
        allow_empty_rows: args.allow_empty_rows,
        require_full_rank: args.full_rank,
        hex_escape_max_digits: usize::from(args.hex_digits),
        layout: if args.compact {
            strtab::Layout::Compact
        } else {
            strtab::Layout::Expanded
        },
        indent: args.indent,
    };

    let result = strtab::parse(&buf, &options);

    eprint!("{}", result.diagnostics);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.ok {
        let out = if args.declaration {
            strtab::encode_declaration(&result, &options).unwrap_or_default()
        } else {
            strtab::encode_to_string(&result.table, &options)
        };
        println!("{}", out.trim_end());
    }

    if !result.ok {
        bail!("no string table parsed");
    }
    Ok(())
}
