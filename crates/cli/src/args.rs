use std::path::PathBuf;

use code_sim_check_core::CompareOptions;

const HELP_TEXT: &str = concat!(
    "code-sim-check (source code similarity report)\n",
    "\n",
    "Usage:\n",
    "  code-sim-check [options] <file-a> <file-b>\n",
    "\n",
    "Options:\n",
    "  --json                  Output JSON\n",
    "  --keep-comments         Compare comment text too (default: comments stripped)\n",
    "  --keep-whitespace       Keep original spacing (default: collapsed)\n",
    "  --keep-identifiers      Do not canonicalize identifier names\n",
    "  --kgram-size <n>        Fingerprint k-gram size (default: 5)\n",
    "  --window-size <n>       Winnowing window size (default: 10)\n",
    "  --min-segment-len <n>   Minimum matching segment length in lines (default: 3)\n",
    "  --top-segments <n>      Matching segments to report (default: 5)\n",
    "  -V, --version           Show version\n",
    "  -h, --help              Show help\n",
    "\n",
    "Examples:\n",
    "  code-sim-check a.cpp b.cpp\n",
    "  code-sim-check --json --top-segments 10 a.cpp b.cpp\n",
    "  code-sim-check --keep-identifiers old.cpp new.cpp\n",
    "\n"
);

#[derive(Debug, Clone)]
pub(crate) struct ParsedArgs {
    pub(crate) json: bool,
    pub(crate) path_a: PathBuf,
    pub(crate) path_b: PathBuf,
    pub(crate) options: CompareOptions,
}

#[derive(Debug, Clone)]
pub(crate) enum Command {
    Run(Box<ParsedArgs>),
    Help,
    Version,
}

pub(crate) fn print_help() {
    print!("{HELP_TEXT}");
}

fn parse_usize_min(name: &str, raw: &str, min: usize) -> Result<usize, String> {
    let value = raw
        .parse::<usize>()
        .map_err(|_| format!("{name} must be an integer"))?;
    if value < min {
        return Err(format!("{name} must be >= {min}"));
    }
    Ok(value)
}

pub(crate) fn parse_args(argv: &[String]) -> Result<Command, String> {
    let mut json = false;
    let mut ignore_comments = true;
    let mut ignore_whitespace = true;
    let mut normalize_identifiers = true;
    let mut kgram_size: Option<usize> = None;
    let mut window_size: Option<usize> = None;
    let mut min_segment_len: Option<usize> = None;
    let mut top_segments: Option<usize> = None;
    let mut paths: Vec<PathBuf> = Vec::new();

    let mut i = 0;
    while i < argv.len() {
        let arg = &argv[i];
        if arg == "--" {
            paths.extend(argv[(i + 1)..].iter().map(PathBuf::from));
            break;
        }
        if arg == "--json" {
            json = true;
            i += 1;
            continue;
        }
        if arg == "--keep-comments" {
            ignore_comments = false;
            i += 1;
            continue;
        }
        if arg == "--keep-whitespace" {
            ignore_whitespace = false;
            i += 1;
            continue;
        }
        if arg == "--keep-identifiers" {
            normalize_identifiers = false;
            i += 1;
            continue;
        }
        if arg == "--kgram-size" {
            let raw = argv.get(i + 1).ok_or("--kgram-size requires a value")?;
            kgram_size = Some(parse_usize_min("--kgram-size", raw, 1)?);
            i += 2;
            continue;
        }
        if arg == "--window-size" {
            let raw = argv.get(i + 1).ok_or("--window-size requires a value")?;
            window_size = Some(parse_usize_min("--window-size", raw, 1)?);
            i += 2;
            continue;
        }
        if arg == "--min-segment-len" {
            let raw = argv
                .get(i + 1)
                .ok_or("--min-segment-len requires a value")?;
            min_segment_len = Some(parse_usize_min("--min-segment-len", raw, 1)?);
            i += 2;
            continue;
        }
        if arg == "--top-segments" {
            let raw = argv.get(i + 1).ok_or("--top-segments requires a value")?;
            top_segments = Some(parse_usize_min("--top-segments", raw, 0)?);
            i += 2;
            continue;
        }
        if arg == "-h" || arg == "--help" {
            return Ok(Command::Help);
        }
        if arg == "-V" || arg == "--version" {
            return Ok(Command::Version);
        }
        if arg.starts_with('-') {
            return Err(format!("Unknown option: {arg}"));
        }
        paths.push(PathBuf::from(arg));
        i += 1;
    }

    if paths.len() != 2 {
        return Err(format!(
            "expected exactly two input files, got {}",
            paths.len()
        ));
    }
    let path_b = paths.pop().expect("two paths");
    let path_a = paths.pop().expect("two paths");

    let mut options = CompareOptions::default();
    options.ignore_comments = ignore_comments;
    options.ignore_whitespace = ignore_whitespace;
    options.normalize_identifiers = normalize_identifiers;
    if let Some(kgram_size) = kgram_size {
        options.kgram_size = kgram_size;
    }
    if let Some(window_size) = window_size {
        options.window_size = window_size;
    }
    if let Some(min_segment_len) = min_segment_len {
        options.min_segment_len = min_segment_len;
    }
    if let Some(top_segments) = top_segments {
        options.top_segments = top_segments;
    }

    Ok(Command::Run(Box::new(ParsedArgs {
        json,
        path_a,
        path_b,
        options,
    })))
}
