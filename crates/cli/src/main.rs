mod args;
mod json;
mod text;

use std::env;
use std::error::Error;

use args::{Command, ParsedArgs, parse_args, print_help};
use json::{map_report, write_json};
use text::format_text_report;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = env::args().skip(1).collect();
    let parsed = match parse_args(&argv) {
        Ok(Command::Help) => {
            print_help();
            return;
        }
        Ok(Command::Version) => {
            println!("code-sim-check {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Ok(Command::Run(parsed)) => parsed,
        Err(message) => {
            eprintln!("Error: {message}\n");
            print_help();
            std::process::exit(2);
        }
    };

    match run(&parsed) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

fn run(parsed: &ParsedArgs) -> Result<i32, Box<dyn Error>> {
    let report =
        code_sim_check_core::compare_files(&parsed.path_a, &parsed.path_b, &parsed.options)?;
    let report = map_report(report);

    if parsed.json {
        write_json(&report)?;
    } else {
        print!(
            "{}",
            format_text_report(
                &report,
                &parsed.path_a.display().to_string(),
                &parsed.path_b.display().to_string(),
            )
        );
    }

    Ok(0)
}
