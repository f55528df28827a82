//! CLI tool for extracting resume text from a PDF or DOCX file.

mod pipeline;

use anyhow::Result;
use clap::Parser;
use pipeline::{Config, Outcome};
use std::path::PathBuf;

/// Extract the text of the resume in the input directory to a plain text file.
#[derive(Parser, Debug)]
#[command(name = "parse-cv")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory scanned for a .pdf or .docx resume
    #[arg(short, long, default_value = pipeline::DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Output text file
    #[arg(short, long, default_value = pipeline::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Print the text to stdout instead of writing the output file
    #[arg(short, long)]
    print: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = Config {
        input_dir: args.input_dir,
        output: args.output,
        print: args.print,
    };

    match pipeline::run(&config)? {
        Outcome::NotFound => {
            println!("{}", pipeline::not_found_message(&config.input_dir));
        }
        Outcome::Printed { text } => {
            print!("{}", text);
        }
        Outcome::Written {
            source,
            output,
            fragments,
        } => {
            log::debug!(
                "Wrote {} {}(s) from {}",
                fragments,
                source.format.fragment_kind(),
                source.filename()
            );
            println!("{}", pipeline::success_message(&output));
        }
    }

    Ok(())
}
