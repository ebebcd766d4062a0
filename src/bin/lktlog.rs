//! lktlog CLI: converts logbook records into an RDF file.
//!
//! Usage:
//!   lktlog -i logbook.yaml [-o out.ttl] [-f TTL|RDF/XML|NTRIPLES|JSON-LD] [--strict]

use clap::Parser;
use lktlog::{convert, ConvertConfig, ValidationPolicy, SUPPORTED_FORMATS};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "lktlog",
    version,
    about = "Convert laboratory logbook sheets into a provenance-annotated RDF graph"
)]
struct Cli {
    /// Input file that's supposed to be parsed (YAML or JSON records)
    #[arg(short = 'i', long = "in-file")]
    input: PathBuf,

    /// Path and name of the output file. Files with the same name will be
    /// overwritten. Default file name uses format 'yyyyMMddHHmm_out.<ext>'
    #[arg(short = 'o', long = "out-file")]
    output: Option<PathBuf>,

    /// Format of the RDF file that will be written
    #[arg(short = 'f', long = "out-format", default_value = "TTL")]
    format: String,

    /// Abort on the first invalid sheet or entry instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Log debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> i32 {
    let config = match ConvertConfig::new(&cli.input).with_format_name(&cli.format) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Supported formats: {}", SUPPORTED_FORMATS.join(", "));
            return 1;
        }
    };
    let mut config = config.with_policy(if cli.strict {
        ValidationPolicy::Abort
    } else {
        ValidationPolicy::SkipInvalid
    });
    if let Some(output) = cli.output {
        config = config.with_output(output);
    }

    match convert(&config) {
        Ok(report) => {
            println!(
                "Wrote {} statements to {}",
                report.summary.statements,
                report.output.display()
            );
            for rejected in &report.rejected {
                println!("Skipped {}", rejected);
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    std::process::exit(run(cli));
}
