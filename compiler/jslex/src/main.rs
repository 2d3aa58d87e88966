//! jslex CLI
//!
//! Prints the token stream of a JavaScript source, one token per line.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use jslex::{init_tracing, run, CliError, DumpOptions, Summary};
use jslex_core::{WindowOptions, DEFAULT_CHUNK_SIZE};

#[derive(Parser)]
#[command(
    name = "jslex",
    version,
    about = "Tokenize JavaScript and print one token per line"
)]
struct Cli {
    /// JavaScript file to tokenize; stdin when absent or `-`
    path: Option<PathBuf>,

    /// Print whitespace tokens too
    #[arg(long)]
    all: bool,

    /// Bytes requested from the input per refill
    #[arg(long, env = "JSLEX_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Release each token's bytes after printing it
    #[arg(long)]
    release: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn execute(cli: &Cli) -> Result<Summary, CliError> {
    let options = DumpOptions {
        all: cli.all,
        release: cli.release,
        window: WindowOptions {
            chunk_size: cli.chunk_size,
            ..WindowOptions::default()
        },
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let path = cli.path.as_deref().filter(|path| *path != Path::new("-"));
    let result = match path {
        None => run(io::stdin().lock(), &mut out, &options),
        Some(path) => {
            let file = File::open(path).map_err(|source| CliError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            run(file, &mut out, &options)
        }
    };
    // Flush even on failure so the summary line precedes the error message.
    out.flush().map_err(CliError::Output)?;
    result
}
