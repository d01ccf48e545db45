//! `json-patch`: apply a JSON Patch to a document.
//!
//! Usage:
//!   json-patch [--doc <file>] [--on-error throw|skip] '<patch-array-json>'
//!   json-patch [--doc <file>] --patch-file <file>
//!
//! The document is read from stdin unless `--doc` is given. The patched
//! document is written to stdout as pretty-printed JSON.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use json_patcher::json_cli::{apply_json_patch, CliError};
use json_patcher::json_patch::{ErrorHandling, PatchOptions};

#[derive(Parser, Debug)]
#[command(name = "json-patch", version, about, long_about = None)]
struct Args {
    /// Patch operations as a JSON array
    #[arg(required_unless_present = "patch_file")]
    patch: Option<String>,

    /// Read the patch operations from a file
    #[arg(long, conflicts_with = "patch")]
    patch_file: Option<PathBuf>,

    /// Read the document from a file instead of stdin
    #[arg(long)]
    doc: Option<PathBuf>,

    /// Handling of failed operations that carry no `onError` of their own
    #[arg(long, default_value = "throw")]
    on_error: ErrorHandling,
}

fn run(args: Args) -> Result<String, CliError> {
    let patch = match (args.patch, args.patch_file) {
        (Some(patch), _) => patch,
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => "[]".to_string(),
    };
    let doc = match args.doc {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let options = PatchOptions {
        on_error: args.on_error,
    };
    apply_json_patch(doc.trim(), patch.trim(), &options)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("json_patcher=warn"))
        .init();

    let args = Args::parse();
    log::debug!("{args:?}");

    match run(args) {
        Ok(result) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{result}") {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
