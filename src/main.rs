use std::{ffi::OsString, process::ExitCode};

use clap::Parser;
use eolify_utf16::{Error, Invocation};
use log::{debug, error, info, LevelFilter};

/// Convert the line endings and byte order of a UTF-16 text file.
///
/// Usage: convert <src> <dst> [<srcOS> <dstOS> [-swap]]
/// where <srcOS> and <dstOS> are one of -mac, -unix or -win.
///
/// Every argument is positional, so a path may look like a flag. The log level
/// is taken from RUST_LOG.
#[derive(Parser, Debug)]
#[command(
    name = "convert",
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// <src> <dst> [<srcOS> <dstOS> [-swap]]
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<OsString>,
}

fn init_logging() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    // Usage errors are a silent no-op.
    let Ok(cli) = Cli::try_parse() else {
        return ExitCode::SUCCESS;
    };
    init_logging();

    let Some(invocation) = Invocation::parse(cli.args.as_slice()) else {
        debug!("expected 2, 4 or 5 arguments, got {}; nothing to do", cli.args.len());
        return ExitCode::SUCCESS;
    };

    match invocation.run() {
        Ok(written) => {
            info!(
                "wrote {written} bytes to {}",
                invocation.destination.display()
            );
            ExitCode::SUCCESS
        }
        Err(err @ (Error::SameFile | Error::SourceOpen { .. })) => {
            debug!("{err}; nothing to do");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
