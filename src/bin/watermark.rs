use std::io;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use watermark_overlay::{session, Console, RunOptions};

#[derive(Parser)]
#[command(
    name = "watermark",
    about = "Overlay a watermark image onto a base image",
    version,
    after_help = "The tool asks for the input files, blending options and output filename \
                  interactively.\n\
                  Input errors end the session with a diagnostic and exit status 0."
)]
struct Cli {
    /// Log image metadata and the chosen options to stderr
    #[arg(short, long)]
    verbose: bool,

    /// JPEG quality for .jpg output (1-100)
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(1..=100))]
    jpeg_quality: u8,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let opts = RunOptions {
        jpeg_quality: cli.jpeg_quality,
    };

    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    let Err(err) = session::run(&mut console, &opts) else {
        return;
    };

    if !err.is_user_error() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
    if let Err(e) = console.say(&err.to_string()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
