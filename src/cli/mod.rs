//! CLI module for srcml-to-mse

mod args;

pub use args::{Args, DEFAULT_INPUT};

use crate::analysis::{Converter, Model};
use crate::compression::{create_output, output_path, read_input, Compression};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::MseWriter;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by RUST_LOG or the verbosity flag
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn execute(args: Args) -> Result<()> {
    let mut cfg = Config::discover(args.config.as_deref())?;
    cfg.merge_cli(args.package, args.strip_quotes);
    cfg.validate()?;

    if args.verbose {
        println!("Input: {}", args.input.display());
        println!("Package: {}", cfg.project.package);
        println!("Strip quotes: {}", cfg.conversion.strip_quotes);
    }

    if !args.input.exists() {
        return Err(Error::PathNotFound(args.input));
    }
    let output = args.output.unwrap_or_else(|| output_path(&args.input));

    let spinner = spinner();
    let converted = (|| -> Result<Model> {
        spinner.set_message(format!("Loading {}", args.input.display()));
        let text = read_input(&args.input)?;
        spinner.set_message("Converting...");
        Converter::new(cfg).convert_str(&text)
    })();
    spinner.finish_and_clear();
    let model = converted?;

    println!("{}", model.stats.summary());

    let sink = create_output(&output, Compression::from_path(&output))?;
    let mut writer = MseWriter::new(sink);
    writer.write_model(&model.registry)?;
    writer.into_inner().finish()?;

    println!(
        "Model with {} entities written to: {}",
        model.registry.len(),
        output.display()
    );
    Ok(())
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
