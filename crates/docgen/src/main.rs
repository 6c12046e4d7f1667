#![allow(clippy::print_stderr, clippy::print_stdout)]
mod doc;
mod logging;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use common::color::{ColorPreference, ColorTarget};
use doc_engine::ScanStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Generate the documentation data for the utilkit reference site.
#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Options {
    /// Project root containing package.json and the sources.
    #[arg(long, default_value = ".")]
    pub root: Utf8PathBuf,
    /// Output path for the JSON artifact.
    ///
    /// Relative paths are resolved against the root. Defaults to the
    /// `output` setting of docgen.toml.
    #[arg(long, value_name = "PATH")]
    pub out: Option<Utf8PathBuf>,
    /// How exported declarations are located (syntax or regex).
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<ScanStrategy>,
    /// Print the JSON to stdout instead of writing a file.
    #[arg(long, conflicts_with = "out")]
    pub stdout: bool,
    /// Print a per-category summary of the documented entries.
    #[arg(long)]
    pub summary: bool,
    /// List entries whose name, category or description contains QUERY.
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,
    /// Control colored output (auto, always, never).
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorChoice,
    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() {
    let opts = Options::parse();
    let preference = match opts.color {
        ColorChoice::Auto => ColorPreference::Auto,
        ColorChoice::Always => ColorPreference::Always,
        ColorChoice::Never => ColorPreference::Never,
    };
    colored::control::set_override(preference.enabled_for(ColorTarget::Stdout));

    logging::init(opts.verbose, preference.enabled_for(ColorTarget::Stderr));
    logging::setup_panic_hook();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: cannot start async runtime: {e}");
            std::process::exit(1);
        }
    };
    runtime.block_on(doc::generate_docs(&opts));
}
