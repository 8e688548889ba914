//! Command-line reader: extracts the readable article from a local HTML file
//! or stdin and prints it to stdout.
//!
//! ```text
//! readable [--document] [--url URL] [--text] [--debug] [PATH|-]
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`. Scoring events
//! are logged under the `readable_article::diagnostics` target.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Parser;
use readable_article::{Article, Diagnostics, Options, RecordingDiagnostics, TracingDiagnostics};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "readable")]
#[command(about = "Extract the readable article from an HTML page")]
#[command(version)]
struct Cli {
    /// Return a full HTML document instead of a fragment
    #[arg(short = 'f', long)]
    document: bool,

    /// Base URL used to make links absolute
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Print the annotated paragraphs as JSON
    #[arg(short, long)]
    text: bool,

    /// Print the candidate scoring report to stderr
    #[arg(short, long)]
    debug: bool,

    /// HTML file to read; `-` or nothing reads stdin
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,
}

fn read_input(path: Option<&Path>) -> io::Result<Vec<u8>> {
    match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => fs::read(path),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let options = Options {
        return_fragment: !cli.document,
        url: cli.url,
        ..Options::default()
    };
    options.validate().map_err(|e| e.to_string())?;

    let html = read_input(cli.path.as_deref()).map_err(|e| format!("failed to read input: {e}"))?;

    let recorder = Arc::new(RecordingDiagnostics::new());
    let mut article = Article::new(html, options);
    if cli.debug {
        article = article.with_diagnostics(recorder.clone());
    } else if TracingDiagnostics.enabled() {
        article = article.with_diagnostics(Arc::new(TracingDiagnostics));
    }

    if cli.text {
        let json = serde_json::to_string_pretty(&article.main_text()).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        println!("{}", article.readable());
    }

    if cli.debug {
        eprintln!("{}", recorder.report());
        for candidate in article.candidates() {
            eprintln!("{candidate}");
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(message) = run(Cli::parse()) {
        eprintln!("{message}");
        process::exit(1);
    }
}
