use clap::{Arg, Command};
use std::env;
use std::process;
use tracing::{error, info, warn};

mod extract;
mod summarize;
mod web;

use summarize::gemini::{GeminiClient, DEFAULT_MODEL};
use web::server::SummaryServer;

const DEFAULT_BIND: &str = "127.0.0.1:8490";

/// Prints a small fixed-width startup box with the given lines centered.
fn print_box(lines: &[&str]) {
    const BOX_WIDTH: usize = 56;

    eprintln!("\n+{}+", "-".repeat(BOX_WIDTH - 2));
    for line in lines {
        let content = BOX_WIDTH - 4;
        let padding = content.saturating_sub(line.len());
        let left = padding / 2;
        let right = padding - left;
        eprintln!("| {}{}{} |", " ".repeat(left), line, " ".repeat(right));
    }
    eprintln!("+{}+\n", "-".repeat(BOX_WIDTH - 2));
}

#[tokio::main]
async fn main() {
    // A local .env file may hold the API key; ignore it when absent.
    dotenvy::dotenv().ok();

    let matches = Command::new("docsum")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A web utility that summarizes PDF and Word documents")
        .long_about(
            "Serves a small web page where a PDF or Word document can be uploaded.\n\
            The document's text is extracted and summarized with the Gemini API,\n\
            and the summary can be downloaded as a plain-text file.",
        )
        .arg(
            Arg::new("bind")
                .long("bind")
                .value_name("ADDR")
                .help(format!("Address to listen on (default: {})", DEFAULT_BIND))
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .value_name("KEY")
                .help("Gemini API key (falls back to GEMINI_API_KEY)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("model")
                .long("model")
                .value_name("NAME")
                .help(format!("Gemini model to use (default: {})", DEFAULT_MODEL))
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Suppress the startup banner")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Initialize tracing to stderr, honoring RUST_LOG when set
    let log_level = if std::env::var("RUST_LOG").is_ok() {
        None
    } else if matches.get_flag("quiet") {
        Some("error")
    } else {
        Some("info")
    };

    let subscriber = tracing_subscriber::fmt().with_writer(std::io::stderr);

    if let Some(level) = log_level {
        std::env::set_var("RUST_LOG", level);
    }

    subscriber.init();

    // Resolve configuration from command line arguments or environment
    let api_key = matches
        .get_one::<String>("api-key")
        .cloned()
        .or_else(|| env::var("GEMINI_API_KEY").ok());

    let bind = matches
        .get_one::<String>("bind")
        .cloned()
        .or_else(|| env::var("DOCSUM_BIND").ok())
        .unwrap_or_else(|| DEFAULT_BIND.to_string());

    let model = matches
        .get_one::<String>("model")
        .cloned()
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // Log credential status (without exposing secrets). A missing key does
    // not prevent startup; uploads then fail with a configuration error
    // until the key is provided.
    let summarizer = match api_key {
        Some(key) => {
            info!("Gemini API key found, summarization enabled (model: {})", model);
            Some(GeminiClient::with_model(key, model))
        }
        None => {
            warn!("Gemini API key not found - set GEMINI_API_KEY or pass --api-key");
            None
        }
    };

    if !matches.get_flag("quiet") {
        print_box(&[
            "docsum: Document Summarizer",
            "",
            "Upload PDF or Word notes, get a Gemini summary",
        ]);
    }

    info!("Starting document summarizer on http://{}", bind);

    let server = SummaryServer::new(bind, summarizer);
    if let Err(e) = server.serve().await {
        error!("Failed to start server: {}", e);
        process::exit(1);
    }
}
