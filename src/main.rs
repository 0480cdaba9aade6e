//! Command-line front end for the instrumented HTTP client.
//!
//! ```text
//! immutable-http-client [--config client.toml] [--log-events] \
//!     [-H name:value]... [-q name=value]... [-d body | -f name=value...] [--raw] \
//!     get|post|put|delete <url>
//! ```
//!
//! Prints the normalized response record as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use immutable_http_client::config::{load_config, ClientConfig};
use immutable_http_client::observability::logging;
use immutable_http_client::{HttpClient, Method, RequestOptions, SessionContext, TracingSink};

#[derive(Parser)]
#[command(name = "immutable-http-client")]
#[command(about = "Send an HTTP request through the instrumented client", long_about = None)]
struct Cli {
    /// TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log request/response/error events to the process log.
    #[arg(long)]
    log_events: bool,

    /// Request header as `name:value` (repeatable).
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Query parameter as `name=value` (repeatable).
    #[arg(short, long = "query", value_parser = parse_pair)]
    query: Vec<(String, String)>,

    /// Request body; sent as JSON when it parses as a JSON object or array.
    #[arg(short, long)]
    data: Option<String>,

    /// Form field as `name=value` (repeatable).
    #[arg(short, long = "form", value_parser = parse_pair)]
    form: Vec<(String, String)>,

    /// Do not parse JSON responses.
    #[arg(long)]
    raw: bool,

    /// Correlation id recorded in the httpRequest event.
    #[arg(long)]
    request_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a GET request
    Get { url: String },
    /// Send a POST request
    Post { url: String },
    /// Send a PUT request
    Put { url: String },
    /// Send a DELETE request
    Delete { url: String },
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("expected name:value, got '{}'", s))
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{}'", s))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    logging::init(&config.observability)?;

    let client = HttpClient::from_config(&config)?;
    if cli.log_events || config.observability.log_events {
        client.set_log_sink(TracingSink);
    }

    let (method, url) = match cli.command {
        Commands::Get { url } => (Method::GET, url),
        Commands::Post { url } => (Method::POST, url),
        Commands::Put { url } => (Method::PUT, url),
        Commands::Delete { url } => (Method::DELETE, url),
    };

    let mut options = RequestOptions::new().method(method);
    options.headers = cli.headers;
    options.query = cli.query;
    options.form = cli.form;
    if let Some(data) = cli.data {
        options.body = Some(match serde_json::from_str::<Value>(&data) {
            Ok(value @ (Value::Object(_) | Value::Array(_))) => value,
            _ => Value::String(data),
        });
    }
    if cli.raw {
        options.json = Some(false);
    }

    let mut session = SessionContext::new();
    session.request_id = cli.request_id;

    let record = client.request(url, options, session).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
