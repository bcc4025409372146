//! `httpkit` command-line client.
//!
//! Sends one request through the pooled executor and prints the result.
//!
//! ```text
//! httpkit -X POST -d 'a=1' -H 'Accept: */*' -b 'sid=1' -L -i https://example.com/
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use httpkit::config::{load_config, HttpKitConfig};
use httpkit::files;
use httpkit::observability::logging::init_logging;
use httpkit::{HttpClient, HttpRequest, HttpResponse};

#[derive(Parser)]
#[command(name = "httpkit")]
#[command(about = "Send an HTTP request and print the decoded response", long_about = None)]
struct Cli {
    /// Target URL
    url: String,

    /// Request method (GET when omitted)
    #[arg(short = 'X', long = "request", default_value = "")]
    method: String,

    /// Request body
    #[arg(short = 'd', long)]
    data: Option<String>,

    /// Cookie string, e.g. "a=1; b=2"
    #[arg(short = 'b', long, default_value = "")]
    cookie: String,

    /// Extra header line, repeatable
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Follow redirects
    #[arg(short = 'L', long)]
    location: bool,

    /// Proxy URL (http, https or socks5)
    #[arg(short = 'x', long, default_value = "")]
    proxy: String,

    /// Overall timeout in seconds (0 uses the configured default)
    #[arg(short = 'm', long = "max-time", default_value_t = 0)]
    max_time: u64,

    /// Body size limit in bytes (0 uses the configured default)
    #[arg(long = "max-size", default_value_t = 0)]
    max_size: u64,

    /// Skip TLS certificate verification
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Print the status line and headers before the body
    #[arg(short = 'i', long)]
    include: bool,

    /// Write the body to a file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Print response metadata as JSON instead of the body
    #[arg(long)]
    json: bool,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => HttpKitConfig::default(),
    };
    init_logging(&config.logging)?;

    tracing::debug!(
        url = %cli.url,
        proxy = %cli.proxy,
        follow = cli.location,
        "Sending request"
    );

    let mut request = HttpRequest::new(cli.method.clone(), cli.url.clone())
        .cookie(cli.cookie.clone())
        .headers(cli.headers.join("\n"))
        .allow_redirects(cli.location)
        .proxy(cli.proxy.clone())
        .timeout_secs(cli.max_time)
        .max_response_bytes(cli.max_size)
        .ignore_cert_errors(cli.insecure);
    if let Some(data) = &cli.data {
        request = request.body(data.clone());
    }

    let client = HttpClient::new(&config);
    match client.execute(&request).await {
        Ok(response) => emit(&cli, &response),
        Err(failure) => {
            let (error, response) = failure.into_parts();
            if response.status_code != 0 {
                emit(&cli, &response)?;
            }
            Err(error.into())
        }
    }
}

fn emit(cli: &Cli, response: &HttpResponse) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.json {
        serde_json::to_writer_pretty(&mut out, response)?;
        writeln!(out)?;
        return Ok(());
    }

    if cli.include {
        out.write_all(response.status_line.as_bytes())?;
        out.write_all(response.raw_headers.as_bytes())?;
        out.write_all(b"\r\n")?;
    }

    match &cli.output {
        Some(path) => {
            files::write_bytes(path, &response.body)?;
            tracing::info!(path = %path.display(), bytes = response.body.len(), "Body written");
        }
        None => out.write_all(&response.body)?,
    }
    out.flush()?;
    Ok(())
}
