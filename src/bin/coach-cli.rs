use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, SET_COOKIE};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "coach-cli")]
#[command(about = "Command-line client for the HTTP Coach audit API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    server: String,

    /// Identity to send as the client_id cookie.
    #[arg(short, long)]
    client_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit the security headers of an https:// URL
    Audit { url: String },
    /// Show past audits for this client
    History,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(id) = &cli.client_id {
        headers.insert(COOKIE, HeaderValue::from_str(&format!("client_id={}", id))?);
    }

    let server = cli.server.trim_end_matches('/');
    let res = match cli.command {
        Commands::Audit { url } => {
            client
                .get(format!("{}/api/audit", server))
                .query(&[("url", url)])
                .headers(headers)
                .send()
                .await?
        }
        Commands::History => {
            client
                .get(format!("{}/api/history", server))
                .headers(headers)
                .send()
                .await?
        }
    };

    if let Some(cookie) = res.headers().get(SET_COOKIE).and_then(|v| v.to_str().ok()) {
        eprintln!("New identity issued: {}", cookie);
    }
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
