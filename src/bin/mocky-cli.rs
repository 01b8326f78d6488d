use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "mocky-cli")]
#[command(about = "Inspect a running Mocky server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the routes compiled from the OpenAPI spec
    Routes,
    /// Show application metadata
    Info,
    /// Check server liveness
    Health,
    /// Dump Prometheus metrics (requires --otel on the server)
    Metrics,
}

impl Commands {
    fn endpoint(&self) -> &'static str {
        match self {
            Commands::Routes => "/mocky/routes",
            Commands::Info => "/mocky/info",
            Commands::Health => "/mocky/health",
            Commands::Metrics => "/mocky/metrics",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let url = format!("{}{}", cli.url.trim_end_matches('/'), cli.command.endpoint());
    let res = client.get(url).send().await?;

    match cli.command {
        Commands::Metrics => print_text(res).await?,
        _ => print_json(res).await?,
    }

    Ok(())
}

async fn check_status(res: reqwest::Response) -> Result<Option<reqwest::Response>, Box<dyn std::error::Error>> {
    let status = res.status();
    if status.is_success() {
        return Ok(Some(res));
    }
    eprintln!("Error: Mocky returned status {}", status);
    if let Ok(text) = res.text().await {
        eprintln!("Response: {}", text);
    }
    Ok(None)
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let Some(res) = check_status(res).await? else {
        return Ok(());
    };
    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

async fn print_text(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let Some(res) = check_status(res).await? else {
        return Ok(());
    };
    print!("{}", res.text().await?);
    Ok(())
}
