use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "session-cli")]
#[command(about = "Inspect a running dapp-bootstrap instance", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the bootstrap phase
    Status,
    /// Dump the full session (network, account, contracts)
    Session,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/session", cli.url.trim_end_matches('/')))
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let session: Value = res.json().await?;
    match cli.command {
        Commands::Status => {
            println!("{}", serde_json::to_string_pretty(&session["phase"])?);
        }
        Commands::Session => {
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
    }

    Ok(())
}
