use clap::{Parser, Subcommand};
use delivery_zones::config::{load_config, validation::dead_patterns};
use delivery_zones::http::{ChargeRequest, CheckRequest};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "zones-cli")]
#[command(about = "Operator CLI for the delivery-zone service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, env = "DELIVERY_ZONES_ADMIN_KEY", default_value = "")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote the delivery charge for a postal code
    Quote {
        postal_code: String,
        #[arg(long)]
        cart_total: Option<f64>,
    },
    /// Check whether a postal code is serviceable
    Check { postal_code: String },
    /// List configured zones (admin)
    Zones,
    /// Show how a postal code resolves (admin)
    Explain { postal_code: String },
    /// Check service status (admin)
    Status,
    /// Show request counters (admin)
    Stats,
    /// Validate a configuration file without contacting the service
    Validate { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if !cli.key.is_empty() {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
        );
    }

    let res = match cli.command {
        Commands::Quote {
            postal_code,
            cart_total,
        } => {
            client
                .post(format!("{}/api/delivery/charge", cli.url))
                .json(&ChargeRequest {
                    postal_code,
                    cart_total,
                })
                .send()
                .await?
        }
        Commands::Check { postal_code } => {
            client
                .post(format!("{}/api/delivery/check", cli.url))
                .json(&CheckRequest { postal_code })
                .send()
                .await?
        }
        Commands::Zones => admin_get(&client, &cli.url, "zones", headers).await?,
        Commands::Explain { postal_code } => {
            admin_get(&client, &cli.url, &format!("resolve/{postal_code}"), headers).await?
        }
        Commands::Status => admin_get(&client, &cli.url, "status", headers).await?,
        Commands::Stats => admin_get(&client, &cli.url, "stats", headers).await?,
        Commands::Validate { path } => return validate(&path),
    };

    print_response(res).await
}

async fn admin_get(
    client: &reqwest::Client,
    url: &str,
    path: &str,
    headers: HeaderMap,
) -> Result<reqwest::Response, reqwest::Error> {
    client
        .get(format!("{url}/admin/{path}"))
        .headers(headers)
        .send()
        .await
}

fn validate(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match load_config(path) {
        Ok(config) => {
            let active = config.zones.iter().filter(|z| z.is_active).count();
            println!(
                "{}: ok ({} zones, {} active)",
                path.display(),
                config.zones.len(),
                active
            );
            for (zone, pattern) in dead_patterns(&config) {
                println!("warning: zone '{zone}': pattern '{pattern}' can never match");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
