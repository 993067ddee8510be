use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use url::Url;

#[derive(Parser)]
#[command(name = "tenancy-cli")]
#[command(about = "Management CLI for the FlowClik tenancy service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Admin API key (required for `status` and `tenants`).
    #[arg(short, long, default_value = "")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a hostname and path
    Resolve {
        #[arg(long)]
        host: String,
        #[arg(long, default_value = "/")]
        path: String,
    },
    /// Build a tenant URL for a hostname
    Url {
        #[arg(long)]
        host: String,
        #[arg(long, default_value = "")]
        path: String,
    },
    /// Check service status
    Status,
    /// List tenant theme records
    Tenants,
}

fn endpoint(base: &str, path: &str, query: &[(&str, &str)]) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base)?.join(path)?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
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

    let url = match &cli.command {
        Commands::Resolve { host, path } => {
            endpoint(&cli.url, "/resolve", &[("host", host.as_str()), ("path", path.as_str())])?
        }
        Commands::Url { host, path } => {
            endpoint(&cli.url, "/url", &[("host", host.as_str()), ("path", path.as_str())])?
        }
        Commands::Status => endpoint(&cli.url, "/admin/status", &[])?,
        Commands::Tenants => endpoint(&cli.url, "/admin/tenants", &[])?,
    };

    let res = client.get(url).headers(headers).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: tenancy service returned status {}", status);
        if let Ok(text) = res.text().await {
            if !text.is_empty() {
                eprintln!("Response: {}", text);
            }
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
