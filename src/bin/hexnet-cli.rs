use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::{json, Value};

use hexnet::convert::{convert, decode_rows, encode_row, ConversionRow};

#[derive(Parser)]
#[command(name = "hexnet-cli")]
#[command(about = "Convert DHCP option 121/249 routes to and from hex", long_about = None)]
struct Cli {
    /// Send requests to a running hexnet service instead of converting locally.
    #[arg(short, long)]
    url: Option<String>,

    /// Print rows as JSON.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a target CIDR and gateway into a single-record blob
    Encode { target: String, route: String },
    /// Decode a hex blob with one or more records
    Decode { hex: String },
    /// Convert lines from a file or stdin ("target route" or a hex blob per line)
    Convert {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let rows = match &cli.url {
        Some(url) => run_remote(url, cli.command).await?,
        None => run_local(cli.command)?,
    };

    println!("{}", render(&rows, cli.json)?);
    Ok(exit_code(&rows))
}

fn read_input(file: Option<PathBuf>) -> std::io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// Run a subcommand in-process.
fn run_local(command: Commands) -> std::io::Result<Vec<ConversionRow>> {
    Ok(match command {
        Commands::Encode { target, route } => vec![encode_row(&target, &route)],
        Commands::Decode { hex } => decode_rows(&hex),
        Commands::Convert { file } => convert(&read_input(file)?),
    })
}

/// Run a subcommand against the service's JSON API.
async fn run_remote(url: &str, command: Commands) -> Result<Vec<ConversionRow>, Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let base = url.trim_end_matches('/');

    match command {
        Commands::Encode { target, route } => {
            let body = post(&client, &format!("{base}/api/encode"), json!({ "target": target, "route": route })).await?;
            Ok(vec![ConversionRow {
                hex: body["hex"].as_str().map(str::to_string),
                error: body["error"].as_str().map(str::to_string),
                target: Some(target),
                route: Some(route),
            }])
        }
        Commands::Decode { hex } => {
            let mut body = post(&client, &format!("{base}/api/decode"), json!({ "hex": hex })).await?;
            let mut rows: Vec<ConversionRow> = match body["records"].take() {
                Value::Null => Vec::new(),
                records => serde_json::from_value(records)?,
            };
            if let Some(error) = body["error"].as_str() {
                rows.push(ConversionRow {
                    hex: Some(hex),
                    error: Some(error.to_string()),
                    ..Default::default()
                });
            }
            Ok(rows)
        }
        Commands::Convert { file } => {
            let input = read_input(file)?;
            let mut body = post(&client, &format!("{base}/api/convert"), json!({ "data": input })).await?;
            Ok(serde_json::from_value(body["rows"].take())?)
        }
    }
}

/// POST a JSON body. A `422` carries a codec error body and is returned like a success.
async fn post(client: &reqwest::Client, url: &str, body: Value) -> Result<Value, Box<dyn std::error::Error>> {
    let res = client.post(url).json(&body).send().await?;

    let status = res.status();
    if !status.is_success() && status != StatusCode::UNPROCESSABLE_ENTITY {
        let text = res.text().await.unwrap_or_default();
        return Err(format!("hexnet API returned status {status}: {text}").into());
    }
    Ok(res.json().await?)
}

fn exit_code(rows: &[ConversionRow]) -> ExitCode {
    if rows.iter().any(ConversionRow::is_error) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn render(rows: &[ConversionRow], as_json: bool) -> Result<String, serde_json::Error> {
    if as_json {
        serde_json::to_string_pretty(&json!({ "rows": rows }))
    } else {
        Ok(rows.iter().map(format_row).collect::<Vec<_>>().join("\n"))
    }
}

fn format_row(row: &ConversionRow) -> String {
    let cell = |v: &Option<String>| v.as_deref().unwrap_or("-").to_string();
    match &row.error {
        Some(error) => format!(
            "{}\t{}\t{}\terror: {}",
            cell(&row.target),
            cell(&row.route),
            cell(&row.hex),
            error
        ),
        None => format!("{}\t{}\t{}", cell(&row.target), cell(&row.route), cell(&row.hex)),
    }
}
