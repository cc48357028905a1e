use clap::{Parser, Subcommand};
use relay_sdk::{merge_guest_cart, GuestCartId, RelayClient};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Command-line client for the GraphQL relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    /// Bearer token to send; omit for anonymous requests.
    #[arg(short, long, env = "RELAY_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check relay health and the configured backend
    Health,
    /// Send a GraphQL query through the relay
    Query {
        query: String,
        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },
    /// Merge a guest cart into the signed-in account
    MergeCart { guest_cart_id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let token = cli.token.clone();
    let client = RelayClient::new(&cli.url, move || token.clone());

    match cli.command {
        Commands::Health => {
            print_json(&client.health().await?)?;
        }
        Commands::Query { query, variables } => {
            let variables = variables
                .map(|raw| serde_json::from_str::<Value>(&raw))
                .transpose()?;
            let response = client.execute(&query, variables).await?;
            if !(200..300).contains(&response.status) {
                eprintln!("Relay returned status {}", response.status);
            }
            print_json(&serde_json::json!({
                "data": response.data,
                "errors": response.errors,
            }))?;
        }
        Commands::MergeCart { guest_cart_id } => {
            let guest_cart_id = GuestCartId::parse(&guest_cart_id)?;
            print_json(&merge_guest_cart(&client, &guest_cart_id).await?)?;
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
