use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings,
    pages::{entry, main as main_page},
    HandleSource, History, IcHandleProvider,
};
use shared::{
    domain::{Item, ItemId},
    protocol::ItemOutcome,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "items", about = "Command-line client for the items canister")]
struct Args {
    /// Network name; `ic` targets mainnet, anything else the local replica.
    #[arg(long, global = true)]
    network: Option<String>,
    /// Backend canister id; overrides `CANISTER_ID_BACKEND`.
    #[arg(long, global = true)]
    canister_id: Option<String>,
    /// Print JSON instead of a table.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the principal the backend sees for this client.
    Whoami,
    /// Entry page, then navigate to the main page and list every item.
    Browse,
    List {
        /// Only items owned by the caller.
        #[arg(long)]
        mine: bool,
    },
    Show {
        id: ItemId,
    },
    Create {
        name: String,
        description: String,
    },
    Update {
        id: ItemId,
        name: String,
        description: String,
    },
    Delete {
        id: ItemId,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(network) = args.network {
        settings.network = network;
    }
    if let Some(canister_id) = args.canister_id {
        settings.canister_id = canister_id;
    }

    let provider = IcHandleProvider::from_settings(settings);
    run(&provider, args.command, args.json).await
}

async fn run(handles: &dyn HandleSource, command: Command, json: bool) -> Result<()> {
    match command {
        Command::Whoami => {
            let state = entry::initialize_page(handles).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                println!("{}", state.identity);
            }
        }
        Command::Browse => {
            let history = History::new();
            let entry_state = entry::initialize_page(handles).await?;
            println!("Signed in as {}", entry_state.identity);

            entry::navigate_to_main(&history).await?;
            let trail: Vec<&str> = history
                .visited()
                .await
                .into_iter()
                .map(|route| route.path())
                .collect();
            info!(?trail, "browse: main page");

            let mut state = main_page::initialize_state();
            match main_page::load_all_items(handles).await {
                Ok(items) => state.items_loaded(items),
                Err(err) => state.failed(format!("{err:#}")),
            }
            if let Some(message) = state.error() {
                bail!("failed to load items: {message}");
            }
            print_items(&state.items, json)?;
        }
        Command::List { mine } => {
            let items = if mine {
                main_page::load_my_items(handles).await?
            } else {
                main_page::load_all_items(handles).await?
            };
            print_items(&items, json)?;
        }
        Command::Show { id } => {
            let item = main_page::load_item(handles, id).await?;
            print_items(std::slice::from_ref(&item), json)?;
        }
        Command::Create { name, description } => {
            let outcome = main_page::create_new_item(handles, &name, &description).await?;
            print_outcome("create", outcome, json)?;
        }
        Command::Update {
            id,
            name,
            description,
        } => {
            let outcome =
                main_page::update_existing_item(handles, id, &name, &description).await?;
            print_outcome("update", outcome, json)?;
        }
        Command::Delete { id } => {
            let confirmation = main_page::delete_existing_item(handles, id).await?;
            println!("{confirmation}");
        }
    }

    Ok(())
}

fn print_outcome(action: &str, outcome: ItemOutcome, json: bool) -> Result<()> {
    match outcome {
        ItemOutcome::Saved(item) => print_items(std::slice::from_ref(&item), json),
        ItemOutcome::Rejected(reason) => bail!("{action} rejected by backend: {reason}"),
    }
}

fn print_items(items: &[Item], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No items.");
        return Ok(());
    }

    println!("{:>6}  {:<24}  {:<20}  DESCRIPTION", "ID", "NAME", "UPDATED");
    for item in items {
        println!(
            "{:>6}  {:<24}  {:<20}  {}",
            item.id,
            item.name,
            format_timestamp(item.updated_at),
            item.description
        );
    }
    Ok(())
}

/// Renders canister time (nanoseconds since the epoch) as UTC.
fn format_timestamp(nanos: u64) -> String {
    let secs = i64::try_from(nanos / 1_000_000_000).unwrap_or(i64::MAX);
    let subsec = u32::try_from(nanos % 1_000_000_000).unwrap_or_default();
    DateTime::<Utc>::from_timestamp(secs, subsec)
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}
