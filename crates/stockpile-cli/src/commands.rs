use std::sync::Arc;

use anyhow::Context as _;
use colored::Colorize;
use serde_json::json;
use stockpile_item::decode_batch;
use stockpile_server::{ServerConfig, StockpileServer};
use stockpile_store::InMemoryHashStore;
use stockpile_types::ItemId;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Id(args) => {
            println!("{}", id_report(&args.action, cli.format)?);
            Ok(())
        }
        Command::Check(args) => {
            let data = std::fs::read(&args.file)
                .with_context(|| format!("reading {}", args.file.display()))?;
            println!("{}", check_report(&data, cli.format)?);
            Ok(())
        }
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind:?}"))?;
    }

    println!("{} Stockpile on {}", "✓".green().bold(), config.bind_addr.to_string().bold());
    let server = StockpileServer::new(config, Arc::new(InMemoryHashStore::new()));
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve_with_shutdown(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
        }
    }))?;
    Ok(())
}

fn id_report(action: &IdAction, format: OutputFormat) -> anyhow::Result<String> {
    let (name, id) = match action {
        IdAction::Encode { name } => {
            let id = ItemId::derive(name)?;
            (name.clone(), id.into_string())
        }
        IdAction::Decode { id } => {
            let id = ItemId::parse(id)?;
            (id.decode()?, id.into_string())
        }
    };
    Ok(match format {
        OutputFormat::Json => json!({ "name": name, "id": id }).to_string(),
        OutputFormat::Text => format!("{}  {:?}", id.cyan(), name),
    })
}

fn check_report(data: &[u8], format: OutputFormat) -> anyhow::Result<String> {
    let items = decode_batch(data)?;
    let report = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&items)?,
        OutputFormat::Text => {
            let mut lines = vec![format!("{} {} valid item(s)", "✓".green().bold(), items.len())];
            for item in &items {
                let id = item.id().map(ItemId::as_str).unwrap_or_default();
                lines.push(format!("  {}  {:?} x{}", id.cyan(), item.name(), item.qty()));
            }
            lines.join("\n")
        }
    };
    Ok(report)
}
