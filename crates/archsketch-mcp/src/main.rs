//! `archsketch-mcp`: MCP server over stdio, plus `configure` and `generate`
//! subcommands.

mod configure;
mod server;

use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use archsketch_core::{read_settings, Sketcher};
use archsketch_suggest::resolve_generator;
use server::ArchsketchServer;

const LOG_ENV: &str = "ARCHSKETCH_LOG";

fn init_logging() {
    // stdout carries the MCP protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("configure") => return configure::configure(&args[1..]),
        Some("generate") => return generate(&args[1..]),
        _ => {}
    }

    let generator = resolve_generator(&read_settings()).await;
    let service = ArchsketchServer::new(Sketcher::default(), generator)
        .serve(rmcp::transport::io::stdio())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "MCP server error"))?;
    service.waiting().await?;
    Ok(())
}

/// `generate <type> <text...>`: rule-based only, prints the graph JSON.
fn generate(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let Some((requested, words)) = args.split_first() else {
        return Err("usage: archsketch-mcp generate <type|auto> <description...>".into());
    };
    let graph = Sketcher::default().generate(&words.join(" "), requested);
    println!("{}", graph.to_json_pretty()?);
    Ok(())
}
