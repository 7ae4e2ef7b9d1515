use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use funnel_server::{build_router, serve as serve_router, AppState};
use tokio::net::TcpListener;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

pub async fn serve(args: ServeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = config.open_store(cwd).await?;

    let addr = config.addr(args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot listen on {}", addr))?;

    println!("{}", "🚀 Starting funnel server...".bright_blue().bold());
    match &config.api_url {
        Some(url) => println!("  Proxying store: {}", url),
        None => println!("  Store directory: {}", config.get_store_dir(cwd).display()),
    }
    println!("  API:    http://{}/api/funnels", addr);
    println!("  Public: http://{}/p/<slug>", addr);

    let router = build_router(AppState::new(store).with_render_options(config.render));
    serve_router(listener, router).await?;

    Ok(())
}
