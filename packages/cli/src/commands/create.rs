use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use funnel_model::{normalize_slug, Funnel};
use funnel_store::generate_funnel_id;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Display name
    pub name: String,

    /// Public path under /p/
    #[arg(short, long)]
    pub slug: String,

    /// Funnel id (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,
}

pub async fn create(args: NewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = config.open_store(cwd).await?;

    let slug = normalize_slug(&args.slug);
    if slug.is_empty() {
        bail!("Slug must not be empty");
    }

    let id = args.id.unwrap_or_else(generate_funnel_id);
    let funnel = store.create(Funnel::new(id, args.name, &slug)).await?;

    println!(
        "{} Created funnel {} ({})",
        "✓".green(),
        funnel.name.bright_white(),
        funnel.id
    );
    println!("  Public path: /p/{}", funnel.slug);
    println!("  Not published yet. Run: funnel publish {}", funnel.id);

    Ok(())
}
