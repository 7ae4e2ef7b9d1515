use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use funnel_editor::{EditSession, LoadOutcome, PersistenceAdapter};
use funnel_model::BlockId;
use funnel_renderer::{render_authoring, AuthoringView};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Funnel id
    pub id: String,

    /// Block to mark as selected
    #[arg(short, long)]
    pub select: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Authoring view of the stored document
pub async fn preview(args: PreviewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = config.open_store(cwd).await?;

    let mut session = EditSession::open(args.id.clone(), PersistenceAdapter::new(store)).await;
    if let LoadOutcome::Degraded { reason } = session.load_outcome() {
        eprintln!("{} Could not load document: {}", "⚠️".yellow(), reason);
    }

    if let Some(id) = args.select {
        let id = BlockId::new(id);
        if session.store_mut().select_block(Some(&id)).is_err() {
            bail!("No block with id {}", id);
        }
    }

    let store = session.store();
    let html = render_authoring(
        store.blocks(),
        store.selected(),
        &AuthoringView::new(),
        config.render,
    );

    match args.out {
        Some(out) => {
            fs::write(&out, html)?;
            eprintln!("{} Wrote {}", "✓".green(), out.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}
