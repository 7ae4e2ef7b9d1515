use crate::config::Config;
use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use colored::Colorize;
use funnel_editor::{inspector, BlockFactory, Command, EditSession, LoadOutcome, PersistenceAdapter};
use funnel_model::{BlockId, BlockKind};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Funnel id
    pub id: String,

    /// JSON file with a list of editor commands
    #[arg(short, long)]
    pub commands: Option<PathBuf>,

    /// Append a default block (heading, video, button, image, code)
    #[arg(short, long = "add", value_name = "TYPE")]
    pub add: Vec<BlockKind>,

    /// Change a field, e.g. `block-1:text=Hello`
    #[arg(short, long = "set", value_name = "ID:FIELD=VALUE")]
    pub set: Vec<String>,

    /// Apply without saving
    #[arg(long)]
    pub no_save: bool,

    /// Save even when the stored document could not be loaded
    #[arg(long)]
    pub force: bool,
}

/// A parsed `--set` argument
#[derive(Debug, PartialEq, Eq)]
struct FieldEdit {
    id: BlockId,
    key: String,
    value: String,
}

fn parse_field_edit(raw: &str) -> Result<FieldEdit> {
    let (id, rest) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("Expected ID:FIELD=VALUE, got `{}`", raw))?;
    let (key, value) = rest
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected ID:FIELD=VALUE, got `{}`", raw))?;

    Ok(FieldEdit {
        id: BlockId::new(id),
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn read_commands(path: &PathBuf) -> Result<Vec<Command>> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("Invalid commands in {}", path.display()))
}

/// Build the full command list: file commands, then additions, then field edits
fn collect_commands(args: &EditArgs, session: &EditSession) -> Result<Vec<Command>> {
    let mut commands = match &args.commands {
        Some(path) => read_commands(path)?,
        None => Vec::new(),
    };

    let mut factory = BlockFactory::new();
    for kind in &args.add {
        let mut block = factory.create_for(session.store(), *kind);
        // Ids taken by earlier additions in this batch are not in the store yet
        while commands.iter().any(|command| {
            matches!(command, Command::AddBlock { block: queued } if queued.id() == block.id())
        }) {
            block = factory.create_for(session.store(), *kind);
        }
        commands.push(Command::AddBlock { block });
    }

    for raw in &args.set {
        let edit = parse_field_edit(raw)?;
        let kind = session
            .store()
            .block(&edit.id)
            .map(|block| block.kind())
            .or_else(|| queued_kind(&commands, &edit.id))
            .ok_or_else(|| anyhow!("No block with id {}", edit.id))?;
        let patch = inspector::edit(kind, &edit.key, &edit.value)?;
        commands.push(Command::UpdateBlock { id: edit.id, patch });
    }

    Ok(commands)
}

fn queued_kind(commands: &[Command], id: &BlockId) -> Option<BlockKind> {
    commands.iter().find_map(|command| match command {
        Command::AddBlock { block } if block.id() == id => Some(block.kind()),
        _ => None,
    })
}

pub async fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = config.open_store(cwd).await?;

    let mut session = EditSession::open(args.id.clone(), PersistenceAdapter::new(store)).await;
    match session.load_outcome() {
        LoadOutcome::Loaded => println!(
            "{} Loaded {} blocks",
            "✓".green(),
            session.store().len()
        ),
        LoadOutcome::Bootstrapped => println!("{} Starting a new document", "✓".green()),
        LoadOutcome::Degraded { reason } => {
            println!("{} Could not load document: {}", "⚠️".yellow(), reason)
        }
    }
    for skipped in session.skipped_blocks() {
        println!(
            "  {} Skipped block {} ({}): {}",
            "⚠️".yellow(),
            skipped.id.as_deref().unwrap_or("?"),
            skipped.block_type.as_deref().unwrap_or("?"),
            skipped.reason
        );
    }

    let commands = collect_commands(&args, &session)?;
    for command in commands {
        let name = command.name();
        tracing::debug!(command = name, "Applying command");
        if !session.apply(command)?.is_applied() {
            println!("  {} {} had no effect", "-".dimmed(), name);
        }
    }

    for block in session.store().blocks() {
        let marker = if session.store().selected() == Some(block.id()) {
            "▸"
        } else {
            " "
        };
        println!("  {} {:>2} {:<8} {}", marker, block.order(), block.kind(), block.id());
    }

    if args.no_save {
        println!("{}", "Changes not saved (--no-save)".yellow());
        return Ok(());
    }
    if !session.is_dirty() {
        println!("{}", "Nothing to save".dimmed());
        return Ok(());
    }
    if session.load_outcome().is_degraded() && !args.force {
        bail!("Refusing to overwrite a document that failed to load; use --force");
    }

    session.save().await?;
    println!("{}", "✅ Saved".green().bold());

    Ok(())
}
