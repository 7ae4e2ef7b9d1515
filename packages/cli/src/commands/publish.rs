use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Funnel id
    pub id: String,

    /// Unpublish instead
    #[arg(long)]
    pub off: bool,
}

pub async fn publish(args: PublishArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = config.open_store(cwd).await?;

    let funnel = store.set_published(&args.id, !args.off).await?;

    if funnel.is_published {
        println!(
            "{} {} is live at /p/{}",
            "✓".green(),
            funnel.name.bright_white(),
            funnel.slug
        );
    } else {
        println!("{} {} is no longer public", "✓".green(), funnel.name.bright_white());
    }

    Ok(())
}
