use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use funnel_model::decode_document_str;
use funnel_renderer::render_public;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Published document (JSON)
    pub file: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Emit only the page body
    #[arg(long)]
    pub fragment: bool,

    /// Page title
    #[arg(short, long)]
    pub title: Option<String>,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("Cannot read {}", args.file.display()))?;
    let decoded = decode_document_str(&source)
        .with_context(|| format!("Invalid document {}", args.file.display()))?;

    for skipped in &decoded.skipped {
        eprintln!(
            "{} Skipped block #{} ({}): {}",
            "⚠️".yellow(),
            skipped.index,
            skipped.block_type.as_deref().unwrap_or("?"),
            skipped.reason
        );
    }

    let mut options = config.render;
    if args.fragment {
        options.full_page = false;
    }
    if args.title.is_some() {
        options.title = args.title;
    }

    let html = render_public(&decoded.document, options);

    match args.out {
        Some(out) => {
            fs::write(&out, html)?;
            eprintln!("{} Wrote {}", "✓".green(), out.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_writes_public_page() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.json");
        let out = dir.path().join("page.html");
        fs::write(
            &input,
            r#"{
                "version": "1.0",
                "blocks": [
                    { "id": "b1", "type": "button", "order": 0,
                      "props": { "text": "Join", "url": "https://line.me/x", "variant": "primary", "size": "md" } },
                    { "id": "x", "type": "countdown", "order": 1 }
                ]
            }"#,
        )
        .unwrap();

        render(
            RenderArgs {
                file: input,
                out: Some(out.clone()),
                fragment: false,
                title: Some("Join us".to_string()),
            },
            &dir.path().display().to_string(),
        )
        .unwrap();

        let html = fs::read_to_string(out).unwrap();
        assert!(html.contains("<title>Join us</title>"));
        assert!(html.contains("href=\"https://line.me/x\""));
        assert!(!html.contains("countdown"));
    }

    #[test]
    fn test_render_rejects_non_document() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.json");
        fs::write(&input, "[1, 2, 3]").unwrap();

        let result = render(
            RenderArgs {
                file: input,
                out: None,
                fragment: true,
                title: None,
            },
            &dir.path().display().to_string(),
        );
        assert!(result.is_err());
    }
}
