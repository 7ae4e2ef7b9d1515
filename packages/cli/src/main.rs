mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    create, edit, init, preview, publish, render, serve, EditArgs, InitArgs, NewArgs,
    PreviewArgs, PublishArgs, RenderArgs, ServeArgs,
};
use tracing_subscriber::EnvFilter;

/// Funnel CLI - build and publish landing pages from blocks
#[derive(Parser, Debug)]
#[command(name = "funnel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a funnel project
    Init(InitArgs),

    /// Create a funnel with an empty document
    New(NewArgs),

    /// Publish or unpublish a funnel
    Publish(PublishArgs),

    /// Apply editor commands to a funnel's document and save it
    Edit(EditArgs),

    /// Render a document file as a public page
    Render(RenderArgs),

    /// Render the authoring view of a stored funnel
    Preview(PreviewArgs),

    /// Run the HTTP server
    Serve(ServeArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => create(args, &cwd).await,
        Command::Publish(args) => publish(args, &cwd).await,
        Command::Edit(args) => edit(args, &cwd).await,
        Command::Render(args) => render(args, &cwd),
        Command::Preview(args) => preview(args, &cwd).await,
        Command::Serve(args) => serve(args, &cwd).await,
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
