//! Botango CLI - Project scaffolding for aiogram bots

use anyhow::Result;
use botango_core::tui::NewBotArgs;
use botango_core::ComponentRegistry;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "botango")]
#[command(about = "CLI for scaffolding aiogram bot projects")]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new bot project
    Newbot(CliNewBotArgs),
    /// Show usage
    Help,
}

#[derive(Parser, Debug)]
pub struct CliNewBotArgs {
    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Project name used in generated files (defaults to the directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Components to include (comma-separated, e.g. base,handlers,polling)
    #[arg(short, long, value_delimiter = ',')]
    pub components: Option<Vec<String>>,

    /// Local directory to use for templates instead of the bundled ones
    #[arg(long = "template-dir", env = "BOTANGO_TEMPLATE_DIR")]
    pub template_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliNewBotArgs> for NewBotArgs {
    fn from(args: CliNewBotArgs) -> Self {
        NewBotArgs {
            template_dir: args.template_dir,
            directory: args.directory,
            name: args.name,
            components: args.components,
            yes: args.yes,
        }
    }
}

fn print_usage() {
    println!(
        "{} {}",
        "botango".bold(),
        format!("v{}", CLI_VERSION).dimmed()
    );
    println!("Scaffold aiogram bot projects from a catalog of components.");
    println!();
    println!("{}", "Usage:".bold());
    println!("  botango <command> [options]");
    println!();
    println!("{}", "Commands:".bold());
    println!("  {}    Create a new bot project", "newbot".green());
    println!("  {}      Show this message", "help".green());
    println!();
    println!("{}", "newbot options:".bold());
    println!("  [DIRECTORY]              Project directory (default: current directory)");
    println!("  --name <NAME>            Project name used in generated files");
    println!("  -c, --components <LIST>  Comma-separated components to include");
    println!("  --template-dir <DIR>     Template pack directory");
    println!("  -y, --yes                Accept defaults without prompting");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    match args.command {
        Some(Command::Newbot(newbot_args)) => {
            let registry = ComponentRegistry::botango()?;
            tracing::debug!(
                components = registry.all_components().count(),
                "catalog loaded"
            );

            let result = botango_core::run(&registry, newbot_args.into(), CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::Help) | None => {
            print_usage();
            Ok(())
        }
    }
}
