//! # incmake CLI Entry Point
//!
//! Parses CLI arguments using clap and routes commands to the handlers in
//! [`incmake::commands`].

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use inquire::{Select, Text};
use std::path::Path;

use incmake::commands;
use incmake::config::Lang;
use incmake::scaffold;

#[derive(Parser)]
#[command(name = "incmake")]
#[command(
    about = "Makefiles for C/C++ projects, ordered by #include dependencies",
    version = env!("CARGO_PKG_VERSION")
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project
    New {
        /// Project name (optional, defaults to interactive)
        name: Option<String>,
        /// Language (cpp or c)
        #[arg(long, default_value = "cpp")]
        lang: String,
        /// Skip git repository initialization
        #[arg(long)]
        no_git: bool,
    },
    /// Initialize incmake.toml in the current directory
    Init {
        /// Language (cpp or c)
        #[arg(long, default_value = "cpp")]
        lang: String,
    },
    /// Write the Makefile for the current project
    Generate {
        /// Print the Makefile instead of writing it
        #[arg(long)]
        stdout: bool,
    },
    /// Generate the Makefile and run make
    Build,
    /// Build and run the output binary
    Run {
        /// Arguments passed to the target program
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Show the order in which sources are compiled
    Order,
    /// Show the include dependency graph
    Graph {
        /// Print the graph as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove the build directory and generated Makefile
    Clean,
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cwd = Path::new(".");

    match &cli.command {
        Commands::New {
            name,
            lang,
            no_git,
        } => create_project(name, lang, !*no_git),
        Commands::Init { lang } => {
            let config = scaffold::init_project(cwd, parse_lang(lang)?)?;
            println!(
                "{} Initialized {} in current directory. Run {} to build.",
                "✓".green(),
                config.package.name.bold(),
                "incmake build".bold().white()
            );
            Ok(())
        }
        Commands::Generate { stdout } => commands::make::generate(cwd, *stdout),
        Commands::Build => commands::make::build(cwd).map(|_| ()),
        Commands::Run { args } => commands::make::build_and_run(cwd, args),
        Commands::Order => commands::inspect::print_order(cwd),
        Commands::Graph { json } => commands::inspect::print_graph(cwd, *json),
        Commands::Clean => commands::make::clean(cwd),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn parse_lang(lang: &str) -> Result<Lang> {
    Lang::parse(lang).ok_or_else(|| anyhow::anyhow!("Unknown language '{}' (use c or cpp)", lang))
}

fn create_project(name_opt: &Option<String>, lang_cli: &str, init_git: bool) -> Result<()> {
    let name = match name_opt {
        Some(n) => n.clone(),
        None => Text::new("What is your project name?")
            .with_default("my-app")
            .prompt()?,
    };

    let lang = if name_opt.is_none() {
        Select::new("Select language:", vec!["cpp", "c"]).prompt()?
    } else {
        lang_cli
    };

    scaffold::create_project(Path::new("."), &name, parse_lang(lang)?, init_git)?;

    println!(
        "{} Created new project: {} ({})",
        "✓".green(),
        name.bold(),
        lang.cyan()
    );
    println!("  cd {}\n  incmake run", name);
    Ok(())
}
