use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use quasar::cli::args::{Cli, Commands};
use quasar::cli::commands;
use quasar::config::{Config, Paths};
use quasar::storage::{Database, PlanStore};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("quasar=debug"),
        _ => EnvFilter::new("quasar=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Completions { shell } = cli.command {
        println!("{}", commands::completions(shell)?);
        return Ok(());
    }

    let paths = Paths::resolve(cli.data_dir)?;
    paths.ensure_dirs()?;
    if !paths.config_file.exists() {
        Config::default().save_to_path(&paths.config_file)?;
    }
    let config = Config::load_from_path(&paths.config_file)
        .with_context(|| format!("loading {}", paths.config_file.display()))?;
    config.general.color.apply();

    let format = cli.output.unwrap_or(config.general.default_output);
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let now = Utc::now();
    tracing::debug!(root = %paths.root.display(), %today, ?format, "starting");

    let db = Database::open_at(&paths.database)
        .with_context(|| format!("opening {}", paths.database.display()))?;
    let store = PlanStore::new(db);

    let output = match cli.command {
        Commands::Dashboard => commands::dashboard(&store, today, format)?,
        Commands::Plan(args) => commands::plan(&store, args.command, format)?,
        Commands::Goal(args) => commands::goal(&store, args.command, today, now, format)?,
        Commands::Task(args) => commands::task(&store, args.command, today, now, format)?,
        Commands::Reflect(args) => commands::reflect(&store, args.command, today, now, format)?,
        Commands::Calendar(args) => commands::calendar(&store, &args, today, format)?,
        Commands::Stats(args) => commands::stats(&store, args.command, today, &config.stats, format)?,
        Commands::Data(args) => commands::data(&store, args.command, format)?,
        Commands::Focus(args) => commands::focus(&args, format, &mut std::io::stderr())?,
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
