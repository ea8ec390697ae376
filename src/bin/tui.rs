use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use running_order::config::Config;
use running_order::report::CheckReport;
use running_order::session::Session;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "running-order", version, about)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Line-up file (name,dd.mm.yyyy,HH:MM,HH:MM,stage per line)
    lineup: Option<PathBuf>,

    /// Selection file used by import (i) and export (e)
    #[arg(long)]
    selection: Option<PathBuf>,

    /// Alias file with `Band name,Band alias` rows
    #[arg(long)]
    aliases: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the picks per day and flag clashing sets.
    ///
    /// Exits with status 2 when any picked sets clash, 0 otherwise.
    Check {
        lineup: PathBuf,

        #[arg(long)]
        selection: Option<PathBuf>,

        #[arg(long)]
        aliases: Option<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn log_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("org", "running-order", "running-order")?;
    let dir = proj.cache_dir();
    if !dir.exists() {
        let _ = fs::create_dir_all(dir);
    }
    Some(dir.join("running-order.log"))
}

fn init_file_logging() {
    let Some(path) = log_path() else {
        return;
    };

    let default_hook = std::panic::take_hook();
    let panic_path = path.clone();
    std::panic::set_hook(Box::new(move |info| {
        use std::io::Write;
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&panic_path)
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));

    if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
}

fn check(
    lineup: PathBuf,
    selection: Option<PathBuf>,
    aliases: Option<PathBuf>,
    json: bool,
) -> Result<bool> {
    let mut session = Session::new();
    session.load_lineup(&lineup)?;
    if let Some(path) = aliases {
        session.load_aliases(path)?;
    }
    if let Some(path) = selection {
        let imported = session.import_selection(path)?;
        if let Err(e) = imported.check() {
            eprintln!("warning: {}", e);
        }
    }

    let report = CheckReport::from_session(&session);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(report.has_clashes())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Check {
        lineup,
        selection,
        aliases,
        json,
    }) = cli.command
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
        let clashes = check(lineup, selection, aliases, json)?;
        if clashes {
            std::process::exit(2);
        }
        return Ok(());
    }

    init_file_logging();

    let mut config = Config::load().context("Failed to read config")?;
    if let Some(path) = cli.lineup {
        config.lineup_path = Some(path);
    }
    if let Some(path) = cli.selection {
        config.selection_path = Some(path);
    }
    if let Some(path) = cli.aliases {
        config.alias_path = Some(path);
    }
    if config.lineup_path.is_none() {
        eprintln!("Usage: running-order <LINEUP.csv> [--selection FILE] [--aliases FILE]");
        eprintln!("Or set lineup_path in the config file.");
        return Ok(());
    }

    let session = Session::from_config(&config)?;
    run_interactive(session, config)
}

#[cfg(feature = "tui")]
fn run_interactive(session: Session, config: Config) -> Result<()> {
    running_order::tui::run(session, config)
}

#[cfg(not(feature = "tui"))]
fn run_interactive(session: Session, _config: Config) -> Result<()> {
    print!("{}", CheckReport::from_session(&session));
    Ok(())
}
