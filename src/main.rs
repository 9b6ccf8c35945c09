//! ggg CLI - personal notes from the terminal

use clap::{Parser, Subcommand};
use ggg::commands::{self, OutputFormat};
use ggg::config;
use ggg::editor::ExternalEditor;
use ggg::ui::{self, TerminalPrompt};
use ggg::{NoteRef, NoteStore};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "ggg")]
#[command(version)]
#[command(about = "GoGoGadget notes! Write in $EDITOR, search everything.")]
#[command(long_about = r#"
ggg keeps your notes in a single full-text searchable SQLite file
(~/.ggg/notes.db). Notes are written in $EDITOR; the first line is the title.

Example usage:
  ggg init
  ggg new
  ggg list shop
  ggg open '#3'
  ggg find tomatoes
  ggg delete 'Weekly Shop'
"#)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (defaults to ~/.ggg/notes.db)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new database
    #[command(visible_alias = "i")]
    Init,

    /// Add a new note
    #[command(visible_alias = "n")]
    New,

    /// List notes whose title contains the filter; all notes without one
    #[command(visible_alias = "l")]
    List {
        /// Title substring to filter by
        filter: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Delete a note by id (#12) or every note matching a (partial) title
    #[command(visible_alias = "d")]
    Delete {
        /// `#<id>` or (partial) title
        target: String,
    },

    /// Open a note by id (#12) or (partial) title in $EDITOR
    #[command(visible_alias = "o")]
    Open {
        /// `#<id>` or (partial) title
        target: String,
    },

    /// Find matches in note bodies
    #[command(visible_alias = "f")]
    Find {
        /// Search term
        term: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("ggg=debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("{:#}", err);
            ui::error(&err.to_string());
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let home = config::home_dir()?;
    let settings = config::load_config(&config::default_config_path_in(&home))
        .context("Could not read config file")?;
    let db_path = settings.database_path(&home, cli.database.as_deref());
    tracing::debug!("Using DB at {}", db_path.display());

    let editor = ExternalEditor::from_env(settings.editor.as_deref());

    match cli.command {
        Commands::Init => {
            commands::run_init(&db_path)?;
        }
        Commands::New => {
            let store = open_store(&db_path)?;
            commands::run_new(&store, &editor)?;
        }
        Commands::List { filter, format } => {
            let store = open_store(&db_path)?;
            commands::run_list(&store, filter.as_deref(), format)?;
        }
        Commands::Delete { target } => {
            let target: NoteRef = target.parse().context("Invalid Id")?;
            let store = open_store(&db_path)?;
            commands::run_delete(&store, &TerminalPrompt, &target)?;
        }
        Commands::Open { target } => {
            let target: NoteRef = target.parse().context("Invalid Id")?;
            let store = open_store(&db_path)?;
            commands::run_open(&store, &editor, &target)?;
        }
        Commands::Find { term, format } => {
            let store = open_store(&db_path)?;
            commands::run_find(&store, &term, format)?;
        }
    }

    Ok(())
}

fn open_store(db_path: &Path) -> anyhow::Result<NoteStore> {
    NoteStore::open(db_path).context("DB file not found. Did you call 'init' yet?")
}
