//! Partita CLI - interactive score metadata editing
//!
//! ```bash
//! partita init quartet           # Create quartet.json in the current dir
//! partita edit --file quartet.json
//! ```

use clap::{Parser, Subcommand};
use partita::{
    config, prompt, registry::DEFAULT_REGISTRY_DIR, Piece, Prompter, Registry, Session, StdinPrompt,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "partita")]
#[command(about = "Build and edit score metadata interactively", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a config file for a new piece
    Init {
        /// Name of the config file (".json" appended when missing)
        filename: PathBuf,

        /// Directory for the new file
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },

    /// Edit a piece interactively
    Edit {
        /// Path to the piece config file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Path to the composer/instrument registry
        #[arg(short, long)]
        db_path: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { filename, path } => cmd_init(&filename, &path),
        Commands::Edit { file, db_path } => cmd_edit(file, db_path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_init(filename: &Path, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut filename = filename.to_path_buf();
    if filename.extension().is_none() {
        filename.set_extension("json");
    }
    let filepath = dir.join(filename);

    if filepath.exists() {
        let mut stdin = StdinPrompt;
        if !prompt::confirm(&mut stdin, "File exists. Overwrite?", false)? {
            return Ok(());
        }
        let backup = PathBuf::from(format!("{}.bak", filepath.display()));
        fs::copy(&filepath, &backup)?;
        eprintln!("Backed up existing file to {}", backup.display());
    }

    config::write_piece(&filepath, &Piece::default())?;
    eprintln!("Created {}", filepath.display());
    eprintln!("Run `partita edit --file {}` to start editing.", filepath.display());
    Ok(())
}

fn cmd_edit(
    file: Option<PathBuf>,
    db_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdin = StdinPrompt;

    let config_path = match file {
        Some(path) => path,
        None => PathBuf::from(stdin.read_line("Enter the path to the config file: ")?),
    };

    // Missing or malformed config starts a fresh piece.
    let piece = config::read_piece(&config_path).unwrap_or_default();

    let registry_root = db_path.unwrap_or_else(|| PathBuf::from(DEFAULT_REGISTRY_DIR));
    let mut registry = Registry::open(&registry_root);
    if registry.needs_bootstrap() {
        let seed = prompt::confirm(
            &mut stdin,
            "Partita keeps a small database of commonly used composers and \
             instruments to save re-typing. You do not appear to have one. \
             Copy the included starter set?",
            true,
        )?;
        if seed {
            registry.bootstrap()?;
            eprintln!("Seeded registry at {}", registry_root.display());
        }
    }

    let mut session = Session::new(stdin, registry, piece, config_path);
    session.run()?;
    Ok(())
}
