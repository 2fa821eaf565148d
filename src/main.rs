//! # turndeck CLI (`deck`)
//!
//! The `deck` binary curates one remotely hosted conversational dataset.
//! Besides the interactive menu it offers one-shot subcommands for scripted
//! use and `serve` for the browser form surface.
//!
//! ## Usage
//!
//! ```bash
//! deck --config ./deck.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `deck menu` | Interactive text menu (view / remove / add / import / exit) |
//! | `deck view` | List all turn pairs |
//! | `deck remove <tokens>...` | Remove pairs by index/range tokens |
//! | `deck add --user --assistant` | Append one manual pair |
//! | `deck import <file>` | Append pairs from a JSON file |
//! | `deck serve` | Start the HTTP form surface |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use turndeck::{config, import, menu, server, session::Session};

/// turndeck — curate a remotely hosted conversational turn-pair dataset.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/deck.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "deck",
    about = "turndeck — curate a remotely hosted conversational turn-pair dataset",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./deck.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the interactive text menu.
    ///
    /// Loops over view / remove / add / import until exit. Operation
    /// failures are printed and return control to the menu.
    Menu,

    /// List all turn pairs with 1-based display indices.
    View,

    /// Remove pairs by index/range tokens.
    ///
    /// Tokens are 1-based; ranges are inclusive. Example: `deck remove 1 3 5-7`.
    /// A single bad token aborts the whole batch with nothing removed.
    Remove {
        /// Index/range tokens (e.g. `1 3 5-7`).
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Append one user/assistant pair.
    Add {
        /// Content of the user turn.
        #[arg(long)]
        user: String,

        /// Content of the assistant turn.
        #[arg(long)]
        assistant: String,
    },

    /// Append pairs from a local JSON file.
    ///
    /// The file must contain a list of objects with `role` and `content`
    /// text fields; extra fields are kept unchanged. Entries must form
    /// whole user/assistant pairs.
    Import {
        /// Path to the JSON file.
        file: PathBuf,
    },

    /// Start the HTTP form surface.
    ///
    /// Serves a browser form plus a JSON API on `[server].bind` with the
    /// same view/remove/add/import semantics as the menu.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;
    let session = Session::from_config(&cfg)?;

    match cli.command {
        Commands::Menu => {
            menu::run_menu(&session).await?;
        }
        Commands::View => {
            let pairs = session.view().await?;
            menu::print_pairs(&pairs);
        }
        Commands::Remove { tokens } => {
            let outcome = session.remove(&tokens.join(" ")).await?;
            println!(
                "Removed {} pair(s); {} remain. Data successfully updated.",
                outcome.removed, outcome.remaining
            );
        }
        Commands::Add { user, assistant } => {
            let total = session.add(user.trim(), assistant.trim()).await?;
            println!("Data successfully added and saved ({} pairs total).", total);
        }
        Commands::Import { file } => {
            let entries = import::load_import_file(&file)?;
            let added = session.import(entries).await?;
            println!("Added {} pair(s) from file and saved.", added);
        }
        Commands::Serve => {
            server::run_server(&cfg, session).await?;
        }
    }

    Ok(())
}
