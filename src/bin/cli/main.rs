mod app;
mod commands;
mod render;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wordbook-cli", about = "Wordbook flashcard decks and TTS", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List all titles
    Titles,

    /// List decks under a title
    Decks {
        title: String,
    },

    /// Create a new title
    NewTitle {
        name: String,
    },

    /// Create a new deck with its language settings
    NewDeck {
        title: String,
        name: String,
        /// Language of card fronts
        #[arg(long, default_value = "en")]
        front_lang: String,
        /// Language of card backs
        #[arg(long, default_value = "ko")]
        back_lang: String,
    },

    /// Delete a deck (irreversible)
    RmDeck {
        title: String,
        name: String,
    },

    /// Delete a title and every deck under it (irreversible)
    RmTitle {
        name: String,
    },

    /// List the cards of a deck
    Cards {
        title: String,
        deck: String,
    },

    /// Add a single card
    Add {
        title: String,
        deck: String,
        front: String,
        back: String,
        #[arg(long)]
        starred: bool,
    },

    /// Add many cards, one "front-back" pair per line (use "-" for stdin)
    BulkAdd {
        title: String,
        deck: String,
        text: String,
    },

    /// Edit a card in place
    Edit {
        title: String,
        deck: String,
        index: usize,
        front: String,
        back: String,
    },

    /// Delete a card by index
    Rm {
        title: String,
        deck: String,
        index: usize,
    },

    /// Toggle a card's star
    Star {
        title: String,
        deck: String,
        index: usize,
    },

    /// Import a .json or .txt card file as a new deck
    Import {
        file: PathBuf,
        /// Put the deck under an existing title instead of a new one
        #[arg(long)]
        title: Option<String>,
    },

    /// Speak free text
    Speak {
        text: String,
        /// Language tag (default: configured word language)
        #[arg(long)]
        language: Option<String>,
        /// Backend-specific voice name
        #[arg(long)]
        voice: Option<String>,
    },

    /// Speak a card's front, or front and back with a pause
    Play {
        title: String,
        deck: String,
        index: usize,
        /// Also speak the back side
        #[arg(long)]
        both: bool,
    },
}

/// Resolve "-" as stdin for bulk text input
fn resolve_text(text: String) -> String {
    if text == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf).ok();
        buf
    } else {
        text
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color;

    let mut app = match app::App::new(cli.data_dir.as_deref()) {
        Ok(app) => app,
        Err(e) => {
            // Startup failures also land in an error file next to the decks
            log_startup_error(cli.data_dir.as_deref(), &e);
            return Err(e);
        }
    };

    match cli.command {
        Command::Titles => commands::decks::run_titles(&app, &cli.format)?,
        Command::Decks { title } => commands::decks::run_decks(&app, &title, &cli.format)?,
        Command::NewTitle { name } => commands::decks::run_new_title(&app, &name)?,
        Command::NewDeck {
            title,
            name,
            front_lang,
            back_lang,
        } => commands::decks::run_new_deck(&app, &title, &name, &front_lang, &back_lang)?,
        Command::RmDeck { title, name } => commands::decks::run_rm_deck(&app, &title, &name)?,
        Command::RmTitle { name } => commands::decks::run_rm_title(&app, &name)?,
        Command::Cards { title, deck } => {
            commands::cards::run_list(&mut app, &title, &deck, &cli.format, use_color)?
        }
        Command::Add {
            title,
            deck,
            front,
            back,
            starred,
        } => commands::cards::run_add(&mut app, &title, &deck, &front, &back, starred)?,
        Command::BulkAdd { title, deck, text } => {
            let text = resolve_text(text);
            commands::cards::run_bulk_add(&mut app, &title, &deck, &text)?
        }
        Command::Edit {
            title,
            deck,
            index,
            front,
            back,
        } => commands::cards::run_edit(&mut app, &title, &deck, index, &front, &back)?,
        Command::Rm { title, deck, index } => {
            commands::cards::run_rm(&mut app, &title, &deck, index)?
        }
        Command::Star { title, deck, index } => {
            commands::cards::run_star(&mut app, &title, &deck, index)?
        }
        Command::Import { file, title } => commands::import::run(&app, &file, title.as_deref())?,
        Command::Speak {
            text,
            language,
            voice,
        } => commands::speak::run_text(&app, &text, language.as_deref(), voice.as_deref())?,
        Command::Play {
            title,
            deck,
            index,
            both,
        } => commands::speak::run_card(&mut app, &title, &deck, index, both)?,
    }

    Ok(())
}

/// Append a fatal startup error to error_log.txt in the data directory
fn log_startup_error(data_dir: Option<&str>, error: &anyhow::Error) {
    let dir = data_dir
        .map(PathBuf::from)
        .or_else(|| wordbook::decks::DeckStore::default_data_dir().ok());
    let Some(dir) = dir else { return };

    let _ = std::fs::create_dir_all(&dir);
    if let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("error_log.txt"))
    {
        let _ = writeln!(file, "startup error: {:#}", error);
    }
}
