//! flashfiles CLI
//!
//! Thin command-line caller over the engine: imports markdown files into a
//! JSON store file, prints the review queue, applies ratings, and handles
//! backup export/restore. All clock reads happen here; the library itself
//! takes `now` as a parameter.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use flashfiles::{
    add_tag_to_cards, build_review_queue, export_backup, extract_wiki_links, import_files,
    now_millis, parse_backup, remove_tag_from_cards, resolve_wiki_link, restore_backup,
    review::apply_rating, Card, ImportAction, ImportFile, MemoryStore, Rating, RestoreMode, Store,
    WikiLinkResolution,
};

#[derive(Parser)]
#[command(name = "flashfiles-cli", about = "Markdown flashcard import and review", version)]
struct Cli {
    /// Path of the JSON store file
    #[arg(long, global = true, default_value = "flashfiles.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum DuplicateAction {
    Skip,
    Overwrite,
    Duplicate,
}

impl From<DuplicateAction> for ImportAction {
    fn from(action: DuplicateAction) -> Self {
        match action {
            DuplicateAction::Skip => ImportAction::Skip,
            DuplicateAction::Overwrite => ImportAction::Overwrite,
            DuplicateAction::Duplicate => ImportAction::Duplicate,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum CliRating {
    Again,
    Good,
    Easy,
}

impl From<CliRating> for Rating {
    fn from(rating: CliRating) -> Self {
        match rating {
            CliRating::Again => Rating::Again,
            CliRating::Good => Rating::Good,
            CliRating::Easy => Rating::Easy,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Import markdown files as flashcards
    Import {
        /// Markdown files to import
        files: Vec<PathBuf>,
        /// What to do with duplicates of already imported content
        #[arg(long, value_enum, default_value = "skip")]
        on_duplicate: DuplicateAction,
    },

    /// List cards in the store
    List {
        /// Only cards holding this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Print the review queue for right now
    Queue {
        /// Comma-separated tags; a card must hold all of them
        #[arg(long)]
        tags: Option<String>,
        /// Append never-reviewed cards after the due ones
        #[arg(long)]
        include_new: bool,
        /// Cap on appended new cards
        #[arg(long, default_value = "20")]
        new_budget: usize,
    },

    /// Rate a card and schedule its next review
    Rate {
        /// Card id (prefix match accepted)
        card_id: String,
        rating: CliRating,
    },

    /// Add or remove a tag across cards
    #[command(subcommand)]
    Tag(TagOp),

    /// Resolve the wiki-links in a card's answer
    Links {
        /// Card id (prefix match accepted)
        card_id: String,
    },

    /// Export all cards to a backup file
    Export {
        /// Output path
        path: PathBuf,
    },

    /// Restore cards from a backup file
    Restore {
        /// Backup path
        path: PathBuf,
        /// Replace the whole collection instead of merging by id
        #[arg(long)]
        replace_all: bool,
    },
}

#[derive(Subcommand)]
enum TagOp {
    /// Add a tag to the listed cards
    Add {
        tag: String,
        /// Card ids (prefix match accepted)
        card_ids: Vec<String>,
    },
    /// Remove a tag from the listed cards
    Remove {
        tag: String,
        /// Card ids (prefix match accepted)
        card_ids: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut store = MemoryStore::load(&cli.store)
        .with_context(|| format!("failed to load store {}", cli.store.display()))?;

    match cli.command {
        Command::Import { files, on_duplicate } => {
            cmd_import(&mut store, &files, on_duplicate.into())?;
            store.save(&cli.store)?;
        }
        Command::List { tag } => cmd_list(&store, tag.as_deref())?,
        Command::Queue { tags, include_new, new_budget } => {
            cmd_queue(&store, tags.as_deref(), include_new, new_budget)?
        }
        Command::Rate { card_id, rating } => {
            cmd_rate(&mut store, &card_id, rating.into())?;
            store.save(&cli.store)?;
        }
        Command::Tag(op) => {
            cmd_tag(&mut store, op)?;
            store.save(&cli.store)?;
        }
        Command::Links { card_id } => cmd_links(&store, &card_id)?,
        Command::Export { path } => cmd_export(&store, &path)?,
        Command::Restore { path, replace_all } => {
            cmd_restore(&mut store, &path, replace_all)?;
            store.save(&cli.store)?;
        }
    }

    Ok(())
}

fn cmd_import(
    store: &mut MemoryStore,
    paths: &[PathBuf],
    on_duplicate: ImportAction,
) -> anyhow::Result<()> {
    if paths.is_empty() {
        bail!("no files given");
    }

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        files.push(ImportFile { name, contents });
    }

    let report = import_files(store, &files, on_duplicate, now_millis());

    println!(
        "{} created, {} overwritten, {} skipped",
        report.created, report.overwritten, report.skipped
    );
    for error in &report.errors {
        eprintln!("{}: {}", error.file_name, error.message);
    }
    Ok(())
}

fn cmd_list(store: &MemoryStore, tag: Option<&str>) -> anyhow::Result<()> {
    let wanted = tag.map(|t| t.to_lowercase());
    for card in store.list_cards()? {
        if let Some(wanted) = &wanted {
            if !card.tags.iter().any(|t| t == wanted) {
                continue;
            }
        }
        let box_label = card
            .box_
            .map(|b| format!("box {b}"))
            .unwrap_or_else(|| "new".to_string());
        println!("{}  [{}]  {}", card.id, box_label, card.question);
    }
    Ok(())
}

fn cmd_queue(
    store: &MemoryStore,
    tags: Option<&str>,
    include_new: bool,
    new_budget: usize,
) -> anyhow::Result<()> {
    let tag_filter: Vec<String> = tags
        .map(|t| t.split(',').map(|s| s.trim().to_string()).collect())
        .unwrap_or_default();

    let cards = store.list_cards()?;
    let queue = build_review_queue(&cards, &tag_filter, include_new, new_budget, now_millis());

    if queue.is_empty() {
        println!("nothing to review");
        return Ok(());
    }
    for id in &queue {
        if let Some(card) = store.get_card(id)? {
            println!("{}  {}", card.id, card.question);
        }
    }
    println!("{} cards in queue", queue.len());
    Ok(())
}

/// Resolve a full card id or a unique prefix of one.
fn resolve_card(store: &MemoryStore, card_id: &str) -> anyhow::Result<Card> {
    let matches: Vec<Card> = store
        .list_cards()?
        .into_iter()
        .filter(|card| card.id.starts_with(card_id))
        .collect();

    if matches.len() > 1 {
        bail!("{} cards match {card_id}; give a longer prefix", matches.len());
    }
    match matches.into_iter().next() {
        Some(card) => Ok(card),
        None => bail!("no card with id {card_id}"),
    }
}

fn cmd_rate(store: &mut MemoryStore, card_id: &str, rating: Rating) -> anyhow::Result<()> {
    let mut card = resolve_card(store, card_id)?;

    let next = apply_rating(&mut card, rating, now_millis());
    store.put_card(card.clone())?;

    println!("{} -> box {}, due {}", card.question, next.box_, next.due);
    Ok(())
}

fn cmd_tag(store: &mut MemoryStore, op: TagOp) -> anyhow::Result<()> {
    let (tag, card_ids, adding) = match &op {
        TagOp::Add { tag, card_ids } => (tag, card_ids, true),
        TagOp::Remove { tag, card_ids } => (tag, card_ids, false),
    };
    if card_ids.is_empty() {
        bail!("no card ids given");
    }

    let mut ids = Vec::with_capacity(card_ids.len());
    for card_id in card_ids {
        ids.push(resolve_card(store, card_id)?.id);
    }

    let changed = if adding {
        add_tag_to_cards(store, &ids, tag, now_millis())?
    } else {
        remove_tag_from_cards(store, &ids, tag, now_millis())?
    };
    println!("{changed} cards changed");
    Ok(())
}

fn cmd_links(store: &MemoryStore, card_id: &str) -> anyhow::Result<()> {
    let card = resolve_card(store, card_id)?;
    let cards = store.list_cards()?;

    let links = extract_wiki_links(&card.answer_body);
    if links.is_empty() {
        println!("no wiki-links in {}", card.question);
        return Ok(());
    }
    for link in links {
        match resolve_wiki_link(&link.target, &cards) {
            WikiLinkResolution::Found { id, question, .. } => {
                println!("{} -> {} ({})", link.raw, question, id);
            }
            WikiLinkResolution::NotFound => println!("{} -> not found", link.raw),
        }
    }
    Ok(())
}

fn cmd_export(store: &MemoryStore, path: &PathBuf) -> anyhow::Result<()> {
    let backup = export_backup(store.list_cards()?, now_millis());
    fs::write(path, backup.to_json()?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("exported {} cards to {}", backup.cards.len(), path.display());
    Ok(())
}

fn cmd_restore(store: &mut MemoryStore, path: &PathBuf, replace_all: bool) -> anyhow::Result<()> {
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let backup = parse_backup(&json)?;

    let mode = if replace_all {
        RestoreMode::ReplaceAll
    } else {
        RestoreMode::Merge
    };
    let summary = restore_backup(store, backup, mode)?;

    println!(
        "restored {} cards ({})",
        summary.restored,
        if replace_all { "replace all" } else { "merge" }
    );
    Ok(())
}
