use anyhow::{Context, Result};

use crate::app::App;
use crate::render;
use crate::OutputFormat;

fn collection(app: &App) -> Result<&wordbook::cards::CardCollection> {
    app.ctx.collection().context("No deck selected")
}

pub fn run_list(app: &mut App, title: &str, deck: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    app.open_deck(title, deck);
    let coll = collection(app)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(coll.cards())?),
        OutputFormat::Plain => {
            if coll.is_empty() {
                println!("No cards in this deck.");
                return Ok(());
            }
            for (i, card) in coll.cards().iter().enumerate() {
                println!(
                    "{:>4}  {}  {} - {}",
                    i,
                    render::star_marker(card.starred, use_color),
                    card.front,
                    card.back
                );
            }
        }
    }
    Ok(())
}

pub fn run_add(
    app: &mut App,
    title: &str,
    deck: &str,
    front: &str,
    back: &str,
    starred: bool,
) -> Result<()> {
    app.open_deck(title, deck);
    let coll = app.ctx.collection_mut().context("No deck selected")?;
    coll.add(front, back, starred)?;
    println!("Added card {} to {}/{}", coll.len() - 1, title, deck);
    Ok(())
}

pub fn run_bulk_add(app: &mut App, title: &str, deck: &str, text: &str) -> Result<()> {
    app.open_deck(title, deck);
    let coll = app.ctx.collection_mut().context("No deck selected")?;
    let added = coll.bulk_add(text)?;
    println!("Added {} cards to {}/{}", added, title, deck);
    Ok(())
}

pub fn run_edit(
    app: &mut App,
    title: &str,
    deck: &str,
    index: usize,
    front: &str,
    back: &str,
) -> Result<()> {
    app.open_deck(title, deck);
    let coll = app.ctx.collection_mut().context("No deck selected")?;
    coll.edit(index, front, back)?;
    println!("Updated card {}", index);
    Ok(())
}

pub fn run_rm(app: &mut App, title: &str, deck: &str, index: usize) -> Result<()> {
    app.open_deck(title, deck);
    let coll = app.ctx.collection_mut().context("No deck selected")?;
    coll.delete(index)?;
    println!("Deleted card {}", index);
    Ok(())
}

pub fn run_star(app: &mut App, title: &str, deck: &str, index: usize) -> Result<()> {
    app.open_deck(title, deck);
    let coll = app.ctx.collection_mut().context("No deck selected")?;
    coll.toggle_star(index)?;
    let starred = coll.cards()[index].starred;
    println!(
        "Card {} is now {}",
        index,
        if starred { "starred" } else { "unstarred" }
    );
    Ok(())
}
