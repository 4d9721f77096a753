use anyhow::Result;

use wordbook::decks::DeckSettings;

use crate::app::App;
use crate::render;
use crate::OutputFormat;

pub fn run_titles(app: &App, format: &OutputFormat) -> Result<()> {
    let titles = app.ctx.store.list_titles()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&titles)?),
        OutputFormat::Plain => render::print_names(&titles, "No titles yet."),
    }
    Ok(())
}

pub fn run_decks(app: &App, title: &str, format: &OutputFormat) -> Result<()> {
    let decks = app.ctx.store.list_decks(title)?;

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = decks
                .iter()
                .map(|name| {
                    let settings = app.ctx.store.load_settings(title, name).ok().flatten();
                    serde_json::json!({
                        "name": name,
                        "frontLang": settings.as_ref().map(|s| s.front_lang.clone()),
                        "backLang": settings.as_ref().map(|s| s.back_lang.clone()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => render::print_names(&decks, "No decks under this title."),
    }
    Ok(())
}

pub fn run_new_title(app: &App, name: &str) -> Result<()> {
    app.ctx.store.create_title(name)?;
    println!("Created title '{}'", name);
    Ok(())
}

pub fn run_new_deck(
    app: &App,
    title: &str,
    name: &str,
    front_lang: &str,
    back_lang: &str,
) -> Result<()> {
    let settings = DeckSettings {
        front_lang: front_lang.to_string(),
        back_lang: back_lang.to_string(),
    };
    app.ctx.store.create_deck(title, name, &settings)?;
    println!("Created deck '{}/{}'", title, name);
    Ok(())
}

pub fn run_rm_deck(app: &App, title: &str, name: &str) -> Result<()> {
    app.ctx.store.delete_deck(title, name)?;
    println!("Deleted deck '{}/{}'", title, name);
    Ok(())
}

pub fn run_rm_title(app: &App, name: &str) -> Result<()> {
    app.ctx.store.delete_title(name)?;
    println!("Deleted title '{}'", name);
    Ok(())
}
