use std::path::Path;

use anyhow::Result;

use wordbook::import::{import_file, ImportDest};

use crate::app::App;

pub fn run(app: &App, file: &Path, title: Option<&str>) -> Result<()> {
    let dest = match title {
        Some(t) => ImportDest::Title(t.to_string()),
        None => ImportDest::NewTitle,
    };

    let (deck, count) = import_file(&app.ctx.store, file, &dest)?;
    println!("Imported {} cards into {}", count, deck);
    Ok(())
}
