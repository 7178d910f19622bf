use anyhow::Context;
use clap::Parser;
use folio::config;
use folio::gui::app::{AppInit, AppModel};
use folio::sys::runtime;
use folio_core::content::Content;
use folio_core::storage::{JsonFileStore, MemoryStore, PreferenceStore};
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Personal portfolio page")]
struct Args {
    /// Content document to show instead of the configured one
    #[arg(long)]
    content: Option<PathBuf>,

    /// Write the default config file and exit
    #[arg(long)]
    write_default_config: bool,
}

fn preference_store() -> Box<dyn PreferenceStore> {
    match JsonFileStore::default_path() {
        Ok(path) => Box::new(JsonFileStore::new(path)),
        Err(e) => {
            log::warn!("Theme choice will not be remembered: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_default_config {
        let path = config::write_default_config().context("Failed to write default config")?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let content = match config.load_content(args.content.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load content, showing the sample: {}", e);
            Content::sample().context("Bundled sample content is invalid")?
        }
    };

    let (tx, rx) = async_channel::bounded(32);
    let (relay_tx, relay_rx) = async_channel::bounded(8);

    // Start Background Services
    runtime::start_background_services(tx, relay_rx);

    let app = RelmApp::new("org.folio.folio").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        config,
        content_override: args.content,
        content,
        storage: preference_store(),
        relay: relay_tx,
        events: rx,
    });
    Ok(())
}
