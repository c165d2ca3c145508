//! `choco engines`: manage the search engines of the preferences.

use crate::preferences::PreferencesStore;

use super::{Context, EnginesCommands};

pub async fn run(ctx: &Context, action: EnginesCommands) -> anyhow::Result<()> {
    let preferences = PreferencesStore::new(ctx.platform.storage.clone());

    match action {
        EnginesCommands::List => {
            for engine in preferences.get().await?.search_engines {
                println!("{:<12} {:<16} {}", engine.command, engine.name, engine.url);
                println!("{:<12} id: {}", "", engine.id);
            }
        }
        EnginesCommands::Add { name, command, url } => {
            let engine = preferences.add_search_engine(&name, &command, &url).await?;
            println!("Added '{}' ({})", engine.name, engine.id);
        }
        EnginesCommands::Remove { id } => {
            preferences.remove_search_engine(&id).await?;
            println!("Removed {}", id);
        }
    }

    Ok(())
}
