//! `choco favorites`: list, add and remove favorites.

use crate::services::Favorites;
use crate::website::Website;

use super::{Context, FavoritesCommands};

pub async fn run(ctx: &Context, action: FavoritesCommands) -> anyhow::Result<()> {
    let favorites = Favorites::new(ctx.platform.storage.clone());

    match action {
        FavoritesCommands::List => {
            let list = favorites.get().await?;
            if list.is_empty() {
                println!("No favorites yet");
            }
            for (index, website) in list.iter().enumerate() {
                println!("{:>3}. {}\n     {}", index, website.title, website.url);
            }
        }
        FavoritesCommands::Add { url, title } => {
            let title = title.unwrap_or_else(|| url.clone());
            favorites.add(Website::new(title, url.clone())).await?;
            println!("Added {}", url);
        }
        FavoritesCommands::Remove { url } => {
            if !favorites.contains(&url).await? {
                anyhow::bail!("'{}' is not a favorite", url);
            }
            favorites.remove(&url).await?;
            println!("Removed {}", url);
        }
    }

    Ok(())
}
