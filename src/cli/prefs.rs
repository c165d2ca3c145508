//! `choco prefs`: inspect or reset the stored preferences.

use crate::preferences::{PreferencesStore, PREFERENCES_KEY};

use super::{Context, PrefsCommands};

pub async fn run(ctx: &Context, action: PrefsCommands) -> anyhow::Result<()> {
    match action {
        PrefsCommands::Show => {
            let preferences = PreferencesStore::new(ctx.platform.storage.clone()).get().await?;
            println!("{}", serde_json::to_string_pretty(&preferences)?);
        }
        PrefsCommands::Reset => {
            if ctx.storage.remove(PREFERENCES_KEY)? {
                println!("Preferences reset to defaults");
            } else {
                println!("Preferences already at defaults");
            }
        }
        PrefsCommands::Storage => {
            println!("{}", ctx.storage.path().display());
            for key in ctx.storage.keys() {
                println!("  {}", key);
            }
        }
    }

    Ok(())
}
