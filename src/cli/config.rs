//! `choco config`: show or write the command line settings.

use crate::config::Config;

use super::{ConfigCommands, Context};

pub fn run(ctx: &Context, action: ConfigCommands) -> anyhow::Result<()> {
    let path = Config::config_path();

    match action {
        ConfigCommands::Show => {
            println!("# {}", path.display());
            print!("{}", toml::to_string_pretty(&ctx.config)?);
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            ctx.config.save().map_err(anyhow::Error::msg)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}
