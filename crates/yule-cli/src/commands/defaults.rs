//! Defaults command

use anyhow::Result;
use yule_scene::DEFAULT_TOML;

pub fn run() -> Result<()> {
    print!("{}", DEFAULT_TOML);
    Ok(())
}
