use anyhow::Result;

mod utils;

mod cli;
mod config;
mod entity;

#[cfg(test)]
pub mod test;

use config::Config;

fn main() -> Result<()> {
    let config = Config::try_parse()?;

    env_logger::Builder::new()
        .filter_level(config.log_level_filter())
        .init();

    entity::run(&config)
}
