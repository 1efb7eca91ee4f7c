//! Schema initialization command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_init_db(config: &Config, drop: bool) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if drop {
        store.reset().await?;
        println!("Dropped and recreated all tables.");
    }

    println!("Initialized database at {}", config.general.database_path);
    Ok(())
}
