//! Admin bootstrap command handler

use rand::Rng;
use rand::distr::Alphanumeric;

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_admin(
    config: &Config,
    username: &str,
    password: Option<&str>,
) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let generated;
    let password = match password {
        Some(p) => p,
        None => {
            generated = generate_password();
            println!("Generated password: {generated}");
            println!("Store it now; it is not shown again.");
            &generated
        }
    };

    let existed = store.get_user_by_username(username).await?.is_some();
    let user = store
        .upsert_admin(username, password, &config.security)
        .await?;

    if existed {
        println!("Updated password for user '{}'.", user.username);
    } else {
        println!("Created admin user '{}'.", user.username);
    }

    Ok(())
}

fn generate_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}
