//! Fixture data seeding command handler

use crate::config::Config;
use crate::db::Store;

/// Seed display name, from the original tutorial data set.
const SEED_NAME: &str = "jiajianbo";

const SEED_MOVIES: &[(&str, &str)] = &[
    ("My Neighbor Totoro", "1988"),
    ("Dead Poets Society", "1989"),
    ("A Perfect World", "1993"),
    ("Leon", "1994"),
    ("Mahjong", "1996"),
    ("Swallowtail Butterfly", "1996"),
    ("King of Comedy", "1999"),
    ("Devils on the Doorstep", "1999"),
    ("WALL-E", "2008"),
    ("The Pork of Music", "2012"),
];

pub async fn cmd_forge(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    for (title, year) in SEED_MOVIES {
        store.add_movie(title, year).await?;
    }

    if let Some(user) = store.first_user().await? {
        store.update_user_name(&user.username, SEED_NAME).await?;
        println!("Set display name to '{SEED_NAME}'.");
    } else {
        println!("No user yet; run 'watchlist admin' to create one.");
    }

    let total = store.movie_count().await?;
    println!(
        "Seeded {} movies ({} total in store).",
        SEED_MOVIES.len(),
        total
    );

    Ok(())
}
