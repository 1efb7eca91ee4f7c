use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{movies, prelude::*};

/// A watchlist entry as the handlers see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: String,
}

impl From<movies::Model> for Movie {
    fn from(model: movies::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            year: model.year,
        }
    }
}

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All movies in primary-key order.
    pub async fn list(&self) -> Result<Vec<Movie>> {
        let rows = Movies::find()
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list movies")?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Movie>> {
        let movie = Movies::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie by ID")?;

        Ok(movie.map(Movie::from))
    }

    pub async fn add(&self, title: &str, year: &str) -> Result<Movie> {
        let now = chrono::Utc::now().to_rfc3339();

        let inserted = movies::ActiveModel {
            title: Set(title.to_string()),
            year: Set(year.to_string()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert movie")?;

        info!("Added movie: {} ({})", inserted.title, inserted.year);
        Ok(Movie::from(inserted))
    }

    /// Updates both fields; returns false when no row had that id.
    pub async fn update(&self, id: i32, title: &str, year: &str) -> Result<bool> {
        let result = Movies::update_many()
            .col_expr(movies::Column::Title, sea_orm::sea_query::Expr::value(title))
            .col_expr(movies::Column::Year, sea_orm::sea_query::Expr::value(year))
            .filter(movies::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to update movie")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Movies::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete movie")?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed movie with ID: {}", id);
        }
        Ok(removed)
    }

    pub async fn count(&self) -> Result<u64> {
        use sea_orm::PaginatorTrait;

        Movies::find()
            .count(&self.conn)
            .await
            .context("Failed to count movies")
    }
}
