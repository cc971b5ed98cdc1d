use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use crate::entities::{film_genres, genres, prelude::*};
use crate::models::genre::{Genre, GenreInput};

pub struct GenreRepository {
    conn: DatabaseConnection,
}

impl GenreRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_page(&self, offset: u64, limit: u64) -> Result<(Vec<Genre>, u64)> {
        let total = Genres::find()
            .count(&self.conn)
            .await
            .context("Failed to count genres")?;

        let rows = Genres::find()
            .order_by_asc(genres::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list genres")?;

        Ok((rows.into_iter().map(Genre::from).collect(), total))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Genre>> {
        let row = Genres::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query genre by ID")?;

        Ok(row.map(Genre::from))
    }

    pub async fn create(&self, input: GenreInput) -> Result<Genre> {
        let model = genres::ActiveModel {
            name: Set(input.name),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert genre")?;

        info!("Created genre {}: {}", model.id, model.name);
        Ok(model.into())
    }

    pub async fn update(&self, id: i32, input: GenreInput) -> Result<Option<Genre>> {
        let Some(existing) = Genres::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: genres::ActiveModel = existing.into();
        active.name = Set(input.name);
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update genre")?;

        Ok(Some(model.into()))
    }

    /// Deletes the genre and unlinks it from every film. Films are kept.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        film_genres::Entity::delete_many()
            .filter(film_genres::Column::GenreId.eq(id))
            .exec(&txn)
            .await?;

        let result = Genres::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed genre with ID: {}", id);
        }
        Ok(removed)
    }
}
