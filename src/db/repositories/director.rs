use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use super::film::delete_films_cascade;
use crate::entities::{directors, films, prelude::*};
use crate::models::director::{Director, DirectorInput};

pub struct DirectorRepository {
    conn: DatabaseConnection,
}

impl DirectorRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns one page of directors ordered by id, plus the total count.
    pub async fn list_page(&self, offset: u64, limit: u64) -> Result<(Vec<Director>, u64)> {
        let total = Directors::find()
            .count(&self.conn)
            .await
            .context("Failed to count directors")?;

        let rows = Directors::find()
            .order_by_asc(directors::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list directors")?;

        Ok((rows.into_iter().map(Director::from).collect(), total))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Director>> {
        let row = Directors::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query director by ID")?;

        Ok(row.map(Director::from))
    }

    pub async fn exists(&self, id: i32) -> Result<bool> {
        let count = Directors::find()
            .filter(directors::Column::Id.eq(id))
            .count(&self.conn)
            .await
            .context("Failed to check director existence")?;

        Ok(count > 0)
    }

    pub async fn create(&self, input: DirectorInput) -> Result<Director> {
        let model = directors::ActiveModel {
            full_name: Set(input.full_name),
            birthday: Set(input.birthday),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert director")?;

        info!("Created director {}: {}", model.id, model.full_name);
        Ok(model.into())
    }

    pub async fn update(&self, id: i32, input: DirectorInput) -> Result<Option<Director>> {
        let Some(existing) = Directors::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: directors::ActiveModel = existing.into();
        active.full_name = Set(input.full_name);
        active.birthday = Set(input.birthday);
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update director")?;

        Ok(Some(model.into()))
    }

    /// Deletes the director together with its films and everything they own.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let film_ids: Vec<i32> = Films::find()
            .filter(films::Column::DirectorId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|f| f.id)
            .collect();

        let films_removed = delete_films_cascade(&txn, &film_ids).await?;

        let result = Directors::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!(
                "Removed director {} and {} dependent film(s)",
                id, films_removed
            );
        }
        Ok(removed)
    }
}
