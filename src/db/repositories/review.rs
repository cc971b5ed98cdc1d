use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{prelude::*, reviews};
use crate::models::review::{Review, ReviewInput};

pub struct ReviewRepository {
    conn: DatabaseConnection,
}

impl ReviewRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_for_film(&self, film_id: i32) -> Result<Vec<Review>> {
        let rows = Reviews::find()
            .filter(reviews::Column::FilmId.eq(film_id))
            .order_by_asc(reviews::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list reviews for film")?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    pub async fn create(&self, film_id: i32, input: ReviewInput) -> Result<Review> {
        let model = reviews::ActiveModel {
            text: Set(input.text),
            film_id: Set(film_id),
            stars: Set(input.stars),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert review")?;

        Ok(model.into())
    }

    pub async fn count_for_film(&self, film_id: i32) -> Result<u64> {
        use sea_orm::PaginatorTrait;

        Reviews::find()
            .filter(reviews::Column::FilmId.eq(film_id))
            .count(&self.conn)
            .await
            .context("Failed to count reviews for film")
    }
}
