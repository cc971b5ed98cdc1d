//! `SeaORM` implementation of the `FilmService` trait.

use crate::db::Store;
use crate::models::film::{Film, FilmInput, FilmOverview};
use crate::models::review::{Review, ReviewInput};
use crate::services::film_service::{FilmError, FilmService};
use async_trait::async_trait;

pub struct SeaOrmFilmService {
    store: Store,
}

impl SeaOrmFilmService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FilmService for SeaOrmFilmService {
    async fn list_films(&self) -> Result<Vec<FilmOverview>, FilmError> {
        Ok(self.store.list_film_overviews().await?)
    }

    async fn get_film(&self, id: i32) -> Result<Film, FilmError> {
        self.store
            .get_film(id)
            .await?
            .ok_or(FilmError::NotFound(id))
    }

    async fn create_film(&self, input: FilmInput) -> Result<Film, FilmError> {
        Ok(self.store.create_film(input).await?)
    }

    async fn update_film(&self, id: i32, input: FilmInput) -> Result<Film, FilmError> {
        // No version check: a concurrent PUT on the same film can overwrite this one.
        self.store
            .update_film(id, input)
            .await?
            .ok_or(FilmError::NotFound(id))
    }

    async fn delete_film(&self, id: i32) -> Result<(), FilmError> {
        if self.store.delete_film(id).await? {
            Ok(())
        } else {
            Err(FilmError::NotFound(id))
        }
    }

    async fn list_reviews(&self, film_id: i32) -> Result<Vec<Review>, FilmError> {
        if !self.store.film_exists(film_id).await? {
            return Err(FilmError::NotFound(film_id));
        }
        Ok(self.store.list_reviews(film_id).await?)
    }

    async fn add_review(&self, film_id: i32, input: ReviewInput) -> Result<Review, FilmError> {
        if !self.store.film_exists(film_id).await? {
            return Err(FilmError::NotFound(film_id));
        }
        Ok(self.store.create_review(film_id, input).await?)
    }
}
