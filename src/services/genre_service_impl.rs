//! `SeaORM` implementation of the `GenreService` trait.

use crate::db::Store;
use crate::models::genre::{Genre, GenreInput};
use crate::models::page::{Page, PageRequest};
use crate::services::genre_service::{GenreError, GenreService};
use async_trait::async_trait;

pub struct SeaOrmGenreService {
    store: Store,
}

impl SeaOrmGenreService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl GenreService for SeaOrmGenreService {
    async fn list_genres(&self, request: PageRequest) -> Result<Page<Genre>, GenreError> {
        if request.page == 0 {
            return Err(GenreError::InvalidPage(request.page));
        }

        let (items, total) = self
            .store
            .list_genres(request.offset(), request.page_size)
            .await?;

        if request.is_out_of_range(total) {
            return Err(GenreError::InvalidPage(request.page));
        }

        Ok(Page::new(items, total, request))
    }

    async fn get_genre(&self, id: i32) -> Result<Genre, GenreError> {
        self.store
            .get_genre(id)
            .await?
            .ok_or(GenreError::NotFound(id))
    }

    async fn create_genre(&self, input: GenreInput) -> Result<Genre, GenreError> {
        Ok(self.store.create_genre(input).await?)
    }

    async fn update_genre(&self, id: i32, input: GenreInput) -> Result<Genre, GenreError> {
        self.store
            .update_genre(id, input)
            .await?
            .ok_or(GenreError::NotFound(id))
    }

    async fn delete_genre(&self, id: i32) -> Result<(), GenreError> {
        if self.store.delete_genre(id).await? {
            Ok(())
        } else {
            Err(GenreError::NotFound(id))
        }
    }
}
