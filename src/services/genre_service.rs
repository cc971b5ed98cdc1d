//! Domain service for genres.

use thiserror::Error;

use crate::models::genre::{Genre, GenreInput};
use crate::models::page::{Page, PageRequest};

#[derive(Debug, Error)]
pub enum GenreError {
    #[error("Genre not found: {0}")]
    NotFound(i32),

    #[error("Invalid page: {0}")]
    InvalidPage(u64),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for GenreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait GenreService: Send + Sync {
    async fn list_genres(&self, request: PageRequest) -> Result<Page<Genre>, GenreError>;

    async fn get_genre(&self, id: i32) -> Result<Genre, GenreError>;

    async fn create_genre(&self, input: GenreInput) -> Result<Genre, GenreError>;

    async fn update_genre(&self, id: i32, input: GenreInput) -> Result<Genre, GenreError>;

    /// Deletes a genre and unlinks it from films. The films themselves stay.
    async fn delete_genre(&self, id: i32) -> Result<(), GenreError>;
}
