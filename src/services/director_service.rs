//! Domain service for directors.

use thiserror::Error;

use crate::models::director::{Director, DirectorInput};
use crate::models::page::{Page, PageRequest};

#[derive(Debug, Error)]
pub enum DirectorError {
    #[error("Director not found: {0}")]
    NotFound(i32),

    #[error("Invalid page: {0}")]
    InvalidPage(u64),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for DirectorError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait DirectorService: Send + Sync {
    async fn list_directors(&self, request: PageRequest) -> Result<Page<Director>, DirectorError>;

    async fn get_director(&self, id: i32) -> Result<Director, DirectorError>;

    /// Single lookup used by the film validator.
    async fn director_exists(&self, id: i32) -> Result<bool, DirectorError>;

    async fn create_director(&self, input: DirectorInput) -> Result<Director, DirectorError>;

    async fn update_director(
        &self,
        id: i32,
        input: DirectorInput,
    ) -> Result<Director, DirectorError>;

    /// Deletes a director and, with it, all of their films and reviews.
    async fn delete_director(&self, id: i32) -> Result<(), DirectorError>;
}
