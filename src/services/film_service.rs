//! Domain service for the film catalog.
//!
//! Owns film lifecycle (create, full replace, delete with its reviews) and the
//! review sub-resource.

use thiserror::Error;

use crate::db::UnknownGenres;
use crate::models::film::{Film, FilmInput, FilmOverview};
use crate::models::review::{Review, ReviewInput};

/// Errors specific to film operations.
#[derive(Debug, Error)]
pub enum FilmError {
    #[error("Film not found: {0}")]
    NotFound(i32),

    #[error("Unknown genre ids: {0:?}")]
    UnknownGenres(Vec<i32>),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for FilmError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<UnknownGenres>() {
            Ok(UnknownGenres(ids)) => Self::UnknownGenres(ids),
            Err(err) => Self::Database(format!("{err:#}")),
        }
    }
}

/// Domain service trait for films and their reviews.
#[async_trait::async_trait]
pub trait FilmService: Send + Sync {
    /// Lists every film with director, genres and reviews attached.
    async fn list_films(&self) -> Result<Vec<FilmOverview>, FilmError>;

    /// Gets a film with its genre ids.
    ///
    /// # Errors
    ///
    /// Returns [`FilmError::NotFound`] if no film has this id.
    async fn get_film(&self, id: i32) -> Result<Film, FilmError>;

    /// Creates a film and sets exactly the given genre set.
    ///
    /// # Errors
    ///
    /// Returns [`FilmError::UnknownGenres`] if a genre id has no row; nothing
    /// is persisted in that case.
    async fn create_film(&self, input: FilmInput) -> Result<Film, FilmError>;

    /// Overwrites every field of a film and replaces its genre set.
    async fn update_film(&self, id: i32, input: FilmInput) -> Result<Film, FilmError>;

    /// Deletes a film together with its reviews.
    async fn delete_film(&self, id: i32) -> Result<(), FilmError>;

    /// Lists the reviews of a film.
    async fn list_reviews(&self, film_id: i32) -> Result<Vec<Review>, FilmError>;

    /// Adds a review to a film.
    async fn add_review(&self, film_id: i32, input: ReviewInput) -> Result<Review, FilmError>;
}
