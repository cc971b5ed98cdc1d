use super::director::Director;
use super::genre::Genre;
use super::review::Review;
use crate::entities::films;

pub const MAX_TITLE_LEN: usize = 255;
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// A film row together with the ids of its genres.
#[derive(Debug, Clone, PartialEq)]
pub struct Film {
    pub id: i32,
    pub title: String,
    pub text: Option<String>,
    pub director_id: Option<i32>,
    pub rating: f64,
    pub is_active: bool,
    pub created: String,
    pub updated: String,
    pub genre_ids: Vec<i32>,
}

impl Film {
    #[must_use]
    pub fn from_model(model: films::Model, mut genre_ids: Vec<i32>) -> Self {
        genre_ids.sort_unstable();
        Self {
            id: model.id,
            title: model.title,
            text: model.text,
            director_id: model.director_id,
            rating: model.rating,
            is_active: model.is_active,
            created: model.created,
            updated: model.updated,
            genre_ids,
        }
    }
}

/// A film with its related rows loaded for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmOverview {
    pub id: i32,
    pub title: String,
    pub text: Option<String>,
    pub created: String,
    pub director: Option<Director>,
    pub genres: Vec<Genre>,
    pub reviews: Vec<Review>,
}

/// Validated payload for creating or fully replacing a film.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmInput {
    pub title: String,
    pub text: Option<String>,
    pub rating: f64,
    pub is_active: bool,
    pub director_id: i32,
    pub genres: Vec<i32>,
}

impl FilmInput {
    /// Genre ids with duplicates removed, in ascending order.
    #[must_use]
    pub fn genre_set(&self) -> Vec<i32> {
        let mut ids = self.genres.clone();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
