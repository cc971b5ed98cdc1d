use serde::Serialize;

use crate::models::director::Director;
use crate::models::film::{Film, FilmOverview};
use crate::models::genre::Genre;
use crate::models::page::Page;
use crate::models::review::Review;

#[derive(Debug, Serialize)]
pub struct DirectorDto {
    pub id: i32,
    pub full_name: String,
    pub age: Option<i32>,
}

impl From<Director> for DirectorDto {
    fn from(director: Director) -> Self {
        Self {
            id: director.id,
            age: director.age(),
            full_name: director.full_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenreDto {
    pub id: i32,
    pub name: String,
}

impl From<Genre> for GenreDto {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewDto {
    pub id: i32,
    pub text: String,
    pub stars: i32,
}

impl From<Review> for ReviewDto {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            text: review.text,
            stars: review.stars,
        }
    }
}

/// Read-oriented film shape: nested director, genre names, reviews.
#[derive(Debug, Serialize)]
pub struct FilmListDto {
    pub id: i32,
    pub director: Option<DirectorDto>,
    pub genres: Vec<String>,
    pub reviews: Vec<ReviewDto>,
    pub title: String,
    pub text: Option<String>,
    pub created: String,
}

impl From<FilmOverview> for FilmListDto {
    fn from(film: FilmOverview) -> Self {
        Self {
            id: film.id,
            director: film.director.map(DirectorDto::from),
            genres: film.genres.into_iter().map(|g| g.name).collect(),
            reviews: film.reviews.into_iter().map(ReviewDto::from).collect(),
            title: film.title,
            text: film.text,
            created: film.created,
        }
    }
}

/// Write-oriented film shape: flat, with raw ids.
#[derive(Debug, Serialize)]
pub struct FilmDetailDto {
    pub id: i32,
    pub title: String,
    pub text: Option<String>,
    pub rating: f64,
    pub is_active: bool,
    pub created: String,
    pub updated: String,
    pub director: Option<i32>,
    pub genres: Vec<i32>,
}

impl From<Film> for FilmDetailDto {
    fn from(film: Film) -> Self {
        Self {
            id: film.id,
            title: film.title,
            text: film.text,
            rating: film.rating,
            is_active: film.is_active,
            created: film.created,
            updated: film.updated,
            director: film.director_id,
            genres: film.genre_ids,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PageDto<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PageDto<T> {
    /// Builds the envelope with `?page=N` links relative to `path`.
    /// The link back to the first page carries no query.
    pub fn from_page<U>(page: Page<U>, path: &str) -> Self
    where
        T: From<U>,
    {
        let next = page
            .has_next()
            .then(|| format!("{path}?page={}", page.page + 1));
        let previous = page.has_previous().then(|| {
            if page.page == 2 {
                path.to_string()
            } else {
                format!("{path}?page={}", page.page - 1)
            }
        });

        Self {
            count: page.total,
            next,
            previous,
            results: page.items.into_iter().map(T::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisteredDto {
    pub user_id: i32,
}

#[derive(Debug, Serialize)]
pub struct TokenDto {
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::page::PageRequest;
    use chrono::NaiveDate;

    #[test]
    fn test_list_and_detail_shapes_differ() {
        let overview = FilmOverview {
            id: 1,
            title: "Stalker".to_string(),
            text: None,
            created: "2024-01-01T00:00:00+00:00".to_string(),
            director: Some(Director {
                id: 3,
                full_name: "Andrei Tarkovsky".to_string(),
                birthday: NaiveDate::from_ymd_opt(1932, 4, 4),
            }),
            genres: vec![Genre {
                id: 2,
                name: "Drama".to_string(),
            }],
            reviews: vec![],
        };
        let list = serde_json::to_value(FilmListDto::from(overview)).unwrap();
        assert_eq!(list["genres"], serde_json::json!(["Drama"]));
        assert_eq!(list["director"]["full_name"], "Andrei Tarkovsky");
        assert!(list.get("rating").is_none());

        let film = Film {
            id: 1,
            title: "Stalker".to_string(),
            text: None,
            director_id: Some(3),
            rating: 8.1,
            is_active: true,
            created: "2024-01-01T00:00:00+00:00".to_string(),
            updated: "2024-01-01T00:00:00+00:00".to_string(),
            genre_ids: vec![2],
        };
        let detail = serde_json::to_value(FilmDetailDto::from(film)).unwrap();
        assert_eq!(detail["genres"], serde_json::json!([2]));
        assert_eq!(detail["director"], 3);
    }

    #[test]
    fn test_page_links() {
        let page = Page::new(
            vec![Genre {
                id: 3,
                name: "Noir".to_string(),
            }],
            5,
            PageRequest::new(2, 2),
        );
        let dto: PageDto<GenreDto> = PageDto::from_page(page, "/api/v1/genres/");
        assert_eq!(dto.count, 5);
        assert_eq!(dto.next.as_deref(), Some("/api/v1/genres/?page=3"));
        assert_eq!(dto.previous.as_deref(), Some("/api/v1/genres/"));
    }
}
