use std::collections::HashMap;

use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, LoaderTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use thiserror::Error;
use tracing::info;

use crate::entities::{directors, film_genres, films, genres, prelude::*, reviews};
use crate::models::director::Director;
use crate::models::film::{Film, FilmInput, FilmOverview};
use crate::models::genre::Genre;
use crate::models::review::Review;

/// Raised when a film is linked to genre ids that have no row.
/// The surrounding transaction is rolled back.
#[derive(Debug, Error)]
#[error("Unknown genre ids: {0:?}")]
pub struct UnknownGenres(pub Vec<i32>);

pub struct FilmRepository {
    conn: DatabaseConnection,
}

impl FilmRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Loads every film with director, genres and reviews in four queries total.
    pub async fn list_overviews(&self) -> Result<Vec<FilmOverview>> {
        let rows = Films::find()
            .order_by_asc(films::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list films")?;

        let directors = self.directors_for_films(&rows).await?;

        let reviews = rows
            .load_many(
                Reviews::find().order_by_asc(reviews::Column::Id),
                &self.conn,
            )
            .await
            .context("Failed to load film reviews")?;

        let film_ids: Vec<i32> = rows.iter().map(|f| f.id).collect();
        let mut genres_by_film = self.genres_for_films(&film_ids).await?;

        Ok(rows
            .into_iter()
            .zip(reviews)
            .map(|(film, reviews)| FilmOverview {
                id: film.id,
                genres: genres_by_film.remove(&film.id).unwrap_or_default(),
                director: film
                    .director_id
                    .and_then(|director_id| directors.get(&director_id).cloned()),
                title: film.title,
                text: film.text,
                created: film.created,
                reviews: reviews.into_iter().map(Review::from).collect(),
            })
            .collect())
    }

    async fn directors_for_films(&self, rows: &[films::Model]) -> Result<HashMap<i32, Director>> {
        let mut ids: Vec<i32> = rows.iter().filter_map(|f| f.director_id).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let directors = Directors::find()
            .filter(directors::Column::Id.is_in(ids))
            .all(&self.conn)
            .await
            .context("Failed to load film directors")?;

        Ok(directors
            .into_iter()
            .map(|d| (d.id, Director::from(d)))
            .collect())
    }

    async fn genres_for_films(&self, film_ids: &[i32]) -> Result<HashMap<i32, Vec<Genre>>> {
        if film_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links = FilmGenres::find()
            .filter(film_genres::Column::FilmId.is_in(film_ids.to_vec()))
            .order_by_asc(film_genres::Column::GenreId)
            .find_also_related(Genres)
            .all(&self.conn)
            .await
            .context("Failed to load film genres")?;

        let mut grouped: HashMap<i32, Vec<Genre>> = HashMap::new();
        for (link, genre) in links {
            if let Some(genre) = genre {
                grouped
                    .entry(link.film_id)
                    .or_default()
                    .push(Genre::from(genre));
            }
        }
        Ok(grouped)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Film>> {
        let Some(model) = Films::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query film by ID")?
        else {
            return Ok(None);
        };

        let genre_ids = genre_ids_for(&self.conn, id).await?;
        Ok(Some(Film::from_model(model, genre_ids)))
    }

    pub async fn exists(&self, id: i32) -> Result<bool> {
        Ok(Films::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query film by ID")?
            .is_some())
    }

    /// Inserts the film row and sets its genre set in a single transaction.
    pub async fn create(&self, input: FilmInput) -> Result<Film> {
        let genre_ids = input.genre_set();
        let now = chrono::Utc::now().to_rfc3339();

        let txn = self.conn.begin().await?;

        let model = films::ActiveModel {
            title: Set(input.title),
            text: Set(input.text),
            director_id: Set(Some(input.director_id)),
            rating: Set(input.rating),
            is_active: Set(input.is_active),
            created: Set(now.clone()),
            updated: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert film")?;

        replace_genres(&txn, model.id, &genre_ids).await?;

        txn.commit().await?;

        info!("Created film {}: {}", model.id, model.title);
        Ok(Film::from_model(model, genre_ids))
    }

    /// Overwrites every writable column and replaces the genre set.
    /// Returns `None` if the film does not exist.
    pub async fn update(&self, id: i32, input: FilmInput) -> Result<Option<Film>> {
        let genre_ids = input.genre_set();

        let txn = self.conn.begin().await?;

        let Some(existing) = Films::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: films::ActiveModel = existing.into();
        active.title = Set(input.title);
        active.text = Set(input.text);
        active.director_id = Set(Some(input.director_id));
        active.rating = Set(input.rating);
        active.is_active = Set(input.is_active);
        active.updated = Set(chrono::Utc::now().to_rfc3339());
        let model = active
            .update(&txn)
            .await
            .context("Failed to update film")?;

        replace_genres(&txn, id, &genre_ids).await?;

        txn.commit().await?;

        info!("Updated film {}: {}", model.id, model.title);
        Ok(Some(Film::from_model(model, genre_ids)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;
        let removed = delete_films_cascade(&txn, &[id]).await?;
        txn.commit().await?;

        if removed > 0 {
            info!("Removed film with ID: {}", id);
        }
        Ok(removed > 0)
    }
}

async fn genre_ids_for<C: ConnectionTrait>(db: &C, film_id: i32) -> Result<Vec<i32>> {
    let links = FilmGenres::find()
        .filter(film_genres::Column::FilmId.eq(film_id))
        .order_by_asc(film_genres::Column::GenreId)
        .all(db)
        .await
        .context("Failed to query film genres")?;

    Ok(links.into_iter().map(|l| l.genre_id).collect())
}

/// Makes the film's genre set exactly `genre_ids`. Fails with [`UnknownGenres`]
/// before touching any link if one of the ids has no genre row.
async fn replace_genres<C: ConnectionTrait>(db: &C, film_id: i32, genre_ids: &[i32]) -> Result<()> {
    if !genre_ids.is_empty() {
        let found: Vec<i32> = Genres::find()
            .filter(genres::Column::Id.is_in(genre_ids.to_vec()))
            .all(db)
            .await?
            .into_iter()
            .map(|g| g.id)
            .collect();

        let missing: Vec<i32> = genre_ids
            .iter()
            .copied()
            .filter(|id| !found.contains(id))
            .collect();
        if !missing.is_empty() {
            return Err(UnknownGenres(missing).into());
        }
    }

    FilmGenres::delete_many()
        .filter(film_genres::Column::FilmId.eq(film_id))
        .exec(db)
        .await?;

    if !genre_ids.is_empty() {
        let links: Vec<film_genres::ActiveModel> = genre_ids
            .iter()
            .map(|&genre_id| film_genres::ActiveModel {
                film_id: Set(film_id),
                genre_id: Set(genre_id),
            })
            .collect();

        FilmGenres::insert_many(links).exec(db).await?;
    }

    Ok(())
}

/// Deletes the given films, their reviews and their genre links.
/// Returns the number of film rows removed. Callers own the transaction.
pub(crate) async fn delete_films_cascade<C: ConnectionTrait>(
    db: &C,
    film_ids: &[i32],
) -> Result<u64> {
    if film_ids.is_empty() {
        return Ok(0);
    }

    Reviews::delete_many()
        .filter(reviews::Column::FilmId.is_in(film_ids.to_vec()))
        .exec(db)
        .await?;

    FilmGenres::delete_many()
        .filter(film_genres::Column::FilmId.is_in(film_ids.to_vec()))
        .exec(db)
        .await?;

    let result = Films::delete_many()
        .filter(films::Column::Id.is_in(film_ids.to_vec()))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
