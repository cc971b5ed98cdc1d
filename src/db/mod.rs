use crate::config::SecurityConfig;
use crate::models::director::{Director, DirectorInput};
use crate::models::film::{Film, FilmInput, FilmOverview};
use crate::models::genre::{Genre, GenreInput};
use crate::models::review::{Review, ReviewInput};
use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::film::UnknownGenres;
pub use repositories::user::{User, UsernameTaken};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = is_in_memory(db_url);

        if !in_memory {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        if in_memory {
            // Every sqlite connection to :memory: is its own database, so the
            // pool must hold exactly one connection for its whole lifetime.
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            in_memory = in_memory,
            "Database connected & migrations applied (pool: {}-{})",
            min_connections,
            max_connections
        );

        Ok(Self { conn })
    }

    fn director_repo(&self) -> repositories::director::DirectorRepository {
        repositories::director::DirectorRepository::new(self.conn.clone())
    }

    fn genre_repo(&self) -> repositories::genre::GenreRepository {
        repositories::genre::GenreRepository::new(self.conn.clone())
    }

    fn film_repo(&self) -> repositories::film::FilmRepository {
        repositories::film::FilmRepository::new(self.conn.clone())
    }

    fn review_repo(&self) -> repositories::review::ReviewRepository {
        repositories::review::ReviewRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn token_repo(&self) -> repositories::token::TokenRepository {
        repositories::token::TokenRepository::new(self.conn.clone())
    }

    // Directors

    pub async fn list_directors(&self, offset: u64, limit: u64) -> Result<(Vec<Director>, u64)> {
        self.director_repo().list_page(offset, limit).await
    }

    pub async fn get_director(&self, id: i32) -> Result<Option<Director>> {
        self.director_repo().get(id).await
    }

    pub async fn director_exists(&self, id: i32) -> Result<bool> {
        self.director_repo().exists(id).await
    }

    pub async fn create_director(&self, input: DirectorInput) -> Result<Director> {
        self.director_repo().create(input).await
    }

    pub async fn update_director(&self, id: i32, input: DirectorInput) -> Result<Option<Director>> {
        self.director_repo().update(id, input).await
    }

    pub async fn delete_director(&self, id: i32) -> Result<bool> {
        self.director_repo().delete(id).await
    }

    // Genres

    pub async fn list_genres(&self, offset: u64, limit: u64) -> Result<(Vec<Genre>, u64)> {
        self.genre_repo().list_page(offset, limit).await
    }

    pub async fn get_genre(&self, id: i32) -> Result<Option<Genre>> {
        self.genre_repo().get(id).await
    }

    pub async fn create_genre(&self, input: GenreInput) -> Result<Genre> {
        self.genre_repo().create(input).await
    }

    pub async fn update_genre(&self, id: i32, input: GenreInput) -> Result<Option<Genre>> {
        self.genre_repo().update(id, input).await
    }

    pub async fn delete_genre(&self, id: i32) -> Result<bool> {
        self.genre_repo().delete(id).await
    }

    // Films

    pub async fn list_film_overviews(&self) -> Result<Vec<FilmOverview>> {
        self.film_repo().list_overviews().await
    }

    pub async fn get_film(&self, id: i32) -> Result<Option<Film>> {
        self.film_repo().get(id).await
    }

    pub async fn film_exists(&self, id: i32) -> Result<bool> {
        self.film_repo().exists(id).await
    }

    pub async fn create_film(&self, input: FilmInput) -> Result<Film> {
        self.film_repo().create(input).await
    }

    pub async fn update_film(&self, id: i32, input: FilmInput) -> Result<Option<Film>> {
        self.film_repo().update(id, input).await
    }

    pub async fn delete_film(&self, id: i32) -> Result<bool> {
        self.film_repo().delete(id).await
    }

    // Reviews

    pub async fn list_reviews(&self, film_id: i32) -> Result<Vec<Review>> {
        self.review_repo().list_for_film(film_id).await
    }

    pub async fn create_review(&self, film_id: i32, input: ReviewInput) -> Result<Review> {
        self.review_repo().create(film_id, input).await
    }

    pub async fn count_reviews(&self, film_id: i32) -> Result<u64> {
        self.review_repo().count_for_film(film_id).await
    }

    // Users & tokens

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<User> {
        self.user_repo().create(username, password, config).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn verify_user_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn set_user_active(&self, username: &str, is_active: bool) -> Result<bool> {
        self.user_repo().set_active(username, is_active).await
    }

    pub async fn ensure_user_token(&self, user_id: i32) -> Result<String> {
        self.token_repo().ensure_for_user(user_id).await
    }
}
