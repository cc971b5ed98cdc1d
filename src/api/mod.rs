use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::models::page::PageRequest;

mod auth;
mod directors;
mod error;
mod films;
mod genres;
mod observability;
mod types;
pub mod validation;

pub use error::ApiError;
pub use types::*;

use crate::services::{
    AuthService, DirectorService, FilmService, GenreService, SeaOrmAuthService,
    SeaOrmDirectorService, SeaOrmFilmService, SeaOrmGenreService,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub film_service: Arc<dyn FilmService>,

    pub director_service: Arc<dyn DirectorService>,

    pub genre_service: Arc<dyn GenreService>,

    pub auth_service: Arc<dyn AuthService>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

#[must_use]
pub fn create_app_state(
    store: Store,
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    let film_service = Arc::new(SeaOrmFilmService::new(store.clone())) as Arc<dyn FilmService>;
    let director_service =
        Arc::new(SeaOrmDirectorService::new(store.clone())) as Arc<dyn DirectorService>;
    let genre_service = Arc::new(SeaOrmGenreService::new(store.clone())) as Arc<dyn GenreService>;
    let auth_service = Arc::new(SeaOrmAuthService::new(
        store.clone(),
        config.security.clone(),
    )) as Arc<dyn AuthService>;

    Arc::new(AppState {
        config,
        store,
        film_service,
        director_service,
        genre_service,
        auth_service,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    Ok(create_app_state(store, config, prometheus_handle))
}

/// `?page=N` on paginated collections. Kept as text so a malformed value
/// answers with the same 404 as an out-of-range one.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn to_request(&self, page_size: u64) -> Result<PageRequest, ApiError> {
        let page = match self.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => raw.parse::<u64>().map_err(|_| ApiError::invalid_page())?,
        };
        if page == 0 {
            return Err(ApiError::invalid_page());
        }
        Ok(PageRequest::new(page, page_size))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let mut api_router = Router::new()
        .route(
            "/api/v1/films/",
            get(films::list_films).post(films::create_film),
        )
        .route(
            "/api/v1/films/{id}/",
            get(films::get_film)
                .put(films::update_film)
                .delete(films::delete_film),
        )
        .route(
            "/api/v1/films/{id}/reviews/",
            get(films::list_reviews).post(films::create_review),
        )
        .route(
            "/api/v1/directors/",
            get(directors::list_directors).post(directors::create_director),
        )
        .route(
            "/api/v1/directors/{id}/",
            get(directors::get_director)
                .put(directors::update_director)
                .delete(directors::delete_director),
        )
        .route(
            "/api/v1/genres/",
            get(genres::list_genres).post(genres::create_genre),
        )
        .route(
            "/api/v1/genres/{id}/",
            get(genres::get_genre)
                .put(genres::update_genre)
                .delete(genres::delete_genre),
        )
        .route("/auth/register/", post(auth::register))
        .route("/auth/login/", post(auth::login));

    if state.prometheus_handle.is_some() {
        api_router = api_router.route("/metrics", get(observability::get_metrics));
    }

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    api_router
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}
