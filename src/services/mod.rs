pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::SeaOrmAuthService;

pub mod director_service;
pub mod director_service_impl;
pub use director_service::{DirectorError, DirectorService};
pub use director_service_impl::SeaOrmDirectorService;

pub mod film_service;
pub mod film_service_impl;
pub use film_service::{FilmError, FilmService};
pub use film_service_impl::SeaOrmFilmService;

pub mod genre_service;
pub mod genre_service_impl;
pub use genre_service::{GenreError, GenreService};
pub use genre_service_impl::SeaOrmGenreService;
