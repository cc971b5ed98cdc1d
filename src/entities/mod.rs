pub mod prelude;

pub mod directors;
pub mod film_genres;
pub mod films;
pub mod genres;
pub mod reviews;
pub mod tokens;
pub mod users;
