pub use super::directors::Entity as Directors;
pub use super::film_genres::Entity as FilmGenres;
pub use super::films::Entity as Films;
pub use super::genres::Entity as Genres;
pub use super::reviews::Entity as Reviews;
pub use super::tokens::Entity as Tokens;
pub use super::users::Entity as Users;
