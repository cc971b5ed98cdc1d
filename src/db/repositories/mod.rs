pub mod director;
pub mod film;
pub mod genre;
pub mod review;
pub mod token;
pub mod user;
