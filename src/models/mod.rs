pub mod director;
pub mod film;
pub mod genre;
pub mod page;
pub mod review;
