use crate::entities::reviews;

pub const DEFAULT_STARS: i32 = 7;
pub const MIN_STARS: i32 = 1;
pub const MAX_STARS: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i32,
    pub text: String,
    pub stars: i32,
}

impl From<reviews::Model> for Review {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            stars: model.stars,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewInput {
    pub text: String,
    pub stars: i32,
}
