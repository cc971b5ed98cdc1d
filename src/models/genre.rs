use crate::entities::genres;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl From<genres::Model> for Genre {
    fn from(model: genres::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreInput {
    pub name: String,
}
