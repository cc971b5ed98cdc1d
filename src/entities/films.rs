use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "films")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    pub text: Option<String>,

    pub director_id: Option<i32>,

    pub rating: f64,

    pub is_active: bool,

    /// RFC 3339, set once on insert
    pub created: String,

    /// RFC 3339, bumped on every write
    pub updated: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::directors::Entity",
        from = "Column::DirectorId",
        to = "super::directors::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Director,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::film_genres::Entity")]
    FilmGenres,
}

impl Related<super::directors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Director.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::film_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmGenres.def()
    }
}

impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        super::film_genres::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::film_genres::Relation::Film.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
