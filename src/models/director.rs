use chrono::{Datelike, NaiveDate, Utc};

use crate::entities::directors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Director {
    pub id: i32,
    pub full_name: String,
    pub birthday: Option<NaiveDate>,
}

impl Director {
    /// Whole years between the birthday year and `year`, ignoring day and month.
    #[must_use]
    pub fn age_in(&self, year: i32) -> Option<i32> {
        self.birthday.map(|b| year - b.year())
    }

    #[must_use]
    pub fn age(&self) -> Option<i32> {
        self.age_in(Utc::now().year())
    }
}

impl From<directors::Model> for Director {
    fn from(model: directors::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            birthday: model.birthday,
        }
    }
}

/// Validated payload for creating or replacing a director.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorInput {
    pub full_name: String,
    pub birthday: Option<NaiveDate>,
}
