use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    sea_query::OnConflict,
};

use crate::entities::{prelude::*, tokens};

pub struct TokenRepository {
    conn: DatabaseConnection,
}

impl TokenRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn get_for_user(&self, user_id: i32) -> Result<Option<String>> {
        let token = Tokens::find()
            .filter(tokens::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("Failed to query token for user")?;

        Ok(token.map(|t| t.key))
    }

    /// Returns the user's token, creating it on first call.
    ///
    /// The insert is `ON CONFLICT (user_id) DO NOTHING`, so concurrent first
    /// logins race on the unique index and all callers read back the same key.
    pub async fn ensure_for_user(&self, user_id: i32) -> Result<String> {
        if let Some(key) = self.get_for_user(user_id).await? {
            return Ok(key);
        }

        let token = tokens::ActiveModel {
            key: Set(generate_token_key()),
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        match Tokens::insert(token)
            .on_conflict(
                OnConflict::column(tokens::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.conn)
            .await
        {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e).context("Failed to insert token"),
        }

        self.get_for_user(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Token for user {user_id} vanished after insert"))
    }
}

/// Generate a random token key (40 character hex string)
#[must_use]
pub fn generate_token_key() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 20] = rng.random();

    bytes.iter().fold(String::with_capacity(40), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}
