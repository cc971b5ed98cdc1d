//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::services::auth_service::{AuthError, AuthService};
use async_trait::async_trait;
use tracing::{info, warn};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, username: &str, password: &str) -> Result<i32, AuthError> {
        if self.store.get_user_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        // The unique index still decides if two registrations race past the check.
        let user = self
            .store
            .create_user(username, password, &self.security)
            .await?;

        info!(user_id = user.id, "Registered inactive user {}", user.username);
        Ok(user.id)
    }

    async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let Some(user) = self.store.verify_user_password(username, password).await? else {
            warn!("Failed login for {}", username);
            return Err(AuthError::InvalidCredentials);
        };

        if !user.is_active {
            warn!("Login refused for inactive user {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        let key = self.store.ensure_user_token(user.id).await?;
        Ok(key)
    }

    async fn activate(&self, username: &str) -> Result<(), AuthError> {
        if self.store.set_user_active(username, true).await? {
            info!("Activated user {}", username);
            Ok(())
        } else {
            Err(AuthError::UserNotFound(username.to_string()))
        }
    }
}
