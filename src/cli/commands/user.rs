//! User management command handlers

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthError, AuthService, SeaOrmAuthService};

pub async fn cmd_user_activate(config: &Config, username: &str) -> anyhow::Result<()> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    let auth = SeaOrmAuthService::new(store, config.security.clone());

    match auth.activate(username).await {
        Ok(()) => {
            println!("✓ User '{username}' activated");
            Ok(())
        }
        Err(AuthError::UserNotFound(_)) => {
            anyhow::bail!("No user named '{username}'. Register one via POST /auth/register/")
        }
        Err(e) => Err(e.into()),
    }
}
