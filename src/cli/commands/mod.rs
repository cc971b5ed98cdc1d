mod serve;
mod user;

pub use serve::cmd_serve;
pub use user::cmd_user_activate;
