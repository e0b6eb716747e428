pub mod auth;
pub mod comments;
pub mod discussions;
pub mod health;
pub mod teams;
pub mod users;
