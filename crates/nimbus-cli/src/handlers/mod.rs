pub mod app;
pub mod auth;
pub mod plan;
pub mod plugin;
pub mod router;
pub mod target;
