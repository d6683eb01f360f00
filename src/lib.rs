pub mod api;
pub mod auth;
pub mod config;
pub mod model;
pub mod post;
pub mod prompt;
pub mod route;
pub mod session;
pub mod validate;

#[cfg(test)]
mod testing;
