pub mod config;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod server;
pub mod services;

pub use config::AppConfig;
pub use server::AppState;
pub use services::sentence_limiter::limit_sentences;
