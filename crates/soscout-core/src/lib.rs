// Core business logic lives here - the brain of the operation
pub mod bookmarks;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod session;

pub use bookmarks::BookmarkStore;
pub use config::Config;
pub use display::{render_users, render_users_or_message, NO_USERS_MESSAGE};
pub use error::Error;
pub use export::{Exporter, EXPORT_EXTENSION};
pub use models::{ListingQuery, SortOrder, User};
pub use session::Session;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
