pub mod filter;
pub mod manager;
pub mod models;

pub use filter::{Audience, ProjectFilter};
pub use manager::{Store, StoreError};
