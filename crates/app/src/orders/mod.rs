//! Guest order lookup

mod errors;
mod models;
mod service;
mod store;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use store::*;
