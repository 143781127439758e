//! Mosque-supply requests and partner inquiries

mod errors;
mod models;
mod service;
mod sink;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use sink::*;
