//! Sessions
//!
//! Bearer credentials handed out on sign in.

pub mod errors;
pub mod records;
mod repository;
pub mod service;
mod token;

pub use errors::SessionsServiceError;
pub use service::*;
pub use token::*;
