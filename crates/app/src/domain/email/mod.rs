//! Outbound email.

mod http;
mod links;
mod logging;
mod sender;
pub mod templates;

pub use http::{HttpEmailConfig, HttpEmailSender};
pub use links::LinkBuilder;
pub use logging::LogEmailSender;
pub use sender::*;
