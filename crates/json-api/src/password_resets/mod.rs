//! Password Resets

mod handlers;

pub(crate) use handlers::*;
