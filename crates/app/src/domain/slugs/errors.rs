//! Slug errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlugError {
    #[error("no free slug after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
