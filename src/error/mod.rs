//! Application error types.
//!
//! `AppError` is the top-level error type used by the data and service layers.
//! Configuration errors are fatal and abort startup; everything else is caught
//! at the top of the event handler that triggered the operation, where
//! user-facing variants are surfaced as an ephemeral reply and the rest are
//! logged and dropped. Reconciliation is convergent, so a dropped operation is
//! re-attempted naturally by the next membership event or interaction.

pub mod config;

use thiserror::Error;

use crate::error::config::ConfigError;

#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup. Always fatal.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity. Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Referenced channel, member, or message no longer exists.
    ///
    /// Usually the result of a race with a concurrent deletion or departure.
    /// Surfaced to the acting user, no state mutated.
    #[error("{0}")]
    NotFound(String),

    /// The acting user lacks the required permission for the operation.
    ///
    /// Surfaced to the acting user as an ephemeral message, no state mutated.
    #[error("{0}")]
    Unauthorized(String),

    /// The request payload was malformed (out-of-range limit, unparseable
    /// input, unresolvable request card).
    #[error("{0}")]
    BadRequest(String),
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Message to show the acting user, if this error is their fault rather
    /// than ours. Infrastructure errors return `None` and are only logged.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::BadRequest(msg) => Some(msg),
            _ => None,
        }
    }
}
