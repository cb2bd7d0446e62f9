use crate::{category::CategoryCode, territory::TerritoryCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FiscalError {
    #[error("Unknown territory code: {code}")]
    UnknownTerritory { code: String },

    #[error("Empty historical series for {territory}/{category}")]
    EmptyHistory {
        territory: TerritoryCode,
        category:  CategoryCode,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type FiscalResult<T> = Result<T, FiscalError>;
