use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum BasketError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("List not found: {0}")]
    ListNotFound(Uuid),

    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl BasketError {
    /// Whether the error refers to a list or item that no longer exists.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BasketError::ListNotFound(_) | BasketError::ItemNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BasketError>;
