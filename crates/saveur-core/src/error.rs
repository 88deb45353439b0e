//! Error types for saveur-core

/// Result type for saveur-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in saveur-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Recipe index outside the 1-based catalogue range
    #[error("Invalid recipe index {index}: catalogue has {len} recipes (indices are 1-based)")]
    RecipeIndexOutOfRange { index: i64, len: usize },

    /// Target servings must be at least 1
    #[error("Invalid servings: {servings}")]
    InvalidServings { servings: i64 },
}
