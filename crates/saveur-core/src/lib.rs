//! Domain layer for the saveur MCP server
//!
//! This crate holds everything that is plain data and arithmetic:
//!
//! - **Catalogue**: the built-in recipe set, addressed by 1-based index,
//!   with per-servings quantity scaling
//! - **Pantry**: fixed ingredient lists and cooking tips
//! - **Quantity**: gram-quantity parsing and scaling rules
//!
//! It sits below the MCP facade and performs no I/O:
//!
//! ```text
//!      saveur-mcp (MCP Server)
//!              |
//!        saveur-core
//! ```

pub mod catalogue;
pub mod error;
pub mod pantry;
pub mod quantity;

pub use catalogue::{Catalogue, Ingredient, Recipe};
pub use error::{Error, Result};
pub use quantity::scale_quantity;
