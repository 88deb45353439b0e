//! External collaborators
//!
//! Systems the tool server delegates to but does not implement: the Pexels
//! image-search API, the recipe-site scrape, and the document store. Each
//! sits behind a narrow trait so tool handlers can be exercised against
//! in-test stubs.

pub mod images;
pub mod scrape;
pub mod store;

pub use images::{ImageResult, ImageSearch, ImageSearchResponse, PexelsClient};
pub use scrape::{MarmitonScraper, RecipeScraper};
pub use store::{DocumentStore, MemoryStore, normalize_extended_json};
