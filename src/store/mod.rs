//! Read-only snapshot data: the movie catalog and its similarity matrix.
//!
//! Row `i` of the matrix always describes catalog entry `i`.

pub mod catalog;
pub mod context;
pub mod similarity;

pub use catalog::Catalog;
pub use context::RecommenderContext;
pub use similarity::SimilarityMatrix;
