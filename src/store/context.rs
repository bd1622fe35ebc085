use chrono::{DateTime, Utc};
use std::path::Path;

use crate::error::LoadError;

use super::{Catalog, SimilarityMatrix};

/// Immutable pairing of the catalog and its similarity matrix
///
/// Built once and shared behind an `Arc`; there is no mutation path.
#[derive(Debug)]
pub struct RecommenderContext {
    catalog: Catalog,
    similarity: SimilarityMatrix,
    loaded_at: DateTime<Utc>,
}

impl RecommenderContext {
    /// Pairs a catalog with a matrix, checking they describe the same movies
    pub fn new(catalog: Catalog, similarity: SimilarityMatrix) -> Result<Self, LoadError> {
        similarity.ensure_matches(&catalog)?;

        Ok(Self {
            catalog,
            similarity,
            loaded_at: Utc::now(),
        })
    }

    /// Loads both snapshots from disk
    pub fn load(catalog_path: &Path, similarity_path: &Path) -> Result<Self, LoadError> {
        let catalog = Catalog::load(catalog_path)?;
        let similarity = SimilarityMatrix::load(similarity_path)?;
        let context = Self::new(catalog, similarity)?;

        tracing::info!(
            movies = context.catalog.len(),
            catalog = %catalog_path.display(),
            similarity = %similarity_path.display(),
            "Recommendation snapshots loaded"
        );

        Ok(context)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}
