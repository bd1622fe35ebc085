use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::LoadError;

use super::Catalog;

/// Serialized form of the matrix: row-major scores plus the side length
#[derive(Debug, Serialize, Deserialize)]
struct SimilaritySnapshot {
    dimension: u64,
    scores: Vec<f32>,
}

/// Borrowed twin of `SimilaritySnapshot`; encodes to the same bytes
#[derive(Serialize)]
struct SimilaritySnapshotRef<'a> {
    dimension: u64,
    scores: &'a [f32],
}

/// Square matrix of precomputed pairwise similarity scores
///
/// Higher is more similar. Symmetry is conventional, not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    dimension: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Builds a matrix from row-major scores
    pub fn new(dimension: usize, scores: Vec<f32>) -> Result<Self, LoadError> {
        let expected = dimension.checked_mul(dimension).ok_or_else(|| {
            LoadError::Shape(format!("dimension {} overflows", dimension))
        })?;

        if scores.len() != expected {
            return Err(LoadError::Shape(format!(
                "similarity matrix of dimension {} needs {} scores, found {}",
                dimension,
                expected,
                scores.len()
            )));
        }

        Ok(Self { dimension, scores })
    }

    /// Builds a matrix from nested rows, rejecting anything that isn't square
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, LoadError> {
        let dimension = rows.len();
        let mut scores = Vec::with_capacity(dimension * dimension);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dimension {
                return Err(LoadError::Shape(format!(
                    "row {} has {} scores, expected {}",
                    i,
                    row.len(),
                    dimension
                )));
            }
            scores.extend(row);
        }

        Self::new(dimension, scores)
    }

    /// Builds a matrix from `f64` rows, narrowing every score to `f32`
    pub fn from_f64_rows(rows: Vec<Vec<f64>>) -> Result<Self, LoadError> {
        let narrowed = rows
            .into_iter()
            .map(|row| row.into_iter().map(|score| score as f32).collect())
            .collect();
        Self::from_rows(narrowed)
    }

    /// Fails unless the matrix has one row per catalog entry
    pub fn ensure_matches(&self, catalog: &Catalog) -> Result<(), LoadError> {
        if self.dimension != catalog.len() {
            return Err(LoadError::Shape(format!(
                "catalog has {} movies but similarity matrix has dimension {}",
                catalog.len(),
                self.dimension
            )));
        }
        Ok(())
    }

    /// Loads a bincode similarity snapshot
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let snapshot: SimilaritySnapshot =
            bincode::deserialize(&bytes).map_err(|source| LoadError::Similarity {
                path: path.to_path_buf(),
                source,
            })?;

        let dimension = usize::try_from(snapshot.dimension).map_err(|_| {
            LoadError::Shape(format!("dimension {} is too large", snapshot.dimension))
        })?;

        let matrix = Self::new(dimension, snapshot.scores)?;

        tracing::debug!(
            path = %path.display(),
            dimension = matrix.dimension(),
            bytes = bytes.len(),
            "Similarity snapshot decoded"
        );

        Ok(matrix)
    }

    /// Writes the matrix as a bincode snapshot
    pub fn save(&self, path: &Path) -> Result<(), LoadError> {
        let file = File::create(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let snapshot = SimilaritySnapshotRef {
            dimension: self.dimension as u64,
            scores: &self.scores,
        };

        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, &snapshot).map_err(|source| LoadError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Scores of `index` against every movie, in catalog order
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.dimension {
            return None;
        }
        let start = index * self.dimension;
        self.scores.get(start..start + self.dimension)
    }
}
