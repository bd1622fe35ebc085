use serde::Deserialize;
use std::path::Path;

use crate::{
    error::{AppError, AppResult, LoadError},
    models::Movie,
};

/// On-disk layout of the catalog snapshot: one array per column.
///
/// Columns other than `movie_id` and `title` are ignored.
#[derive(Debug, Deserialize)]
struct CatalogColumns {
    movie_id: Vec<i64>,
    title: Vec<String>,
}

/// Read-only table of movies, in similarity-matrix order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    /// Builds a catalog from `(id, title)` pairs; position becomes the index
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        let movies = entries
            .into_iter()
            .enumerate()
            .map(|(index, (id, title))| Movie {
                id,
                title: title.into(),
                index,
            })
            .collect();

        Self { movies }
    }

    /// Loads the columnar JSON catalog snapshot
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let columns: CatalogColumns =
            serde_json::from_slice(&bytes).map_err(|source| LoadError::Catalog {
                path: path.to_path_buf(),
                source,
            })?;

        if columns.movie_id.len() != columns.title.len() {
            return Err(LoadError::Shape(format!(
                "catalog has {} movie ids but {} titles",
                columns.movie_id.len(),
                columns.title.len()
            )));
        }

        let catalog = Self::from_entries(columns.movie_id.into_iter().zip(columns.title));

        tracing::debug!(
            path = %path.display(),
            movies = catalog.len(),
            "Catalog snapshot decoded"
        );

        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Exact-match title lookup. Duplicate titles resolve to the first one.
    pub fn index_of(&self, title: &str) -> AppResult<usize> {
        self.movies
            .iter()
            .position(|movie| movie.title == title)
            .ok_or_else(|| AppError::NotFound(format!("Movie '{}' is not in the catalog", title)))
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }
}
