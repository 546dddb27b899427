use std::path::Path;
use std::sync::Arc;

use super::loader::{load_catalog_from_json, parse_catalog, validate_catalog};
use crate::error::LoadError;
use crate::models::Quiz;

const BUILTIN_CATALOG: &str = include_str!("catalog.json");

/// The set of quizzes a user can pick from.
#[derive(Debug, Clone)]
pub struct Catalog {
    quizzes: Vec<Arc<Quiz>>,
}

impl Catalog {
    pub fn new(quizzes: Vec<Quiz>) -> Result<Self, LoadError> {
        validate_catalog(&quizzes)?;
        Ok(Self::from_validated(quizzes))
    }

    /// Quizzes shipped with the binary.
    pub fn builtin() -> Result<Self, LoadError> {
        parse_catalog(BUILTIN_CATALOG).map(Self::from_validated)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        load_catalog_from_json(path).map(Self::from_validated)
    }

    fn from_validated(quizzes: Vec<Quiz>) -> Self {
        Self {
            quizzes: quizzes.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<Quiz>> {
        self.quizzes.iter().find(|q| q.id == id).cloned()
    }

    pub fn quizzes(&self) -> &[Arc<Quiz>] {
        &self.quizzes
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.quizzes.iter().position(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }
}
