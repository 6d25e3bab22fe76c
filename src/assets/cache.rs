//! Process-wide cache of parsed path definitions.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

use crate::assets::path::{PathDefinition, PathId};
use crate::assets::source::ResourceSource;
use crate::foundation::error::{ShapeClipError, ShapeClipResult};

static GLOBAL: LazyLock<PathCache> = LazyLock::new(PathCache::new);

/// Concurrent map from [`PathId`] to parsed definitions.
///
/// A miss loads outside the lock; when two callers race, the first inserted definition wins and
/// both receive it.
#[derive(Debug, Default)]
pub struct PathCache {
    entries: RwLock<HashMap<PathId, Arc<PathDefinition>>>,
}

impl PathCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared process-wide cache.
    pub fn global() -> &'static PathCache {
        &GLOBAL
    }

    /// Return the cached definition for `id`, loading it from `source` on a miss.
    pub fn get_or_load(
        &self,
        id: &PathId,
        source: &dyn ResourceSource,
    ) -> ShapeClipResult<Arc<PathDefinition>> {
        if let Some(def) = self.get(id)? {
            tracing::debug!(path = %id, "path cache hit");
            return Ok(def);
        }

        tracing::debug!(path = %id, "path cache miss");
        let loaded = Arc::new(source.load_path_definition(id)?);
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ShapeClipError::resource("path cache lock poisoned"))?;
        Ok(Arc::clone(entries.entry(id.clone()).or_insert(loaded)))
    }

    /// Cached definition for `id`, without loading.
    pub fn get(&self, id: &PathId) -> ShapeClipResult<Option<Arc<PathDefinition>>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| ShapeClipError::resource("path cache lock poisoned"))?;
        Ok(entries.get(id).cloned())
    }

    /// Number of cached definitions.
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |e| e.len())
    }

    /// Whether the cache holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cache.rs"]
mod tests;
