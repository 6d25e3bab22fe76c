use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::assets::decode::{RasterImage, decode_image};
use crate::assets::path::{PathDefinition, PathId};
use crate::foundation::error::{ShapeClipError, ShapeClipResult};

/// Identifier of an alpha-mask stencil.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MaskId(String);

impl MaskId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MaskId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Loader for the external resources a shape may reference.
pub trait ResourceSource {
    /// Load the stencil whose alpha channel defines a mask shape.
    fn load_mask_stencil(&self, id: &MaskId) -> ShapeClipResult<RasterImage>;
    /// Load and parse a vector path definition.
    fn load_path_definition(&self, id: &PathId) -> ShapeClipResult<PathDefinition>;
}

/// Resources read from a directory: `<root>/<id>.png` stencils and `<root>/<id>.svg` paths.
#[derive(Clone, Debug)]
pub struct DirResources {
    root: PathBuf,
}

impl DirResources {
    /// Resolve identifiers relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resource root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_bytes(&self, id: &str, ext: &str) -> ShapeClipResult<Vec<u8>> {
        let norm = normalize_rel_path(id)?;
        let path = self.root.join(Path::new(&format!("{norm}.{ext}")));
        std::fs::read(&path)
            .with_context(|| format!("read resource bytes from '{}'", path.display()))
            .map_err(|e| ShapeClipError::resource(format!("{e:#}")))
    }
}

impl ResourceSource for DirResources {
    fn load_mask_stencil(&self, id: &MaskId) -> ShapeClipResult<RasterImage> {
        let bytes = self.read_bytes(id.as_str(), "png")?;
        decode_image(&bytes)
            .map_err(|e| ShapeClipError::resource(format!("mask '{id}': {e}")))
    }

    fn load_path_definition(&self, id: &PathId) -> ShapeClipResult<PathDefinition> {
        let bytes = self.read_bytes(id.as_str(), "svg")?;
        PathDefinition::from_svg(&bytes)
            .map_err(|e| ShapeClipError::resource(format!("path '{id}': {e}")))
    }
}

/// In-memory resources keyed by identifier.
#[derive(Clone, Debug, Default)]
pub struct MemoryResources {
    masks: HashMap<MaskId, RasterImage>,
    paths: HashMap<PathId, PathDefinition>,
}

impl MemoryResources {
    /// Empty resource set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mask stencil.
    pub fn with_mask(mut self, id: impl Into<MaskId>, stencil: RasterImage) -> Self {
        self.masks.insert(id.into(), stencil);
        self
    }

    /// Register a path definition.
    pub fn with_path(mut self, id: impl Into<PathId>, def: PathDefinition) -> Self {
        self.paths.insert(id.into(), def);
        self
    }
}

impl ResourceSource for MemoryResources {
    fn load_mask_stencil(&self, id: &MaskId) -> ShapeClipResult<RasterImage> {
        self.masks
            .get(id)
            .cloned()
            .ok_or_else(|| ShapeClipError::resource(format!("unknown mask '{id}'")))
    }

    fn load_path_definition(&self, id: &PathId) -> ShapeClipResult<PathDefinition> {
        self.paths
            .get(id)
            .cloned()
            .ok_or_else(|| ShapeClipError::resource(format!("unknown path '{id}'")))
    }
}

/// Normalize a relative resource identifier to forward-slash form, rejecting escapes.
pub fn normalize_rel_path(source: &str) -> ShapeClipResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ShapeClipError::resource("resource ids must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ShapeClipError::resource("resource ids must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ShapeClipError::resource("resource id must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
