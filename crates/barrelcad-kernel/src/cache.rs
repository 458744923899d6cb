//! Single-entry mesh memo.

use std::sync::Arc;

use barrelcad_kernel_lathe::TriangleMesh;
use tracing::debug;

use crate::{Barrel, Result};

/// Keeps the most recently built mesh, keyed by [`Barrel::fingerprint`].
///
/// Interactive editing re-evaluates the same barrel many times between
/// changes; a hit hands out the shared mesh without rebuilding it.
#[derive(Debug, Default)]
pub struct MeshCache {
    entry: Option<(u64, Arc<TriangleMesh>)>,
}

impl MeshCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mesh for `barrel`, rebuilt only when its fingerprint changed.
    pub fn get(&mut self, barrel: &Barrel) -> Result<Arc<TriangleMesh>> {
        let key = barrel.fingerprint();
        if let Some((cached, mesh)) = &self.entry {
            if *cached == key {
                debug!(key, "mesh cache hit");
                return Ok(Arc::clone(mesh));
            }
        }

        debug!(key, "mesh cache miss");
        let mesh = Arc::new(barrel.mesh()?);
        self.entry = Some((key, Arc::clone(&mesh)));
        Ok(mesh)
    }

    /// Fingerprint of the cached mesh, if any.
    pub fn key(&self) -> Option<u64> {
        self.entry.as_ref().map(|(key, _)| *key)
    }

    /// Drop the cached mesh.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}
