use std::sync::Arc;

use parking_lot::RwLock;

use super::*;

/// A cloneable handle to a graph guarded by a single lock.
///
/// Every access holds the lock for exactly one closure invocation; the guard is released on every
/// exit path including panics. Clones share the same graph.
#[derive(Debug)]
pub struct SharedGraph<G = Graph> {
    inner: Arc<RwLock<G>>,
}

impl<G> Clone for SharedGraph<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: Default> Default for SharedGraph<G> {
    fn default() -> Self {
        Self::new(G::default())
    }
}

impl<G> From<G> for SharedGraph<G> {
    fn from(graph: G) -> Self {
        Self::new(graph)
    }
}

impl<G> SharedGraph<G> {
    pub fn new(graph: G) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Runs `f` with shared access to the graph.
    /// Any number of readers may run concurrently.
    pub fn read<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&G) -> T,
    {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Runs `f` with exclusive access to the graph
    pub fn write<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut G) -> T,
    {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Returns a deep copy of the current state of the graph
    pub fn snapshot(&self) -> G
    where
        G: Clone,
    {
        self.read(G::clone)
    }

    /// Returns the graph if this is the last handle, otherwise gives the handle back
    pub fn try_unwrap(self) -> std::result::Result<G, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}
