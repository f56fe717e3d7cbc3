//! Shared, replaceable handle to the current raw tree of one source file.
//!
//! Typed views hold a clone of the handle plus the generation they were
//! created in. Replacing the raw tree bumps the generation, so every view
//! created earlier fails its next access with [`StaleNodeError`] instead of
//! reading from a tree it no longer describes.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::error::StaleNodeError;
use crate::kind::NodeKind;
use crate::node::TreeNode;
use crate::raw::{RawNode, RawNodeId, RawTree};

#[derive(Debug)]
struct TreeState {
    generation: u64,
    raw: Option<RawTree>,
}

/// Cloneable handle to the raw tree of one file.
///
/// Clones share state; any number of readers may traverse concurrently. A
/// writer calling [`replace`](Self::replace) waits for in-flight reads of
/// individual nodes, not for whole traversals.
#[derive(Clone)]
pub struct SyntaxTree {
    state: Arc<RwLock<TreeState>>,
}

impl SyntaxTree {
    pub fn new(raw: RawTree) -> Self {
        debug!(nodes = raw.len(), "created syntax tree");
        Self {
            state: Arc::new(RwLock::new(TreeState {
                generation: 0,
                raw: Some(raw),
            })),
        }
    }

    /// Current generation. Starts at 0 and grows on every replacement.
    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    /// Installs a freshly parsed raw tree, invalidating all existing views.
    ///
    /// Returns the new generation.
    pub fn replace(&self, raw: RawTree) -> u64 {
        let mut state = self.state.write();
        state.generation += 1;
        debug!(
            generation = state.generation,
            nodes = raw.len(),
            "replaced raw tree"
        );
        state.raw = Some(raw);
        state.generation
    }

    /// Drops the raw tree, invalidating all existing views.
    ///
    /// Returns the new generation.
    pub fn invalidate(&self) -> u64 {
        let mut state = self.state.write();
        state.generation += 1;
        debug!(generation = state.generation, "invalidated raw tree");
        state.raw = None;
        state.generation
    }

    /// Returns true while a raw tree is installed.
    pub fn is_loaded(&self) -> bool {
        self.state.read().raw.is_some()
    }

    /// Typed view of the root, or `None` after [`invalidate`](Self::invalidate).
    pub fn root(&self) -> Option<TreeNode> {
        let state = self.state.read();
        let raw = state.raw.as_ref()?;
        let root = raw.root();
        let kind = raw.get(root)?.kind();
        Some(TreeNode::new(self.clone(), root, state.generation, kind))
    }

    /// Wraps raw node `id` of the current generation in a typed view.
    ///
    /// Returns `None` if no tree is loaded or `id` is out of range. Wrapping
    /// the same id twice yields equal views.
    pub fn wrap(&self, id: RawNodeId) -> Option<TreeNode> {
        let state = self.state.read();
        let kind = state.raw.as_ref()?.get(id)?.kind();
        Some(TreeNode::new(self.clone(), id, state.generation, kind))
    }

    /// Runs `f` over the raw tree and raw node a view refers to, if the view
    /// is still current.
    pub(crate) fn read<R>(
        &self,
        id: RawNodeId,
        generation: u64,
        kind: NodeKind,
        f: impl FnOnce(&RawTree, &RawNode) -> R,
    ) -> Result<R, StaleNodeError> {
        let state = self.state.read();
        let current = state.generation;
        let live = state
            .raw
            .as_ref()
            .filter(|_| current == generation)
            .and_then(|raw| raw.get(id).map(|node| (raw, node)));

        match live {
            Some((raw, node)) => Ok(f(raw, node)),
            None => {
                trace!(%kind, %id, generation, current, "stale node access");
                Err(StaleNodeError {
                    kind,
                    id,
                    generation,
                    current,
                })
            }
        }
    }

    /// Returns true if both handles share the same state.
    #[inline]
    pub fn ptr_eq(&self, other: &SyntaxTree) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    #[inline]
    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.state) as *const () as usize
    }
}

impl std::fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("SyntaxTree")
            .field("generation", &state.generation)
            .field("nodes", &state.raw.as_ref().map(RawTree::len))
            .finish()
    }
}
