//! TransformRegistry: the shared, ordered set of pixel transforms.
//!
//! The registry is a cloneable handle; every clone sees the same entries.
//! Entries are kept in registration order, which is also the order the pass
//! applies them in.
//!
//! # Storage
//!
//! Entries live in an insertion-ordered map keyed by [`TransformId`].
//! Unregistering leaves a tombstone instead of shifting the map, and the map
//! is compacted once tombstones outnumber live entries, so both `register`
//! and `unregister` are O(1) amortized.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::geometry::PixelRange;

/// A content-rewriting function for a pixel transform.
///
/// It receives the styled text currently covering the range on one row and
/// returns the replacement. The result is fitted back to the original width.
pub type PixelTransformFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Opaque handle to a registered transform.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct TransformId(u64);

/// A registered pixel transform.
pub struct PixelTransform {
    id: TransformId,
    range: PixelRange,
    revision: u64,
    transform: PixelTransformFn,
}

impl PixelTransform {
    /// Handle this transform was registered under.
    #[inline]
    pub const fn id(&self) -> TransformId {
        self.id
    }

    /// Cells this transform rewrites.
    #[inline]
    pub const fn range(&self) -> PixelRange {
        self.range
    }

    /// Caller-supplied revision of the transform function.
    #[inline]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Run the transform on a span of styled text.
    #[inline]
    pub fn apply(&self, text: &str) -> String {
        (self.transform)(text)
    }
}

impl std::fmt::Debug for PixelTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelTransform")
            .field("id", &self.id)
            .field("range", &self.range)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct Entries {
    map: IndexMap<TransformId, Option<Arc<PixelTransform>>>,
    live: usize,
    next_id: u64,
}

impl Entries {
    fn compact_if_sparse(&mut self) {
        let tombstones = self.map.len() - self.live;
        if tombstones > self.live {
            self.map.retain(|_, entry| entry.is_some());
        }
    }
}

/// Shared registry of pixel transforms.
///
/// Cloning the registry clones the handle, not the entries. Mutations take
/// effect on the next frame composited; a frame in progress works from the
/// snapshot it took when it started its transform pass.
#[derive(Clone, Default)]
pub struct TransformRegistry {
    inner: Arc<Mutex<Entries>>,
}

impl TransformRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transform over `range`.
    ///
    /// The transform is applied after every transform registered before it.
    pub fn register<F>(&self, range: PixelRange, transform: F) -> TransformId
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.register_revision(range, 0, Arc::new(transform))
    }

    /// Register a shared transform function tagged with a revision.
    ///
    /// The revision is not interpreted by the registry; [`TransformSlot`]
    /// compares it to decide whether a transform changed.
    ///
    /// [`TransformSlot`]: super::TransformSlot
    pub fn register_revision(
        &self,
        range: PixelRange,
        revision: u64,
        transform: PixelTransformFn,
    ) -> TransformId {
        let mut entries = self.inner.lock();
        let id = TransformId(entries.next_id);
        entries.next_id += 1;
        entries.map.insert(
            id,
            Some(Arc::new(PixelTransform {
                id,
                range,
                revision,
                transform,
            })),
        );
        entries.live += 1;
        log::debug!("registered pixel transform {id:?} over {range:?}");
        id
    }

    /// Remove a transform. Returns `false` if it was not registered.
    pub fn unregister(&self, id: TransformId) -> bool {
        let mut entries = self.inner.lock();
        let removed = entries
            .map
            .get_mut(&id)
            .and_then(Option::take)
            .is_some();
        if removed {
            entries.live -= 1;
            entries.compact_if_sparse();
            log::debug!("unregistered pixel transform {id:?}");
        }
        removed
    }

    /// Remove every transform (full teardown).
    pub fn clear(&self) {
        let mut entries = self.inner.lock();
        entries.map.clear();
        entries.live = 0;
    }

    /// Number of registered transforms.
    pub fn len(&self) -> usize {
        self.inner.lock().live
    }

    /// True if no transforms are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `id` is currently registered.
    pub fn contains(&self, id: TransformId) -> bool {
        matches!(self.inner.lock().map.get(&id), Some(Some(_)))
    }

    /// The live transforms in registration order.
    ///
    /// The snapshot is detached from the registry: later registrations do not
    /// affect it.
    pub fn snapshot(&self) -> Vec<Arc<PixelTransform>> {
        self.inner
            .lock()
            .map
            .values()
            .filter_map(Clone::clone)
            .collect()
    }
}

impl std::fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformRegistry")
            .field("len", &self.len())
            .finish()
    }
}
