//! TransformSlot: mount/update/unmount lifecycle for one pixel transform.

use std::sync::Arc;

use super::registry::{TransformId, TransformRegistry};
use crate::geometry::PixelRange;

#[derive(Clone, Copy, Debug)]
struct Mounted {
    id: TransformId,
    range: PixelRange,
    revision: u64,
}

/// Owner of at most one registered transform.
///
/// A node that declares a pixel transform holds a slot and calls
/// [`TransformSlot::sync`] on every render. The transform is registered on the
/// first call, re-registered only when its range or revision changes, and
/// unregistered when the slot is unmounted or dropped.
///
/// Change detection compares the caller's revision number, never the closure
/// itself: bump the revision whenever the function's behaviour changes.
/// Re-registration moves the transform to the end of the application order.
///
/// # Example
///
/// ```
/// use inkgrid::{PixelRange, Point, TransformRegistry, TransformSlot};
///
/// let registry = TransformRegistry::new();
/// let mut slot = TransformSlot::new(registry.clone());
///
/// let range = PixelRange::point(Point::new(0, 0));
/// let first = slot.sync(range, 1, |s| s.to_uppercase());
/// let again = slot.sync(range, 1, |s| s.to_uppercase());
/// assert_eq!(first, again);
///
/// drop(slot);
/// assert!(registry.is_empty());
/// ```
#[derive(Debug)]
pub struct TransformSlot {
    registry: TransformRegistry,
    mounted: Option<Mounted>,
}

impl TransformSlot {
    /// Create an empty slot bound to `registry`.
    pub const fn new(registry: TransformRegistry) -> Self {
        Self {
            registry,
            mounted: None,
        }
    }

    /// Make sure the registry holds this slot's transform with the given
    /// range and revision, returning its current handle.
    pub fn sync<F>(&mut self, range: PixelRange, revision: u64, transform: F) -> TransformId
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        if let Some(mounted) = self.mounted {
            if mounted.range == range && mounted.revision == revision {
                return mounted.id;
            }
        }

        self.unmount();
        let id = self
            .registry
            .register_revision(range, revision, Arc::new(transform));
        self.mounted = Some(Mounted {
            id,
            range,
            revision,
        });
        id
    }

    /// Handle of the mounted transform, if any.
    pub fn id(&self) -> Option<TransformId> {
        self.mounted.map(|m| m.id)
    }

    /// Unregister the transform, if one is mounted.
    pub fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            self.registry.unregister(mounted.id);
        }
    }
}

impl Drop for TransformSlot {
    fn drop(&mut self) {
        self.unmount();
    }
}
