#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{ObjectId, Point};
use crate::surface::Surface;

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub object_id: ObjectId,
    /// Whether the hit object may be selected.
    pub selectable: bool,
}

/// Find the topmost object whose bounds contain `pt`.
///
/// Non-selectable objects still count as hits so they shield what lies
/// beneath them. Rotation is ignored.
#[must_use]
pub fn hit_test<S: Surface + ?Sized>(pt: Point, surface: &S) -> Option<Hit> {
    surface
        .objects()
        .iter()
        .rev()
        .filter_map(|id| surface.object(id))
        .find(|obj| obj.bounds().contains(pt))
        .map(|obj| Hit { object_id: obj.id, selectable: obj.selectable })
}
