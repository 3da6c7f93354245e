//! Evasive-button geometry
//!
//! The one genuinely fiddly part of the card: deciding when and where the
//! No button flees from the pointer, and keeping it pinned inside the
//! interaction area no matter how it is chased.

use glam::Vec2;

use crate::consts::*;
use crate::{angle_toward, unit_from_angle};

/// Refusal phrases, escalating with each evade. The sim only ever emits an
/// index into this list.
pub const NO_PHRASES: [&str; 5] = ["No", "¿Segura?", "Piénsalo", "Dale", "Porfa 🥺"];

/// Where the button center should jump to, or `None` if the pointer is
/// still far enough away.
///
/// The flee direction is the pointer-to-center direction, so the button
/// always runs directly away; the jump length is fixed. The caller is
/// responsible for clamping the result into its container.
pub fn evade_from(pointer: Vec2, center: Vec2) -> Option<Vec2> {
    if pointer.distance(center) >= PROXIMITY_RADIUS {
        return None;
    }
    let theta = angle_toward(pointer, center);
    Some(center + unit_from_angle(theta) * FLEE_DISTANCE)
}

/// Clamp a button center into the container, inset by [`EDGE_MARGIN`] on
/// every side. Uses the measured container size so resizes stay correct.
///
/// Degenerate containers (smaller than twice the margin) collapse the
/// valid range to a point rather than inverting it.
pub fn clamp_to_container(pos: Vec2, container: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.clamp(EDGE_MARGIN, (container.x - EDGE_MARGIN).max(EDGE_MARGIN)),
        pos.y.clamp(EDGE_MARGIN, (container.y - EDGE_MARGIN).max(EDGE_MARGIN)),
    )
}
