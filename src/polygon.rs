//! Tip-to-tail chain of force vectors.
//!
//! Placing each force at the tip of the previous one traces the force polygon.
//! The chain closes on the origin exactly when the system is in equilibrium, and
//! the closing segment is the resultant.

use nalgebra::Vector2;
use serde::Serialize;

use crate::geometry::Components;
use crate::system::ForceSystem;

/// Vertices of a force polygon in force order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForcePolygon {
    /// Starts at the origin; one further vertex per force.
    vertices: Vec<Components>,
}

impl ForcePolygon {
    /// Chain the forces of `system`, or `None` while any attribute is unknown.
    ///
    /// # Examples
    /// ```
    /// use forcex::{Attribute, ForcePolygon, ForceSystem, Mode};
    ///
    /// let mut system = ForceSystem::new(Mode::Equilibrium);
    /// system.add_force(Attribute::Known(1.0), Attribute::Known(0.0)).expect("valid");
    /// system.add_force(Attribute::Known(1.0), Attribute::Known(180.0)).expect("valid");
    ///
    /// let polygon = ForcePolygon::from_system(&system).expect("fully known");
    /// assert_eq!(polygon.vertices().len(), 3);
    /// assert!(polygon.is_closed(1.0e-9));
    /// ```
    #[must_use]
    pub fn from_system(system: &ForceSystem) -> Option<Self> {
        let mut tip = Vector2::<f64>::zeros();
        let mut vertices = Vec::with_capacity(system.len() + 1);
        vertices.push(Components::from(tip));
        for force in system.forces() {
            tip += force.known_components()?.to_vector();
            vertices.push(Components::from(tip));
        }
        Some(Self { vertices })
    }

    /// Polygon vertices, starting at the origin.
    #[must_use]
    pub fn vertices(&self) -> &[Components] {
        &self.vertices
    }

    /// Distance from the last tip back to the origin.
    #[must_use]
    pub fn closing_gap(&self) -> f64 {
        self.vertices.last().map_or(0.0, |tip| tip.norm())
    }

    /// Whether the chain returns to the origin within `tolerance`.
    #[must_use]
    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.closing_gap() <= tolerance
    }
}
