//! Container for the forces of one concurrent system.

use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::classify::Unknown;
use crate::equilibrium::Solution;
use crate::errors::ForceEditError;
use crate::force::{Attribute, Force, ForceId, Provenance};
use crate::geometry::{check_finite, Components};

/// Analysis requested for a force system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Find the unknowns that make the forces sum to zero.
    #[default]
    Equilibrium,
    /// Compute the net force of fully known forces.
    Resultant,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equilibrium => f.write_str("equilibrium"),
            Self::Resultant => f.write_str("resultant"),
        }
    }
}

/// Ordered collection of forces acting through one common origin.
///
/// Forces keep the order they were added in. Identifiers are never reused, so a
/// stale [`ForceId`] from a removed force is rejected by every mutator.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ForceSystem {
    /// Forces in insertion order.
    forces: Vec<Force>,
    /// Requested analysis.
    mode: Mode,
    /// Raw value of the most recently issued identifier.
    last_id: usize,
}

impl ForceSystem {
    /// Create an empty system.
    ///
    /// # Examples
    /// ```
    /// use forcex::{ForceSystem, Mode};
    ///
    /// let system = ForceSystem::new(Mode::Resultant);
    /// assert!(system.is_empty());
    /// assert_eq!(system.mode(), Mode::Resultant);
    /// ```
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            forces: Vec::new(),
            mode,
            last_id: 0,
        }
    }

    /// Requested analysis.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Change the requested analysis.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Number of forces in the system.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forces.len()
    }

    /// Whether the system holds no forces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    /// Forces in insertion order.
    #[must_use]
    pub fn forces(&self) -> &[Force] {
        &self.forces
    }

    /// Look up a force by identifier.
    #[must_use]
    pub fn force(&self, id: ForceId) -> Option<&Force> {
        self.forces.iter().find(|force| force.id() == id)
    }

    /// Add a force whose values were entered directly.
    ///
    /// The force is labelled `F<n>` where `n` is its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ForceEditError::InvalidAttribute`] when a known magnitude is
    /// negative or a known value is not finite.
    ///
    /// # Examples
    /// ```
    /// use forcex::{Attribute, ForceSystem, Mode};
    ///
    /// let mut system = ForceSystem::new(Mode::Equilibrium);
    /// let id = system
    ///     .add_force(Attribute::Known(10.0), Attribute::Unknown)
    ///     .expect("valid force");
    /// assert_eq!(system.force(id).map(|force| force.label()), Some("F1"));
    /// assert_eq!(system.unknown_count(), 1);
    /// ```
    pub fn add_force(
        &mut self,
        magnitude: Attribute,
        angle: Attribute,
    ) -> Result<ForceId, ForceEditError> {
        self.push(magnitude, angle, Provenance::Entered)
    }

    /// Add a force that was sketched on a drawing surface.
    ///
    /// # Errors
    ///
    /// Returns [`ForceEditError::InvalidAttribute`] for invalid attributes or a
    /// non-finite drawn length.
    pub fn add_drawn_force(
        &mut self,
        magnitude: Attribute,
        angle: Attribute,
        drawn_length: f64,
    ) -> Result<ForceId, ForceEditError> {
        check_finite(drawn_length)?;
        self.push(
            magnitude,
            angle,
            Provenance::Drawn {
                length: drawn_length.abs(),
            },
        )
    }

    /// Validate a new force and append it under the next identifier.
    fn push(
        &mut self,
        magnitude: Attribute,
        angle: Attribute,
        provenance: Provenance,
    ) -> Result<ForceId, ForceEditError> {
        let id = ForceId::new(self.last_id + 1);
        let force = Force::new(id, format!("F{}", id.index()), magnitude, angle, provenance)?;
        self.last_id = id.index();
        self.forces.push(force);
        Ok(id)
    }

    /// Remove a force from the system.
    ///
    /// # Errors
    ///
    /// Returns [`ForceEditError::UnknownForce`] when `id` is not part of this system.
    pub fn remove_force(&mut self, id: ForceId) -> Result<(), ForceEditError> {
        let position = self.position(id)?;
        self.forces.remove(position);
        Ok(())
    }

    /// Replace the magnitude of a force.
    ///
    /// # Errors
    ///
    /// Returns [`ForceEditError::UnknownForce`] when `id` is not part of this system
    /// and [`ForceEditError::InvalidAttribute`] for a negative or non-finite magnitude.
    pub fn set_magnitude(&mut self, id: ForceId, magnitude: Attribute) -> Result<(), ForceEditError> {
        let position = self.position(id)?;
        self.forces[position].set_magnitude(magnitude)?;
        Ok(())
    }

    /// Replace the angle of a force; known angles are normalized into `[0, 360)`.
    ///
    /// # Errors
    ///
    /// Returns [`ForceEditError::UnknownForce`] when `id` is not part of this system
    /// and [`ForceEditError::InvalidAttribute`] for a non-finite angle.
    pub fn set_angle(&mut self, id: ForceId, angle: Attribute) -> Result<(), ForceEditError> {
        let position = self.position(id)?;
        self.forces[position].set_angle(angle)?;
        Ok(())
    }

    /// Rename a force.
    ///
    /// # Errors
    ///
    /// Returns [`ForceEditError::UnknownForce`] when `id` is not part of this system.
    pub fn set_label(&mut self, id: ForceId, label: impl Into<String>) -> Result<(), ForceEditError> {
        let position = self.position(id)?;
        self.forces[position].set_label(label.into());
        Ok(())
    }

    /// Total number of unknown scalar attributes.
    #[must_use]
    pub fn unknown_count(&self) -> usize {
        self.forces.iter().map(Force::unknown_count).sum()
    }

    /// Vector sum of every fully known force.
    #[must_use]
    pub fn known_sum(&self) -> Components {
        self.forces
            .iter()
            .filter_map(Force::known_components)
            .map(Components::to_vector)
            .sum::<Vector2<f64>>()
            .into()
    }

    /// Write the values of a solution onto the forces it resolves.
    ///
    /// Either every assignment is applied or, on error, none is.
    ///
    /// # Errors
    ///
    /// Returns [`ForceEditError::UnknownForce`] when an assignment refers to a force
    /// that is not part of this system and [`ForceEditError::InvalidAttribute`]
    /// when a value is invalid for its attribute.
    pub fn apply_solution(&mut self, solution: &Solution) -> Result<(), ForceEditError> {
        let mut updated = self.forces.clone();
        for assignment in solution.assignments() {
            let force_id = assignment.unknown.force();
            let position = self.position(force_id)?;
            let force = &mut updated[position];
            match assignment.unknown {
                Unknown::Magnitude(_) => force.set_magnitude(Attribute::Known(assignment.value))?,
                Unknown::Angle(_) => force.set_angle(Attribute::Known(assignment.value))?,
            }
            force.mark_solved();
        }
        self.forces = updated;
        Ok(())
    }

    /// Index of a force in the storage vector.
    fn position(&self, id: ForceId) -> Result<usize, ForceEditError> {
        self.forces
            .iter()
            .position(|force| force.id() == id)
            .ok_or(ForceEditError::UnknownForce(id))
    }
}
