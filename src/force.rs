//! Data model for a single concurrent force with partially unknown attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AttributeError;
use crate::geometry::{check_finite, normalize_angle, to_cartesian, to_polar, Components};

/// A force attribute that is either fixed or still to be solved for.
///
/// Serialized as `Option<f64>`, with `null` meaning unknown.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Attribute {
    /// The value is fixed.
    Known(f64),
    /// The value must be found by a solver.
    Unknown,
}

impl Attribute {
    /// Return the fixed value, if any.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unknown => None,
        }
    }

    /// Whether the value is fixed.
    #[must_use]
    pub const fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Whether the value still has to be solved for.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl From<Option<f64>> for Attribute {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

impl From<Attribute> for Option<f64> {
    fn from(value: Attribute) -> Self {
        value.value()
    }
}

/// Stable identifier of a force within a [`ForceSystem`](crate::ForceSystem).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForceId(usize);

impl ForceId {
    /// Wrap a raw identifier.
    pub(crate) const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ForceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a force's values came from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Values were typed in directly.
    Entered,
    /// The force was sketched on a drawing surface.
    Drawn {
        /// Length of the sketched line in pixels; a hint for the magnitude.
        length: f64,
    },
    /// At least one attribute was filled in by a solver.
    Solved,
}

/// One force acting through the common origin of a concurrent system.
///
/// A force carries zero, one or two unknown attributes. Known magnitudes are
/// finite and non-negative; known angles are finite and stored in `[0, 360)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Force {
    /// Identifier assigned by the owning system.
    id: ForceId,
    /// Display name such as `F1`.
    label: String,
    /// Magnitude of the force.
    magnitude: Attribute,
    /// Direction in degrees, counter-clockwise from +X.
    angle: Attribute,
    /// Origin of the current values.
    provenance: Provenance,
}

impl Force {
    /// Create a validated force.
    pub(crate) fn new(
        id: ForceId,
        label: String,
        magnitude: Attribute,
        angle: Attribute,
        provenance: Provenance,
    ) -> Result<Self, AttributeError> {
        Ok(Self {
            id,
            label,
            magnitude: validate_magnitude(magnitude)?,
            angle: validate_angle(angle)?,
            provenance,
        })
    }

    /// Identifier of the force.
    #[must_use]
    pub const fn id(&self) -> ForceId {
        self.id
    }

    /// Display name of the force.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Magnitude attribute.
    #[must_use]
    pub const fn magnitude(&self) -> Attribute {
        self.magnitude
    }

    /// Angle attribute in degrees.
    #[must_use]
    pub const fn angle(&self) -> Attribute {
        self.angle
    }

    /// Origin of the current values.
    #[must_use]
    pub const fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Number of unknown attributes (0, 1 or 2).
    #[must_use]
    pub fn unknown_count(&self) -> usize {
        usize::from(self.magnitude.is_unknown()) + usize::from(self.angle.is_unknown())
    }

    /// Cartesian components, available once both attributes are known.
    #[must_use]
    pub fn known_components(&self) -> Option<Components> {
        match (self.magnitude, self.angle) {
            (Attribute::Known(magnitude), Attribute::Known(angle)) => {
                to_cartesian(magnitude, angle).ok()
            }
            _ => None,
        }
    }

    /// Replace the display name.
    pub(crate) fn set_label(&mut self, label: String) {
        self.label = label;
    }

    /// Validate and store a new magnitude.
    pub(crate) fn set_magnitude(&mut self, magnitude: Attribute) -> Result<(), AttributeError> {
        self.magnitude = validate_magnitude(magnitude)?;
        Ok(())
    }

    /// Validate, normalize and store a new angle.
    pub(crate) fn set_angle(&mut self, angle: Attribute) -> Result<(), AttributeError> {
        self.angle = validate_angle(angle)?;
        Ok(())
    }

    /// Record that a solver filled in a value.
    pub(crate) fn mark_solved(&mut self) {
        self.provenance = Provenance::Solved;
    }
}

/// Check a magnitude before it is stored.
fn validate_magnitude(magnitude: Attribute) -> Result<Attribute, AttributeError> {
    if let Attribute::Known(value) = magnitude {
        check_finite(value)?;
        if value < 0.0 {
            return Err(AttributeError::NegativeMagnitude { magnitude: value });
        }
    }
    Ok(magnitude)
}

/// Check an angle and bring it into the canonical range.
fn validate_angle(angle: Attribute) -> Result<Attribute, AttributeError> {
    match angle {
        Attribute::Known(value) => {
            check_finite(value)?;
            Ok(Attribute::Known(normalize_angle(value)))
        }
        Attribute::Unknown => Ok(Attribute::Unknown),
    }
}

/// Net force of a fully known system.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resultant {
    /// Non-negative magnitude.
    pub magnitude: f64,
    /// Direction in degrees within `[0, 360)`; `0` when the magnitude is zero.
    pub angle: f64,
}

impl Resultant {
    /// Build a resultant from summed components.
    #[must_use]
    pub fn from_components(components: Components) -> Self {
        let (magnitude, angle) = to_polar(components.x, components.y);
        Self { magnitude, angle }
    }

    /// Cartesian components of the resultant.
    #[must_use]
    pub fn components(&self) -> Components {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        Components::new(self.magnitude * cos, self.magnitude * sin)
    }
}
