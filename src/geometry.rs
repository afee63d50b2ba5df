//! Conversions between polar (magnitude, angle) and Cartesian force components.
//!
//! Angles are always expressed in degrees and measured counter-clockwise from the
//! positive X axis. The canonical range for an angle is `[0, 360)`.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::errors::AttributeError;

/// Cartesian components of a force acting in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Component along the X axis.
    pub x: f64,
    /// Component along the Y axis.
    pub y: f64,
}

impl Components {
    /// Create [`Components`] from explicit values.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the components into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Length of the vector.
    #[must_use]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl From<Vector2<f64>> for Components {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Components> for Vector2<f64> {
    fn from(value: Components) -> Self {
        value.to_vector()
    }
}

/// Resolve a force given by magnitude and angle into Cartesian components.
///
/// # Errors
///
/// Returns [`AttributeError::NegativeMagnitude`] for a negative magnitude and
/// [`AttributeError::NonFinite`] when either input is NaN or infinite. Negative
/// magnitudes are never silently flipped.
///
/// # Examples
/// ```
/// use forcex::to_cartesian;
///
/// let components = to_cartesian(2.0, 90.0).expect("valid force");
/// assert!(components.x.abs() < 1.0e-12);
/// assert!((components.y - 2.0).abs() < 1.0e-12);
/// ```
pub fn to_cartesian(magnitude: f64, angle_degrees: f64) -> Result<Components, AttributeError> {
    check_finite(magnitude)?;
    check_finite(angle_degrees)?;
    if magnitude < 0.0 {
        return Err(AttributeError::NegativeMagnitude { magnitude });
    }
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    Ok(Components::new(magnitude * cos, magnitude * sin))
}

/// Convert Cartesian components into `(magnitude, angle_degrees)`.
///
/// The zero vector has no direction; it maps to `(0.0, 0.0)` by convention.
///
/// # Examples
/// ```
/// use forcex::to_polar;
///
/// let (magnitude, angle) = to_polar(-1.0, -1.0);
/// assert!((magnitude - 2.0_f64.sqrt()).abs() < 1.0e-12);
/// assert!((angle - 225.0).abs() < 1.0e-12);
/// assert_eq!(to_polar(0.0, 0.0), (0.0, 0.0));
/// ```
#[must_use]
pub fn to_polar(x: f64, y: f64) -> (f64, f64) {
    if x == 0.0 && y == 0.0 {
        return (0.0, 0.0);
    }
    (x.hypot(y), normalize_angle(y.atan2(x).to_degrees()))
}

/// Reduce an angle in degrees into `[0, 360)`.
///
/// Non-finite input yields NaN.
#[must_use]
pub fn normalize_angle(angle_degrees: f64) -> f64 {
    let reduced = angle_degrees.rem_euclid(360.0);
    // rem_euclid rounds up to the modulus for tiny negative inputs
    if reduced >= 360.0 {
        0.0
    } else {
        reduced + 0.0
    }
}

/// Smallest absolute difference between two angles, in `[0, 180]`.
#[must_use]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let delta = normalize_angle(a - b);
    delta.min(360.0 - delta)
}

/// Reject NaN and infinities.
pub(crate) fn check_finite(value: f64) -> Result<(), AttributeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AttributeError::NonFinite { value })
    }
}
