//! Error types produced while editing or solving force systems.

use thiserror::Error;

use crate::classify::Unknown;
use crate::force::ForceId;
use crate::geometry::Components;
use crate::system::Mode;

/// Error returned when a magnitude or angle value is not physically meaningful.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum AttributeError {
    /// Returned when a magnitude is negative.
    #[error("magnitude must not be negative (received {magnitude})")]
    NegativeMagnitude {
        /// Rejected magnitude.
        magnitude: f64,
    },
    /// Returned when a magnitude or angle is NaN or infinite.
    #[error("value must be finite (received {value})")]
    NonFinite {
        /// Rejected value.
        value: f64,
    },
}

/// Error returned when editing a [`ForceSystem`](crate::ForceSystem) with invalid input.
///
/// # Examples
///
/// ```
/// use forcex::{Attribute, ForceEditError, ForceSystem, Mode};
///
/// let mut system = ForceSystem::new(Mode::Equilibrium);
/// let id = system
///     .add_force(Attribute::Known(10.0), Attribute::Known(0.0))
///     .expect("valid force");
/// system.remove_force(id).expect("force removed");
/// let error = system
///     .set_magnitude(id, Attribute::Known(5.0))
///     .expect_err("removed force is rejected");
/// assert_eq!(error, ForceEditError::UnknownForce(id));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ForceEditError {
    /// Returned when a force cannot be found in the system.
    #[error("force {0} does not exist in this system")]
    UnknownForce(ForceId),
    /// Returned when the supplied magnitude or angle is invalid.
    #[error("{0}")]
    InvalidAttribute(#[from] AttributeError),
}

/// Requirement that must hold before a solve is attempted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Precondition {
    /// A resultant was requested while this attribute is still unknown.
    UnknownAttribute(Unknown),
    /// The system is tagged with a different analysis mode.
    WrongMode {
        /// Mode the solver requires.
        expected: Mode,
        /// Mode the system carries.
        found: Mode,
    },
}

impl std::fmt::Display for Precondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAttribute(unknown) => write!(f, "{unknown} is unknown"),
            Self::WrongMode { expected, found } => {
                write!(f, "system is in {found} mode, expected {expected} mode")
            }
        }
    }
}

/// Error returned when a force system cannot be solved.
///
/// Every variant is a classified outcome; no solve ever falls back to a
/// partial or approximate answer.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SolveError {
    /// A computed magnitude is negative, so the chosen unknowns cannot balance the system.
    #[error("force {force} would need a negative magnitude ({magnitude:.6})")]
    InvalidMagnitude {
        /// Force whose magnitude was solved for.
        force: ForceId,
        /// Offending magnitude.
        magnitude: f64,
    },
    /// The equations do not pin down a unique value for the unknowns.
    #[error("system is underdetermined: {unknowns} unknown(s) are not fixed by the equations")]
    Underdetermined {
        /// Number of unknown scalars in the system.
        unknowns: usize,
    },
    /// More unknown scalars than the two equilibrium equations can resolve.
    #[error("system has {unknowns} unknowns but at most 2 can be solved")]
    Overdetermined {
        /// Number of unknown scalars in the system.
        unknowns: usize,
    },
    /// The residual force exceeds the tolerance.
    #[error(
        "forces do not balance (residual {:.6}, {:.6})",
        .residual.x,
        .residual.y
    )]
    Inconsistent {
        /// Net force left over after substituting the best available values.
        residual: Components,
    },
    /// The trigonometric equations have no real root.
    #[error("no real solution exists for the unknown angle(s)")]
    NoRealSolution,
    /// The system was not in a state the solver accepts.
    #[error("precondition violated: {0}")]
    PreconditionViolated(Precondition),
    /// The known forces add up to a value outside the range of `f64`.
    #[error("sum of the known forces is not finite")]
    NonFiniteSum,
    /// A prescribed resultant magnitude or angle is invalid, or solving for it
    /// would need a negative magnitude.
    #[error("prescribed resultant is invalid: {0}")]
    InvalidTarget(AttributeError),
    /// Solved values could not be written back onto the forces.
    #[error("solved values were rejected: {0}")]
    WriteBack(ForceEditError),
}

/// Error returned when a [`SolverConfig`](crate::SolverConfig) is invalid.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Returned when the tolerance is zero, negative or not finite.
    #[error("tolerance must be positive and finite (received {tolerance})")]
    InvalidTolerance {
        /// Rejected tolerance.
        tolerance: f64,
    },
}
