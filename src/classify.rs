//! Solvability analysis shared by the equilibrium and resultant solvers.
//!
//! In the plane a concurrent system yields exactly two scalar equations,
//! `ΣFx = 0` and `ΣFy = 0`. The classifier counts the unknown scalars, checks how
//! they are spread across forces, and picks the closed-form strategy that the
//! solvers dispatch on.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::errors::{Precondition, SolveError};
use crate::force::{Attribute, ForceId};
use crate::system::{ForceSystem, Mode};

/// Identifies one unknown scalar attribute of a force.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "attribute", content = "force", rename_all = "snake_case")]
pub enum Unknown {
    /// The magnitude of the force.
    Magnitude(ForceId),
    /// The angle of the force.
    Angle(ForceId),
}

impl Unknown {
    /// Force the attribute belongs to.
    #[must_use]
    pub const fn force(self) -> ForceId {
        match self {
            Self::Magnitude(force) | Self::Angle(force) => force,
        }
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Magnitude(force) => write!(f, "magnitude of force {force}"),
            Self::Angle(force) => write!(f, "angle of force {force}"),
        }
    }
}

/// Algebraic situation of a force system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "case", rename_all = "snake_case")]
pub enum Case {
    /// Everything is known and the net force is requested.
    NetForce,
    /// Everything is known; equilibrium can only be verified.
    CheckOnly,
    /// One magnitude is unknown; two equations constrain it.
    SingleMagnitude {
        /// Force with the unknown magnitude.
        force: ForceId,
    },
    /// One angle is unknown; two equations constrain it.
    SingleAngle {
        /// Force with the unknown angle.
        force: ForceId,
    },
    /// Both attributes of one force are unknown.
    WholeForce {
        /// The unknown force.
        force: ForceId,
    },
    /// Two forces have unknown magnitudes along fixed lines of action.
    TwoMagnitudes {
        /// Earlier force in system order.
        first: ForceId,
        /// Later force in system order.
        second: ForceId,
    },
    /// One force has an unknown magnitude, another an unknown angle.
    MagnitudeAndAngle {
        /// Force with the unknown magnitude.
        magnitude: ForceId,
        /// Force with the unknown angle.
        angle: ForceId,
    },
    /// Two forces of fixed magnitude have unknown angles.
    TwoAngles {
        /// Earlier force in system order.
        first: ForceId,
        /// Later force in system order.
        second: ForceId,
    },
}

/// List the unknown attributes of a system in force order, magnitude before angle.
#[must_use]
pub fn unknowns(system: &ForceSystem) -> Vec<Unknown> {
    let mut unknowns = Vec::new();
    for force in system.forces() {
        if force.magnitude() == Attribute::Unknown {
            unknowns.push(Unknown::Magnitude(force.id()));
        }
        if force.angle() == Attribute::Unknown {
            unknowns.push(Unknown::Angle(force.id()));
        }
    }
    unknowns
}

/// Decide whether a system can be solved and which strategy applies.
///
/// # Errors
///
/// In [`Mode::Resultant`] any unknown attribute yields
/// [`SolveError::PreconditionViolated`]. In [`Mode::Equilibrium`] more than two
/// unknown scalars yield [`SolveError::Overdetermined`].
///
/// # Examples
/// ```
/// use forcex::{classify, Attribute, Case, ForceSystem, Mode};
///
/// let mut system = ForceSystem::new(Mode::Equilibrium);
/// system.add_force(Attribute::Known(10.0), Attribute::Known(0.0)).expect("valid");
/// let id = system.add_force(Attribute::Unknown, Attribute::Unknown).expect("valid");
/// assert_eq!(classify(&system), Ok(Case::WholeForce { force: id }));
/// ```
pub fn classify(system: &ForceSystem) -> Result<Case, SolveError> {
    let unknowns = unknowns(system);
    let case = match system.mode() {
        Mode::Resultant => match unknowns.first() {
            Some(&unknown) => {
                return Err(SolveError::PreconditionViolated(
                    Precondition::UnknownAttribute(unknown),
                ))
            }
            None => Case::NetForce,
        },
        Mode::Equilibrium => equilibrium_case(&unknowns)?,
    };
    debug!(unknowns = unknowns.len(), case = ?case, "classified force system");
    Ok(case)
}

/// Map the unknowns of an equilibrium problem onto a case.
fn equilibrium_case(unknowns: &[Unknown]) -> Result<Case, SolveError> {
    let case = match *unknowns {
        [] => Case::CheckOnly,
        [Unknown::Magnitude(force)] => Case::SingleMagnitude { force },
        [Unknown::Angle(force)] => Case::SingleAngle { force },
        [Unknown::Magnitude(first), Unknown::Angle(second)] if first == second => {
            Case::WholeForce { force: first }
        }
        [Unknown::Magnitude(first), Unknown::Magnitude(second)] => {
            Case::TwoMagnitudes { first, second }
        }
        [Unknown::Angle(first), Unknown::Angle(second)] => Case::TwoAngles { first, second },
        [Unknown::Magnitude(magnitude), Unknown::Angle(angle)]
        | [Unknown::Angle(angle), Unknown::Magnitude(magnitude)] => {
            Case::MagnitudeAndAngle { magnitude, angle }
        }
        _ => {
            return Err(SolveError::Overdetermined {
                unknowns: unknowns.len(),
            })
        }
    };
    Ok(case)
}
