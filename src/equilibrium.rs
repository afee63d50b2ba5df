//! Closed-form equilibrium solver for concurrent force systems.
//!
//! The unknown forces must cancel the vector sum of the known ones. Writing
//! `T = -Σ known` for that required balancing force, every solvable case from
//! [`classify`](crate::classify()) reduces to a small geometric construction:
//!
//! * one unknown magnitude: project `T` onto the line of action;
//! * one unknown angle: point the force along `T` when `|T|` equals its magnitude;
//! * a fully unknown force: the force *is* `T`;
//! * two unknown magnitudes: a linear 2×2 system in the magnitudes;
//! * magnitude plus angle: intersect a line with a circle (up to two roots);
//! * two angles: intersect two circles via the law of cosines (up to two roots).
//!
//! Roots with negative magnitudes are discarded; when every root is negative the
//! solve fails with [`SolveError::InvalidMagnitude`].

use nalgebra::{Matrix2, Vector2};
use serde::Serialize;
use tracing::{debug, trace};

use crate::classify::{classify, Case, Unknown};
use crate::config::SolverConfig;
use crate::errors::{Precondition, SolveError};
use crate::force::ForceId;
use crate::geometry::{normalize_angle, to_polar, Components};
use crate::system::{ForceSystem, Mode};

/// Resolved value of one unknown attribute.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Assignment {
    /// Attribute that was solved for.
    pub unknown: Unknown,
    /// Magnitude, or angle in degrees within `[0, 360)`.
    pub value: f64,
}

impl Assignment {
    /// Pair an unknown with its value.
    #[must_use]
    pub const fn new(unknown: Unknown, value: f64) -> Self {
        Self { unknown, value }
    }
}

/// One complete set of values for every unknown of a system.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Solution {
    /// Assignments ordered by unknown.
    assignments: Vec<Assignment>,
}

impl Solution {
    /// Build a solution from assignments.
    #[must_use]
    pub fn new(mut assignments: Vec<Assignment>) -> Self {
        assignments.sort_by_key(|assignment| assignment.unknown);
        Self { assignments }
    }

    /// Assignments ordered by unknown.
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Value assigned to `unknown`, if this solution resolves it.
    #[must_use]
    pub fn value_of(&self, unknown: Unknown) -> Option<f64> {
        self.assignments
            .iter()
            .find(|assignment| assignment.unknown == unknown)
            .map(|assignment| assignment.value)
    }

    /// Whether the solution assigns nothing (a fully known system).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Outcome of a successful equilibrium solve.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Equilibrium {
    /// Strategy the classifier selected.
    pub case: Case,
    /// Every physically valid solution; a single empty solution for a fully known system.
    pub solutions: Vec<Solution>,
    /// Largest net force left over across the solutions.
    pub residual: Components,
    /// Whether the values were written back onto the system's forces.
    pub applied: bool,
}

impl Equilibrium {
    /// Whether exactly one solution exists.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.solutions.len() == 1
    }
}

/// Outcome of [`solve_equilibrium`].
pub type SolveResult = Result<Equilibrium, SolveError>;

/// Solve the unknowns of an equilibrium system using the default configuration.
///
/// See [`Solver::equilibrium`].
///
/// # Errors
///
/// Returns the classified [`SolveError`] when no valid solution exists.
///
/// # Examples
/// ```
/// use forcex::{solve_equilibrium, Attribute, ForceSystem, Mode};
///
/// let mut system = ForceSystem::new(Mode::Equilibrium);
/// system.add_force(Attribute::Known(10.0), Attribute::Known(0.0)).expect("valid");
/// system.add_force(Attribute::Known(10.0), Attribute::Known(90.0)).expect("valid");
/// let id = system.add_force(Attribute::Unknown, Attribute::Unknown).expect("valid");
///
/// let outcome = solve_equilibrium(&mut system).expect("solvable");
/// assert!(outcome.applied);
/// let balancing = system.force(id).expect("present");
/// let magnitude = balancing.magnitude().value().expect("solved");
/// let angle = balancing.angle().value().expect("solved");
/// assert!((magnitude - 200.0_f64.sqrt()).abs() < 1.0e-9);
/// assert!((angle - 225.0).abs() < 1.0e-9);
/// ```
pub fn solve_equilibrium(system: &mut ForceSystem) -> SolveResult {
    Solver::default().equilibrium(system)
}

/// Solver for equilibrium and resultant problems with a fixed configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Solver {
    /// Numeric settings.
    config: SolverConfig,
}

impl Solver {
    /// Create a solver with the supplied configuration.
    #[must_use]
    pub const fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> SolverConfig {
        self.config
    }

    /// Absolute tolerance in force units.
    pub(crate) const fn tolerance(&self) -> f64 {
        self.config.tolerance
    }

    /// Find the unknown attributes that bring `system` into equilibrium.
    ///
    /// A unique solution is written back onto the forces and marks them as
    /// solved. When several solutions exist they are all returned and the system is
    /// left untouched; apply the preferred one with
    /// [`ForceSystem::apply_solution`].
    ///
    /// # Errors
    ///
    /// * [`SolveError::PreconditionViolated`] when the system is not in equilibrium mode.
    /// * [`SolveError::Overdetermined`] for more than two unknown scalars.
    /// * [`SolveError::Inconsistent`] when the known forces cannot be balanced.
    /// * [`SolveError::Underdetermined`] when the geometry leaves an unknown free.
    /// * [`SolveError::NoRealSolution`] when the angle equations have no real root.
    /// * [`SolveError::InvalidMagnitude`] when every root needs a negative magnitude.
    /// * [`SolveError::NonFiniteSum`] when the known forces overflow.
    pub fn equilibrium(&self, system: &mut ForceSystem) -> SolveResult {
        let wrong_mode = SolveError::PreconditionViolated(Precondition::WrongMode {
            expected: Mode::Equilibrium,
            found: system.mode(),
        });
        if system.mode() != Mode::Equilibrium {
            return Err(wrong_mode);
        }
        let case = classify(system)?;
        let target = -finite_sum(system)?.to_vector();
        trace!(x = target.x, y = target.y, "required balancing force");

        let solutions = match case {
            Case::NetForce => return Err(wrong_mode),
            Case::CheckOnly => self.check_only(target)?,
            Case::SingleMagnitude { force } => self.single_magnitude(system, force, target)?,
            Case::SingleAngle { force } => self.single_angle(system, force, target)?,
            Case::WholeForce { force } => self.whole_force(force, target),
            Case::TwoMagnitudes { first, second } => {
                self.two_magnitudes(system, first, second, target)?
            }
            Case::MagnitudeAndAngle { magnitude, angle } => {
                self.magnitude_and_angle(system, magnitude, angle, target)?
            }
            Case::TwoAngles { first, second } => self.two_angles(system, first, second, target)?,
        };

        let residual = solutions
            .iter()
            .map(|solution| net_force(system, solution))
            .fold(Vector2::zeros(), |worst: Vector2<f64>, net| {
                if net.norm() > worst.norm() {
                    net
                } else {
                    worst
                }
            });

        let applied = solutions.len() == 1;
        if applied {
            system
                .apply_solution(&solutions[0])
                .map_err(SolveError::WriteBack)?;
        }
        debug!(
            case = ?case,
            solutions = solutions.len(),
            applied,
            "equilibrium solved"
        );

        Ok(Equilibrium {
            case,
            solutions,
            residual: residual.into(),
            applied,
        })
    }

    /// Verify that a fully known system already balances.
    fn check_only(&self, target: Vector2<f64>) -> Result<Vec<Solution>, SolveError> {
        if target.norm() > self.tolerance() {
            return Err(SolveError::Inconsistent {
                residual: (-target).into(),
            });
        }
        Ok(vec![Solution::default()])
    }

    /// Project the balancing force onto a known line of action.
    fn single_magnitude(
        &self,
        system: &ForceSystem,
        force: ForceId,
        target: Vector2<f64>,
    ) -> Result<Vec<Solution>, SolveError> {
        let direction = unit(known_angle(system, force)?);
        let magnitude = direction.dot(&target);
        let miss = target - direction * magnitude;
        if miss.norm() > self.tolerance() {
            return Err(SolveError::Inconsistent {
                residual: (-miss).into(),
            });
        }
        let magnitude = self.accept_magnitude(force, magnitude)?;
        Ok(vec![Solution::new(vec![Assignment::new(
            Unknown::Magnitude(force),
            magnitude,
        )])])
    }

    /// Point a force of known magnitude along the balancing force.
    fn single_angle(
        &self,
        system: &ForceSystem,
        force: ForceId,
        target: Vector2<f64>,
    ) -> Result<Vec<Solution>, SolveError> {
        let magnitude = known_magnitude(system, force)?;
        let required = target.norm();
        if magnitude <= self.tolerance() && required <= self.tolerance() {
            return Err(SolveError::Underdetermined { unknowns: 1 });
        }
        let direction = if required <= self.tolerance() {
            Vector2::x()
        } else {
            target / required
        };
        if (required - magnitude).abs() > self.tolerance() {
            return Err(SolveError::Inconsistent {
                residual: (direction * magnitude - target).into(),
            });
        }
        Ok(vec![Solution::new(vec![Assignment::new(
            Unknown::Angle(force),
            angle_of(target),
        )])])
    }

    /// The unknown force is the balancing force itself.
    fn whole_force(&self, force: ForceId, target: Vector2<f64>) -> Vec<Solution> {
        let (magnitude, angle) = if target.norm() <= self.tolerance() {
            (0.0, 0.0)
        } else {
            to_polar(target.x, target.y)
        };
        vec![Solution::new(vec![
            Assignment::new(Unknown::Magnitude(force), magnitude),
            Assignment::new(Unknown::Angle(force), angle),
        ])]
    }

    /// Solve the linear 2×2 system for two magnitudes on fixed lines.
    fn two_magnitudes(
        &self,
        system: &ForceSystem,
        first: ForceId,
        second: ForceId,
        target: Vector2<f64>,
    ) -> Result<Vec<Solution>, SolveError> {
        let u = unit(known_angle(system, first)?);
        let v = unit(known_angle(system, second)?);
        if u.perp(&v).abs() <= self.tolerance() {
            // Parallel lines of action only constrain the combined magnitude.
            let miss = target - u * u.dot(&target);
            if miss.norm() <= self.tolerance() {
                return Err(SolveError::Underdetermined { unknowns: 2 });
            }
            return Err(SolveError::Inconsistent {
                residual: (-miss).into(),
            });
        }
        let magnitudes = Matrix2::from_columns(&[u, v])
            .lu()
            .solve(&target)
            .ok_or(SolveError::Underdetermined { unknowns: 2 })?;
        let first_magnitude = self.accept_magnitude(first, magnitudes[0])?;
        let second_magnitude = self.accept_magnitude(second, magnitudes[1])?;
        Ok(vec![Solution::new(vec![
            Assignment::new(Unknown::Magnitude(first), first_magnitude),
            Assignment::new(Unknown::Magnitude(second), second_magnitude),
        ])])
    }

    /// Intersect the line of one force with the circle swept by the other.
    fn magnitude_and_angle(
        &self,
        system: &ForceSystem,
        magnitude_force: ForceId,
        angle_force: ForceId,
        target: Vector2<f64>,
    ) -> Result<Vec<Solution>, SolveError> {
        let tolerance = self.tolerance();
        let u = unit(known_angle(system, magnitude_force)?);
        let radius = known_magnitude(system, angle_force)?;
        let along = u.dot(&target);
        let across = u.perp(&target);

        if radius <= tolerance {
            // A zero force points anywhere; only the magnitude is pinned down.
            if across.abs() > tolerance {
                return Err(SolveError::Inconsistent {
                    residual: (u * along - target).into(),
                });
            }
            self.accept_magnitude(magnitude_force, along)?;
            return Err(SolveError::Underdetermined { unknowns: 2 });
        }
        if across.abs() > radius + tolerance {
            return Err(SolveError::NoRealSolution);
        }

        let half_chord = (radius * radius - across * across).max(0.0).sqrt();
        let roots = if half_chord <= tolerance {
            vec![along]
        } else {
            vec![along + half_chord, along - half_chord]
        };

        let mut solutions = Vec::with_capacity(roots.len());
        for root in &roots {
            let Ok(magnitude) = self.accept_magnitude(magnitude_force, *root) else {
                continue;
            };
            let remainder = target - u * magnitude;
            solutions.push(Solution::new(vec![
                Assignment::new(Unknown::Magnitude(magnitude_force), magnitude),
                Assignment::new(Unknown::Angle(angle_force), angle_of(remainder)),
            ]));
        }
        if solutions.is_empty() {
            return Err(SolveError::InvalidMagnitude {
                force: magnitude_force,
                magnitude: roots[0],
            });
        }
        Ok(solutions)
    }

    /// Close the triangle of two known magnitudes with the law of cosines.
    fn two_angles(
        &self,
        system: &ForceSystem,
        first: ForceId,
        second: ForceId,
        target: Vector2<f64>,
    ) -> Result<Vec<Solution>, SolveError> {
        let tolerance = self.tolerance();
        let p = known_magnitude(system, first)?;
        let q = known_magnitude(system, second)?;
        let d = target.norm();

        if p <= tolerance || q <= tolerance || d <= tolerance {
            // At least one direction is free; the magnitudes must still close the triangle.
            let closes = if p <= tolerance && q <= tolerance {
                d <= tolerance
            } else if p <= tolerance {
                (d - q).abs() <= tolerance
            } else if q <= tolerance {
                (d - p).abs() <= tolerance
            } else {
                (p - q).abs() <= tolerance
            };
            if closes {
                return Err(SolveError::Underdetermined { unknowns: 2 });
            }
            return Err(SolveError::NoRealSolution);
        }
        if d > p + q + tolerance || d < (p - q).abs() - tolerance {
            return Err(SolveError::NoRealSolution);
        }

        // Law of cosines for the angle between the first force and the target.
        let cos_offset = ((p * p + d * d - q * q) / (2.0 * p * d)).clamp(-1.0, 1.0);
        let offset = cos_offset.acos();
        let heading = target.y.atan2(target.x);
        let offsets = if p * offset.sin() <= tolerance {
            vec![offset]
        } else {
            vec![offset, -offset]
        };

        Ok(offsets
            .into_iter()
            .map(|offset| {
                let first_vector = unit((heading + offset).to_degrees()) * p;
                Solution::new(vec![
                    Assignment::new(Unknown::Angle(first), angle_of(first_vector)),
                    Assignment::new(Unknown::Angle(second), angle_of(target - first_vector)),
                ])
            })
            .collect())
    }

    /// Reject negative magnitudes and clamp round-off below zero.
    fn accept_magnitude(&self, force: ForceId, magnitude: f64) -> Result<f64, SolveError> {
        if !magnitude.is_finite() {
            return Err(SolveError::NoRealSolution);
        }
        if magnitude < -self.tolerance() {
            return Err(SolveError::InvalidMagnitude { force, magnitude });
        }
        Ok(magnitude.max(0.0))
    }
}

/// Unit vector pointing at `angle_degrees`.
pub(crate) fn unit(angle_degrees: f64) -> Vector2<f64> {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    Vector2::new(cos, sin)
}

/// Direction of a vector in degrees within `[0, 360)`.
fn angle_of(vector: Vector2<f64>) -> f64 {
    normalize_angle(to_polar(vector.x, vector.y).1)
}

/// Angle of `force`, which the case dispatch guarantees is known.
fn known_angle(system: &ForceSystem, force: ForceId) -> Result<f64, SolveError> {
    system
        .force(force)
        .and_then(|f| f.angle().value())
        .ok_or(SolveError::PreconditionViolated(
            Precondition::UnknownAttribute(Unknown::Angle(force)),
        ))
}

/// Magnitude of `force`, which the case dispatch guarantees is known.
fn known_magnitude(system: &ForceSystem, force: ForceId) -> Result<f64, SolveError> {
    system
        .force(force)
        .and_then(|f| f.magnitude().value())
        .ok_or(SolveError::PreconditionViolated(
            Precondition::UnknownAttribute(Unknown::Magnitude(force)),
        ))
}

/// Sum of the known forces, rejected when it overflows.
pub(crate) fn finite_sum(system: &ForceSystem) -> Result<Components, SolveError> {
    let sum = system.known_sum();
    if sum.x.is_finite() && sum.y.is_finite() {
        Ok(sum)
    } else {
        Err(SolveError::NonFiniteSum)
    }
}

/// Net force once the values of `solution` are substituted.
fn net_force(system: &ForceSystem, solution: &Solution) -> Vector2<f64> {
    system
        .forces()
        .iter()
        .filter_map(|force| {
            let magnitude = force
                .magnitude()
                .value()
                .or_else(|| solution.value_of(Unknown::Magnitude(force.id())))?;
            let angle = force
                .angle()
                .value()
                .or_else(|| solution.value_of(Unknown::Angle(force.id())))?;
            Some(unit(angle) * magnitude)
        })
        .sum()
}
