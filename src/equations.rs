//! Human readable component equations `ΣFx = 0` and `ΣFy = 0`.

use std::fmt;

use serde::Serialize;

use crate::force::{Attribute, Force};
use crate::system::ForceSystem;

/// Constants and coefficients at or below this size are not printed.
const PRINT_EPSILON: f64 = 1.0e-6;

/// Left-hand sides of the two equilibrium equations of a system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ComponentEquations {
    /// Sum of X components.
    pub x: String,
    /// Sum of Y components.
    pub y: String,
}

impl fmt::Display for ComponentEquations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ΣFx: {} = 0", self.x)?;
        write!(f, "ΣFy: {} = 0", self.y)
    }
}

/// Which component an equation sums.
#[derive(Clone, Copy)]
enum Axis {
    /// Horizontal components, `ΣFx`.
    X,
    /// Vertical components, `ΣFy`.
    Y,
}

impl Axis {
    /// Trigonometric function that projects onto this axis.
    fn trig(self) -> &'static str {
        match self {
            Self::X => "cos",
            Self::Y => "sin",
        }
    }

    /// Projection of a unit vector at `angle_degrees` onto this axis.
    fn project(self, angle_degrees: f64) -> f64 {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        match self {
            Self::X => cos,
            Self::Y => sin,
        }
    }
}

/// Render the component equations of `system`.
///
/// Fully known forces collapse into one numeric constant; every force with an
/// unknown contributes a symbolic term named after its label, with `θ_<label>`
/// standing for an unknown angle.
///
/// # Examples
/// ```
/// use forcex::{component_equations, Attribute, ForceSystem, Mode};
///
/// let mut system = ForceSystem::new(Mode::Equilibrium);
/// system.add_force(Attribute::Known(10.0), Attribute::Known(0.0)).expect("valid");
/// system.add_force(Attribute::Unknown, Attribute::Known(180.0)).expect("valid");
///
/// let equations = component_equations(&system);
/// assert_eq!(equations.x, "10.000 - F2");
/// assert_eq!(equations.y, "0");
/// ```
#[must_use]
pub fn component_equations(system: &ForceSystem) -> ComponentEquations {
    ComponentEquations {
        x: render_sum(system, Axis::X),
        y: render_sum(system, Axis::Y),
    }
}

/// Left-hand side of the equation for one axis.
fn render_sum(system: &ForceSystem, axis: Axis) -> String {
    let constant: f64 = system
        .forces()
        .iter()
        .filter_map(Force::known_components)
        .map(|components| match axis {
            Axis::X => components.x,
            Axis::Y => components.y,
        })
        .sum();

    let mut parts = Vec::new();
    if constant.abs() > PRINT_EPSILON {
        parts.push(format!("{constant:.3}"));
    }
    parts.extend(system.forces().iter().filter_map(|force| term(force, axis)));

    if parts.is_empty() {
        return "0".to_owned();
    }
    parts.join(" + ").replace("+ -", "- ")
}

/// Symbolic contribution of a force with at least one unknown.
fn term(force: &Force, axis: Axis) -> Option<String> {
    let label = force.label();
    match (force.magnitude(), force.angle()) {
        (Attribute::Known(_), Attribute::Known(_)) => None,
        (Attribute::Known(magnitude), Attribute::Unknown) => {
            Some(format!("{magnitude:.3} {}(θ_{label})", axis.trig()))
        }
        (Attribute::Unknown, Attribute::Known(angle)) => {
            let coefficient = axis.project(angle);
            if coefficient.abs() <= PRINT_EPSILON {
                None
            } else if (coefficient - 1.0).abs() <= PRINT_EPSILON {
                Some(label.to_owned())
            } else if (coefficient + 1.0).abs() <= PRINT_EPSILON {
                Some(format!("-{label}"))
            } else {
                Some(format!("{coefficient:.3} {label}"))
            }
        }
        (Attribute::Unknown, Attribute::Unknown) => {
            Some(format!("{label} {}(θ_{label})", axis.trig()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::Mode;

    #[test]
    fn mixes_constants_and_symbols() {
        let mut system = ForceSystem::new(Mode::Equilibrium);
        system
            .add_force(Attribute::Known(10.0), Attribute::Known(0.0))
            .expect("valid force");
        system
            .add_force(Attribute::Unknown, Attribute::Known(90.0))
            .expect("valid force");
        system
            .add_force(Attribute::Known(20.0), Attribute::Unknown)
            .expect("valid force");

        let equations = component_equations(&system);
        assert_eq!(equations.x, "10.000 + 20.000 cos(θ_F3)");
        assert_eq!(equations.y, "F2 + 20.000 sin(θ_F3)");
        assert_eq!(
            equations.to_string(),
            "ΣFx: 10.000 + 20.000 cos(θ_F3) = 0\nΣFy: F2 + 20.000 sin(θ_F3) = 0"
        );
    }

    #[test]
    fn negative_coefficients_read_as_subtraction() {
        let mut system = ForceSystem::new(Mode::Equilibrium);
        let id = system
            .add_force(Attribute::Unknown, Attribute::Known(120.0))
            .expect("valid force");
        system.set_label(id, "T").expect("label set");
        system
            .add_force(Attribute::Unknown, Attribute::Unknown)
            .expect("valid force");

        let equations = component_equations(&system);
        assert_eq!(equations.x, "-0.500 T + F2 cos(θ_F2)");
        assert_eq!(equations.y, "0.866 T + F2 sin(θ_F2)");
    }

    #[test]
    fn empty_sum_is_zero() {
        let system = ForceSystem::new(Mode::Equilibrium);
        let equations = component_equations(&system);
        assert_eq!(equations.x, "0");
        assert_eq!(equations.y, "0");
    }
}
