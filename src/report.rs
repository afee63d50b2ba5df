use std::fmt::Write;

use forcex::{Attribute, Case, Force, ForceId, Mode, Provenance, Solution, Unknown};

use crate::problem::Summary;

/// Render a textual summary of a solved force system.
///
/// The report restates the component equations first so the numbers that follow
/// can be checked by hand against `ΣFx = 0` and `ΣFy = 0`.
#[must_use]
pub fn render_summary(summary: &Summary) -> String {
    let mut output = String::new();

    let title = match summary.mode {
        Mode::Equilibrium => "Equilibrium",
        Mode::Resultant => "Resultant",
    };
    writeln!(
        &mut output,
        "{title} of {} concurrent force(s)",
        summary.forces.len()
    )
    .expect("writing to string cannot fail");
    writeln!(&mut output, "{}", summary.equations).expect("writing to string cannot fail");

    if let Some(equilibrium) = &summary.equilibrium {
        writeln!(&mut output, "Case: {}", describe_case(equilibrium.case))
            .expect("writing to string cannot fail");
        let numbered = equilibrium.solutions.len() > 1;
        for (index, solution) in equilibrium.solutions.iter().enumerate() {
            if numbered {
                writeln!(&mut output, "Solution {}:", index + 1)
                    .expect("writing to string cannot fail");
            }
            write_assignments(&mut output, &summary.forces, solution);
        }
        if numbered {
            output.push_str("Several solutions exist; none was applied.\n");
        }
        writeln!(
            &mut output,
            "Residual: ({:+.6}, {:+.6})",
            equilibrium.residual.x, equilibrium.residual.y
        )
        .expect("writing to string cannot fail");
    }

    if let Some(prescribed) = &summary.prescribed {
        let numbered = prescribed.solutions.len() > 1;
        for (index, solution) in prescribed.solutions.iter().enumerate() {
            if numbered {
                writeln!(&mut output, "Solution {}:", index + 1)
                    .expect("writing to string cannot fail");
            }
            write_assignments(&mut output, &summary.forces, &solution.forces);
            if numbered {
                writeln!(
                    &mut output,
                    "  R = {:.3} at {:.2}°",
                    solution.resultant.magnitude, solution.resultant.angle
                )
                .expect("writing to string cannot fail");
            }
        }
        if numbered {
            output.push_str("Several solutions exist; none was applied.\n");
        }
        writeln!(
            &mut output,
            "Residual: ({:+.6}, {:+.6})",
            prescribed.residual.x, prescribed.residual.y
        )
        .expect("writing to string cannot fail");
    }

    if let Some(resultant) = &summary.resultant {
        writeln!(
            &mut output,
            "R = {:.3} at {:.2}°",
            resultant.magnitude, resultant.angle
        )
        .expect("writing to string cannot fail");
    }

    output.push_str("Forces:\n");
    for force in &summary.forces {
        writeln!(&mut output, "  {}", describe_force(force))
            .expect("writing to string cannot fail");
    }

    if let Some(gap) = summary.polygon_gap {
        writeln!(&mut output, "Force polygon closing gap: {gap:.3}")
            .expect("writing to string cannot fail");
    }

    output
}

/// One line per solved attribute, named after the force it belongs to.
fn write_assignments(output: &mut String, forces: &[Force], solution: &Solution) {
    for assignment in solution.assignments() {
        let label = label_of(forces, assignment.unknown.force());
        let line = match assignment.unknown {
            Unknown::Magnitude(_) => format!("  |{label}| = {:.3}", assignment.value),
            Unknown::Angle(_) => format!("  θ_{label} = {:.2}°", assignment.value),
        };
        writeln!(output, "{line}").expect("writing to string cannot fail");
    }
}

/// Short description of the strategy used for a case.
fn describe_case(case: Case) -> &'static str {
    match case {
        Case::NetForce => "net force",
        Case::CheckOnly => "all forces known, equilibrium checked",
        Case::SingleMagnitude { .. } => "one unknown magnitude",
        Case::SingleAngle { .. } => "one unknown angle",
        Case::WholeForce { .. } => "one fully unknown force",
        Case::TwoMagnitudes { .. } => "two unknown magnitudes",
        Case::MagnitudeAndAngle { .. } => "unknown magnitude and unknown angle",
        Case::TwoAngles { .. } => "two unknown angles",
    }
}

/// Label of the force with `id`, falling back to the raw identifier.
fn label_of(forces: &[Force], id: ForceId) -> String {
    forces
        .iter()
        .find(|force| force.id() == id)
        .map_or_else(|| id.to_string(), |force| force.label().to_owned())
}

/// One report line with the values and provenance of a force.
fn describe_force(force: &Force) -> String {
    let magnitude = match force.magnitude() {
        Attribute::Known(value) => format!("{value:.3}"),
        Attribute::Unknown => "?".to_owned(),
    };
    let angle = match force.angle() {
        Attribute::Known(value) => format!("{value:.2}°"),
        Attribute::Unknown => "?".to_owned(),
    };
    let provenance = match force.provenance() {
        Provenance::Entered => "entered".to_owned(),
        Provenance::Drawn { length } => format!("drawn, {length:.0} px"),
        Provenance::Solved => "solved".to_owned(),
    };
    format!("{}: {magnitude} at {angle} ({provenance})", force.label())
}
