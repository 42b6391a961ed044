//! Per-category clearance handling.
//!
//! Each aircraft category maps to a table of two entry points: one for
//! heading clearances and one for everything else. Hypersonic aircraft only
//! override the heading path; other clearances share the standard handler.

use atcsim_core::commands::ClearanceCommand;
use atcsim_core::components::Clearance;
use atcsim_core::constants::{HYPERSONIC_MAX_HEADING_CHANGE_DEG, SUPERSONIC_THRESHOLD_KTS};
use atcsim_core::enums::{AircraftCategory, Behavior};
use atcsim_core::events::CommandOutcome;
use atcsim_core::types::{heading_delta, normalize_heading};

use crate::fleet::ControlSurface;

pub type HeadingHandler = fn(&mut ControlSurface<'_>, f64) -> CommandOutcome;
pub type ClearanceHandler = fn(&mut ControlSurface<'_>, ClearanceCommand) -> CommandOutcome;

pub struct Capabilities {
    pub apply_heading: HeadingHandler,
    pub apply_other: ClearanceHandler,
}

static STANDARD: Capabilities = Capabilities {
    apply_heading: standard_heading,
    apply_other: standard_other,
};

static HYPERSONIC: Capabilities = Capabilities {
    apply_heading: hypersonic_heading,
    apply_other: standard_other,
};

pub fn capabilities(category: AircraftCategory) -> &'static Capabilities {
    match category {
        AircraftCategory::Standard => &STANDARD,
        AircraftCategory::Hypersonic => &HYPERSONIC,
    }
}

/// Apply a clearance through the aircraft's category table. Relative turns
/// are resolved against the current heading and take the heading path, so
/// category turn limits apply to them as well.
pub fn apply(ctl: &mut ControlSurface<'_>, command: ClearanceCommand) -> CommandOutcome {
    let caps = capabilities(ctl.category);
    match command {
        ClearanceCommand::SetHeading { heading } => (caps.apply_heading)(ctl, heading),
        ClearanceCommand::RelativeHeading { delta } => {
            let heading = normalize_heading(ctl.state.heading + delta);
            (caps.apply_heading)(ctl, heading)
        }
        other => (caps.apply_other)(ctl, other),
    }
}

fn standard_heading(ctl: &mut ControlSurface<'_>, heading: f64) -> CommandOutcome {
    let heading = normalize_heading(heading);
    ctl.clearance.heading = heading;
    *ctl.behavior = Behavior::FollowingCommand;
    CommandOutcome::Accepted {
        command: ClearanceCommand::SetHeading { heading },
    }
}

fn standard_other(ctl: &mut ControlSurface<'_>, command: ClearanceCommand) -> CommandOutcome {
    match command {
        ClearanceCommand::SetHeading { .. } | ClearanceCommand::RelativeHeading { .. } => {
            return apply(ctl, command);
        }
        ClearanceCommand::SetAltitude { altitude_ft } => {
            ctl.clearance.altitude = altitude_ft;
            *ctl.behavior = if altitude_ft > ctl.state.altitude {
                Behavior::Climbing
            } else if altitude_ft < ctl.state.altitude {
                Behavior::Descending
            } else {
                Behavior::FollowingCommand
            };
        }
        ClearanceCommand::SetSpeed { speed_kts } => {
            ctl.clearance.speed = speed_kts;
            *ctl.behavior = Behavior::FollowingCommand;
        }
        ClearanceCommand::Hold => {
            let waypoint = ctl.clearance.waypoint;
            *ctl.clearance = Clearance {
                waypoint,
                ..Clearance::holding(ctl.state)
            };
            *ctl.behavior = Behavior::Holding;
        }
    }
    CommandOutcome::Accepted { command }
}

/// Above the supersonic threshold, heading changes larger than the structural
/// limit are clipped to that limit in the requested direction.
fn hypersonic_heading(ctl: &mut ControlSurface<'_>, heading: f64) -> CommandOutcome {
    let requested = normalize_heading(heading);
    let delta = heading_delta(ctl.state.heading, requested);

    if ctl.state.speed <= SUPERSONIC_THRESHOLD_KTS
        || delta.abs() <= HYPERSONIC_MAX_HEADING_CHANGE_DEG
    {
        return standard_heading(ctl, requested);
    }

    let applied =
        normalize_heading(ctl.state.heading + delta.signum() * HYPERSONIC_MAX_HEADING_CHANGE_DEG);
    ctl.clearance.heading = applied;
    *ctl.behavior = Behavior::TurningLimited;

    CommandOutcome::Partial {
        command: ClearanceCommand::SetHeading { heading: requested },
        applied: ClearanceCommand::SetHeading { heading: applied },
        reason: format!(
            "turn limited to {HYPERSONIC_MAX_HEADING_CHANGE_DEG:.0} deg above {SUPERSONIC_THRESHOLD_KTS:.0} kts"
        ),
    }
}
