//! Apply a parsed command line to the addressed aircraft.

use tracing::{debug, warn};

use atcsim_core::commands::CommandLine;
use atcsim_core::errors::CommandError;
use atcsim_core::events::{CommandOutcome, CommandReport};

use crate::capabilities;
use crate::command::validator;
use crate::fleet::Fleet;

/// Validate and apply each clearance in order. A rejected clearance is
/// recorded and the chain continues with the next one. Relative turns are
/// resolved against the current heading by the category handler.
pub fn dispatch(fleet: &mut Fleet, line: &CommandLine) -> Result<CommandReport, CommandError> {
    let id = fleet
        .lookup_callsign(&line.callsign)
        .ok_or_else(|| CommandError::UnknownCallsign(line.callsign.clone()))?;

    let mut outcomes = Vec::with_capacity(line.commands.len());
    for &command in &line.commands {
        let mut ctl = fleet
            .control_surface(id)
            .ok_or_else(|| CommandError::UnknownCallsign(line.callsign.clone()))?;

        let outcome = match validator::validate(&command, ctl.category) {
            Err(reason) => CommandOutcome::Rejected { command, reason },
            Ok(()) => capabilities::apply(&mut ctl, command),
        };

        match &outcome {
            CommandOutcome::Rejected { reason, .. } => {
                warn!(callsign = %line.callsign, %command, %reason, "clearance rejected");
            }
            CommandOutcome::Partial { applied, reason, .. } => {
                debug!(callsign = %line.callsign, %command, %applied, %reason, "clearance clipped");
            }
            CommandOutcome::Accepted { command } => {
                debug!(callsign = %line.callsign, %command, "clearance accepted");
            }
        }
        outcomes.push(outcome);
    }

    Ok(CommandReport {
        aircraft: id,
        callsign: line.callsign.clone(),
        outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use atcsim_core::commands::ClearanceCommand;
    use atcsim_core::components::{Clearance, FlightState};
    use atcsim_core::enums::{AircraftCategory, Behavior};
    use atcsim_core::types::Position;

    fn fleet_with(category: AircraftCategory, state: FlightState) -> Fleet {
        let mut fleet = Fleet::new();
        fleet.spawn("AC101", category, Position::default(), state);
        fleet
    }

    fn cruise() -> FlightState {
        FlightState {
            heading: 350.0,
            speed: 300.0,
            altitude: 10_000.0,
            vertical_rate: 0.0,
        }
    }

    fn line(commands: Vec<ClearanceCommand>) -> CommandLine {
        CommandLine {
            callsign: "AC101".into(),
            commands,
        }
    }

    fn clearance(fleet: &mut Fleet) -> Clearance {
        let id = fleet.lookup_callsign("AC101").unwrap();
        *fleet.control_surface(id).unwrap().clearance
    }

    #[test]
    fn test_unknown_callsign_fails_whole_line() {
        let mut fleet = fleet_with(AircraftCategory::Standard, cruise());
        let result = dispatch(
            &mut fleet,
            &CommandLine {
                callsign: "AC999".into(),
                commands: vec![ClearanceCommand::Hold],
            },
        );
        assert_eq!(result, Err(CommandError::UnknownCallsign("AC999".into())));
    }

    #[test]
    fn test_rejection_does_not_abort_chain() {
        let mut fleet = fleet_with(AircraftCategory::Standard, cruise());
        let report = dispatch(
            &mut fleet,
            &line(vec![
                ClearanceCommand::SetSpeed { speed_kts: 9999.0 },
                ClearanceCommand::SetAltitude {
                    altitude_ft: 20_000.0,
                },
            ]),
        )
        .unwrap();

        assert!(matches!(report.outcomes[0], CommandOutcome::Rejected { .. }));
        assert!(matches!(report.outcomes[1], CommandOutcome::Accepted { .. }));
        assert!(!report.all_ok());

        let c = clearance(&mut fleet);
        assert_eq!(c.speed, 300.0, "rejected speed left untouched");
        assert_eq!(c.altitude, 20_000.0);
    }

    #[test]
    fn test_relative_heading_resolved_from_current() {
        let mut fleet = fleet_with(AircraftCategory::Standard, cruise());
        let report = dispatch(
            &mut fleet,
            &line(vec![ClearanceCommand::RelativeHeading { delta: 30.0 }]),
        )
        .unwrap();
        assert_eq!(
            report.outcomes[0],
            CommandOutcome::Accepted {
                command: ClearanceCommand::SetHeading { heading: 20.0 }
            }
        );
        assert_eq!(clearance(&mut fleet).heading, 20.0);
    }

    #[test]
    fn test_relative_turn_goes_through_hypersonic_limit() {
        let fast = FlightState {
            heading: 0.0,
            speed: 2_000.0,
            altitude: 60_000.0,
            vertical_rate: 0.0,
        };
        let mut fleet = fleet_with(AircraftCategory::Hypersonic, fast);
        let report = dispatch(
            &mut fleet,
            &line(vec![ClearanceCommand::RelativeHeading { delta: -90.0 }]),
        )
        .unwrap();
        assert!(matches!(report.outcomes[0], CommandOutcome::Partial { .. }));
        assert!(report.all_ok());
        assert_eq!(clearance(&mut fleet).heading, 330.0);

        let id = fleet.lookup_callsign("AC101").unwrap();
        assert_eq!(
            *fleet.control_surface(id).unwrap().behavior,
            Behavior::TurningLimited
        );
    }
}
