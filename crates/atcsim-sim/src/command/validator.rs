//! Semantic checks on a well-formed clearance.

use atcsim_core::commands::ClearanceCommand;
use atcsim_core::constants::{ALTITUDE_CEILING_FT, SPEED_CLEARANCE_FACTOR};
use atcsim_core::enums::AircraftCategory;
use atcsim_core::errors::{CommandError, Result};

/// Check a clearance against the limits of the addressed aircraft's category.
pub fn validate(command: &ClearanceCommand, category: AircraftCategory) -> Result<()> {
    match *command {
        ClearanceCommand::SetAltitude { altitude_ft }
            if category != AircraftCategory::Hypersonic && altitude_ft > ALTITUDE_CEILING_FT =>
        {
            Err(CommandError::AltitudeAboveCeiling {
                requested_ft: altitude_ft,
                ceiling_ft: ALTITUDE_CEILING_FT,
            })
        }
        ClearanceCommand::SetSpeed { speed_kts } => {
            let limit_kts = category.profile().max_speed_kts * SPEED_CLEARANCE_FACTOR;
            if speed_kts > limit_kts {
                Err(CommandError::SpeedAboveLimit {
                    requested_kts: speed_kts,
                    limit_kts,
                })
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atcsim_core::constants::{HYPERSONIC_MAX_SPEED_KTS, STANDARD_MAX_SPEED_KTS};

    #[test]
    fn test_ceiling_applies_to_standard_only() {
        let high = ClearanceCommand::SetAltitude {
            altitude_ft: 60_000.0,
        };
        assert!(matches!(
            validate(&high, AircraftCategory::Standard),
            Err(CommandError::AltitudeAboveCeiling { .. })
        ));
        assert!(validate(&high, AircraftCategory::Hypersonic).is_ok());

        let at_ceiling = ClearanceCommand::SetAltitude {
            altitude_ft: ALTITUDE_CEILING_FT,
        };
        assert!(validate(&at_ceiling, AircraftCategory::Standard).is_ok());
    }

    #[test]
    fn test_speed_limit_is_relative_to_profile() {
        let limit = STANDARD_MAX_SPEED_KTS * SPEED_CLEARANCE_FACTOR;
        let ok = ClearanceCommand::SetSpeed { speed_kts: limit };
        assert!(validate(&ok, AircraftCategory::Standard).is_ok());

        let too_fast = ClearanceCommand::SetSpeed { speed_kts: 9999.0 };
        assert_eq!(
            validate(&too_fast, AircraftCategory::Standard),
            Err(CommandError::SpeedAboveLimit {
                requested_kts: 9999.0,
                limit_kts: limit,
            })
        );
        assert!(validate(&too_fast, AircraftCategory::Hypersonic).is_err());

        let mach_five = ClearanceCommand::SetSpeed {
            speed_kts: HYPERSONIC_MAX_SPEED_KTS,
        };
        assert!(validate(&mach_five, AircraftCategory::Hypersonic).is_ok());
    }

    #[test]
    fn test_headings_and_hold_always_pass() {
        for command in [
            ClearanceCommand::SetHeading { heading: 270.0 },
            ClearanceCommand::RelativeHeading { delta: -180.0 },
            ClearanceCommand::Hold,
        ] {
            assert!(validate(&command, AircraftCategory::Standard).is_ok());
        }
    }
}
