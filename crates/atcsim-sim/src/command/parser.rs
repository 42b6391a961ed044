//! Command grammar.
//!
//! ```text
//! line    := CALLSIGN clause+
//! clause  := "H" ddd          absolute heading, 000-360
//!          | "C" ddd          heading (three digits)
//!          | "C" d | "C" dd   altitude in thousands of feet
//!          | "S" number       speed in knots
//!          | "L" d{1,3}       turn left by up to 180 degrees
//!          | "R" d{1,3}       turn right by up to 180 degrees
//!          | "HOLD"           keep present heading, speed and altitude
//! ```
//!
//! Tokens are whitespace separated and case-insensitive. Any error aborts the
//! whole line; a partial command list is never returned.

use atcsim_core::commands::{ClearanceCommand, CommandLine};
use atcsim_core::constants::ALTITUDE_PARAM_UNIT_FT;
use atcsim_core::errors::ParseError;
use atcsim_core::types::normalize_heading;

pub fn parse_line(raw: &str) -> Result<CommandLine, ParseError> {
    let tokens: Vec<String> = raw
        .split_whitespace()
        .map(|t| t.to_ascii_uppercase())
        .collect();

    let mut iter = tokens.into_iter();
    let callsign = iter.next().ok_or(ParseError::Empty)?;

    let mut commands = Vec::new();
    while let Some(verb) = iter.next() {
        let command = match verb.as_str() {
            "HOLD" => ClearanceCommand::Hold,
            "H" => {
                let token = param(&verb, iter.next())?;
                ClearanceCommand::SetHeading {
                    heading: heading_param(&verb, &token)?,
                }
            }
            "C" => {
                let token = param(&verb, iter.next())?;
                climb_param(&verb, &token)?
            }
            "S" => {
                let token = param(&verb, iter.next())?;
                let speed_kts = token
                    .parse::<f64>()
                    .ok()
                    .filter(|s| s.is_finite() && *s >= 0.0)
                    .ok_or_else(|| malformed(&verb, &token))?;
                ClearanceCommand::SetSpeed { speed_kts }
            }
            "L" | "R" => {
                let token = param(&verb, iter.next())?;
                let degrees = digits(&token, 1..=3)
                    .filter(|d| *d <= 180.0)
                    .ok_or_else(|| malformed(&verb, &token))?;
                let delta = if verb == "L" { -degrees } else { degrees };
                ClearanceCommand::RelativeHeading { delta }
            }
            _ => return Err(ParseError::UnknownVerb(verb)),
        };
        commands.push(command);
    }

    if commands.is_empty() {
        return Err(ParseError::MissingCommand(callsign));
    }

    Ok(CommandLine { callsign, commands })
}

fn param(verb: &str, token: Option<String>) -> Result<String, ParseError> {
    token.ok_or_else(|| ParseError::MissingParameter(verb.to_string()))
}

fn malformed(verb: &str, token: &str) -> ParseError {
    ParseError::MalformedParameter {
        verb: verb.to_string(),
        token: token.to_string(),
    }
}

/// Parse an all-digit token whose length lies in `len`.
fn digits(token: &str, len: std::ops::RangeInclusive<usize>) -> Option<f64> {
    if !len.contains(&token.len()) || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<u32>().ok().map(f64::from)
}

fn heading_param(verb: &str, token: &str) -> Result<f64, ParseError> {
    digits(token, 3..=3)
        .filter(|h| *h <= 360.0)
        .map(normalize_heading)
        .ok_or_else(|| malformed(verb, token))
}

/// `C` is context sensitive: three digits is a heading, one or two digits an
/// altitude in thousands of feet.
fn climb_param(verb: &str, token: &str) -> Result<ClearanceCommand, ParseError> {
    if token.len() == 3 {
        return Ok(ClearanceCommand::SetHeading {
            heading: heading_param(verb, token)?,
        });
    }
    let thousands = digits(token, 1..=2).ok_or_else(|| malformed(verb, token))?;
    Ok(ClearanceCommand::SetAltitude {
        altitude_ft: thousands * ALTITUDE_PARAM_UNIT_FT,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(raw: &str) -> Vec<ClearanceCommand> {
        parse_line(raw).unwrap().commands
    }

    #[test]
    fn test_heading() {
        let line = parse_line("AC101 H 090").unwrap();
        assert_eq!(line.callsign, "AC101");
        assert_eq!(
            line.commands,
            vec![ClearanceCommand::SetHeading { heading: 90.0 }]
        );
        assert_eq!(
            commands("ac101 h 360"),
            vec![ClearanceCommand::SetHeading { heading: 0.0 }]
        );
    }

    #[test]
    fn test_climb_is_context_sensitive() {
        assert_eq!(
            commands("AC101 C 12"),
            vec![ClearanceCommand::SetAltitude {
                altitude_ft: 12_000.0
            }]
        );
        assert_eq!(
            commands("AC101 C 5"),
            vec![ClearanceCommand::SetAltitude {
                altitude_ft: 5_000.0
            }]
        );
        assert_eq!(
            commands("AC101 C 270"),
            vec![ClearanceCommand::SetHeading { heading: 270.0 }]
        );
    }

    #[test]
    fn test_chained_clauses_in_order() {
        assert_eq!(
            commands("AC101 H 180 C 10 S 250 HOLD"),
            vec![
                ClearanceCommand::SetHeading { heading: 180.0 },
                ClearanceCommand::SetAltitude {
                    altitude_ft: 10_000.0
                },
                ClearanceCommand::SetSpeed { speed_kts: 250.0 },
                ClearanceCommand::Hold,
            ]
        );
    }

    #[test]
    fn test_relative_turns() {
        assert_eq!(
            commands("AC101 L 20 R 045"),
            vec![
                ClearanceCommand::RelativeHeading { delta: -20.0 },
                ClearanceCommand::RelativeHeading { delta: 45.0 },
            ]
        );
        assert!(matches!(
            parse_line("AC101 R 181"),
            Err(ParseError::MalformedParameter { .. })
        ));
    }

    #[test]
    fn test_speed_is_not_range_checked_by_parser() {
        assert_eq!(
            commands("AC101 S 9999"),
            vec![ClearanceCommand::SetSpeed { speed_kts: 9999.0 }]
        );
        assert!(parse_line("AC101 S -5").is_err());
        assert!(parse_line("AC101 S fast").is_err());
    }

    #[test]
    fn test_errors_abort_line() {
        assert_eq!(parse_line("   "), Err(ParseError::Empty));
        assert_eq!(
            parse_line("AC101"),
            Err(ParseError::MissingCommand("AC101".into()))
        );
        assert_eq!(
            parse_line("BADVERB 1"),
            Err(ParseError::UnknownVerb("1".into()))
        );
        assert_eq!(
            parse_line("AC101 H 090 X 1"),
            Err(ParseError::UnknownVerb("X".into()))
        );
        assert_eq!(
            parse_line("AC101 S 200 H"),
            Err(ParseError::MissingParameter("H".into()))
        );
        assert_eq!(
            parse_line("AC101 H 90"),
            Err(ParseError::MalformedParameter {
                verb: "H".into(),
                token: "90".into()
            })
        );
        assert!(parse_line("AC101 H 361").is_err());
        assert!(parse_line("AC101 C 1234").is_err());
    }
}
