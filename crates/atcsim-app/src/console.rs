//! Console front end: turns stdin lines into loop commands and renders the
//! replies and status as text.

use atcsim_core::enums::AircraftCategory;
use atcsim_core::events::{CommandOutcome, CommandReport};
use atcsim_core::state::SimSnapshot;
use atcsim_core::types::AircraftId;

use crate::state::{Feedback, GameLoopCommand};

/// One line of operator input.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    Loop(GameLoopCommand),
    Status,
    Help,
    Quit,
    Empty,
}

pub const HELP: &str = "\
controller commands: <CALLSIGN> H ddd | C ddd | C nn | S kts | L deg | R deg | HOLD ...
driver commands:
  /add standard|hypersonic   spawn an aircraft
  /remove <id>               remove an aircraft by id
  /select <id>               select an aircraft
  /remove-selected           remove the selected aircraft
  /range <km>                set the radar range (50-500)
  /pause, /resume            stop or restart the clock
  /status                    show traffic, tracks and conflicts
  /quit                      exit";

/// Parse one console line. Lines not starting with `/` go to the command
/// parser untouched.
pub fn parse_input(line: &str) -> Result<ConsoleInput, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ConsoleInput::Empty);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(ConsoleInput::Loop(GameLoopCommand::Submit(line.to_string())));
    };

    let mut parts = rest.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next();

    let input = match verb.as_str() {
        "add" => {
            let category = arg
                .unwrap_or("standard")
                .parse::<AircraftCategory>()?;
            ConsoleInput::Loop(GameLoopCommand::Add(category))
        }
        "remove" => ConsoleInput::Loop(GameLoopCommand::Remove(parse_id(arg)?)),
        "select" => ConsoleInput::Loop(GameLoopCommand::Select(parse_id(arg)?)),
        "remove-selected" => ConsoleInput::Loop(GameLoopCommand::RemoveSelected),
        "range" => {
            let km = arg
                .and_then(|a| a.parse::<f64>().ok())
                .filter(|km| km.is_finite())
                .ok_or_else(|| "usage: /range <km>".to_string())?;
            ConsoleInput::Loop(GameLoopCommand::SetRange(km))
        }
        "pause" => ConsoleInput::Loop(GameLoopCommand::Stop),
        "resume" => ConsoleInput::Loop(GameLoopCommand::Start),
        "status" => ConsoleInput::Status,
        "help" => ConsoleInput::Help,
        "quit" | "exit" => ConsoleInput::Quit,
        other => return Err(format!("unknown driver command /{other}")),
    };
    Ok(input)
}

fn parse_id(arg: Option<&str>) -> Result<AircraftId, String> {
    let arg = arg.ok_or_else(|| "missing aircraft id".to_string())?;
    arg.trim_start_matches('#')
        .parse::<u32>()
        .map(AircraftId)
        .map_err(|_| format!("bad aircraft id {arg}"))
}

pub fn render_feedback(feedback: &Feedback) -> String {
    match feedback {
        Feedback::Command(Ok(report)) => render_report(report),
        Feedback::Command(Err(err)) => format!("error: {err}"),
        Feedback::Added { id, callsign } => format!("added {callsign} ({id})"),
        Feedback::Removed(Some(id)) => format!("removed {id}"),
        Feedback::Removed(None) => "nothing removed".to_string(),
        Feedback::Selected { id, found: true } => format!("selected {id}"),
        Feedback::Selected { id, found: false } => format!("no aircraft {id}"),
        Feedback::RangeSet(km) => format!("radar range {km:.0} km"),
        Feedback::Running(true) => "running".to_string(),
        Feedback::Running(false) => "paused".to_string(),
    }
}

fn render_report(report: &CommandReport) -> String {
    report
        .outcomes
        .iter()
        .map(|outcome| match outcome {
            CommandOutcome::Accepted { command } => {
                format!("{} {command}: ok", report.callsign)
            }
            CommandOutcome::Partial {
                applied, reason, ..
            } => format!("{} {applied}: partial ({reason})", report.callsign),
            CommandOutcome::Rejected { command, reason } => {
                format!("{} {command}: rejected ({reason})", report.callsign)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_status(snapshot: &SimSnapshot) -> String {
    let mut out = format!(
        "t={:.1}s tick={} {} | radar {:.0} km sweep {:03.0}",
        snapshot.time.elapsed_secs,
        snapshot.time.tick,
        if snapshot.running { "running" } else { "paused" },
        snapshot.radar.range,
        snapshot.radar.sweep_angle,
    );
    if let Some(tracks) = &snapshot.radar.tracked_targets {
        out.push_str(&format!(" tracks={}", tracks.len()));
    }

    for a in &snapshot.aircraft {
        out.push_str(&format!(
            "\n{}{:<6} {:>4} hdg {:03.0}/{:03.0} spd {:>4.0}/{:<4.0} alt {:>5.0}/{:<5.0} vs {:>+6.0} {:>5.1} km @ {:03.0} {:?}",
            if a.selected { '*' } else { ' ' },
            a.callsign,
            a.id.to_string(),
            a.heading,
            a.target_heading,
            a.speed,
            a.target_speed,
            a.altitude,
            a.target_altitude,
            a.vertical_rate,
            a.range,
            a.bearing,
            a.behavior,
        ));
        if let Some(mach) = a.mach {
            out.push_str(&format!(" M{mach:.1}"));
        }
    }

    for c in &snapshot.conflicts {
        out.push_str(&format!(
            "\nCONFLICT {} / {} in {:.0}s, {:.1} km",
            c.id_a, c.id_b, c.time_to_approach, c.distance_at_approach
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use atcsim_core::commands::ClearanceCommand;
    use atcsim_core::errors::CommandError;

    #[test]
    fn test_plain_lines_go_to_command_parser() {
        assert_eq!(
            parse_input("  AC101 H 090 "),
            Ok(ConsoleInput::Loop(GameLoopCommand::Submit(
                "AC101 H 090".into()
            )))
        );
        assert_eq!(parse_input("   "), Ok(ConsoleInput::Empty));
    }

    #[test]
    fn test_driver_commands() {
        assert_eq!(
            parse_input("/add hypersonic"),
            Ok(ConsoleInput::Loop(GameLoopCommand::Add(
                AircraftCategory::Hypersonic
            )))
        );
        assert_eq!(
            parse_input("/add"),
            Ok(ConsoleInput::Loop(GameLoopCommand::Add(
                AircraftCategory::Standard
            )))
        );
        assert_eq!(
            parse_input("/remove #3"),
            Ok(ConsoleInput::Loop(GameLoopCommand::Remove(AircraftId(3))))
        );
        assert_eq!(
            parse_input("/range 120"),
            Ok(ConsoleInput::Loop(GameLoopCommand::SetRange(120.0)))
        );
        assert_eq!(
            parse_input("/remove-selected"),
            Ok(ConsoleInput::Loop(GameLoopCommand::RemoveSelected))
        );
        assert_eq!(parse_input("/STATUS"), Ok(ConsoleInput::Status));
        assert_eq!(parse_input("/quit"), Ok(ConsoleInput::Quit));
    }

    #[test]
    fn test_driver_command_errors() {
        assert!(parse_input("/add glider").is_err());
        assert!(parse_input("/remove").is_err());
        assert!(parse_input("/remove abc").is_err());
        assert!(parse_input("/range far").is_err());
        assert!(parse_input("/launch").is_err());
    }

    #[test]
    fn test_render_report_lists_each_outcome() {
        let report = CommandReport {
            aircraft: AircraftId(0),
            callsign: "AC101".into(),
            outcomes: vec![
                CommandOutcome::Accepted {
                    command: ClearanceCommand::SetHeading { heading: 90.0 },
                },
                CommandOutcome::Rejected {
                    command: ClearanceCommand::SetSpeed { speed_kts: 9999.0 },
                    reason: CommandError::SpeedAboveLimit {
                        requested_kts: 9999.0,
                        limit_kts: 660.0,
                    },
                },
            ],
        };
        let text = render_feedback(&Feedback::Command(Ok(report)));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "AC101 heading 090: ok");
        assert!(lines[1].starts_with("AC101 speed 9999: rejected"));
    }

    #[test]
    fn test_render_status_mentions_conflicts() {
        let mut snapshot = SimSnapshot::default();
        snapshot.conflicts.push(atcsim_core::state::ConflictView {
            id_a: AircraftId(1),
            id_b: AircraftId(2),
            time_to_approach: 42.0,
            distance_at_approach: 1.5,
        });
        let text = render_status(&snapshot);
        assert!(text.contains("CONFLICT #1 / #2 in 42s, 1.5 km"));
    }
}
