//! Command subsystem: parse a text line, validate each clearance, dispatch
//! the survivors to the addressed aircraft.

pub mod dispatch;
pub mod parser;
pub mod validator;

use atcsim_core::errors::CommandError;
use atcsim_core::events::CommandReport;

use crate::fleet::Fleet;

/// Parse and apply one raw command line.
///
/// Returns `Err` when the whole line is unusable (malformed text or unknown
/// callsign). Per-clearance validation failures are reported inside the
/// `CommandReport` and do not stop the rest of the chain.
pub fn submit(fleet: &mut Fleet, raw: &str) -> Result<CommandReport, CommandError> {
    let line = parser::parse_line(raw)?;
    dispatch::dispatch(fleet, &line)
}
