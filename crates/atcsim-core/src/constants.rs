//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Units ---

/// One knot expressed in kilometers per second.
pub const KNOTS_TO_KM_PER_SEC: f64 = 1.852 / 3600.0;

/// Speed of sound at sea level in knots (ISA), used for Mach display.
pub const SPEED_OF_SOUND_KTS: f64 = 661.47;

// --- Performance profiles ---

/// Standard aircraft maximum speed (knots).
pub const STANDARD_MAX_SPEED_KTS: f64 = 550.0;

/// Standard aircraft acceleration (knots per second).
pub const STANDARD_ACCEL_KTS_PER_SEC: f64 = 5.0;

/// Standard aircraft deceleration (knots per second).
pub const STANDARD_DECEL_KTS_PER_SEC: f64 = 4.0;

/// Standard aircraft climb/descent rate (feet per minute).
pub const STANDARD_MAX_CLIMB_FPM: f64 = 3000.0;

/// Standard rate-one turn (degrees per second).
pub const STANDARD_TURN_RATE_DEG_PER_SEC: f64 = 3.0;

/// Hypersonic aircraft maximum speed (knots), roughly Mach 5.3.
pub const HYPERSONIC_MAX_SPEED_KTS: f64 = 3500.0;

pub const HYPERSONIC_ACCEL_KTS_PER_SEC: f64 = 40.0;

pub const HYPERSONIC_DECEL_KTS_PER_SEC: f64 = 30.0;

pub const HYPERSONIC_MAX_CLIMB_FPM: f64 = 12_000.0;

pub const HYPERSONIC_TURN_RATE_DEG_PER_SEC: f64 = 1.5;

// --- Command limits ---

/// Above this speed a hypersonic aircraft refuses large heading changes (knots).
pub const SUPERSONIC_THRESHOLD_KTS: f64 = 660.0;

/// Largest heading change a supersonic hypersonic aircraft accepts at once (degrees).
pub const HYPERSONIC_MAX_HEADING_CHANGE_DEG: f64 = 30.0;

/// Altitude clearances above this are rejected for non-hypersonic aircraft (feet).
pub const ALTITUDE_CEILING_FT: f64 = 45_000.0;

/// Speed clearances above this fraction of the profile max are rejected.
pub const SPEED_CLEARANCE_FACTOR: f64 = 1.2;

/// The `C` verb's short altitude parameter is expressed in thousands of feet.
pub const ALTITUDE_PARAM_UNIT_FT: f64 = 1000.0;

// --- Trail ---

/// Maximum number of trail samples kept per aircraft.
pub const MAX_TRAIL_POINTS: usize = 20;

/// Minimum distance travelled before a new trail sample is recorded (km).
pub const TRAIL_MIN_SPACING_KM: f64 = 0.5;

// --- Separation ---

/// Conflict prediction horizon (seconds).
pub const CONFLICT_LOOKAHEAD_SECS: f64 = 120.0;

/// Minimum lateral separation (km): 5 nautical miles.
pub const LATERAL_SEPARATION_KM: f64 = 9.26;

/// Minimum vertical separation (feet).
pub const VERTICAL_SEPARATION_FT: f64 = 1000.0;

/// Altitude added to the target of each aircraft in a conflict pair (feet).
pub const EVASIVE_CLIMB_FT: f64 = 1000.0;

// --- Radar ---

/// Default radar range (km).
pub const RADAR_DEFAULT_RANGE_KM: f64 = 200.0;

/// Radar range limits (km).
pub const RADAR_MIN_RANGE_KM: f64 = 50.0;
pub const RADAR_MAX_RANGE_KM: f64 = 500.0;

/// Sweep rate (degrees per second). One rotation takes 6 seconds.
pub const RADAR_SWEEP_RATE_DEG_PER_SEC: f64 = 60.0;

/// Full beam width centred on the sweep angle (degrees).
/// Must exceed the per-tick sweep advance or targets fall through the gaps.
pub const RADAR_BEAM_WIDTH_DEG: f64 = 6.0;

/// Fixed flicker penalty subtracted from the range-based detection probability.
pub const RADAR_FLICKER_PENALTY: f64 = 0.02;

/// Detection probability never drops below this inside range and beam.
pub const RADAR_CLUTTER_FLOOR: f64 = 0.05;

// --- Spawning ---

/// Spawn distance from the radar site (km).
pub const SPAWN_MIN_RANGE_KM: f64 = 20.0;
pub const SPAWN_MAX_RANGE_KM: f64 = 150.0;

/// First numeric suffix handed out to generated callsigns.
pub const FIRST_CALLSIGN_NUMBER: u32 = 101;

// --- Loop ---

/// Longest wall-clock frame fed into the tick accumulator (seconds).
/// Anything beyond this is dropped rather than replayed.
pub const MAX_FRAME_SECS: f64 = 0.25;
