//////////////////////////////////////////////////////////
// Constants
//////////////////////////////////////////////////////////

/// VBB instance of the transport.rest HAFAS proxy.
pub const URL_BASE: &str = "https://v5.vbb.transport.rest/";

pub const DEFAULT_LOCATION: &str = "pankow";
pub const DEFAULT_ADDRESS_TO_GO: &str = "alexanderplatz";
pub const DEFAULT_TIME_TO_GO: &str = "18:00";
pub const DEFAULT_TIME_BEFORE: i64 = 1;

/// Advance notice is capped at one day.
pub const MAX_TIME_BEFORE_MINUTES: i64 = 24 * 60;

/// How long the pop-up stays on screen, in seconds.
pub const NOTIFICATION_TIMEOUT_SECS: u32 = 50;

/// Added to the wake instant once the target hour has been reached.
/// Note: this does not roll over to the next day.
pub const PAST_TARGET_INCREMENT_MINUTES: i64 = 15;
