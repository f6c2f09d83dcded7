//! Platform abstraction layer
//!
//! Wall-clock time for the free-play clock readout and high-score timestamps.
//! Everything in `sim` runs on logical ticks and never calls in here.

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Whole seconds since the Unix epoch
pub fn now_unix_secs() -> u64 {
    (now_millis() / 1000.0) as u64
}

/// Local time zone offset east of UTC, in seconds
#[cfg(target_arch = "wasm32")]
pub fn utc_offset_secs() -> i32 {
    // getTimezoneOffset is minutes west of UTC
    -(js_sys::Date::new_0().get_timezone_offset() * 60.0) as i32
}

/// Local time zone offset east of UTC, in seconds
///
/// Native builds have no time zone database; `ARCADE_HOOPS_UTC_OFFSET`
/// (seconds) overrides the UTC default.
#[cfg(not(target_arch = "wasm32"))]
pub fn utc_offset_secs() -> i32 {
    std::env::var("ARCADE_HOOPS_UTC_OFFSET")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}
