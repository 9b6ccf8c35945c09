//! Human relative times ("3 hours ago") for note listings.

use chrono::{DateTime, TimeDelta, Utc};
use indicatif::HumanDuration;

/// Describe `ts` relative to `now`.
pub fn relative(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(ts);
    let (span, suffix) = if delta >= TimeDelta::zero() {
        (delta, "ago")
    } else {
        (-delta, "from now")
    };

    match span.to_std() {
        Ok(d) if d.as_secs() >= 1 => format!("{} {}", HumanDuration(d), suffix),
        _ => "now".to_string(),
    }
}
