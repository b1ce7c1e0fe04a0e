//! Resolves the server's canonical timezone name into a UTC offset.
//!
//! Transactions are stored with UTC timestamps; the configured timezone only
//! affects which calendar day a timestamp lands on when the dashboard groups
//! the list.

use time::UtcOffset;
use time_tz::{Offset, TimeZone};

/// Look up the current UTC offset for a canonical timezone name, e.g.
/// "Pacific/Auckland".
///
/// Returns `None` if the name is not in the bundled timezone database.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&time::OffsetDateTime::now_utc()).to_utc())
}
