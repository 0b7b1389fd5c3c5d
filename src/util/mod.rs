pub mod numeric;

use time::macros::format_description;
use time::OffsetDateTime;

/// Current UTC time as `YYYY-MM-DD HH:MM:SS`.
///
/// History rows are ordered by comparing these strings, so every
/// timestamp must use this exact shape.
pub fn timestamp_now() -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    OffsetDateTime::now_utc()
        .format(&format)
        .unwrap_or_default()
}
