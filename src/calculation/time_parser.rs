//! Time-of-day text handling.
//!
//! Clock times arrive as free-form text from the entry form. Four-digit
//! input such as `"0930"` is accepted as shorthand for `"09:30"`; anything
//! else is passed through and rejected later by [`parse_time`] if invalid.

use chrono::NaiveTime;

use crate::error::{EngineError, EngineResult};

/// Normalizes time-of-day text into `HH:MM` form.
///
/// Exactly four ASCII digits get a colon inserted after the first two.
/// Any other input is returned unchanged (after trimming whitespace).
///
/// # Examples
///
/// ```
/// use kr_payroll::calculation::normalize_time;
///
/// assert_eq!(normalize_time("0930"), "09:30");
/// assert_eq!(normalize_time("09:30"), "09:30");
/// assert_eq!(normalize_time("930"), "930");
/// ```
pub fn normalize_time(text: &str) -> String {
    let text = text.trim();
    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}:{}", &text[..2], &text[2..])
    } else {
        text.to_string()
    }
}

/// Parses an `HH:MM` string on a 24-hour clock.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTime`] when the text is not a valid time.
///
/// # Examples
///
/// ```
/// use kr_payroll::calculation::parse_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_time("22:15").unwrap(), NaiveTime::from_hms_opt(22, 15, 0).unwrap());
/// assert!(parse_time("24:00").is_err());
/// ```
pub fn parse_time(text: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M").map_err(|_| EngineError::InvalidTime {
        value: text.to_string(),
    })
}
