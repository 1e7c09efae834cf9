//! Duration literals such as `300ms`, `1.5h` or `-1h30m`.
//!
//! A literal is an optional sign followed by one or more `<number><unit>`
//! runs. Numbers may carry a fraction. Valid units are `ns`, `us` (or `µs`,
//! `μs`), `ms`, `s`, `m` and `h`. The bare literal `0` needs no unit.

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Magnitude limit: `i64::MIN` in absolute value.
const LIMIT: u64 = 1 << 63;

/// Errors raised by [`parse_duration`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    /// The total does not fit in an `i64` nanosecond count.
    #[error("duration {0:?} out of range")]
    Overflow(String),

    /// Negative durations cannot be stored in `std::time::Duration`.
    #[error("negative duration {0:?}")]
    Negative(String),
}

/// Parse a duration literal into a signed count of nanoseconds.
///
/// ```rust
/// assert_eq!(envload::parse_duration("1h30m").unwrap(), 5_400_000_000_000);
/// assert_eq!(envload::parse_duration("-1.5s").unwrap(), -1_500_000_000);
/// ```
pub fn parse_duration(literal: &str) -> Result<i64, DurationError> {
    let invalid = || DurationError::Invalid(literal.to_string());
    let overflow = || DurationError::Overflow(literal.to_string());

    let (negative, mut rest) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };

    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, after) = leading_int(rest).ok_or_else(overflow)?;
        let has_whole = after.len() != rest.len();
        rest = after;

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (digits, digits_scale, after) = leading_fraction(after_dot);
            has_fraction = after.len() != after_dot.len();
            fraction = digits;
            scale = digits_scale;
            rest = after;
        }
        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(DurationError::MissingUnit(literal.to_string()));
        }
        let (unit_name, after) = rest.split_at(unit_len);
        rest = after;
        let unit = unit_nanos(unit_name).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit_name.to_string(),
            input: literal.to_string(),
        })?;

        if whole > LIMIT / unit {
            return Err(overflow());
        }
        let mut value = whole * unit;
        if fraction > 0 {
            // Fractional nanoseconds are truncated.
            value += (fraction as f64 * (unit as f64 / scale)) as u64;
            if value > LIMIT {
                return Err(overflow());
            }
        }

        total = total
            .checked_add(value)
            .filter(|sum| *sum <= LIMIT)
            .ok_or_else(overflow)?;
    }

    if negative {
        // LIMIT itself maps onto i64::MIN.
        Ok(0i64.wrapping_sub_unsigned(total))
    } else {
        i64::try_from(total).map_err(|_| overflow())
    }
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "µs" | "μs" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Consume leading decimal digits. `None` on overflow.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    for digit in s[..end].bytes() {
        if value > LIMIT / 10 {
            return None;
        }
        value = value * 10 + u64::from(digit - b'0');
        if value > LIMIT {
            return None;
        }
    }
    Some((value, &s[end..]))
}

/// Consume leading fraction digits, returning the digits as an integer and
/// the power of ten they were scaled by. Digits beyond `u64` precision are
/// consumed but ignored.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut saturated = false;
    for digit in s[..end].bytes() {
        if saturated {
            continue;
        }
        if value > (LIMIT - 1) / 10 {
            saturated = true;
            continue;
        }
        let next = value * 10 + u64::from(digit - b'0');
        if next > LIMIT {
            saturated = true;
            continue;
        }
        value = next;
        scale *= 10.0;
    }
    (value, scale, &s[end..])
}
