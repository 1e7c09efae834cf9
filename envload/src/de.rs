//! Conversion from raw strings into field values

use std::collections::{BTreeMap, HashMap};
use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;
use std::time::Duration;

use chrono::TimeDelta;

use crate::duration::{parse_duration, DurationError};
use crate::error::{EnvLoadError, FloatError, ValueError};
use crate::field::{ElementType, FieldType};

/// Separator between slice elements and between map entries.
const ITEM_SEPARATOR: char = ',';
/// Separator between a map key and its value.
const KEY_VALUE_SEPARATOR: char = ':';

/// A field type that can be built from a raw string.
///
/// Used by the derive macro for every field whose type it recognizes.
#[doc(hidden)]
pub trait FromRaw: Sized {
    /// Semantic type recorded in the field table.
    const TYPE: FieldType;

    /// Convert `raw`; `field` names the struct field in errors.
    fn from_raw(raw: &str, field: &'static str) -> Result<Self, EnvLoadError>;
}

/// A scalar allowed inside `Vec<T>` and as a map value.
#[doc(hidden)]
pub trait Element: Sized {
    const ELEMENT: ElementType;

    fn parse_element(part: &str) -> Result<Self, ValueError>;
}

/// Convert `raw` and overwrite `slot` with the result.
///
/// Used by macro-generated code.
#[doc(hidden)]
pub fn assign<T: FromRaw>(slot: &mut T, raw: &str, field: &'static str) -> Result<(), EnvLoadError> {
    *slot = T::from_raw(raw, field)?;
    Ok(())
}

/// Error returned by [`parse_bool`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid bool literal {0:?}")]
pub struct ParseBoolError(String);

/// Parse a boolean literal.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and `0`, `f`, `F`, `FALSE`,
/// `false`, `False`.
pub fn parse_bool(s: &str) -> Result<bool, ParseBoolError> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseBoolError(s.to_string())),
    }
}

impl FromRaw for String {
    const TYPE: FieldType = FieldType::String;

    fn from_raw(raw: &str, _field: &'static str) -> Result<Self, EnvLoadError> {
        Ok(raw.to_string())
    }
}

impl Element for String {
    const ELEMENT: ElementType = ElementType::String;

    fn parse_element(part: &str) -> Result<Self, ValueError> {
        Ok(part.to_string())
    }
}

impl FromRaw for bool {
    const TYPE: FieldType = FieldType::Bool;

    fn from_raw(raw: &str, field: &'static str) -> Result<Self, EnvLoadError> {
        parse_bool(raw).map_err(|source| EnvLoadError::InvalidBool { field, source })
    }
}

impl Element for bool {
    const ELEMENT: ElementType = ElementType::Bool;

    fn parse_element(part: &str) -> Result<Self, ValueError> {
        Ok(parse_bool(part)?)
    }
}

fn parse_signed<T: FromStr<Err = ParseIntError>>(s: &str) -> Result<T, ParseIntError> {
    s.parse()
}

/// Parse an unsigned integer.
///
/// `str::parse` accepts a leading `+` for unsigned types; it is not part of
/// the unsigned grammar here.
fn parse_unsigned<T: FromStr<Err = ParseIntError>>(s: &str) -> Result<T, ParseIntError> {
    if s.starts_with('+') {
        // A lone sign fails with `InvalidDigit`.
        return "+".parse();
    }
    s.parse()
}

macro_rules! impl_numeric {
    ($variant:ident, $element:ident, $error:ident, $parse:ident: $($ty:ty),+) => {
        $(
            impl FromRaw for $ty {
                const TYPE: FieldType = FieldType::$variant { bits: <$ty>::BITS };

                fn from_raw(raw: &str, field: &'static str) -> Result<Self, EnvLoadError> {
                    $parse::<$ty>(raw).map_err(|source| EnvLoadError::$error { field, source })
                }
            }

            impl Element for $ty {
                const ELEMENT: ElementType = ElementType::$element { bits: <$ty>::BITS };

                fn parse_element(part: &str) -> Result<Self, ValueError> {
                    Ok($parse::<$ty>(part)?)
                }
            }
        )+
    };
}

impl_numeric!(Int, Int, InvalidInt, parse_signed: i8, i16, i32, i64, i128, isize);
impl_numeric!(Uint, Uint, InvalidUint, parse_unsigned: u8, u16, u32, u64, u128, usize);

fn is_infinity_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Parse a float, rejecting finite literals that overflow to infinity.
///
/// Example: `1e40` is out of range for `f32`, `inf` is accepted.
fn parse_float<F>(s: &str) -> Result<F, FloatError>
where
    F: FromStr<Err = ParseFloatError> + Into<f64> + Copy,
{
    let value: F = s.parse()?;
    if value.into().is_infinite() && !is_infinity_literal(s) {
        return Err(FloatError::OutOfRange(s.to_string()));
    }
    Ok(value)
}

macro_rules! impl_float {
    ($($ty:ty => $bits:literal),+) => {
        $(
            impl FromRaw for $ty {
                const TYPE: FieldType = FieldType::Float { bits: $bits };

                fn from_raw(raw: &str, field: &'static str) -> Result<Self, EnvLoadError> {
                    parse_float::<$ty>(raw)
                        .map_err(|source| EnvLoadError::InvalidFloat { field, source })
                }
            }

            impl Element for $ty {
                const ELEMENT: ElementType = ElementType::Float { bits: $bits };

                fn parse_element(part: &str) -> Result<Self, ValueError> {
                    Ok(parse_float::<$ty>(part)?)
                }
            }
        )+
    };
}

impl_float!(f32 => 32, f64 => 64);

/// Example: `TIMEOUT=1h30m` -> `Duration::from_secs(5400)`.
impl FromRaw for Duration {
    const TYPE: FieldType = FieldType::Duration;

    fn from_raw(raw: &str, field: &'static str) -> Result<Self, EnvLoadError> {
        let nanos = parse_duration(raw)
            .and_then(|nanos| {
                u64::try_from(nanos).map_err(|_| DurationError::Negative(raw.to_string()))
            })
            .map_err(|source| EnvLoadError::InvalidDuration { field, source })?;
        Ok(Duration::from_nanos(nanos))
    }
}

/// Signed durations: `OFFSET=-1h30m` -> `TimeDelta::minutes(-90)`.
impl FromRaw for TimeDelta {
    const TYPE: FieldType = FieldType::Duration;

    fn from_raw(raw: &str, field: &'static str) -> Result<Self, EnvLoadError> {
        let nanos =
            parse_duration(raw).map_err(|source| EnvLoadError::InvalidDuration { field, source })?;
        Ok(TimeDelta::nanoseconds(nanos))
    }
}

/// Comma-separated elements with surrounding whitespace trimmed.
///
/// Empty elements are dropped, so `PORTS=8080,,9090` yields two ports and
/// error indices count only the retained elements.
impl<T: Element> FromRaw for Vec<T> {
    const TYPE: FieldType = FieldType::Slice(T::ELEMENT);

    fn from_raw(raw: &str, field: &'static str) -> Result<Self, EnvLoadError> {
        let parts: Vec<&str> = raw
            .split(ITEM_SEPARATOR)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        let mut values = Vec::with_capacity(parts.len());
        for (index, part) in parts.into_iter().enumerate() {
            let value = T::parse_element(part).map_err(|source| {
                EnvLoadError::InvalidSliceElement {
                    field,
                    index,
                    element: T::ELEMENT,
                    source,
                }
            })?;
            values.push(value);
        }
        Ok(values)
    }
}

/// Comma-separated `key:value` entries, split on the first `:` only.
///
/// Later duplicates overwrite earlier ones.
fn parse_entries<T: Element>(
    raw: &str,
    field: &'static str,
    mut insert: impl FnMut(String, T),
) -> Result<(), EnvLoadError> {
    for pair in raw.split(ITEM_SEPARATOR) {
        let Some((key, value)) = pair.trim().split_once(KEY_VALUE_SEPARATOR) else {
            return Err(EnvLoadError::InvalidMapFormat {
                field,
                pair: pair.to_string(),
            });
        };
        let key = key.trim();
        let value = T::parse_element(value.trim()).map_err(|source| EnvLoadError::InvalidMapValue {
            field,
            key: key.to_string(),
            source,
        })?;
        insert(key.to_string(), value);
    }
    Ok(())
}

impl<T: Element> FromRaw for HashMap<String, T> {
    const TYPE: FieldType = FieldType::Map(T::ELEMENT);

    fn from_raw(raw: &str, field: &'static str) -> Result<Self, EnvLoadError> {
        let mut map = HashMap::new();
        parse_entries(raw, field, |key, value| {
            map.insert(key, value);
        })?;
        Ok(map)
    }
}

impl<T: Element> FromRaw for BTreeMap<String, T> {
    const TYPE: FieldType = FieldType::Map(T::ELEMENT);

    fn from_raw(raw: &str, field: &'static str) -> Result<Self, EnvLoadError> {
        let mut map = BTreeMap::new();
        parse_entries(raw, field, |key, value| {
            map.insert(key, value);
        })?;
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_verbatim() {
        let value = String::from_raw("  hello world  ", "name").unwrap();
        assert_eq!(value, "  hello world  ");
    }

    #[test]
    fn test_int_overflow_is_error() {
        let err = i8::from_raw("256", "level").unwrap_err();
        assert!(matches!(err, EnvLoadError::InvalidInt { field: "level", .. }));

        let err = u8::from_raw("256", "level").unwrap_err();
        assert!(matches!(err, EnvLoadError::InvalidUint { field: "level", .. }));

        assert_eq!(u8::from_raw("255", "level").unwrap(), 255);
        assert_eq!(i8::from_raw("-128", "level").unwrap(), -128);
    }

    #[test]
    fn test_uint_rejects_negative() {
        assert!(matches!(
            u32::from_raw("-1", "count"),
            Err(EnvLoadError::InvalidUint { .. })
        ));
    }

    #[test]
    fn test_uint_rejects_plus_sign() {
        let err = u8::from_raw("+5", "level").unwrap_err();
        match err {
            EnvLoadError::InvalidUint { source, .. } => {
                assert_eq!(*source.kind(), std::num::IntErrorKind::InvalidDigit);
            }
            other => panic!("Expected InvalidUint, got {other:?}"),
        }
        assert_eq!(i8::from_raw("+5", "level").unwrap(), 5);
    }

    #[test]
    fn test_float_accepts_exponent() {
        assert_eq!(f64::from_raw("1.5e3", "ratio").unwrap(), 1500.0);
        assert_eq!(f32::from_raw("0.25", "ratio").unwrap(), 0.25);
        assert!(matches!(
            f64::from_raw("1.2.3", "ratio"),
            Err(EnvLoadError::InvalidFloat { .. })
        ));
    }

    #[test]
    fn test_float_overflow_is_error() {
        let err = f32::from_raw("1e40", "ratio").unwrap_err();
        assert!(matches!(
            err,
            EnvLoadError::InvalidFloat {
                source: FloatError::OutOfRange(_),
                ..
            }
        ));
        assert!(matches!(
            f64::from_raw("-1e400", "ratio"),
            Err(EnvLoadError::InvalidFloat { .. })
        ));
        assert_eq!(f64::from_raw("1e40", "ratio").unwrap(), 1e40);
    }

    #[test]
    fn test_float_infinity_literal() {
        assert_eq!(f32::from_raw("inf", "ratio").unwrap(), f32::INFINITY);
        assert_eq!(f64::from_raw("-Infinity", "ratio").unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_float_element_overflow_is_error() {
        let err = Vec::<f32>::from_raw("1,1e40", "weights").unwrap_err();
        match err {
            EnvLoadError::InvalidSliceElement { index, source, .. } => {
                assert_eq!(index, 1);
                assert!(matches!(source, ValueError::Float(FloatError::OutOfRange(_))));
            }
            other => panic!("Expected InvalidSliceElement, got {other:?}"),
        }
        assert!(matches!(
            HashMap::<String, f32>::from_raw("max:1e40", "limits"),
            Err(EnvLoadError::InvalidMapValue { .. })
        ));
    }

    #[test]
    fn test_bool_literals() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(bool::from_raw(raw, "debug").unwrap(), "{raw}");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert!(!bool::from_raw(raw, "debug").unwrap(), "{raw}");
        }
        assert!(matches!(
            bool::from_raw("yes", "debug"),
            Err(EnvLoadError::InvalidBool { .. })
        ));
    }

    #[test]
    fn test_duration_seconds() {
        assert_eq!(
            Duration::from_raw("5s", "timeout").unwrap(),
            Duration::from_secs(5)
        );
        assert_eq!(
            Duration::from_raw("1h30m", "timeout").unwrap(),
            Duration::from_secs(5400)
        );
    }

    #[test]
    fn test_duration_negative_is_error() {
        let err = Duration::from_raw("-5s", "timeout").unwrap_err();
        assert!(matches!(
            err,
            EnvLoadError::InvalidDuration {
                source: DurationError::Negative(_),
                ..
            }
        ));
    }

    #[test]
    fn test_signed_duration_accepts_negative() {
        assert_eq!(
            TimeDelta::from_raw("-1h30m", "offset").unwrap(),
            TimeDelta::minutes(-90)
        );
        assert_eq!(
            TimeDelta::from_raw("1.5s", "offset").unwrap(),
            TimeDelta::milliseconds(1500)
        );
        assert_eq!(<TimeDelta as FromRaw>::TYPE, FieldType::Duration);
        assert!(matches!(
            TimeDelta::from_raw("5", "offset"),
            Err(EnvLoadError::InvalidDuration {
                source: DurationError::MissingUnit(_),
                ..
            })
        ));
    }

    #[test]
    fn test_slice_drops_empty_parts() {
        assert_eq!(Vec::<i32>::from_raw("1,,3,4", "ids").unwrap(), vec![1, 3, 4]);
        assert_eq!(Vec::<i32>::from_raw("1, ,3", "ids").unwrap(), vec![1, 3]);
        assert_eq!(
            Vec::<String>::from_raw(" web , ,api,", "tags").unwrap(),
            vec!["web", "api"]
        );
    }

    #[test]
    fn test_slice_capacity_matches_length() {
        let values = Vec::<u16>::from_raw("1,,2,,,3", "ports").unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values.capacity(), 3);
    }

    #[test]
    fn test_slice_error_index_skips_empty_parts() {
        let err = Vec::<i32>::from_raw("1,,x", "ids").unwrap_err();
        match err {
            EnvLoadError::InvalidSliceElement {
                field,
                index,
                element,
                ..
            } => {
                assert_eq!(field, "ids");
                assert_eq!(index, 1);
                assert_eq!(element, ElementType::Int { bits: 32 });
            }
            other => panic!("Expected InvalidSliceElement, got {other:?}"),
        }
    }

    #[test]
    fn test_slice_of_bools_and_floats() {
        assert_eq!(
            Vec::<bool>::from_raw("true,0,F", "flags").unwrap(),
            vec![true, false, false]
        );
        assert_eq!(
            Vec::<f64>::from_raw("0.5, 1e2", "weights").unwrap(),
            vec![0.5, 100.0]
        );
    }

    #[test]
    fn test_map_last_duplicate_wins() {
        let map =
            HashMap::<String, String>::from_raw("key1:value1,key1:value2,key2:value3", "settings")
                .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["key1"], "value2");
        assert_eq!(map["key2"], "value3");
    }

    #[test]
    fn test_map_splits_on_first_separator() {
        let map = BTreeMap::<String, String>::from_raw("db: host:5432 , cache:redis", "hosts")
            .unwrap();
        assert_eq!(map["db"], "host:5432");
        assert_eq!(map["cache"], "redis");
    }

    #[test]
    fn test_map_typed_values() {
        let map = HashMap::<String, u32>::from_raw("cpu:80, memory : 512", "limits").unwrap();
        assert_eq!(map["cpu"], 80);
        assert_eq!(map["memory"], 512);
    }

    #[test]
    fn test_map_missing_separator() {
        let err = HashMap::<String, String>::from_raw("env:prod, team", "labels").unwrap_err();
        match err {
            EnvLoadError::InvalidMapFormat { field, pair } => {
                assert_eq!(field, "labels");
                assert_eq!(pair, " team");
            }
            other => panic!("Expected InvalidMapFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_map_trailing_comma_is_malformed() {
        assert!(matches!(
            HashMap::<String, String>::from_raw("a:1,", "labels"),
            Err(EnvLoadError::InvalidMapFormat { .. })
        ));
    }

    #[test]
    fn test_map_invalid_value_names_key() {
        let err = HashMap::<String, bool>::from_raw("cache:true,debug:maybe", "features")
            .unwrap_err();
        match err {
            EnvLoadError::InvalidMapValue { field, key, .. } => {
                assert_eq!(field, "features");
                assert_eq!(key, "debug");
            }
            other => panic!("Expected InvalidMapValue, got {other:?}"),
        }
    }

    #[test]
    fn test_map_value_respects_width() {
        assert!(matches!(
            HashMap::<String, u8>::from_raw("a:300", "limits"),
            Err(EnvLoadError::InvalidMapValue { .. })
        ));
    }

    #[test]
    fn test_map_accepts_empty_key() {
        let map = HashMap::<String, String>::from_raw(":value", "labels").unwrap();
        assert_eq!(map[""], "value");
    }

    #[test]
    fn test_field_types() {
        assert_eq!(<u16 as FromRaw>::TYPE, FieldType::Uint { bits: 16 });
        assert_eq!(<f32 as FromRaw>::TYPE, FieldType::Float { bits: 32 });
        assert_eq!(
            <Vec<i64> as FromRaw>::TYPE,
            FieldType::Slice(ElementType::Int { bits: 64 })
        );
        assert_eq!(
            <HashMap<String, bool> as FromRaw>::TYPE,
            FieldType::Map(ElementType::Bool)
        );
    }
}
