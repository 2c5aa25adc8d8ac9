//! Lenient input conversion. Event fields arrive as optional strings;
//! numeric conversions parse the longest valid prefix and fall back to
//! zero. The value is always usable, but absent, empty, digit-free, and
//! out-of-range input all report failure so callers can count bad rows.

use crate::event::{EventInput, Field};

/// A converted value plus a success flag. Failure still carries a
/// well-defined value: zero for absent or unparsable input, the clamped
/// bound when the input overflows the target type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Converted<T> {
    pub value: T,
    pub ok: bool,
}

impl<T: Default> Converted<T> {
    fn missing() -> Converted<T> {
        Converted {
            value: T::default(),
            ok: false,
        }
    }

    fn new(value: T, ok: bool) -> Converted<T> {
        Converted { value, ok }
    }
}

/// Longest signed-integer prefix. No digits is a failure; overflow
/// saturates toward the signed bound and is a failure too.
fn parse_prefix_i64(s: &str) -> Converted<i64> {
    let s = s.trim_start();
    let mut chars = s.char_indices();
    let mut end = 0;
    let mut seen_digit = false;
    let negative = s.starts_with('-');
    for (i, c) in &mut chars {
        if i == 0 && (c == '-' || c == '+') {
            end = i + c.len_utf8();
            continue;
        }
        if c.is_ascii_digit() {
            seen_digit = true;
            end = i + 1;
        } else {
            break;
        }
    }
    if !seen_digit {
        return Converted::missing();
    }
    match s[..end].parse() {
        Ok(v) => Converted::new(v, true),
        Err(_) => Converted::new(if negative { i64::MIN } else { i64::MAX }, false),
    }
}

fn clamp_i64(wide: Converted<i64>, min: i64, max: i64) -> Converted<i64> {
    let clamped = wide.value.clamp(min, max);
    Converted::new(clamped, wide.ok && clamped == wide.value)
}

pub fn parse_i8(raw: Option<&str>) -> Converted<i8> {
    match raw {
        Some(s) => {
            let c = clamp_i64(parse_prefix_i64(s), i8::MIN as i64, i8::MAX as i64);
            Converted::new(c.value as i8, c.ok)
        }
        None => Converted::missing(),
    }
}

pub fn parse_i16(raw: Option<&str>) -> Converted<i16> {
    match raw {
        Some(s) => {
            let c = clamp_i64(parse_prefix_i64(s), i16::MIN as i64, i16::MAX as i64);
            Converted::new(c.value as i16, c.ok)
        }
        None => Converted::missing(),
    }
}

pub fn parse_i32(raw: Option<&str>) -> Converted<i32> {
    match raw {
        Some(s) => {
            let c = clamp_i64(parse_prefix_i64(s), i32::MIN as i64, i32::MAX as i64);
            Converted::new(c.value as i32, c.ok)
        }
        None => Converted::missing(),
    }
}

pub fn parse_u32(raw: Option<&str>) -> Converted<u32> {
    match raw {
        Some(s) => {
            let c = clamp_i64(parse_prefix_i64(s), 0, u32::MAX as i64);
            Converted::new(c.value as u32, c.ok)
        }
        None => Converted::missing(),
    }
}

pub fn parse_f64(raw: Option<&str>) -> Converted<f64> {
    let s = match raw {
        Some(s) => s.trim_start(),
        None => return Converted::missing(),
    };
    // Longest prefix of float-shaped characters that actually parses.
    let mut end = s
        .find(|c: char| !c.is_ascii_digit() && !matches!(c, '-' | '+' | '.' | 'e' | 'E'))
        .unwrap_or(s.len());
    while end > 0 && s[..end].parse::<f64>().is_err() {
        end -= 1;
    }
    match s[..end].parse() {
        Ok(v) => Converted::new(v, true),
        Err(_) => Converted::missing(),
    }
}

/// A broker timestamp: seconds and microseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeval {
    pub sec: u32,
    pub usec: u32,
}

/// Parses a `seconds.microseconds` timestamp. A missing microsecond
/// part yields zero microseconds.
pub fn parse_timeval(raw: Option<&str>) -> Converted<Timeval> {
    let s = match raw {
        Some(s) => s,
        None => return Converted::missing(),
    };
    let (sec_part, usec_part) = match s.split_once('.') {
        Some((sec, usec)) => (sec, Some(usec)),
        None => (s, None),
    };
    let sec = parse_u32(Some(sec_part));
    let usec = match usec_part {
        Some(p) => parse_u32(Some(p)),
        None => Converted::new(0, true),
    };
    Converted::new(
        Timeval {
            sec: sec.value,
            usec: usec.value,
        },
        sec.ok && usec.ok,
    )
}

/// The four standard fields present on every dispatchable event. `ok`
/// is the AND of the four conversions; handlers proceed on bad values
/// the same as the upstream daemon, so this is diagnostic only.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardData {
    pub kind_code: i32,
    pub flags: i32,
    pub attr: i32,
    pub tstamp: Timeval,
    pub ok: bool,
}

/// Extracts the standard fields, defaulting each missing one to zero.
pub fn parse_standard(input: &EventInput) -> StandardData {
    let kind_code = parse_i32(input.get(Field::Type));
    let flags = parse_i32(input.get(Field::Flags));
    let attr = parse_i32(input.get(Field::Attributes));
    let tstamp = parse_timeval(input.get(Field::Timestamp));
    StandardData {
        kind_code: kind_code.value,
        flags: flags.value,
        attr: attr.value,
        tstamp: tstamp.value,
        ok: kind_code.ok && flags.ok && attr.ok && tstamp.ok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_prefix_and_defaults() {
        assert_eq!(parse_i32(Some("42")), Converted { value: 42, ok: true });
        assert_eq!(parse_i32(Some("-7 trailing")), Converted { value: -7, ok: true });
        assert_eq!(parse_i32(None), Converted { value: 0, ok: false });
    }

    #[test]
    fn empty_and_malformed_input_reports_failure() {
        assert_eq!(parse_i32(Some("")), Converted { value: 0, ok: false });
        assert_eq!(parse_i32(Some("junk")), Converted { value: 0, ok: false });
        assert_eq!(parse_u32(Some("")), Converted { value: 0, ok: false });
        assert_eq!(parse_i8(Some("-")), Converted { value: 0, ok: false });
        assert_eq!(parse_f64(Some("nope")), Converted { value: 0.0, ok: false });
        assert_eq!(parse_f64(Some("")), Converted { value: 0.0, ok: false });
        assert!(!parse_timeval(Some("")).ok);
    }

    #[test]
    fn narrow_ints_clamp_and_flag_overflow() {
        assert_eq!(parse_i8(Some("300")), Converted { value: i8::MAX, ok: false });
        assert_eq!(parse_i16(Some("-99999")), Converted { value: i16::MIN, ok: false });
        assert_eq!(parse_u32(Some("-5")), Converted { value: 0, ok: false });
        assert_eq!(
            parse_i32(Some("99999999999999999999")),
            Converted { value: i32::MAX, ok: false }
        );
    }

    #[test]
    fn float_prefix() {
        assert_eq!(parse_f64(Some("1.5")).value, 1.5);
        assert_eq!(parse_f64(Some("2.25sec")), Converted { value: 2.25, ok: true });
    }

    #[test]
    fn timeval_parsing() {
        let tv = parse_timeval(Some("1234567890.250000")).value;
        assert_eq!(tv, Timeval { sec: 1234567890, usec: 250000 });
        assert_eq!(parse_timeval(Some("99")).value, Timeval { sec: 99, usec: 0 });
        assert!(!parse_timeval(None).ok);
    }

    #[test]
    fn standard_fields() {
        let mut input = EventInput::new();
        input.set(Field::Type, "704");
        input.set(Field::Timestamp, "1700000000.5");
        let sd = parse_standard(&input);
        assert_eq!(sd.kind_code, 704);
        assert_eq!(sd.flags, 0);
        assert_eq!(sd.tstamp.sec, 1700000000);
        assert!(!sd.ok, "absent flags/attributes count as conversion failures");

        input.set(Field::Flags, "0");
        input.set(Field::Attributes, "0");
        assert!(parse_standard(&input).ok);
    }
}
