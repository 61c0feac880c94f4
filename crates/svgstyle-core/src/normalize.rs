use crate::error::{Error, Result};
use crate::grammar;
use crate::options::check_precision;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Strips the quotes around a value that is exactly one quoted string.
///
/// `'Arial'` becomes `Arial`; an unterminated `'Arial` loses only its opening quote. Escapes
/// inside the string are left as written.
pub fn unquote(value: &str) -> &str {
    let Some(end) = grammar::quoted_string(value, 0) else {
        return value;
    };
    if end != value.len() {
        return value;
    }
    let quote = value.as_bytes()[0];
    let inner = &value[1..];
    let terminated = !inner.is_empty()
        && inner.as_bytes()[inner.len() - 1] == quote
        && !ends_with_escaped_quote(inner);
    if terminated {
        &inner[..inner.len() - 1]
    } else {
        inner
    }
}

/// `'abc\'` is an unterminated string whose last quote is escaped.
fn ends_with_escaped_quote(inner: &str) -> bool {
    let body = &inner.as_bytes()[..inner.len() - 1];
    let backslashes = body.iter().rev().take_while(|&&b| b == b'\\').count();
    backslashes % 2 == 1
}

fn re_unit_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)(px|pt|pc|mm|cm|m|in|ft|em|ex|%)")
            .expect("valid regex")
    })
}

/// Rewrites every `<number><unit>` token with the shortest number that stays within the
/// rounding tolerance of `precision` decimal digits. Units are kept verbatim.
///
/// `precision` must lie in [`PRECISION_RANGE`](crate::options::PRECISION_RANGE).
pub fn shorten_units(value: &str, precision: u32) -> Result<Cow<'_, str>> {
    let precision = check_precision(precision)?;
    let re = re_unit_number();
    let mut out: Option<String> = None;
    let mut copied = 0usize;

    for caps in re.captures_iter(value) {
        let (Some(whole), Some(number), Some(unit)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        let parsed = number
            .as_str()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::NonFiniteNumber {
                token: whole.as_str().to_string(),
            })?;
        let rounded = format_number(smart_round(precision, parsed));
        if rounded == number.as_str() {
            continue;
        }

        let out = out.get_or_insert_with(|| String::with_capacity(value.len()));
        out.push_str(&value[copied..whole.start()]);
        out.push_str(&rounded);
        out.push_str(unit.as_str());
        copied = whole.end();
    }

    Ok(match out {
        Some(mut out) => {
            out.push_str(&value[copied..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(value),
    })
}

/// Tolerance-based rounding.
///
/// Values that already fit in `precision` decimals are kept. Otherwise a representation with
/// one digit less is accepted when it deviates from `data` by less than `10^-precision`, and
/// the plain `precision`-digit rounding is used when it does not.
pub fn smart_round(precision: u32, data: f64) -> f64 {
    let tolerance = to_fixed(0.1_f64.powi(precision as i32), precision);
    if to_fixed(data, precision) == data {
        return data;
    }
    let rounded = to_fixed(data, precision.saturating_sub(1));
    if to_fixed((rounded - data).abs(), precision.saturating_add(1)) >= tolerance {
        to_fixed(data, precision)
    } else {
        rounded
    }
}

const MAX_FIXED_DIGITS: u32 = 1100;

/// Rounds to `digits` decimals, resolving exact decimal ties away from zero.
pub fn to_fixed(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // Beyond this every finite f64 is printed exactly.
    let digits = digits.min(MAX_FIXED_DIGITS) as usize;
    let magnitude = value.abs();
    let mut fixed: f64 = format!("{magnitude:.digits$}").parse().unwrap_or(magnitude);

    // `format!` rounds exact ties to even; check whether we sat exactly on one.
    let wide = format!("{magnitude:.prec$}", prec = digits + 30);
    let tail = wide
        .split_once('.')
        .map(|(_, frac)| &frac[digits..])
        .unwrap_or_default();
    if tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0') {
        let truncated: f64 = wide[..wide.len() - 30 - usize::from(digits == 0)]
            .parse()
            .unwrap_or(magnitude);
        let step = 10_f64.powi(-(digits as i32));
        let up = truncated + step;
        fixed = format!("{up:.digits$}").parse().unwrap_or(up);
    }

    if value.is_sign_negative() { -fixed } else { fixed }
}

/// Formats a number the way JavaScript's `Number#toString` does (`1`, `0.5`, `1e+21`).
pub fn format_number(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    let mut buf = ryu_js::Buffer::new();
    buf.format(value).to_string()
}
