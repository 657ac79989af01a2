//! Numeric label formatting with a d3-format compatible subset.
//!
//! Grammar: `[sign][,][.precision][~][type]` where sign is one of `-`, `+`
//! or a space, and type is one of `f`, `d`, `%`, `e` or omitted.

use rust_decimal::prelude::*;

use crate::error::{RadarError, RadarResult};

const DEFAULT_PRECISION: u32 = 6;
const MAX_PRECISION: u32 = 20;
const MIN_DECIMAL_EXPONENT: i32 = -12;
const MAX_DECIMAL_EXPONENT: i32 = 27;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignMode {
    /// Minus for negative values only.
    Negative,
    /// Plus for zero and positive values, minus for negative values.
    Always,
    /// Space for zero and positive values, minus for negative values.
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// Fixed point, `f`.
    Fixed,
    /// Integer, `d`. Precision is ignored.
    Integer,
    /// Fixed point on `value * 100` followed by `%`.
    Percent,
    /// Exponent notation, `e`.
    Exponent,
    /// No type: shortest representation, or significant digits when a
    /// precision is given.
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFormat {
    pub sign: SignMode,
    pub grouping: bool,
    pub precision: Option<u32>,
    pub trim: bool,
    pub kind: FormatKind,
}

impl ValueFormat {
    pub fn parse(pattern: &str) -> RadarResult<Self> {
        let invalid = |reason: &str| RadarError::InvalidLabelFormat {
            pattern: pattern.to_owned(),
            reason: reason.to_owned(),
        };

        let (sign, mut rest) = match pattern.chars().next() {
            Some('+') => (SignMode::Always, &pattern[1..]),
            Some(' ') => (SignMode::Space, &pattern[1..]),
            Some('-') => (SignMode::Negative, &pattern[1..]),
            _ => (SignMode::Negative, pattern),
        };

        let grouping = rest.starts_with(',');
        if grouping {
            rest = &rest[1..];
        }

        let mut precision = None;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let digits_len = after_dot
                .chars()
                .take_while(char::is_ascii_digit)
                .count();
            if digits_len == 0 {
                return Err(invalid("precision must follow `.`"));
            }
            let value: u32 = after_dot[..digits_len]
                .parse()
                .map_err(|_| invalid("precision is out of range"))?;
            precision = Some(value.min(MAX_PRECISION));
            rest = &after_dot[digits_len..];
        }

        let trim = rest.starts_with('~');
        if trim {
            rest = &rest[1..];
        }

        let kind = match rest {
            "f" => FormatKind::Fixed,
            "d" => FormatKind::Integer,
            "%" => FormatKind::Percent,
            "e" => FormatKind::Exponent,
            "" => FormatKind::General,
            other => return Err(invalid(&format!("unsupported type `{other}`"))),
        };

        Ok(Self {
            sign,
            grouping,
            precision,
            trim,
            kind,
        })
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_owned();
        }

        let magnitude = value.abs();
        let mut body = if magnitude.is_infinite() {
            "Infinity".to_owned()
        } else {
            match self.kind {
                FormatKind::Fixed => {
                    fixed(magnitude, self.precision.unwrap_or(DEFAULT_PRECISION))
                }
                FormatKind::Integer => fixed(magnitude, 0),
                FormatKind::Percent => {
                    fixed(magnitude * 100.0, self.precision.unwrap_or(DEFAULT_PRECISION))
                }
                FormatKind::Exponent => {
                    exponent(magnitude, self.precision.unwrap_or(DEFAULT_PRECISION))
                }
                FormatKind::General => general(magnitude, self.precision),
            }
        };

        if self.trim || self.kind == FormatKind::General {
            body = trim_insignificant_zeros(&body);
        }
        if self.grouping {
            body = group_thousands(&body);
        }
        if self.kind == FormatKind::Percent {
            body.push('%');
        }

        // Values that round to zero lose their minus sign.
        let negative = value < 0.0 && body.chars().any(|c| matches!(c, '1'..='9' | 'I'));
        let prefix = match (negative, self.sign) {
            (true, _) => "-",
            (false, SignMode::Always) => "+",
            (false, SignMode::Space) => " ",
            (false, SignMode::Negative) => "",
        };
        format!("{prefix}{body}")
    }
}

fn fixed(magnitude: f64, precision: u32) -> String {
    match Decimal::from_f64_retain(magnitude) {
        Some(decimal) => {
            let rounded =
                decimal.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.prec$}", prec = precision as usize)
        }
        None => format!("{magnitude:.prec$}", prec = precision as usize),
    }
}

fn exponent(magnitude: f64, precision: u32) -> String {
    match scientific(magnitude, precision) {
        Some((mantissa, exp)) => format_exponent(mantissa, exp, precision),
        None => {
            let raw = format!("{magnitude:.prec$e}", prec = precision as usize);
            match raw.split_once('e') {
                Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
                Some((mantissa, exp)) => format!("{mantissa}e+{exp}"),
                None => raw,
            }
        }
    }
}

fn format_exponent(mantissa: Decimal, exp: i32, precision: u32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!(
        "{mantissa:.prec$}e{sign}{}",
        exp.unsigned_abs(),
        prec = precision as usize
    )
}

/// Mantissa in `[1, 10)` rounded to `precision` decimals, and its exponent.
///
/// `None` outside the exponent range where decimals keep full precision.
fn scientific(magnitude: f64, precision: u32) -> Option<(Decimal, i32)> {
    if magnitude == 0.0 {
        return Some((Decimal::ZERO, 0));
    }
    let shortest = format!("{magnitude:e}");
    let mut exp: i32 = shortest.split_once('e')?.1.parse().ok()?;
    if !(MIN_DECIMAL_EXPONENT..=MAX_DECIMAL_EXPONENT).contains(&exp) {
        return None;
    }

    let shift = Decimal::from_scientific(&format!("1e{}", -exp)).ok()?;
    let mut mantissa = Decimal::from_f64_retain(magnitude)?
        .checked_mul(shift)?
        .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    if mantissa >= Decimal::TEN {
        mantissa = (mantissa / Decimal::TEN)
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
        exp += 1;
    }
    Some((mantissa, exp))
}

/// Significant-digit formatting that switches to exponent notation for
/// exponents below -6 or at least the digit count.
fn general(magnitude: f64, precision: Option<u32>) -> String {
    let Some(digits) = precision.map(|digits| digits.max(1)) else {
        return magnitude.to_string();
    };
    let Some((mantissa, exp)) = scientific(magnitude, digits - 1) else {
        return exponent(magnitude, digits - 1);
    };
    if exp < -6 || exp >= digits as i32 {
        format_exponent(mantissa, exp, digits - 1)
    } else {
        fixed(magnitude, (digits as i32 - 1 - exp) as u32)
    }
}

fn trim_insignificant_zeros(body: &str) -> String {
    let (mantissa, suffix) = match body.find('e') {
        Some(split) => body.split_at(split),
        None => (body, ""),
    };
    if !mantissa.contains('.') {
        return body.to_owned();
    }
    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}{suffix}")
}

fn group_thousands(body: &str) -> String {
    let split = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    let (integer, remainder) = body.split_at(split);

    let mut grouped = String::with_capacity(body.len() + integer.len() / 3);
    for (position, digit) in integer.chars().enumerate() {
        if position > 0 && (integer.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push_str(remainder);
    grouped
}
