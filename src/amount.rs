// Amount parsing - exact decimal values from user-typed text
//
// Accepted grammar (no surrounding whitespace, no digit separators):
//   [+-]? ( digits [ '.' digits? ] | '.' digits ) ( [eE] [+-]? digits )?

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,

    #[error("not a decimal number: {0}")]
    Malformed(String),

    #[error("amount out of range: {0}")]
    OutOfRange(String),
}

/// Parse a decimal amount without any binary floating-point step.
pub fn parse_amount(text: &str) -> Result<Decimal, AmountError> {
    if text.is_empty() {
        return Err(AmountError::Empty);
    }

    let parts = split_number(text).ok_or_else(|| AmountError::Malformed(text.to_string()))?;

    let mut mantissa = String::with_capacity(text.len() + 1);
    if parts.negative {
        mantissa.push('-');
    }
    mantissa.push_str(if parts.integer.is_empty() { "0" } else { parts.integer });
    if !parts.fraction.is_empty() {
        mantissa.push('.');
        mantissa.push_str(parts.fraction);
    }

    let parsed = match parts.exponent {
        None => Decimal::from_str_exact(&mantissa),
        Some((negative, digits)) => {
            let sign = if negative { "-" } else { "" };
            Decimal::from_scientific(&format!("{mantissa}e{sign}{digits}"))
        }
    };

    parsed.map_err(|_| AmountError::OutOfRange(text.to_string()))
}

// ============================================================================
// SCANNER
// ============================================================================

struct NumberParts<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: Option<(bool, &'a str)>,
}

fn split_number(text: &str) -> Option<NumberParts<'_>> {
    let (negative, rest) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (number, exponent) = match rest.find(|c: char| c == 'e' || c == 'E') {
        Some(idx) => (&rest[..idx], Some(&rest[idx + 1..])),
        None => (rest, None),
    };

    let (integer, fraction) = match number.find('.') {
        Some(idx) => (&number[..idx], &number[idx + 1..]),
        None => (number, ""),
    };

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    if !all_digits(integer) || !all_digits(fraction) {
        return None;
    }

    let exponent = match exponent {
        None => None,
        Some(exp) => {
            let (exp_negative, exp_digits) = match exp.as_bytes().first()? {
                b'-' => (true, &exp[1..]),
                b'+' => (false, &exp[1..]),
                _ => (false, exp),
            };
            if exp_digits.is_empty() || !all_digits(exp_digits) {
                return None;
            }
            Some((exp_negative, exp_digits))
        }
    };

    Some(NumberParts {
        negative,
        integer,
        fraction,
        exponent,
    })
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_amount("12").unwrap(), dec("12"));
        assert_eq!(parse_amount("10.10").unwrap(), dec("10.10"));
        assert_eq!(parse_amount("-3.5").unwrap(), dec("-3.5"));
        assert_eq!(parse_amount("+7").unwrap(), dec("7"));
    }

    #[test]
    fn test_parse_keeps_scale() {
        // 10.10 must not collapse to 10.1
        assert_eq!(parse_amount("10.10").unwrap().to_string(), "10.10");
        assert_eq!(parse_amount("0.00").unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_parse_partial_decimal_forms() {
        assert_eq!(parse_amount(".5").unwrap(), dec("0.5"));
        assert_eq!(parse_amount("5.").unwrap(), dec("5"));
        assert_eq!(parse_amount("-.25").unwrap(), dec("-0.25"));
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(parse_amount("1e3").unwrap(), dec("1000"));
        assert_eq!(parse_amount("2.5E-2").unwrap(), dec("0.025"));
        assert_eq!(parse_amount("4e+1").unwrap(), dec("40"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_amount(""), Err(AmountError::Empty));
        for bad in ["12a", ".", "-", "+", "1.2.3", " 1", "1 ", "1_000", "1e", "e5", "--1", "1e-"] {
            assert!(
                matches!(parse_amount(bad), Err(AmountError::Malformed(_))),
                "{bad:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        let huge = "9".repeat(40);
        assert!(matches!(parse_amount(&huge), Err(AmountError::OutOfRange(_))));
    }

    #[test]
    fn test_zero_forms_are_zero() {
        for zero in ["0", "0.00", "-0", ".0", "0e5"] {
            assert!(parse_amount(zero).unwrap().is_zero(), "{zero:?} should be zero");
        }
    }
}
