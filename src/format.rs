// Display formatting for entry timestamps and amounts

use crate::config::Config;
use chrono::{Local, NaiveDateTime, TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

#[derive(Debug, Clone)]
pub struct Formatter {
    date_format: String,
    decimal_places: u32,
}

impl Formatter {
    /// `decimal_places` is capped at the widest scale a `Decimal` can hold.
    pub fn new(date_format: impl Into<String>, decimal_places: u32) -> Self {
        Self {
            date_format: date_format.into(),
            decimal_places: decimal_places.min(Decimal::MAX_SCALE),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.date_format.clone(), config.decimal_places)
    }

    /// Rounded half-even to the configured places, grouped by thousands.
    pub fn format_amount(&self, amount: &Decimal) -> String {
        let mut rounded =
            amount.round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(self.decimal_places);

        let text = rounded.abs().to_string();
        let (integer, fraction) = match text.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (text.as_str(), None),
        };

        let mut out = String::with_capacity(text.len() + integer.len() / 3 + 1);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(&group_thousands(integer));
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }

    /// Local time rendering; "-" when the timestamp is out of range or the
    /// configured format is unusable.
    pub fn format_timestamp(&self, millis: i64) -> String {
        let Some(time) = Local.timestamp_millis_opt(millis).single() else {
            return "-".to_string();
        };

        let mut out = String::new();
        match write!(out, "{}", time.format(&self.date_format)) {
            Ok(()) => out,
            Err(_) => "-".to_string(),
        }
    }

    /// Inverse of `format_timestamp` for the add-entry form.
    pub fn parse_timestamp(&self, text: &str) -> Option<i64> {
        let naive = NaiveDateTime::parse_from_str(text.trim(), &self.date_format).ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|time| time.timestamp_millis())
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
