//! Locale-aware formatting of monetary amounts and dates.
//!
//! Amounts are exact decimals end to end; formatting is a presentation
//! layer on top of the unrounded totals.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "pt-BR".into(),
            currency_symbol: "R$".into(),
            decimal_separator: ',',
            grouping_separator: '.',
        }
    }
}

/// Formats an amount as currency: symbol, grouped integer part, and two
/// decimal places. Negative amounts carry a leading sign.
pub fn format_currency_value(amount: Decimal, locale: &LocaleConfig) -> String {
    let body = format_number(locale, amount.abs(), 2);
    if amount.is_sign_negative() && !amount.is_zero() {
        format!("-{} {}", locale.currency_symbol, body)
    } else {
        format!("{} {}", locale.currency_symbol, body)
    }
}

/// Renders a decimal with the locale's separators at fixed precision.
pub fn format_number(locale: &LocaleConfig, value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    let mut body = format!("{:.*}", precision as usize, rounded);
    if locale.decimal_separator != '.' {
        if let Some(pos) = body.find('.') {
            body.replace_range(pos..=pos, &locale.decimal_separator.to_string());
        }
    }
    if let Some(pos) = body.find(locale.decimal_separator) {
        let int_part = group_digits(&body[..pos], locale.grouping_separator);
        body = format!("{}{}", int_part, &body[pos..]);
    } else {
        body = group_digits(&body, locale.grouping_separator);
    }
    body
}

fn group_digits(digits: &str, separator: char) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    format!("{}{}", sign, grouped)
}

/// Formats a percentage rounded to the nearest integer, half away from zero.
pub fn format_percent(ratio: Decimal) -> String {
    let percent =
        (ratio * Decimal::ONE_HUNDRED).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{}%", percent)
}

/// Compact numeric date used by the transaction listing, e.g. `13/04/20`.
pub fn format_date_short(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%y").to_string()
}

/// Spelled-out day and month used by the highlight labels, e.g. `13 de abril`.
pub fn format_date_long(date: DateTime<Utc>) -> String {
    format!("{:02} de {}", date.day(), month_label(date.month()))
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "janeiro",
        2 => "fevereiro",
        3 => "março",
        4 => "abril",
        5 => "maio",
        6 => "junho",
        7 => "julho",
        8 => "agosto",
        9 => "setembro",
        10 => "outubro",
        11 => "novembro",
        12 => "dezembro",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_zero() {
        let locale = LocaleConfig::default();
        assert_eq!(format_currency_value(Decimal::ZERO, &locale), "R$ 0,00");
    }

    #[test]
    fn formats_thousands_with_brazilian_separators() {
        let locale = LocaleConfig::default();
        let amount = Decimal::new(12345, 1);
        assert_eq!(format_currency_value(amount, &locale), "R$ 1.234,50");
    }

    #[test]
    fn formats_negative_with_leading_sign() {
        let locale = LocaleConfig::default();
        let amount = Decimal::new(-100050, 2);
        assert_eq!(format_currency_value(amount, &locale), "-R$ 1.000,50");
    }

    #[test]
    fn groups_large_integer_parts() {
        let locale = LocaleConfig::default();
        let amount = Decimal::new(123456789, 2);
        assert_eq!(format_number(&locale, amount, 2), "1.234.567,89");
    }

    #[test]
    fn percent_rounds_half_away_from_zero() {
        assert_eq!(format_percent(Decimal::new(405, 3)), "41%");
        assert_eq!(format_percent(Decimal::new(404, 3)), "40%");
    }

    #[test]
    fn long_date_uses_portuguese_months() {
        let date = Utc.with_ymd_and_hms(2020, 4, 3, 10, 0, 0).unwrap();
        assert_eq!(format_date_long(date), "03 de abril");
    }

    #[test]
    fn short_date_is_day_month_year() {
        let date = Utc.with_ymd_and_hms(2020, 4, 13, 10, 0, 0).unwrap();
        assert_eq!(format_date_short(date), "13/04/20");
    }
}
