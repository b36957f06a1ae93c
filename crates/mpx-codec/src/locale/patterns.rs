//! Date, number and currency patterns of a locale profile.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Date and time layout.
///
/// Both parts are `chrono` format strings. Date-time values are written as
/// `"{date} {time}"`; a token holding only the date reads as midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePattern {
    pub date: &'static str,
    pub time: &'static str,
}

impl DatePattern {
    /// Parse a date-time token.
    #[must_use]
    pub fn parse(&self, token: &str) -> Option<NaiveDateTime> {
        let token = token.trim();
        NaiveDateTime::parse_from_str(token, &self.date_time())
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(token, self.date)
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
    }

    /// Format a date-time value.
    #[must_use]
    pub fn format(&self, value: NaiveDateTime) -> String {
        value.format(&self.date_time()).to_string()
    }

    fn date_time(&self) -> String {
        format!("{} {}", self.date, self.time)
    }
}

/// Decimal layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberPattern {
    pub decimal_separator: char,
    /// Grouping character accepted on input. Output is never grouped.
    pub thousands_separator: Option<char>,
}

impl NumberPattern {
    /// Parse a decimal token. Non-finite values are rejected.
    #[must_use]
    pub fn parse_decimal(&self, token: &str) -> Option<f64> {
        let normalized: String = self
            .strip_grouping(token.trim())
            .chars()
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect();
        normalized
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    /// Parse an integer token.
    #[must_use]
    pub fn parse_integer(&self, token: &str) -> Option<i64> {
        self.strip_grouping(token.trim()).parse().ok()
    }

    /// Format a decimal with the shortest representation that reads back
    /// to the same value.
    #[must_use]
    pub fn format_decimal(&self, value: f64) -> String {
        self.localize(&value.to_string())
    }

    fn localize(&self, plain: &str) -> String {
        plain.replace('.', &self.decimal_separator.to_string())
    }

    fn strip_grouping(&self, token: &str) -> String {
        match self.thousands_separator {
            Some(sep) => token.chars().filter(|&c| c != sep).collect(),
            None => token.to_string(),
        }
    }
}

/// Where the currency symbol goes relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbolPosition {
    /// `$5.00`
    Before,
    /// `5.00$`
    After,
    /// `$ 5.00`
    BeforeWithSpace,
    /// `5.00 $`
    AfterWithSpace,
}

/// Currency layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyPattern {
    pub symbol: &'static str,
    pub position: CurrencySymbolPosition,
    /// Fraction digits written on output.
    pub digits: u8,
}

impl CurrencyPattern {
    /// Parse a currency token. The symbol is optional on either side of the
    /// amount; a leading minus may precede the symbol.
    #[must_use]
    pub fn parse(&self, token: &str, number: &NumberPattern) -> Option<f64> {
        let token = token.trim();
        let (negative, rest) = match token.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, token),
        };
        let amount = rest
            .strip_prefix(self.symbol)
            .or_else(|| rest.strip_suffix(self.symbol))
            .unwrap_or(rest);
        let value = number.parse_decimal(amount)?;
        Some(if negative { -value } else { value })
    }

    /// Format an amount with the symbol. The amount is the shortest
    /// representation that reads back to the same value, padded with zeros
    /// to at least `digits` fraction digits.
    #[must_use]
    pub fn format(&self, value: f64, number: &NumberPattern) -> String {
        let amount = number.localize(&self.pad_fraction(&value.abs().to_string()));
        let body = match self.position {
            CurrencySymbolPosition::Before => format!("{}{amount}", self.symbol),
            CurrencySymbolPosition::After => format!("{amount}{}", self.symbol),
            CurrencySymbolPosition::BeforeWithSpace => format!("{} {amount}", self.symbol),
            CurrencySymbolPosition::AfterWithSpace => format!("{amount} {}", self.symbol),
        };
        if value.is_sign_negative() && value != 0.0 {
            format!("-{body}")
        } else {
            body
        }
    }

    fn pad_fraction(&self, plain: &str) -> String {
        let (int, fraction) = plain.split_once('.').unwrap_or((plain, ""));
        let width = fraction.len().max(usize::from(self.digits));
        if width == 0 {
            int.to_string()
        } else {
            format!("{int}.{fraction:0<width$}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOT: NumberPattern = NumberPattern {
        decimal_separator: '.',
        thousands_separator: Some(','),
    };

    const COMMA: NumberPattern = NumberPattern {
        decimal_separator: ',',
        thousands_separator: Some('.'),
    };

    #[test]
    fn test_date_pattern_parse_and_format() {
        let pattern = DatePattern {
            date: "%d/%m/%Y",
            time: "%H:%M",
        };
        let value = pattern.parse("03/01/2014 11:00").unwrap();
        assert_eq!(
            value,
            NaiveDate::from_ymd_opt(2014, 1, 3)
                .unwrap()
                .and_hms_opt(11, 0, 0)
                .unwrap()
        );
        assert_eq!(pattern.format(value), "03/01/2014 11:00");
    }

    #[test]
    fn test_date_pattern_date_only() {
        let pattern = DatePattern {
            date: "%d.%m.%Y",
            time: "%H:%M",
        };
        let value = pattern.parse("15.03.2024").unwrap();
        assert_eq!(value.time(), NaiveTime::MIN);
        assert!(pattern.parse("2024-03-15").is_none());
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(DOT.parse_decimal("1,234.5"), Some(1234.5));
        assert_eq!(COMMA.parse_decimal("1.234,5"), Some(1234.5));
        assert_eq!(COMMA.parse_decimal("-0,25"), Some(-0.25));
        assert_eq!(DOT.parse_decimal("abc"), None);
        assert_eq!(DOT.parse_decimal("NaN"), None);
        assert_eq!(DOT.parse_decimal("inf"), None);
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(DOT.format_decimal(2.0), "2");
        assert_eq!(DOT.format_decimal(0.1), "0.1");
        assert_eq!(COMMA.format_decimal(1234.5), "1234,5");
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(DOT.parse_integer("42"), Some(42));
        assert_eq!(DOT.parse_integer("1,000"), Some(1000));
        assert_eq!(DOT.parse_integer("4.5"), None);
    }

    #[test]
    fn test_currency_roundtrip() {
        let dollars = CurrencyPattern {
            symbol: "$",
            position: CurrencySymbolPosition::Before,
            digits: 2,
        };
        assert_eq!(dollars.format(1234.5, &DOT), "$1234.50");
        assert_eq!(dollars.format(-3.0, &DOT), "-$3.00");
        assert_eq!(dollars.format(1.234, &DOT), "$1.234");
        assert_eq!(dollars.format(80.0, &DOT), "$80.00");
        assert_eq!(dollars.parse(&dollars.format(1.234, &DOT), &DOT), Some(1.234));

        let yen = CurrencyPattern {
            symbol: "¥",
            position: CurrencySymbolPosition::Before,
            digits: 0,
        };
        assert_eq!(yen.format(1500.0, &DOT), "¥1500");
        assert_eq!(yen.format(0.5, &DOT), "¥0.5");
        assert_eq!(dollars.parse("$1,234.50", &DOT), Some(1234.5));
        assert_eq!(dollars.parse("-$3.00", &DOT), Some(-3.0));
        assert_eq!(dollars.parse("17", &DOT), Some(17.0));

        let euros = CurrencyPattern {
            symbol: "€",
            position: CurrencySymbolPosition::AfterWithSpace,
            digits: 2,
        };
        assert_eq!(euros.format(10.25, &COMMA), "10,25 €");
        assert_eq!(euros.format(0.125, &COMMA), "0,125 €");
        assert_eq!(euros.parse("10,25 €", &COMMA), Some(10.25));
    }
}
