//! Process-wide locale table.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::patterns::{
    CurrencyPattern, CurrencySymbolPosition, DatePattern, NumberPattern,
};
use crate::error::{MpxError, Result};
use crate::registry::CodePage;
use crate::tokenizer::QUOTE;

/// Locale used when callers ask for the default explicitly.
pub const DEFAULT_LOCALE: &str = "en";

/// Formatting values a locale controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleProfile {
    /// Locale identifier this profile was resolved from.
    pub id: &'static str,
    /// Field delimiter.
    pub delimiter: char,
    /// Originating program written to the header record.
    pub program_name: &'static str,
    /// Code page written to the header record.
    pub code_page: CodePage,
    pub date: DatePattern,
    pub number: NumberPattern,
    pub currency: CurrencyPattern,
}

impl LocaleProfile {
    /// Check that `delimiter` can separate fields under this profile.
    ///
    /// # Errors
    ///
    /// [`MpxError::InvalidDelimiter`] for quotes, line breaks and
    /// alphanumeric characters, which cannot follow the header signature.
    /// [`MpxError::DelimiterConflict`] when it equals the decimal separator.
    pub fn check_delimiter(&self, delimiter: char) -> Result<()> {
        if matches!(delimiter, QUOTE | '\r' | '\n') || delimiter.is_alphanumeric() {
            return Err(MpxError::InvalidDelimiter { delimiter });
        }
        if delimiter == self.number.decimal_separator {
            return Err(MpxError::DelimiterConflict {
                delimiter,
                decimal_separator: self.number.decimal_separator,
            });
        }
        Ok(())
    }
}

/// Read-only mapping from locale identifier to profile.
#[derive(Debug)]
pub struct LocaleTable {
    profiles: BTreeMap<&'static str, &'static LocaleProfile>,
}

static LOCALE_TABLE: LazyLock<LocaleTable> = LazyLock::new(|| LocaleTable {
    profiles: PROFILES.iter().map(|p| (p.id, p)).collect(),
});

impl LocaleTable {
    /// The process-wide table.
    pub fn global() -> &'static LocaleTable {
        &LOCALE_TABLE
    }

    /// Look up a profile by exact identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MpxError::UnsupportedLocale`] for unknown identifiers.
    pub fn resolve(&self, locale: &str) -> Result<&'static LocaleProfile> {
        self.profiles
            .get(locale)
            .copied()
            .ok_or_else(|| MpxError::unsupported_locale(locale))
    }

    /// Supported identifiers, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.profiles.keys().copied()
    }
}

/// Resolve a locale identifier against the process-wide table.
///
/// # Errors
///
/// Returns [`MpxError::UnsupportedLocale`] for unknown identifiers.
pub fn resolve(locale: &str) -> Result<&'static LocaleProfile> {
    LocaleTable::global().resolve(locale)
}

const DOT_COMMA: NumberPattern = NumberPattern {
    decimal_separator: '.',
    thousands_separator: Some(','),
};

const COMMA_DOT: NumberPattern = NumberPattern {
    decimal_separator: ',',
    thousands_separator: Some('.'),
};

const COMMA_SPACE: NumberPattern = NumberPattern {
    decimal_separator: ',',
    thousands_separator: Some(' '),
};

const fn dmy(separator: char) -> DatePattern {
    match separator {
        '.' => DatePattern {
            date: "%d.%m.%Y",
            time: "%H:%M",
        },
        _ => DatePattern {
            date: "%d/%m/%Y",
            time: "%H:%M",
        },
    }
}

const ISO_DATE: DatePattern = DatePattern {
    date: "%Y-%m-%d",
    time: "%H:%M",
};

const fn euro(position: CurrencySymbolPosition) -> CurrencyPattern {
    CurrencyPattern {
        symbol: "€",
        position,
        digits: 2,
    }
}

static PROFILES: [LocaleProfile; 11] = [
    LocaleProfile {
        id: "en",
        delimiter: ',',
        program_name: "Microsoft Project for Windows",
        code_page: CodePage::Ansi,
        date: dmy('/'),
        number: DOT_COMMA,
        currency: CurrencyPattern {
            symbol: "$",
            position: CurrencySymbolPosition::Before,
            digits: 2,
        },
    },
    LocaleProfile {
        id: "en-US",
        delimiter: ',',
        program_name: "Microsoft Project for Windows",
        code_page: CodePage::Ansi,
        date: DatePattern {
            date: "%m/%d/%Y",
            time: "%I:%M %p",
        },
        number: DOT_COMMA,
        currency: CurrencyPattern {
            symbol: "$",
            position: CurrencySymbolPosition::Before,
            digits: 2,
        },
    },
    LocaleProfile {
        id: "en-GB",
        delimiter: ',',
        program_name: "Microsoft Project for Windows",
        code_page: CodePage::Ansi,
        date: dmy('/'),
        number: DOT_COMMA,
        currency: CurrencyPattern {
            symbol: "£",
            position: CurrencySymbolPosition::Before,
            digits: 2,
        },
    },
    LocaleProfile {
        id: "de",
        delimiter: ';',
        program_name: "Microsoft Project für Windows",
        code_page: CodePage::Ansi,
        date: dmy('.'),
        number: COMMA_DOT,
        currency: euro(CurrencySymbolPosition::AfterWithSpace),
    },
    LocaleProfile {
        id: "fr",
        delimiter: ';',
        program_name: "Microsoft Project pour Windows",
        code_page: CodePage::Ansi,
        date: dmy('/'),
        number: COMMA_SPACE,
        currency: euro(CurrencySymbolPosition::AfterWithSpace),
    },
    LocaleProfile {
        id: "it",
        delimiter: ';',
        program_name: "Microsoft Project per Windows",
        code_page: CodePage::Ansi,
        date: DatePattern {
            date: "%d/%m/%Y",
            time: "%H.%M",
        },
        number: COMMA_DOT,
        currency: euro(CurrencySymbolPosition::BeforeWithSpace),
    },
    LocaleProfile {
        id: "es",
        delimiter: ';',
        program_name: "Microsoft Project para Windows",
        code_page: CodePage::Ansi,
        date: dmy('/'),
        number: COMMA_DOT,
        currency: euro(CurrencySymbolPosition::AfterWithSpace),
    },
    LocaleProfile {
        id: "pt",
        delimiter: ';',
        program_name: "Microsoft Project para Windows",
        code_page: CodePage::Ansi,
        date: dmy('/'),
        number: COMMA_DOT,
        currency: CurrencyPattern {
            symbol: "R$",
            position: CurrencySymbolPosition::BeforeWithSpace,
            digits: 2,
        },
    },
    LocaleProfile {
        id: "sv",
        delimiter: ';',
        program_name: "Microsoft Project för Windows",
        code_page: CodePage::Ansi,
        date: ISO_DATE,
        number: COMMA_SPACE,
        currency: CurrencyPattern {
            symbol: "kr",
            position: CurrencySymbolPosition::AfterWithSpace,
            digits: 2,
        },
    },
    LocaleProfile {
        id: "ru",
        delimiter: ';',
        program_name: "Microsoft Project for Windows",
        code_page: CodePage::Ru,
        date: dmy('.'),
        number: COMMA_SPACE,
        currency: CurrencyPattern {
            symbol: "р.",
            position: CurrencySymbolPosition::AfterWithSpace,
            digits: 2,
        },
    },
    LocaleProfile {
        id: "zh",
        delimiter: ',',
        program_name: "Microsoft Project for Windows",
        code_page: CodePage::Zh,
        date: ISO_DATE,
        number: DOT_COMMA,
        currency: CurrencyPattern {
            symbol: "￥",
            position: CurrencySymbolPosition::Before,
            digits: 2,
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default() {
        let profile = resolve(DEFAULT_LOCALE).unwrap();
        assert_eq!(profile.delimiter, ',');
        assert_eq!(profile.program_name, "Microsoft Project for Windows");
        assert_eq!(profile.code_page, CodePage::Ansi);
    }

    #[test]
    fn test_resolve_is_exact() {
        for id in ["EN", "en_US", "en-us", "de-DE", "xx", ""] {
            assert!(
                matches!(resolve(id), Err(MpxError::UnsupportedLocale { .. })),
                "id {id:?}"
            );
        }
    }

    #[test]
    fn test_every_profile_is_complete_and_consistent() {
        let table = LocaleTable::global();
        let ids: Vec<&str> = table.ids().collect();
        assert_eq!(ids.len(), PROFILES.len(), "duplicate locale ids");

        for id in ids {
            let profile = table.resolve(id).unwrap();
            assert_eq!(profile.id, id);
            assert!(!profile.program_name.is_empty(), "{id}");
            assert!(!profile.date.date.is_empty(), "{id}");
            assert!(!profile.currency.symbol.is_empty(), "{id}");
            profile.check_delimiter(profile.delimiter).unwrap();
            assert_ne!(
                profile.number.thousands_separator,
                Some(profile.number.decimal_separator),
                "{id}"
            );
            // The program name and symbol have to survive the file encoding.
            profile.code_page.encode(profile.program_name).unwrap();
            profile.code_page.encode(profile.currency.symbol).unwrap();
        }
    }

    #[test]
    fn test_check_delimiter() {
        let de = resolve("de").unwrap();
        assert!(matches!(
            de.check_delimiter(','),
            Err(MpxError::DelimiterConflict {
                delimiter: ',',
                decimal_separator: ','
            })
        ));
        assert!(de.check_delimiter('\t').is_ok());
        assert!(matches!(
            de.check_delimiter('"'),
            Err(MpxError::InvalidDelimiter { .. })
        ));
        for delimiter in ['x', 'Z', '7', 'é'] {
            assert!(
                matches!(
                    de.check_delimiter(delimiter),
                    Err(MpxError::InvalidDelimiter { .. })
                ),
                "{delimiter:?}"
            );
        }
    }
}
