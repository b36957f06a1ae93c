//! Code pages named in the header record.
//!
//! | Token  | Code page                  | Table                  |
//! |--------|----------------------------|------------------------|
//! | `ANSI` | Windows Latin 1            | `encoding_rs` 1252     |
//! | `MAC`  | Mac OS Roman               | `encoding_rs` macintosh|
//! | `850`  | DOS Latin 1                | built-in               |
//! | `437`  | DOS US                     | built-in               |
//! | `ZH`   | Simplified Chinese         | `encoding_rs` GBK      |
//! | `RU`   | Windows Cyrillic           | `encoding_rs` 1251     |

use std::fmt;
use std::str::FromStr;

use encoding_rs::{Encoding, GBK, MACINTOSH, WINDOWS_1251, WINDOWS_1252};

use crate::error::{MpxError, Result};

/// Text decoding table attached to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodePage {
    /// Windows ANSI (default).
    #[default]
    Ansi,
    /// Macintosh Roman.
    Mac,
    /// DOS code page 850.
    Latin,
    /// DOS code page 437.
    Us,
    /// Simplified Chinese.
    Zh,
    /// Windows Cyrillic.
    Ru,
}

impl CodePage {
    /// All supported code pages.
    pub const ALL: [CodePage; 6] = [
        CodePage::Ansi,
        CodePage::Mac,
        CodePage::Latin,
        CodePage::Us,
        CodePage::Zh,
        CodePage::Ru,
    ];

    /// Token as written in the header record.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ansi => "ANSI",
            Self::Mac => "MAC",
            Self::Latin => "850",
            Self::Us => "437",
            Self::Zh => "ZH",
            Self::Ru => "RU",
        }
    }

    /// Decodes file bytes into text.
    ///
    /// # Errors
    ///
    /// Returns [`MpxError::UndecodableText`] (line 0) when the bytes are not
    /// valid in this code page.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self.table() {
            Table::Encoding(encoding) => {
                let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
                if had_errors {
                    return Err(MpxError::UndecodableText {
                        code_page: self,
                        line: 0,
                    });
                }
                Ok(text.into_owned())
            }
            Table::HighHalf(high) => Ok(bytes
                .iter()
                .map(|&b| if b < 0x80 { b as char } else { high[(b - 0x80) as usize] })
                .collect()),
        }
    }

    /// Encodes text into file bytes.
    ///
    /// # Errors
    ///
    /// Returns [`MpxError::UnencodableText`] when the text holds a character
    /// this code page cannot represent.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self.table() {
            Table::Encoding(encoding) => {
                let (bytes, _, had_errors) = encoding.encode(text);
                if had_errors {
                    return Err(MpxError::UnencodableText { code_page: self });
                }
                Ok(bytes.into_owned())
            }
            Table::HighHalf(high) => text
                .chars()
                .map(|c| {
                    if c.is_ascii() {
                        Ok(c as u8)
                    } else {
                        high.iter()
                            .position(|&h| h == c)
                            .map(|idx| 0x80 + idx as u8)
                            .ok_or(MpxError::UnencodableText { code_page: self })
                    }
                })
                .collect(),
        }
    }

    fn table(self) -> Table {
        match self {
            Self::Ansi => Table::Encoding(WINDOWS_1252),
            Self::Mac => Table::Encoding(MACINTOSH),
            Self::Latin => Table::HighHalf(&CP850_HIGH),
            Self::Us => Table::HighHalf(&CP437_HIGH),
            Self::Zh => Table::Encoding(GBK),
            Self::Ru => Table::Encoding(WINDOWS_1251),
        }
    }
}

/// Resolves a header token to its code page. Matching is exact.
///
/// # Errors
///
/// Returns [`MpxError::UnknownCodePage`] for any other token.
pub fn code_page_for(token: &str) -> Result<CodePage> {
    CodePage::ALL
        .into_iter()
        .find(|cp| cp.as_str() == token)
        .ok_or_else(|| MpxError::unknown_code_page(token))
}

impl fmt::Display for CodePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodePage {
    type Err = MpxError;

    fn from_str(s: &str) -> Result<Self> {
        code_page_for(s)
    }
}

enum Table {
    Encoding(&'static Encoding),
    HighHalf(&'static [char; 128]),
}

/// Code page 437, bytes 0x80..=0xFF.
#[rustfmt::skip]
static CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{a0}',
];

/// Code page 850, bytes 0x80..=0xFF.
#[rustfmt::skip]
static CP850_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', 'ø', '£', 'Ø', '×', 'ƒ',
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '®', '¬', '½', '¼', '¡', '«', '»',
    '░', '▒', '▓', '│', '┤', 'Á', 'Â', 'À', '©', '╣', '║', '╗', '╝', '¢', '¥', '┐',
    '└', '┴', '┬', '├', '─', '┼', 'ã', 'Ã', '╚', '╔', '╩', '╦', '╠', '═', '╬', '¤',
    'ð', 'Ð', 'Ê', 'Ë', 'È', 'ı', 'Í', 'Î', 'Ï', '┘', '┌', '█', '▄', '¦', 'Ì', '▀',
    'Ó', 'ß', 'Ô', 'Ò', 'õ', 'Õ', 'µ', 'þ', 'Þ', 'Ú', 'Û', 'Ù', 'ý', 'Ý', '¯', '´',
    '\u{ad}', '±', '‗', '¾', '¶', '§', '÷', '¸', '°', '¨', '·', '¹', '³', '²', '■', '\u{a0}',
];
