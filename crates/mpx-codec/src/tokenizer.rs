//! Splitting and joining of delimited record lines.
//!
//! A token may be wrapped in double quotes to carry the delimiter, line
//! breaks or quotes (doubled). Whitespace around unquoted tokens is trimmed;
//! whitespace inside quotes is kept as is.

use crate::error::{MpxError, Result};

/// Quote character used to protect tokens.
pub const QUOTE: char = '"';

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// Splits a line into its raw tokens.
///
/// An empty line has no tokens. A trailing delimiter produces a trailing
/// empty token.
///
/// # Errors
///
/// Returns [`MpxError::MalformedRecord`] for an unterminated quote or for
/// characters between a closing quote and the next delimiter. The error
/// carries line number 0; readers attach the real line number.
pub fn split(line: &str, delimiter: char) -> Result<Vec<String>> {
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while let Some(&c) = chars.peek() {
            if c != delimiter && c.is_whitespace() {
                chars.next();
            } else {
                break;
            }
        }

        if chars.peek() == Some(&QUOTE) {
            chars.next();
            let mut token = String::new();
            loop {
                match chars.next() {
                    None => return Err(MpxError::malformed(0, line)),
                    Some(QUOTE) => {
                        // Check for escaped quote ("")
                        if chars.peek() == Some(&QUOTE) {
                            token.push(QUOTE);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    Some(c) => token.push(c),
                }
            }

            loop {
                match chars.next() {
                    None => {
                        tokens.push(token);
                        return Ok(tokens);
                    }
                    Some(c) if c == delimiter => {
                        tokens.push(token);
                        break;
                    }
                    Some(c) if c.is_whitespace() => {}
                    Some(_) => return Err(MpxError::malformed(0, line)),
                }
            }
        } else {
            let mut token = String::new();
            let mut last = true;
            for c in chars.by_ref() {
                if c == delimiter {
                    last = false;
                    break;
                }
                token.push(c);
            }
            tokens.push(token.trim_end().to_string());
            if last {
                return Ok(tokens);
            }
        }
    }
}

/// Joins tokens into one line, quoting where a token would not survive
/// [`split`] unchanged.
pub fn join<S: AsRef<str>>(tokens: &[S], delimiter: char) -> String {
    // A lone empty token must stay distinguishable from an empty line.
    if tokens.len() == 1 && tokens[0].as_ref().is_empty() {
        return format!("{QUOTE}{QUOTE}");
    }

    let mut line = String::new();
    for (idx, token) in tokens.iter().enumerate() {
        if idx > 0 {
            line.push(delimiter);
        }
        push_token(&mut line, token.as_ref(), delimiter);
    }
    line
}

fn push_token(line: &mut String, token: &str, delimiter: char) {
    if !needs_quotes(token, delimiter) {
        line.push_str(token);
        return;
    }

    line.push(QUOTE);
    for c in token.chars() {
        if c == QUOTE {
            line.push(QUOTE);
        }
        line.push(c);
    }
    line.push(QUOTE);
}

fn needs_quotes(token: &str, delimiter: char) -> bool {
    token.starts_with(char::is_whitespace)
        || token.ends_with(char::is_whitespace)
        || token
            .chars()
            .any(|c| c == delimiter || c == QUOTE || c == '\r' || c == '\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_ok(line: &str, delimiter: char) -> Vec<String> {
        split(line, delimiter).unwrap()
    }

    #[test]
    fn test_split_simple() {
        assert_eq!(split_ok("a,b,c", ','), vec!["a", "b", "c"]);
        assert_eq!(split_ok("a;b;c", ';'), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_trims_unquoted() {
        assert_eq!(split_ok("  a  ,  b  ", ','), vec!["a", "b"]);
    }

    #[test]
    fn test_split_keeps_whitespace_in_quotes() {
        assert_eq!(split_ok("\"  a  \", b", ','), vec!["  a  ", "b"]);
    }

    #[test]
    fn test_split_quoted_delimiter_and_quotes() {
        assert_eq!(
            split_ok("\"hello, world\",\"he said \"\"hi\"\"\"", ','),
            vec!["hello, world", "he said \"hi\""]
        );
    }

    #[test]
    fn test_split_empty_fields() {
        assert_eq!(split_ok("a,,c,", ','), vec!["a", "", "c", ""]);
        assert_eq!(split_ok(",", ','), vec!["", ""]);
        assert!(split_ok("", ',').is_empty());
    }

    #[test]
    fn test_split_tab_delimiter() {
        assert_eq!(split_ok("a\t\tb", '\t'), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_unterminated_quote() {
        let err = split("\"unterminated", ',').unwrap_err();
        match err {
            MpxError::MalformedRecord { content, .. } => assert_eq!(content, "\"unterminated"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_split_text_after_closing_quote() {
        assert!(matches!(
            split("\"a\"b,c", ','),
            Err(MpxError::MalformedRecord { .. })
        ));
        assert_eq!(split_ok("\"a\"  ,c", ','), vec!["a", "c"]);
    }

    #[test]
    fn test_join_quotes_when_needed() {
        assert_eq!(join(&["a", "b"], ','), "a,b");
        assert_eq!(join(&["a,b", "c"], ','), "\"a,b\",c");
        assert_eq!(join(&["say \"hi\""], ','), "\"say \"\"hi\"\"\"");
        assert_eq!(join(&[" padded "], ';'), "\" padded \"");
        assert_eq!(join(&["a,b"], ';'), "a,b");
    }

    #[test]
    fn test_join_lone_empty_token() {
        assert_eq!(join(&[""], ','), "\"\"");
        assert_eq!(split_ok("\"\"", ','), vec![""]);
        assert_eq!(join::<&str>(&[], ','), "");
    }

    #[test]
    fn test_roundtrip_examples() {
        let tokens = vec!["Program X", "4.0", "", "x;y", "\"q\"", "  "];
        for delimiter in [',', ';', '\t', '|'] {
            let line = join(&tokens, delimiter);
            assert_eq!(split_ok(&line, delimiter), tokens, "delimiter {delimiter:?}");
        }
    }
}
