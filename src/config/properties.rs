//! Line-oriented `key=value` text format.
//!
//! Keys are separated from values by the first unescaped `=`, `:` or run of
//! whitespace. Lines whose first non-blank character is `#` or `!` are
//! comments. A trailing backslash continues the logical line; leading
//! whitespace of the continuation is stripped. Within one file, a later
//! definition of a key overrides an earlier one.

use std::collections::HashMap;

use super::ConfigError;

/// Parses properties-format text into a flat mapping.
///
/// `location` is used in error messages only.
pub(crate) fn parse(text: &str, location: &str) -> Result<HashMap<String, String>, ConfigError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut entries = HashMap::new();

    let mut idx = 0;
    while idx < lines.len() {
        let line_no = idx + 1;
        let stripped = lines[idx].trim_start();
        idx += 1;

        if stripped.is_empty() || stripped.starts_with('#') || stripped.starts_with('!') {
            continue;
        }

        let mut logical = String::from(stripped);
        while ends_with_odd_backslashes(&logical) && idx < lines.len() {
            logical.pop();
            logical.push_str(lines[idx].trim_start());
            idx += 1;
        }

        let (key, value) = split_entry(&logical, location, line_no)?;
        entries.insert(key, value);
    }

    Ok(entries)
}

/// A logical line continues when it ends in an odd number of backslashes
/// (an even number is a run of escaped literal backslashes).
fn ends_with_odd_backslashes(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Splits one logical line into an unescaped (key, value) pair.
fn split_entry(
    line: &str,
    location: &str,
    line_no: usize,
) -> Result<(String, String), ConfigError> {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    let mut key = String::new();
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                i += 1;
                key.push(unescape_at(&chars, &mut i, location, line_no)?);
            }
            '=' | ':' => break,
            c if c.is_whitespace() => break,
            c => {
                key.push(c);
                i += 1;
            }
        }
    }

    // Separator: optional whitespace, at most one `=` or `:`, more whitespace.
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if i < chars.len() && (chars[i] == '=' || chars[i] == ':') {
        i += 1;
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
    }

    let mut value = String::new();
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                i += 1;
                value.push(unescape_at(&chars, &mut i, location, line_no)?);
            }
            c => {
                value.push(c);
                i += 1;
            }
        }
    }

    Ok((key, value))
}

/// Decodes the escape sequence starting at `chars[*i]` (the character after
/// the backslash) and advances `*i` past it. A backslash before a character
/// with no special meaning yields that character unchanged.
fn unescape_at(
    chars: &[char],
    i: &mut usize,
    location: &str,
    line_no: usize,
) -> Result<char, ConfigError> {
    let parse_err = || ConfigError::Parse {
        location: location.to_string(),
        line: line_no,
    };

    let c = *chars.get(*i).ok_or_else(parse_err)?;
    *i += 1;

    Ok(match c {
        't' => '\t',
        'n' => '\n',
        'r' => '\r',
        'f' => '\u{000C}',
        'u' => {
            if *i + 4 > chars.len() {
                return Err(parse_err());
            }
            let hex: String = chars[*i..*i + 4].iter().collect();
            let code = u32::from_str_radix(&hex, 16).map_err(|_| parse_err())?;
            *i += 4;
            char::from_u32(code).ok_or_else(parse_err)?
        }
        other => other,
    })
}
