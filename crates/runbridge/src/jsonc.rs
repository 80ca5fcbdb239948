//! JSON-with-comments support for VSCode configuration files.
//!
//! VSCode tolerates `//` and `/* */` comments inside its JSON files. The
//! stripper scans character by character and tracks string boundaries and
//! escape sequences, so comment-like substrings inside string values (URLs,
//! literal `/* ... */` text) survive untouched. A regex strip would not.

use anyhow::Context as _;
use serde::de::DeserializeOwned;

/// Parse a JSONC document into a serde type.
pub fn from_str<T: DeserializeOwned>(content: &str) -> anyhow::Result<T> {
    let stripped = strip_comments(content);
    serde_json::from_str(&stripped).context("invalid JSON")
}

/// Remove line and block comments, preserving everything inside strings.
pub fn strip_comments(content: &str) -> String {
    let bytes = content.as_bytes();
    let mut out = String::with_capacity(content.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let ch = bytes[i];

        if in_string {
            if escaped {
                escaped = false;
            } else if ch == b'\\' {
                escaped = true;
            } else if ch == b'"' {
                in_string = false;
            }
            // Copy the full UTF-8 sequence, same as the non-string branch;
            // pushing the lead byte alone would mangle non-ASCII values.
            let ch = content[i..].chars().next().unwrap_or('\u{fffd}');
            out.push(ch);
            i += ch.len_utf8();
            continue;
        }

        match ch {
            b'"' => {
                in_string = true;
                out.push('"');
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' && bytes[i] != b'\r' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                loop {
                    if i + 1 >= bytes.len() {
                        // Unterminated block comment swallows the rest.
                        i = bytes.len();
                        break;
                    }
                    if bytes[i] == b'*' && bytes[i + 1] == b'/' {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            }
            _ => {
                // Copy the full UTF-8 sequence, not just the lead byte.
                let ch = content[i..].chars().next().unwrap_or('\u{fffd}');
                out.push(ch);
                i += ch.len_utf8();
            }
        }
    }

    out
}
