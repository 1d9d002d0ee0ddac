//! `{time:...}` patterns
//!
//! Patterns use the familiar `YYYY-MM-DD HH:mm:ss.SSS` token style and are
//! translated once into a chrono strftime string.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use std::fmt::Write;

/// Pattern used by a bare `{time}` field
pub const DEFAULT_TIME_PATTERN: &str = "YYYY-MM-DDTHH:mm:ss.SSSSSSZ";

// Longest tokens first so `SSSSSS` wins over `SSS` and `YYYY` over `YY`
const TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("SSSSSS", "%6f"),
    ("SSS", "%3f"),
    ("ZZ", "%z"),
    ("Z", "%:z"),
    ("A", "%p"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat {
    strftime: String,
}

impl TimeFormat {
    pub fn parse(pattern: &str) -> Result<Self, String> {
        let mut strftime = String::with_capacity(pattern.len() * 2);
        let mut rest = pattern;

        'outer: while !rest.is_empty() {
            if let Some(stripped) = rest.strip_prefix('[') {
                let end = stripped
                    .find(']')
                    .ok_or_else(|| format!("unterminated '[' in time pattern {:?}", pattern))?;
                push_literal(&mut strftime, &stripped[..end]);
                rest = &stripped[end + 1..];
                continue;
            }

            for (token, directive) in TOKENS {
                if let Some(stripped) = rest.strip_prefix(token) {
                    strftime.push_str(directive);
                    rest = stripped;
                    continue 'outer;
                }
            }

            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                push_literal(&mut strftime, c.encode_utf8(&mut [0u8; 4]));
            }
            rest = chars.as_str();
        }

        if StrftimeItems::new(&strftime).any(|item| matches!(item, Item::Error)) {
            return Err(format!("unsupported time pattern {:?}", pattern));
        }

        Ok(Self { strftime })
    }

    pub fn render(&self, time: &DateTime<Local>, out: &mut String) {
        // Items were validated in parse()
        let _ = write!(out, "{}", time.format(&self.strftime));
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self {
            strftime: "%Y-%m-%dT%H:%M:%S.%6f%:z".to_string(),
        }
    }
}

fn push_literal(out: &mut String, text: &str) {
    for c in text.chars() {
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
    }
}
