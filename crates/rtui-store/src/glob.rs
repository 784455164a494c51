//! Glob-style key patterns (`*`, `?`, `[abc]`, `[^a-z]`, `\x`) as used by
//! `KEYS`, translated to anchored regular expressions.

use regex::Regex;

use crate::error::Result;

/// Compile a key pattern into a regex that matches whole keys.
pub fn compile(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(&translate(pattern))?)
}

pub fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from("(?s)^");
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '\\' => {
                i += 1;
                match chars.get(i) {
                    Some(c) => push_literal(&mut out, *c),
                    None => push_literal(&mut out, '\\'),
                }
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&mut out, &chars[i + 1..end]);
                    i = end;
                }
                // unclosed bracket matches itself
                None => push_literal(&mut out, '['),
            },
            c => push_literal(&mut out, c),
        }
        i += 1;
    }

    out.push('$');
    out
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

/// Index of the `]` closing the class opened at `start`.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            ']' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn push_class(out: &mut String, body: &[char]) {
    let (negated, body) = match body.first() {
        Some('^') => (true, &body[1..]),
        _ => (false, body),
    };

    if body.is_empty() {
        // `[]` matches nothing, `[^]` matches any single char
        out.push_str(if negated { "." } else { "[^\\s\\S]" });
        return;
    }

    // (char, escaped) so an escaped `-` never forms a range
    let mut tokens = Vec::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        match body[i] {
            '\\' if i + 1 < body.len() => {
                tokens.push((body[i + 1], true));
                i += 2;
            }
            c => {
                tokens.push((c, false));
                i += 1;
            }
        }
    }

    out.push('[');
    if negated {
        out.push('^');
    }
    let mut i = 0;
    while i < tokens.len() {
        let (start, _) = tokens[i];
        match (tokens.get(i + 1), tokens.get(i + 2)) {
            (Some(('-', false)), Some(&(end, _))) => {
                // KEYS accepts reversed ranges
                let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
                push_class_char(out, lo);
                out.push('-');
                push_class_char(out, hi);
                i += 3;
            }
            _ => {
                push_class_char(out, start);
                i += 1;
            }
        }
    }
    out.push(']');
}

fn push_class_char(out: &mut String, c: char) {
    if matches!(c, '\\' | ']' | '[' | '^' | '-' | '&' | '~') {
        out.push('\\');
    }
    out.push(c);
}
