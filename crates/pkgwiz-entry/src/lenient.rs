//! Best-effort repair of JavaScript-style literals into JSON.
//!
//! Handles the two things people actually type on a command line:
//! bare object keys (`{main: ...}`) and single-quoted strings
//! (`['a.ts']`). Anything else passes through unchanged.

/// Rewrite `input` so that bare keys are quoted and single-quoted strings
/// become double-quoted ones.
pub(crate) fn repair(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' => i = copy_double_quoted(&chars, i, &mut out),
            '\'' => i = convert_single_quoted(&chars, i, &mut out),
            c if is_ident_start(c) => {
                let start = i;
                while i < chars.len() && is_ident_char(chars[i]) {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                if next_non_space(&chars, i) == Some(':') {
                    out.push('"');
                    out.push_str(&word);
                    out.push('"');
                } else {
                    out.push_str(&word);
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Copy a double-quoted string verbatim. Returns the index after it.
fn copy_double_quoted(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('"');
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        i += 1;
        match c {
            '\\' if i < chars.len() => {
                out.push(chars[i]);
                i += 1;
            }
            '"' => break,
            _ => {}
        }
    }
    i
}

/// Emit a single-quoted string as a double-quoted one. Returns the index
/// after the closing quote.
fn convert_single_quoted(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('"');
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '\\' if i < chars.len() && chars[i] == '\'' => {
                out.push('\'');
                i += 1;
            }
            '\\' if i < chars.len() => {
                out.push('\\');
                out.push(chars[i]);
                i += 1;
            }
            '"' => out.push_str("\\\""),
            '\'' => break,
            _ => out.push(c),
        }
    }
    out.push('"');
    i
}

fn next_non_space(chars: &[char], from: usize) -> Option<char> {
    chars[from..].iter().copied().find(|c| !c.is_whitespace())
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '-')
}
