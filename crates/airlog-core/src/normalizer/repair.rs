//! Structural Repairer — syntactic fixes for truncated or sloppy JSON text.
//!
//! Model replies are cut at the tail, never the head, so repair only ever
//! closes things: it never synthesizes an opening brace or bracket. Every
//! pass works on *structural* characters, i.e. those outside string
//! literals, so braces and commas quoted inside values are left alone.
//!
//! Passes, in order:
//!
//! 1. Close a dangling string literal.
//! 2. Drop closers that match no opener.
//! 3. Strip commas that directly precede a closer or the end of the text.
//! 4. Append the missing closers, innermost first.
//!
//! The output of [`repair`] is a fixed point: repairing it again returns it
//! unchanged. Well-formed JSON passes through untouched.

/// Repair `candidate` into a better (never worse) strict-parse candidate.
///
/// The result is not guaranteed to decode: a value truncated mid-string is
/// closed syntactically but usually leaves debris behind.
pub fn repair(candidate: &str) -> String {
    if candidate.trim().is_empty() {
        return "{}".to_string();
    }

    let closed = close_dangling_string(candidate);
    let matched = drop_unmatched_closers(&closed);
    let stripped = strip_trailing_commas(&matched);
    append_missing_closers(stripped)
}

// ---------------------------------------------------------------------------
// Lexing
// ---------------------------------------------------------------------------

struct Lexed {
    /// `{ } [ ] ,` found outside string literals, with their byte offsets.
    structural: Vec<(usize, char)>,
    /// Offset of the opening quote when the text ends inside a string.
    open_string: Option<usize>,
    /// The text ends on an unconsumed backslash inside a string.
    trailing_escape: bool,
}

fn lex(text: &str) -> Lexed {
    let mut structural = Vec::new();
    let mut open_string = None;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if open_string.is_some() {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => open_string = None,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => open_string = Some(i),
            '{' | '}' | '[' | ']' | ',' => structural.push((i, ch)),
            _ => {}
        }
    }

    Lexed {
        structural,
        open_string,
        trailing_escape: escaped,
    }
}

fn opener_for(closer: char) -> char {
    if closer == '}' {
        '{'
    } else {
        '['
    }
}

fn closer_for(opener: char) -> char {
    if opener == '{' {
        '}'
    } else {
        ']'
    }
}

fn is_separator(ch: char) -> bool {
    matches!(ch, ',' | '}' | ']') || ch.is_whitespace()
}

fn remove_offsets(text: &str, offsets: &[usize]) -> String {
    if offsets.is_empty() {
        return text.to_string();
    }
    text.char_indices()
        .filter(|(i, _)| offsets.binary_search(i).is_err())
        .map(|(_, ch)| ch)
        .collect()
}

// ---------------------------------------------------------------------------
// Passes
// ---------------------------------------------------------------------------

/// Close the string literal the text ends inside, if any.
///
/// The synthetic quote goes right after the opening quote unless that quote
/// is already followed by a separator, in which case the string is closed
/// at the end of the text instead. Closing early turns the rest of the old
/// literal back into structure, where a later quote may open a new dangling
/// string; each of those is closed the same way.
///
/// One forward pass over the text, using [`string_ends`] to know where any
/// literal opened at a given offset would close.
fn close_dangling_string(text: &str) -> String {
    let bytes = text.as_bytes();
    let ends = string_ends(bytes);
    let mut inserts = Vec::new();
    let mut tail = None;

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'"' {
            i += 1;
            continue;
        }
        let after = i + 1;
        match ends[after] {
            StringEnd::Closed(close) => i = close + 1,
            StringEnd::Open { trailing_escape } => match text[after..].chars().next() {
                Some(next) if !is_separator(next) => {
                    inserts.push(after);
                    i = after;
                }
                _ => {
                    tail = Some(trailing_escape);
                    break;
                }
            },
        }
    }

    let mut out = String::with_capacity(text.len() + inserts.len() + 1);
    let mut from = 0;
    for at in inserts {
        out.push_str(&text[from..at]);
        out.push('"');
        from = at;
    }
    out.push_str(&text[from..]);
    if let Some(trailing_escape) = tail {
        if trailing_escape {
            out.pop();
        }
        out.push('"');
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringEnd {
    /// Offset of the unescaped quote that closes the literal.
    Closed(usize),
    /// The text ends inside the literal.
    Open { trailing_escape: bool },
}

/// For every byte offset `j`, where a string literal whose contents start at
/// `j` would close. Built back to front so the whole table is linear.
///
/// Quotes and backslashes are ASCII, so working on bytes never mistakes part
/// of a multi-byte character for either.
fn string_ends(bytes: &[u8]) -> Vec<StringEnd> {
    let len = bytes.len();
    let mut ends = vec![StringEnd::Open { trailing_escape: false }; len + 1];
    for j in (0..len).rev() {
        ends[j] = match bytes[j] {
            b'"' => StringEnd::Closed(j),
            b'\\' if j + 1 == len => StringEnd::Open { trailing_escape: true },
            b'\\' => ends[j + 2],
            _ => ends[j + 1],
        };
    }
    ends
}

fn drop_unmatched_closers(text: &str) -> String {
    let mut stack = Vec::new();
    let mut unmatched = Vec::new();

    for (i, ch) in lex(text).structural {
        match ch {
            '{' | '[' => stack.push(ch),
            '}' | ']' => {
                if stack.last() == Some(&opener_for(ch)) {
                    stack.pop();
                } else {
                    unmatched.push(i);
                }
            }
            _ => {}
        }
    }

    remove_offsets(text, &unmatched)
}

fn strip_trailing_commas(text: &str) -> String {
    let closes = closes_after(text);
    let dangling: Vec<usize> = lex(text)
        .structural
        .into_iter()
        .filter(|&(i, ch)| ch == ',' && closes[i])
        .map(|(i, _)| i)
        .collect();

    remove_offsets(text, &dangling)
}

/// Per byte offset: whether only whitespace and commas stand between that
/// character and a closer (or the end of the text).
fn closes_after(text: &str) -> Vec<bool> {
    let mut closes = vec![false; text.len()];
    let mut next = None;
    for (i, ch) in text.char_indices().rev() {
        closes[i] = matches!(next, None | Some('}') | Some(']'));
        if ch != ',' && !ch.is_whitespace() {
            next = Some(ch);
        }
    }
    closes
}

fn append_missing_closers(mut text: String) -> String {
    let mut stack = Vec::new();
    for (_, ch) in lex(&text).structural {
        match ch {
            '{' | '[' => stack.push(ch),
            '}' | ']' => {
                stack.pop();
            }
            _ => {}
        }
    }

    text.extend(stack.into_iter().rev().map(closer_for));
    text
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
