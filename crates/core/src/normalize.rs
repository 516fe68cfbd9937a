use std::collections::HashMap;

use crate::types::CompareOptions;

pub(crate) const NUM_MARKER: &str = "NUM";
pub(crate) const STR_MARKER: &str = "STR";

/// One input after comment stripping, whitespace collapsing, and
/// tokenization. `tokens` is the flat stream fed to fingerprinting;
/// `lines` holds the same tokens grouped per source line (of the stripped
/// text) and space-joined, for line-level alignment.
#[derive(Debug)]
pub(crate) struct NormalizedSource {
    pub(crate) tokens: Vec<String>,
    pub(crate) lines: Vec<String>,
}

pub(crate) fn normalize(text: &str, options: &CompareOptions) -> NormalizedSource {
    let stripped;
    let text = if options.ignore_comments {
        stripped = strip_comments(text);
        stripped.as_str()
    } else {
        text
    };

    let collapsed;
    let text = if options.ignore_whitespace {
        collapsed = collapse_whitespace(text);
        collapsed.as_str()
    } else {
        text
    };

    tokenize(text, options.normalize_identifiers)
}

/// Removes `/* */` spans (embedded newlines included) and `//` runs up to
/// but not including the newline. Not quote-aware: comment markers inside
/// string literals are stripped too, matching the blind-removal contract.
pub(crate) fn strip_comments(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0usize;

    while i < chars.len() {
        if chars[i] == '/' && i + 1 < chars.len() && chars[i + 1] == '*' {
            i += 2;
            while i + 1 < chars.len() && !(chars[i] == '*' && chars[i + 1] == '/') {
                i += 1;
            }
            i = (i + 2).min(chars.len());
            continue;
        }
        if chars[i] == '/' && i + 1 < chars.len() && chars[i + 1] == '/' {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

const TIGHT_PUNCT: &[char] = &[
    '=', '+', '-', '*', '/', '(', ')', '{', '}', '[', ']', ';', '<', '>', '!', '&', '|', ',', '.',
];

/// Collapses horizontal whitespace runs to a single space and drops spacing
/// adjacent to the tight punctuation set. Newlines survive as line
/// boundaries so line-level alignment still sees per-line renderings.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let mut line_out = String::new();
        let mut pending_space = false;
        for ch in line.chars() {
            if ch.is_whitespace() {
                if !line_out.is_empty() {
                    pending_space = true;
                }
                continue;
            }
            if TIGHT_PUNCT.contains(&ch) {
                pending_space = false;
            } else if pending_space {
                if !line_out.ends_with(|c: char| TIGHT_PUNCT.contains(&c)) {
                    line_out.push(' ');
                }
                pending_space = false;
            }
            line_out.push(ch);
        }
        out.push_str(&line_out);
    }

    out
}

fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "auto"
            | "break"
            | "case"
            | "char"
            | "class"
            | "catch"
            | "const"
            | "continue"
            | "default"
            | "delete"
            | "do"
            | "double"
            | "else"
            | "enum"
            | "extern"
            | "float"
            | "for"
            | "friend"
            | "goto"
            | "if"
            | "inline"
            | "int"
            | "long"
            | "namespace"
            | "new"
            | "operator"
            | "private"
            | "protected"
            | "public"
            | "register"
            | "return"
            | "short"
            | "signed"
            | "sizeof"
            | "static"
            | "struct"
            | "switch"
            | "template"
            | "throw"
            | "try"
            | "typedef"
            | "union"
            | "unsigned"
            | "using"
            | "virtual"
            | "void"
            | "volatile"
            | "while"
    )
}

fn is_reserved(word: &str) -> bool {
    // Marker spellings pass through the identifier table so normalizing an
    // already-normalized stream is a fixed point.
    is_keyword(word) || word == NUM_MARKER || word == STR_MARKER
}

fn tokenize(text: &str, normalize_identifiers: bool) -> NormalizedSource {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens: Vec<String> = Vec::new();
    let mut lines: Vec<String> = vec![String::new()];
    // Fresh per call: canonical names are local to one input.
    let mut ident_table: HashMap<String, String> = HashMap::new();
    let mut i = 0usize;
    let mut line = 0usize;

    fn push_token(tokens: &mut Vec<String>, lines: &mut [String], line: usize, tok: String) {
        if !lines[line].is_empty() {
            lines[line].push(' ');
        }
        lines[line].push_str(&tok);
        tokens.push(tok);
    }

    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            lines.push(String::new());
            line += 1;
            i += 1;
            continue;
        }
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let tok = if !normalize_identifiers || is_reserved(&word) {
                word
            } else {
                match ident_table.get(&word) {
                    Some(canonical) => canonical.clone(),
                    None => {
                        let canonical = format!("ID_{}", ident_table.len());
                        ident_table.insert(word, canonical.clone());
                        canonical
                    }
                }
            };
            push_token(&mut tokens, &mut lines, line, tok);
            continue;
        }

        if c.is_ascii_digit() {
            i += 1;
            let mut seen_dot = false;
            while i < chars.len() {
                let c = chars[i];
                if c.is_ascii_digit() {
                    i += 1;
                } else if c == '.' && !seen_dot {
                    seen_dot = true;
                    i += 1;
                } else {
                    break;
                }
            }
            push_token(&mut tokens, &mut lines, line, NUM_MARKER.to_string());
            continue;
        }

        if c == '"' || c == '\'' {
            let quote = c;
            let start_line = line;
            i += 1;
            while i < chars.len() {
                let c = chars[i];
                if c == '\\' && i + 1 < chars.len() {
                    i += 2;
                    continue;
                }
                if c == quote {
                    i += 1;
                    break;
                }
                if c == '\n' {
                    lines.push(String::new());
                    line += 1;
                }
                i += 1;
            }
            // An unterminated quote consumes to end of input and still
            // yields a marker.
            push_token(&mut tokens, &mut lines, start_line, STR_MARKER.to_string());
            continue;
        }

        push_token(&mut tokens, &mut lines, line, c.to_string());
        i += 1;
    }

    NormalizedSource { tokens, lines }
}
