//! Comment stripping for Swift-like source text.
//!
//! A small character-level lexer that understands line comments, block
//! comments, string literals, and triple-quoted multi-line strings. Comments
//! are removed; everything else, including comment markers inside strings, is
//! passed through unchanged. Newlines inside block comments are kept so the
//! output has the same line structure as the input.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Normal,
    LineComment,
    BlockComment,
    StringLiteral,
    MultilineString,
}

/// Remove `//` and `/* */` comments from `source`.
///
/// Block comments do not nest: the first `*/` closes the comment. A removed
/// block comment leaves a single space behind so the tokens on either side
/// never merge.
pub fn strip_comments(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut state = State::Normal;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match state {
            State::Normal => match (c, next) {
                ('/', Some('/')) => {
                    state = State::LineComment;
                    i += 2;
                    continue;
                }
                ('/', Some('*')) => {
                    state = State::BlockComment;
                    out.push(' ');
                    i += 2;
                    continue;
                }
                ('"', _) if starts_triple_quote(&chars, i) => {
                    state = State::MultilineString;
                    out.push_str("\"\"\"");
                    i += 3;
                    continue;
                }
                ('"', _) => {
                    state = State::StringLiteral;
                    out.push(c);
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    state = State::Normal;
                    out.push(c);
                }
            }
            State::BlockComment => match (c, next) {
                ('*', Some('/')) => {
                    state = State::Normal;
                    i += 2;
                    continue;
                }
                ('\n', _) => out.push(c),
                _ => {}
            },
            State::StringLiteral => {
                out.push(c);
                match c {
                    '\\' => {
                        if let Some(escaped) = next {
                            out.push(escaped);
                            i += 2;
                            continue;
                        }
                    }
                    '"' => state = State::Normal,
                    // Unterminated literal; don't let it swallow the next line.
                    '\n' => state = State::Normal,
                    _ => {}
                }
            }
            State::MultilineString => {
                if c == '\\' {
                    out.push(c);
                    if let Some(escaped) = next {
                        out.push(escaped);
                        i += 2;
                        continue;
                    }
                } else if starts_triple_quote(&chars, i) {
                    state = State::Normal;
                    out.push_str("\"\"\"");
                    i += 3;
                    continue;
                } else {
                    out.push(c);
                }
            }
        }
        i += 1;
    }

    out
}

fn starts_triple_quote(chars: &[char], at: usize) -> bool {
    chars.get(at..at + 3) == Some(&['"', '"', '"'][..])
}
