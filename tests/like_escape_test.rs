//! A LIKE pattern rewritten for backslash escaping matches exactly what the
//! original pattern matched under its own escape character.

use qail_spanner::transpiler::sql::spanner::rewrite_like_pattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Literal(char),
    One,
    Many,
}

/// Escape followed by `%`, `_` or itself is a literal; a lone escape is literal too.
fn tokenize(pattern: &str, escape: char) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c == escape {
            match chars.peek().copied() {
                Some(next) if next == '%' || next == '_' || next == escape => {
                    tokens.push(Token::Literal(next));
                    chars.next();
                }
                _ => tokens.push(Token::Literal(c)),
            }
        } else if c == '%' {
            tokens.push(Token::Many);
        } else if c == '_' {
            tokens.push(Token::One);
        } else {
            tokens.push(Token::Literal(c));
        }
    }
    tokens
}

fn matches(tokens: &[Token], text: &[char]) -> bool {
    match tokens.split_first() {
        None => text.is_empty(),
        Some((Token::Many, rest)) => (0..=text.len()).any(|i| matches(rest, &text[i..])),
        Some((Token::One, rest)) => !text.is_empty() && matches(rest, &text[1..]),
        Some((Token::Literal(c), rest)) => text.first() == Some(c) && matches(rest, &text[1..]),
    }
}

fn like(text: &str, pattern: &str, escape: char) -> bool {
    let chars: Vec<char> = text.chars().collect();
    matches(&tokenize(pattern, escape), &chars)
}

const PATTERNS: &[&str] = &[
    "100!%",
    "a!_b%",
    "!!%",
    "!!!%",
    "50!",
    "!x",
    "C:\\dir\\%",
    "%\\!%",
    "_!__",
    "",
];

const TEXTS: &[&str] = &[
    "100%",
    "1000",
    "a_b",
    "axb",
    "a_bcd",
    "!",
    "!x",
    "!abc",
    "!%",
    "50!",
    "x",
    "C:\\dir\\file",
    "C:dirfile",
    "z\\!q",
    "z!q",
    "a_",
    "a_b_",
    "",
];

#[test]
fn test_rewrite_preserves_tokens() {
    for escape in ['!', '#'] {
        for pattern in PATTERNS {
            let pattern = pattern.replace('!', &escape.to_string());
            let rewritten = rewrite_like_pattern(&pattern, escape);
            assert_eq!(
                tokenize(&pattern, escape),
                tokenize(&rewritten, '\\'),
                "pattern {:?} rewritten as {:?}",
                pattern,
                rewritten
            );
        }
    }
}

#[test]
fn test_rewrite_preserves_match_set() {
    for pattern in PATTERNS {
        let rewritten = rewrite_like_pattern(pattern, '!');
        for text in TEXTS {
            assert_eq!(
                like(text, pattern, '!'),
                like(text, &rewritten, '\\'),
                "{:?} like {:?} vs rewritten {:?}",
                text,
                pattern,
                rewritten
            );
        }
    }
}

#[test]
fn test_matcher_sanity() {
    assert!(like("100%", "100!%", '!'));
    assert!(!like("1000", "100!%", '!'));
    assert!(like("a_bcd", "a!_b%", '!'));
    assert!(!like("axb", "a!_b%", '!'));
    assert!(like("!abc", "!!%", '!'));
}
