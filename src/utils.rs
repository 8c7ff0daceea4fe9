use crate::lexer::{Keyword, Lexer, Token, TokenType};

/// Calculates the 1-based line and column number for a given byte position in the source text.
/// This function is designed to be called only when an error occurs, as it iterates through
/// the source text to determine the position.
pub fn get_line_and_column(source: &str, position: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for (i, c) in source.char_indices() {
        if i >= position {
            break;
        }
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

/// A single non-keyword identifier.
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && Keyword::lookup(word).is_none()
}

/// Dot-separated identifiers, e.g. `com.example.Thing`.
pub fn is_qualified_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_identifier)
}

/// Joins significant tokens into canonical text: one space between words,
/// after commas, after a `?` wildcard and around `&` bounds, none elsewhere.
pub fn join_tokens<'t>(tokens: impl IntoIterator<Item = &'t Token>) -> String {
    let mut out = String::new();
    let mut previous: Option<&Token> = None;
    for token in tokens {
        if let Some(prev) = previous {
            let is_amp = |t: &Token| t.ttype == TokenType::Operator("&".to_string());
            let spaced = (prev.is_word() && token.is_word())
                || prev.ttype == TokenType::Comma
                || (prev.ttype == TokenType::Question && token.is_word())
                || is_amp(prev)
                || is_amp(token);
            if spaced {
                out.push(' ');
            }
        }
        out.push_str(&token.lexeme);
        previous = Some(token);
    }
    out
}

/// Canonical spelling of a type written by hand, e.g. `Map<K,V>` becomes
/// `Map<K, V>`. `None` when the text does not tokenize.
pub fn normalize_type(text: &str) -> Option<String> {
    let tokens = Lexer::new(text).lex().ok()?;
    let joined = join_tokens(
        tokens
            .iter()
            .filter(|t| !t.is_trivia() && t.ttype != TokenType::Eof),
    );
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Replaces every whitespace token with a single space, leaving literals and
/// comments untouched. `None` when the text does not tokenize.
pub fn collapse_whitespace(text: &str) -> Option<String> {
    let tokens = Lexer::new(text).lex().ok()?;
    Some(collapse_token_whitespace(&tokens))
}

pub(crate) fn collapse_token_whitespace(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token.ttype {
            TokenType::Whitespace => out.push(' '),
            TokenType::Eof => {}
            _ => out.push_str(&token.lexeme),
        }
    }
    out.trim().to_string()
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn strip_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}

/// Normalizes raw block text into lines: the part sharing a line with the
/// opening delimiter is trimmed, the rest loses its common indentation,
/// trailing whitespace goes, and blank lines at either end are dropped.
pub fn normalize_block(raw: &str) -> Vec<String> {
    let raw_lines: Vec<&str> = raw.split('\n').map(|l| l.trim_end()).collect();
    let Some((first, rest)) = raw_lines.split_first() else {
        return Vec::new();
    };

    let common = rest
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| leading_whitespace(l))
        .min()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(raw_lines.len());
    let first = first.trim();
    if !first.is_empty() {
        lines.push(first.to_string());
    }
    for line in rest {
        if line.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.push(strip_chars(line, common).to_string());
        }
    }

    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// [`normalize_block`] for a field initializer, rejoined into one string.
pub fn normalize_value(raw: &str) -> String {
    normalize_block(raw).join("\n")
}
