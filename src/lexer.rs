use crate::ast::Modifier;
use crate::error::TokenizeError;
use miette::NamedSource;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Reserved words of the modeled language.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Keyword {
    Abstract,
    Assert,
    Boolean,
    Break,
    Byte,
    Case,
    Catch,
    Char,
    Class,
    Const,
    Continue,
    Default,
    Do,
    Double,
    Else,
    Enum,
    Extends,
    Final,
    Finally,
    Float,
    For,
    Goto,
    If,
    Implements,
    Import,
    Instanceof,
    Int,
    Interface,
    Long,
    Native,
    New,
    Package,
    Private,
    Protected,
    Public,
    Return,
    Short,
    Static,
    Strictfp,
    Super,
    Switch,
    Synchronized,
    This,
    Throw,
    Throws,
    Transient,
    Try,
    Void,
    Volatile,
    While,
    True,
    False,
    Null,
}

/// Keyword spellings, built once and never mutated.
pub static KEYWORDS: LazyLock<HashMap<&'static str, Keyword>> = LazyLock::new(|| {
    use Keyword::*;
    HashMap::from([
        ("abstract", Abstract),
        ("assert", Assert),
        ("boolean", Boolean),
        ("break", Break),
        ("byte", Byte),
        ("case", Case),
        ("catch", Catch),
        ("char", Char),
        ("class", Class),
        ("const", Const),
        ("continue", Continue),
        ("default", Default),
        ("do", Do),
        ("double", Double),
        ("else", Else),
        ("enum", Enum),
        ("extends", Extends),
        ("final", Final),
        ("finally", Finally),
        ("float", Float),
        ("for", For),
        ("goto", Goto),
        ("if", If),
        ("implements", Implements),
        ("import", Import),
        ("instanceof", Instanceof),
        ("int", Int),
        ("interface", Interface),
        ("long", Long),
        ("native", Native),
        ("new", New),
        ("package", Package),
        ("private", Private),
        ("protected", Protected),
        ("public", Public),
        ("return", Return),
        ("short", Short),
        ("static", Static),
        ("strictfp", Strictfp),
        ("super", Super),
        ("switch", Switch),
        ("synchronized", Synchronized),
        ("this", This),
        ("throw", Throw),
        ("throws", Throws),
        ("transient", Transient),
        ("try", Try),
        ("void", Void),
        ("volatile", Volatile),
        ("while", While),
        ("true", True),
        ("false", False),
        ("null", Null),
    ])
});

impl Keyword {
    pub fn lookup(word: &str) -> Option<Keyword> {
        KEYWORDS.get(word).copied()
    }

    /// The modifier this keyword spells, if any.
    pub fn modifier(self) -> Option<Modifier> {
        match self {
            Keyword::Public => Some(Modifier::Public),
            Keyword::Protected => Some(Modifier::Protected),
            Keyword::Private => Some(Modifier::Private),
            Keyword::Abstract => Some(Modifier::Abstract),
            Keyword::Default => Some(Modifier::Default),
            Keyword::Static => Some(Modifier::Static),
            Keyword::Final => Some(Modifier::Final),
            Keyword::Transient => Some(Modifier::Transient),
            Keyword::Volatile => Some(Modifier::Volatile),
            Keyword::Synchronized => Some(Modifier::Synchronized),
            Keyword::Native => Some(Modifier::Native),
            Keyword::Strictfp => Some(Modifier::Strictfp),
            _ => None,
        }
    }

    /// Primitive types and `void`, which may start a declaration.
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            Keyword::Boolean
                | Keyword::Byte
                | Keyword::Short
                | Keyword::Int
                | Keyword::Long
                | Keyword::Char
                | Keyword::Float
                | Keyword::Double
                | Keyword::Void
        )
    }
}

/// Represents the different kinds of tokens that the lexer can produce.
/// Whitespace and comments are tokens too: the stream is lossless.
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    // == Special Tokens ==
    /// The end of the input. Its lexeme is empty.
    Eof,
    /// A run of whitespace characters, newlines included.
    Whitespace,
    /// `// ...` up to, not including, the line break.
    LineComment,
    /// `/* ... */`
    BlockComment,
    /// `/** ... */`, the documentation comment.
    DocComment,
    /// A character that starts no known token.
    Unknown,

    // == Words and literals ==
    Identifier(String),
    Keyword(Keyword),
    /// A string literal or text block, quotes included in the lexeme.
    StringLiteral,
    CharLiteral,
    Number,

    // == Punctuation ==
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    /// `...`
    Ellipsis,
    /// `@`
    At,
    /// `=` on its own, not part of `==`.
    Equals,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `?`
    Question,
    /// Any other operator character or operator pair like `==`.
    Operator(String),
}

/// A token with its type, its exact text and its byte range.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub ttype: TokenType,
    pub lexeme: String,
    pub pos_start: usize,
    pub pos_end: usize,
}

impl Token {
    pub fn new(ttype: TokenType, lexeme: String, pos_start: usize, pos_end: usize) -> Token {
        Token {
            ttype,
            lexeme,
            pos_start,
            pos_end,
        }
    }

    pub fn is_whitespace(&self) -> bool {
        self.ttype == TokenType::Whitespace
    }

    /// Whitespace and ordinary comments. Doc comments are not trivia.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.ttype,
            TokenType::Whitespace | TokenType::LineComment | TokenType::BlockComment
        )
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.ttype {
            TokenType::Keyword(k) => Some(k),
            _ => None,
        }
    }

    /// Identifiers and keywords: tokens that need a space between them.
    pub fn is_word(&self) -> bool {
        matches!(
            self.ttype,
            TokenType::Identifier(_)
                | TokenType::Keyword(_)
                | TokenType::Number
                | TokenType::StringLiteral
                | TokenType::CharLiteral
        )
    }
}

/// A tokenized source unit. Sub-parsers read it by index and never mutate it.
#[derive(Debug, Clone)]
pub struct TokenStream {
    pub(crate) source: Arc<NamedSource<String>>,
    pub(crate) text: Arc<str>,
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(source_text: &str) -> Result<Self, TokenizeError> {
        Self::new_with_name(source_text, "source.java".to_string())
    }

    pub fn new_with_name(source_text: &str, name: String) -> Result<Self, TokenizeError> {
        let source = Arc::new(NamedSource::new(name, source_text.to_string()));
        let tokens = Lexer::new(source_text).with_source(source.clone()).lex()?;
        Ok(Self {
            source,
            text: Arc::from(source_text),
            tokens,
        })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }
}

pub struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    position: usize,
    source: Option<Arc<NamedSource<String>>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            position: 0,
            source: None,
        }
    }

    /// Names the source used in tokenization diagnostics.
    pub fn with_source(mut self, source: Arc<NamedSource<String>>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn lex(&mut self) -> Result<Vec<Token>, TokenizeError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if token.ttype == TokenType::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }
        log::trace!("lexed {} tokens from {} bytes", tokens.len(), self.input.len());
        Ok(tokens)
    }

    pub fn next_token(&mut self) -> Result<Token, TokenizeError> {
        let start_pos = self.position;

        let ttype = if let Some(char) = self.advance() {
            match char {
                '{' => TokenType::LBrace,
                '}' => TokenType::RBrace,
                '(' => TokenType::LParen,
                ')' => TokenType::RParen,
                '[' => TokenType::LBracket,
                ']' => TokenType::RBracket,
                ';' => TokenType::Semicolon,
                ',' => TokenType::Comma,
                '@' => TokenType::At,
                '<' => TokenType::Lt,
                '>' => TokenType::Gt,
                '?' => TokenType::Question,
                '=' => {
                    if self.peek() == Some('=') {
                        self.advance();
                        TokenType::Operator("==".to_string())
                    } else {
                        TokenType::Equals
                    }
                }
                '.' => {
                    if self.peek() == Some('.') && self.peek_second() == Some('.') {
                        self.advance();
                        self.advance();
                        TokenType::Ellipsis
                    } else if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                        self.read_number()
                    } else {
                        TokenType::Dot
                    }
                }
                '/' => match self.peek() {
                    Some('/') => self.read_line_comment(),
                    Some('*') => self.read_block_comment(start_pos)?,
                    _ => TokenType::Operator("/".to_string()),
                },
                '"' => self.read_string(start_pos)?,
                '\'' => self.read_char(start_pos)?,
                c if c.is_whitespace() => self.read_whitespace(),
                c if c.is_alphabetic() || c == '_' || c == '$' => self.read_word(start_pos),
                c if c.is_ascii_digit() => self.read_number(),
                c if "+-*%!&|^~:".contains(c) => TokenType::Operator(c.to_string()),
                _ => TokenType::Unknown,
            }
        } else {
            TokenType::Eof
        };

        let lexeme = self.input[start_pos..self.position].to_string();
        Ok(Token::new(ttype, lexeme, start_pos, self.position))
    }

    fn advance(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.position..].chars().nth(1)
    }

    fn source(&self) -> NamedSource<String> {
        match &self.source {
            Some(source) => (**source).clone(),
            None => NamedSource::new("source.java", self.input.to_string()),
        }
    }

    fn read_whitespace(&mut self) -> TokenType {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
        TokenType::Whitespace
    }

    fn read_line_comment(&mut self) -> TokenType {
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.advance();
        }
        TokenType::LineComment
    }

    fn read_block_comment(&mut self, start_pos: usize) -> Result<TokenType, TokenizeError> {
        self.advance(); // the '*' after '/'
        // `/**/` is an empty block comment, not a doc comment
        let is_doc = self.peek() == Some('*') && self.peek_second() != Some('/');
        let mut previous = '\0';
        while let Some(c) = self.advance() {
            if previous == '*' && c == '/' && self.position - start_pos > 3 {
                return Ok(if is_doc {
                    TokenType::DocComment
                } else {
                    TokenType::BlockComment
                });
            }
            previous = c;
        }
        Err(TokenizeError::UnterminatedComment {
            src: self.source(),
            span: (start_pos, self.position - start_pos).into(),
        })
    }

    fn read_string(&mut self, start_pos: usize) -> Result<TokenType, TokenizeError> {
        if self.peek() == Some('"') && self.peek_second() == Some('"') {
            self.advance();
            self.advance();
            return self.read_text_block(start_pos);
        }
        while let Some(c) = self.peek() {
            match c {
                '"' => {
                    self.advance();
                    return Ok(TokenType::StringLiteral);
                }
                '\\' => {
                    self.advance();
                    if self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                '\n' | '\r' => break,
                _ => {
                    self.advance();
                }
            }
        }
        Err(TokenizeError::UnterminatedString {
            src: self.source(),
            span: (start_pos, self.position - start_pos).into(),
        })
    }

    fn read_text_block(&mut self, start_pos: usize) -> Result<TokenType, TokenizeError> {
        let mut quotes = 0;
        while let Some(c) = self.advance() {
            match c {
                '"' => {
                    quotes += 1;
                    if quotes == 3 {
                        return Ok(TokenType::StringLiteral);
                    }
                }
                '\\' => {
                    quotes = 0;
                    self.advance();
                }
                _ => quotes = 0,
            }
        }
        Err(TokenizeError::UnterminatedString {
            src: self.source(),
            span: (start_pos, self.position - start_pos).into(),
        })
    }

    fn read_char(&mut self, start_pos: usize) -> Result<TokenType, TokenizeError> {
        while let Some(c) = self.peek() {
            match c {
                '\'' => {
                    self.advance();
                    return Ok(TokenType::CharLiteral);
                }
                '\\' => {
                    self.advance();
                    if self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                '\n' | '\r' => break,
                _ => {
                    self.advance();
                }
            }
        }
        Err(TokenizeError::UnterminatedChar {
            src: self.source(),
            span: (start_pos, self.position - start_pos).into(),
        })
    }

    fn read_word(&mut self, start_pos: usize) -> TokenType {
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                self.advance();
            } else {
                break;
            }
        }
        let word = &self.input[start_pos..self.position];
        match Keyword::lookup(word) {
            Some(keyword) => TokenType::Keyword(keyword),
            None => TokenType::Identifier(word.to_string()),
        }
    }

    /// Numeric literals in any radix, with underscores, suffixes and exponents.
    fn read_number(&mut self) -> TokenType {
        let mut previous = '\0';
        while let Some(c) = self.peek() {
            let exponent_sign = (c == '+' || c == '-') && matches!(previous, 'e' | 'E' | 'p' | 'P');
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                if c == '.' && self.peek_second() == Some('.') {
                    break;
                }
                previous = c;
                self.advance();
            } else {
                break;
            }
        }
        TokenType::Number
    }
}
