use crate::ast::*;
use crate::builder::*;
use crate::error::{BuildError, Construct, JError, ParseError};
use crate::lexer::{Keyword, Token, TokenStream, TokenType};
use crate::utils::{collapse_token_whitespace, get_line_and_column, join_tokens, normalize_block};
use log::{debug, trace, warn};
use std::fmt::{self, Display};

static END: Token = Token {
    ttype: TokenType::Eof,
    lexeme: String::new(),
    pos_start: 0,
    pos_end: 0,
};

/// A construct that can be recognized from a token stream.
pub trait Parse: Sized {
    const CONSTRUCT: Construct;

    fn parse_with(parser: &mut Parser<'_>) -> Result<Self, JError>;
}

/// Parses one `T` starting at token `start`. Returns the node and the index
/// of the first token it did not consume.
pub fn parse<T: Parse>(tokens: &TokenStream, start: usize) -> Result<(T, usize), JError> {
    let mut parser = Parser::at(tokens, start);
    let node = T::parse_with(&mut parser)?;
    Ok((node, parser.position))
}

/// Parses the whole of `source` as one `T`.
pub fn parse_str<T: Parse>(source: &str) -> Result<T, JError> {
    let tokens = TokenStream::new(source)?;
    let mut parser = Parser::new(&tokens);
    let node = T::parse_with(&mut parser)?;
    parser.skip_whitespace();
    if !parser.check(&TokenType::Eof) {
        let found = describe(parser.current());
        let start = parser.position;
        return Err(parser.error(
            T::CONSTRUCT,
            start,
            vec![format!("Unexpected input after {}: {found}", T::CONSTRUCT)],
        ));
    }
    Ok(node)
}

/// One step of the class-body dispatcher: a single member, with any
/// comment, Javadoc and annotations in front of it attached.
pub fn parse_member(tokens: &TokenStream, start: usize) -> Result<(Member, usize), JError> {
    parse::<Member>(tokens, start)
}

/// What a declaration turns out to be once its modifiers are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Class,
    Field,
    Method,
}

impl Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Field => "field",
            DeclarationKind::Method => "method",
        })
    }
}

/// Decides whether the declaration starting at `start` is a field or a
/// method by scanning to the first token that settles it: `(` means a method,
/// `=`, `;` or `,` a field. Generic arguments are skipped. The scan gives up
/// at a brace, so it never leaves the current block.
pub fn classify_declaration(tokens: &[Token], start: usize) -> Option<DeclarationKind> {
    let mut angle_depth = 0usize;
    for token in tokens.iter().skip(start).filter(|t| !t.is_trivia()) {
        match token.ttype {
            TokenType::Lt => angle_depth += 1,
            TokenType::Gt => angle_depth = angle_depth.saturating_sub(1),
            TokenType::LParen if angle_depth == 0 => return Some(DeclarationKind::Method),
            TokenType::Equals | TokenType::Semicolon | TokenType::Comma if angle_depth == 0 => {
                return Some(DeclarationKind::Field)
            }
            TokenType::LBrace | TokenType::RBrace | TokenType::Eof => return None,
            _ => {}
        }
    }
    None
}

fn describe(token: &Token) -> String {
    if token.ttype == TokenType::Eof {
        "end of input".to_string()
    } else {
        format!("'{}'", token.lexeme)
    }
}

/// The text between the delimiters of a comment, split into lines with the
/// leading ` * ` decoration removed. A single-line body only loses the one
/// space on each side of it.
fn comment_lines(body: &str) -> Vec<String> {
    if !body.contains('\n') {
        let line = body.strip_prefix(' ').unwrap_or(body);
        let line = line.strip_suffix(' ').unwrap_or(line);
        return vec![line.trim_end().to_string()];
    }
    body.split('\n')
        .map(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix('*').unwrap_or(line);
            let line = line.strip_prefix(' ').unwrap_or(line);
            line.trim_end().to_string()
        })
        .collect()
}

/// Comment, Javadoc, annotations and modifiers read ahead of a declaration.
#[derive(Debug, Default)]
struct Prefix {
    start: usize,
    section_comment: Option<CommentNode>,
    javadoc: Option<JavadocNode>,
    annotations: Vec<AnnotationNode>,
    modifiers: Vec<Modifier>,
    /// Problems found while reading the prefix itself.
    messages: Vec<String>,
}

impl Prefix {
    fn empty(start: usize) -> Self {
        Self {
            start,
            ..Self::default()
        }
    }
}

macro_rules! with_prefix {
    ($builder:expr, $prefix:expr) => {{
        let mut builder = $builder;
        let prefix = $prefix;
        if let Some(comment) = prefix.section_comment {
            builder = builder.section_comment(comment);
        }
        if let Some(javadoc) = prefix.javadoc {
            builder = builder.javadoc(javadoc);
        }
        builder = builder.annotations(prefix.annotations);
        for modifier in prefix.modifiers {
            builder = builder.modifier(modifier);
        }
        builder
    }};
}

enum Declaration {
    Class(ClassNode),
    Field(FieldNode),
    Method(MethodNode),
}

impl Declaration {
    fn kind(&self) -> DeclarationKind {
        match self {
            Declaration::Class(_) => DeclarationKind::Class,
            Declaration::Field(_) => DeclarationKind::Field,
            Declaration::Method(_) => DeclarationKind::Method,
        }
    }
}

impl From<Declaration> for Member {
    fn from(declaration: Declaration) -> Self {
        match declaration {
            Declaration::Class(node) => Member::Class(Box::new(node)),
            Declaration::Field(node) => Member::Field(node),
            Declaration::Method(node) => Member::Method(node),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassState {
    BeforeBody,
    InBody,
    Done,
}

/// Entries of a class body before attachment.
enum BodyItem {
    SectionComment(CommentNode),
    Javadoc(JavadocNode),
    Annotation(AnnotationNode),
    Member(Member),
}

/// Prefix material waiting for the member it belongs to.
#[derive(Default)]
struct Pending {
    section_comment: Option<CommentNode>,
    javadoc: Option<JavadocNode>,
    annotations: Vec<AnnotationNode>,
}

impl Pending {
    fn attach_to(self, member: &mut Member) -> Result<(), BuildError> {
        macro_rules! attach {
            ($node:expr) => {{
                let node = $node;
                if self.section_comment.is_some() {
                    node.set_section_comment(self.section_comment)?;
                }
                if self.javadoc.is_some() {
                    node.set_javadoc(self.javadoc)?;
                }
                if !self.annotations.is_empty() {
                    let mut annotations = self.annotations;
                    annotations.extend(node.annotations().iter().cloned());
                    node.set_annotations(annotations)?;
                }
                Ok(())
            }};
        }
        match member {
            Member::Field(node) => attach!(node),
            Member::Method(node) => attach!(node),
            Member::Class(node) => attach!(node),
            Member::StaticBlock(_) | Member::Comment(_) => Ok(()),
        }
    }
}

fn has_section_comment(member: &Member) -> bool {
    match member {
        Member::Field(node) => node.section_comment().is_some(),
        Member::Method(node) => node.section_comment().is_some(),
        Member::Class(node) => node.section_comment().is_some(),
        Member::StaticBlock(_) | Member::Comment(_) => false,
    }
}

/// Folds body items into members, handing buffered Javadoc and annotations
/// to the next field, method or inner class.
fn attach_pending(items: Vec<BodyItem>) -> (Vec<Member>, Vec<String>) {
    let mut members = Vec::with_capacity(items.len());
    let mut messages = Vec::new();
    let mut pending = Pending::default();

    for item in items {
        match item {
            BodyItem::SectionComment(comment) => {
                if let Some(previous) = pending.section_comment.replace(comment) {
                    members.push(Member::Comment(previous));
                }
            }
            BodyItem::Javadoc(javadoc) => {
                if pending.javadoc.is_some() {
                    messages.push("Found two Javadoc-equivalents before a single member!".to_string());
                }
                pending.javadoc = Some(javadoc);
            }
            BodyItem::Annotation(annotation) => pending.annotations.push(annotation),
            BodyItem::Member(member @ Member::Comment(_)) => members.push(member),
            BodyItem::Member(member @ Member::StaticBlock(_)) => {
                let waiting = std::mem::take(&mut pending);
                if waiting.javadoc.is_some() {
                    messages.push("Cannot attach Javadoc-equivalent to a static block!".to_string());
                }
                if !waiting.annotations.is_empty() {
                    messages.push("Cannot attach annotations to a static block!".to_string());
                }
                if let Some(comment) = waiting.section_comment {
                    members.push(Member::Comment(comment));
                }
                members.push(member);
            }
            BodyItem::Member(mut member) => {
                if has_section_comment(&member) {
                    if let Some(comment) = pending.section_comment.take() {
                        members.push(Member::Comment(comment));
                    }
                }
                if let Err(err) = std::mem::take(&mut pending).attach_to(&mut member) {
                    messages.extend(err.messages);
                }
                members.push(member);
            }
        }
    }

    if pending.javadoc.is_some() {
        messages.push(
            "Found Javadoc-equivalent at end of class with nothing to attach it to!".to_string(),
        );
    }
    if !pending.annotations.is_empty() {
        messages.push("Found annotation at end of class with nothing to attach it to!".to_string());
    }
    if let Some(comment) = pending.section_comment {
        members.push(Member::Comment(comment));
    }
    (members, messages)
}

/// A recursive descent parser over a lossless token stream.
#[derive(Debug)]
pub struct Parser<'t> {
    stream: &'t TokenStream,
    tokens: &'t [Token],
    position: usize,
    /// Comments stepped over between tokens of a declaration. The innermost
    /// construct that finishes around them reports them.
    skipped_comments: Vec<usize>,
}

impl<'t> Parser<'t> {
    pub fn new(stream: &'t TokenStream) -> Self {
        Self::at(stream, 0)
    }

    pub fn at(stream: &'t TokenStream, position: usize) -> Self {
        trace!("parser positioned at token {position} of {}", stream.name());
        Self {
            stream,
            tokens: stream.tokens(),
            position,
            skipped_comments: Vec::new(),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    // === Compilation unit ===

    ///    CompilationUnit ::= { Comment } [ Package ] { Import } ClassDeclaration { Comment }
    fn compilation_unit(&mut self) -> Result<ClassNode, JError> {
        let start = self.position;
        let mut messages: Vec<String> = Vec::new();
        let mut header_comments = Vec::new();
        let mut trailing_comments = Vec::new();
        let mut section_comment: Option<CommentNode> = None;
        let mut package: Option<PackageNode> = None;
        let mut imports: Vec<ImportNode> = Vec::new();
        let mut class: Option<ClassNode> = None;

        loop {
            self.skip_whitespace();
            let token = self.current();
            match &token.ttype {
                TokenType::Eof => break,
                TokenType::Semicolon => self.advance(),
                TokenType::LineComment | TokenType::BlockComment => {
                    let attaches = self.precedes_declaration_at(self.position + 1, false);
                    let comment = self.comment()?;
                    if class.is_some() {
                        trailing_comments.push(comment);
                    } else if attaches {
                        if let Some(previous) = section_comment.replace(comment) {
                            header_comments.push(previous);
                        }
                    } else {
                        header_comments.extend(section_comment.take());
                        header_comments.push(comment);
                    }
                }
                TokenType::DocComment
                    if matches!(
                        self.peek_significant(1).keyword(),
                        Some(Keyword::Package | Keyword::Import)
                    ) =>
                {
                    header_comments.extend(section_comment.take());
                    header_comments.push(self.comment()?);
                }
                TokenType::Keyword(Keyword::Package) => {
                    let node = self.package()?;
                    if class.is_some() {
                        messages.push("Encountered package declaration after class!".to_string());
                    } else if package.is_some() {
                        messages.push("Encountered two package declarations!".to_string());
                    } else if !imports.is_empty() {
                        messages.push(
                            "Encountered package declaration after import statement!".to_string(),
                        );
                    } else {
                        package = Some(node);
                    }
                }
                TokenType::Keyword(Keyword::Import) => {
                    let node = self.import()?;
                    if class.is_some() {
                        messages.push("Encountered import statement after class!".to_string());
                    } else {
                        imports.push(node);
                    }
                }
                _ => {
                    let mut prefix = Prefix::empty(self.position);
                    prefix.section_comment = section_comment.take();
                    if self.check(&TokenType::DocComment) {
                        prefix.javadoc = Some(self.javadoc()?);
                    }
                    loop {
                        self.skip_whitespace();
                        if !matches!(
                            self.current().ttype,
                            TokenType::LineComment | TokenType::BlockComment
                        ) {
                            break;
                        }
                        let comment = self.comment()?;
                        if let Some(previous) = prefix.section_comment.replace(comment) {
                            header_comments.push(previous);
                        }
                    }
                    match self.declaration(prefix, false)? {
                        Declaration::Class(node) if class.is_none() => class = Some(node),
                        Declaration::Class(_) => {
                            messages.push("Encountered two outer level classes!".to_string())
                        }
                        other => messages.push(format!(
                            "Encountered {} outside of a class!",
                            other.kind()
                        )),
                    }
                }
            }
        }
        header_comments.extend(section_comment);

        let Some(mut class) = class else {
            messages.push("Encountered end of input without a class declaration!".to_string());
            return Err(self.structural_error(start, messages));
        };
        if !messages.is_empty() {
            return Err(self.structural_error(start, messages));
        }

        let attached = class
            .set_package(package)
            .and_then(|_| class.set_imports(imports))
            .and_then(|_| class.set_header_comments(header_comments))
            .and_then(|_| class.set_trailing_comments(trailing_comments));
        self.finish(Construct::CompilationUnit, start, Vec::new(), attached)?;
        Ok(class)
    }

    fn structural_error(&self, start: usize, messages: Vec<String>) -> JError {
        for message in &messages {
            warn!("{}: {message}", self.stream.name());
        }
        self.error(Construct::CompilationUnit, start, messages)
    }

    // === Declarations ===

    /// Reads the modifier run, then delegates on the token that follows it.
    /// Problems with the run itself are reported ahead of anything the
    /// delegated parse finds.
    fn declaration(&mut self, mut prefix: Prefix, inner: bool) -> Result<Declaration, JError> {
        let start = prefix.start;
        self.modifier_run(&mut prefix)?;

        let (_, mut messages) = Modifiers::collect(&prefix.modifiers);
        messages.append(&mut prefix.messages);
        let target = self.classify_target();
        trace!("declaration at token {} classified as {target:?}", self.position);
        let Some(target) = target else {
            messages.push("Failed to determine result type".to_string());
            return Err(self.error(Construct::Member, start, messages));
        };

        let result = match target {
            DeclarationKind::Class => self.class_rest(prefix, inner).map(Declaration::Class),
            DeclarationKind::Field => self.field_rest(prefix).map(Declaration::Field),
            DeclarationKind::Method => self.method_rest(prefix).map(Declaration::Method),
        };
        match result {
            Err(JError::Parse(err)) => Err(err.merged_after(&messages).into()),
            Ok(_) if !messages.is_empty() => {
                let construct = match target {
                    DeclarationKind::Class => Construct::Class,
                    DeclarationKind::Field => Construct::Field,
                    DeclarationKind::Method => Construct::Method,
                };
                Err(self.error(construct, start, messages))
            }
            other => other,
        }
    }

    fn modifier_run(&mut self, prefix: &mut Prefix) -> Result<(), JError> {
        loop {
            self.skip_whitespace();
            let token = self.current();
            match token.ttype {
                TokenType::LineComment | TokenType::BlockComment => {
                    let comment = self.comment()?;
                    if prefix.section_comment.is_none() {
                        prefix.section_comment = Some(comment);
                    } else {
                        prefix.messages.push(format!(
                            "Found a second comment before a single declaration: {comment}"
                        ));
                    }
                }
                TokenType::At => prefix.annotations.push(self.annotation()?),
                TokenType::Keyword(keyword) => match keyword.modifier() {
                    Some(Modifier::Static) if self.peek_significant(1).ttype == TokenType::LBrace => {
                        break
                    }
                    Some(modifier) => {
                        prefix.modifiers.push(modifier);
                        self.advance();
                    }
                    None => break,
                },
                _ => break,
            }
        }
        Ok(())
    }

    fn classify_target(&self) -> Option<DeclarationKind> {
        let first = self.peek_significant(0);
        match first.ttype {
            TokenType::Keyword(Keyword::Class | Keyword::Interface) => Some(DeclarationKind::Class),
            TokenType::Identifier(_) | TokenType::Lt => {
                classify_declaration(self.tokens, self.significant_index(0))
            }
            TokenType::Keyword(keyword) if keyword.is_type_keyword() => {
                classify_declaration(self.tokens, self.significant_index(0))
            }
            _ => None,
        }
    }

    /// Section comment and Javadoc in front of a standalone declaration.
    fn prefix(&mut self) -> Result<Prefix, JError> {
        self.skip_whitespace();
        let mut prefix = Prefix::empty(self.position);
        if matches!(
            self.current().ttype,
            TokenType::LineComment | TokenType::BlockComment
        ) {
            prefix.section_comment = Some(self.comment()?);
            self.skip_whitespace();
        }
        if self.check(&TokenType::DocComment) {
            prefix.javadoc = Some(self.javadoc()?);
        }
        Ok(prefix)
    }

    /// Whether the token at `index` (after a comment) starts a declaration on
    /// the very next line, making the comment belong to it.
    fn precedes_declaration_at(&self, index: usize, in_body: bool) -> bool {
        let mut index = index;
        if let Some(token) = self.tokens.get(index) {
            if token.is_whitespace() {
                if token.lexeme.matches('\n').count() > 1 {
                    return false;
                }
                index += 1;
            }
        }
        let Some(next) = self.tokens.get(index) else {
            return false;
        };
        match next.ttype {
            TokenType::DocComment | TokenType::At => true,
            TokenType::Keyword(keyword) => {
                keyword.modifier().is_some()
                    || matches!(keyword, Keyword::Class | Keyword::Interface)
                    || (in_body && keyword.is_type_keyword())
            }
            TokenType::Identifier(_) | TokenType::Lt => in_body,
            _ => false,
        }
    }

    // === Classes ===

    ///    ClassDeclaration ::= ( "class" | "interface" ) Identifier [ TypeParameters ]
    ///                         { "extends" TypeList | "implements" TypeList } ClassBody
    fn class_rest(&mut self, prefix: Prefix, inner: bool) -> Result<ClassNode, JError> {
        let start = prefix.start;
        let class_kind = match self.bump().keyword() {
            Some(Keyword::Interface) => ClassKind::Interface,
            _ => ClassKind::Class,
        };
        let name = self.expect_identifier(Construct::Class, start, "a class name")?;
        debug!("parsing {} {name}", class_kind.as_str());
        let type_parameters = if self.peek_significant(0).ttype == TokenType::Lt {
            Some(join_tokens(self.angle_group(Construct::Class, start)?))
        } else {
            None
        };

        let mut messages = Vec::new();
        let mut super_class: Option<String> = None;
        let mut interfaces = Vec::new();
        let mut items = Vec::new();
        let mut state = ClassState::BeforeBody;

        while state != ClassState::Done {
            match state {
                ClassState::BeforeBody => {
                    self.skip_trivia();
                    match self.current().ttype {
                        TokenType::Keyword(Keyword::Extends) => {
                            self.advance();
                            let types = self.type_list(Construct::Class, start)?;
                            match class_kind {
                                ClassKind::Interface => interfaces.extend(types),
                                ClassKind::Class => {
                                    if super_class.is_some() || types.len() > 1 {
                                        messages.push(
                                            "Classes can only extend a single superclass!"
                                                .to_string(),
                                        );
                                    }
                                    if super_class.is_none() {
                                        super_class = types.into_iter().next();
                                    }
                                }
                            }
                        }
                        TokenType::Keyword(Keyword::Implements) => {
                            self.advance();
                            if class_kind == ClassKind::Interface {
                                messages.push(
                                    "Interfaces extend other interfaces instead of implementing them!"
                                        .to_string(),
                                );
                            }
                            interfaces.extend(self.type_list(Construct::Class, start)?);
                        }
                        TokenType::LBrace => {
                            self.advance();
                            state = ClassState::InBody;
                        }
                        _ => {
                            return Err(self.unexpected(
                                Construct::Class,
                                start,
                                &format!("'{{' to open the body of '{name}'"),
                            ))
                        }
                    }
                }
                ClassState::InBody => match self.body_item(&name, start)? {
                    Some(item) => items.push(item),
                    None => state = ClassState::Done,
                },
                ClassState::Done => {}
            }
        }

        let (members, attach_messages) = attach_pending(items);
        messages.extend(attach_messages);

        let mut builder = ClassBuilder::new()
            .kind(class_kind)
            .name(name)
            .inner(inner);
        if let Some(type_parameters) = type_parameters {
            builder = builder.type_parameters(type_parameters);
        }
        if let Some(super_class) = super_class {
            builder = builder.super_class(super_class);
        }
        for interface in interfaces {
            builder = builder.interface_name(interface);
        }
        for member in members {
            builder = builder.member(member);
        }
        let builder = with_prefix!(builder, prefix);
        self.finish(Construct::Class, start, messages, builder.build())
    }

    /// The next entry of a class body, or `None` once the closing brace is
    /// consumed.
    fn body_item(&mut self, class_name: &str, start: usize) -> Result<Option<BodyItem>, JError> {
        loop {
            self.skip_whitespace();
            let token = self.current();
            let item = match token.ttype {
                TokenType::RBrace => {
                    self.advance();
                    return Ok(None);
                }
                TokenType::Eof => {
                    return Err(self.error(
                        Construct::Class,
                        start,
                        vec![format!(
                            "Reached end of input before the end of class '{class_name}'"
                        )],
                    ))
                }
                TokenType::Semicolon => {
                    self.advance();
                    continue;
                }
                TokenType::DocComment => BodyItem::Javadoc(self.javadoc()?),
                TokenType::LineComment | TokenType::BlockComment => {
                    let attaches = self.precedes_declaration_at(self.position + 1, true);
                    let comment = self.comment()?;
                    if attaches {
                        BodyItem::SectionComment(comment)
                    } else {
                        BodyItem::Member(Member::Comment(comment))
                    }
                }
                TokenType::At => BodyItem::Annotation(self.annotation()?),
                _ if self.at_static_block() => {
                    BodyItem::Member(Member::StaticBlock(self.static_block()?))
                }
                _ => BodyItem::Member(self.declaration(Prefix::empty(self.position), true)?.into()),
            };
            return Ok(Some(item));
        }
    }

    fn at_static_block(&self) -> bool {
        self.peek_significant(0).keyword() == Some(Keyword::Static)
            && self.peek_significant(1).ttype == TokenType::LBrace
    }

    // === Members ===

    ///    Field ::= Type Identifier { "[" "]" } [ "=" Value ] ";"
    fn field_rest(&mut self, prefix: Prefix) -> Result<FieldNode, JError> {
        let start = prefix.start;
        let mut field_type = self.parse_type(Construct::Field, start)?;
        let name = self.expect_identifier(Construct::Field, start, "a field name")?;
        field_type.push_str(&self.array_dims());

        let mut builder = FieldBuilder::new().field_type(field_type).name(name.as_str());
        self.skip_trivia();
        match self.current().ttype {
            TokenType::Semicolon => self.advance(),
            TokenType::Equals => {
                self.advance();
                builder = builder.value(self.field_value(start)?);
            }
            TokenType::Comma => {
                return Err(self.error(
                    Construct::Field,
                    start,
                    vec!["Multiple field declarators are not supported!".to_string()],
                ))
            }
            _ => {
                return Err(self.unexpected(
                    Construct::Field,
                    start,
                    &format!("';' after field '{name}'"),
                ))
            }
        }
        let builder = with_prefix!(builder, prefix);
        self.finish(Construct::Field, start, Vec::new(), builder.build())
    }

    /// Raw initializer text up to the terminating `;`, which is consumed.
    fn field_value(&mut self, start: usize) -> Result<String, JError> {
        let from = self.position;
        let mut depth = 0usize;
        loop {
            let token = self.current();
            match token.ttype {
                TokenType::LParen | TokenType::LBrace | TokenType::LBracket => depth += 1,
                TokenType::RParen | TokenType::RBracket if depth > 0 => depth -= 1,
                TokenType::RBrace if depth > 0 => depth -= 1,
                TokenType::Semicolon if depth == 0 => break,
                TokenType::Comma if depth == 0 => {
                    return Err(self.error(
                        Construct::Field,
                        start,
                        vec!["Multiple field declarators are not supported!".to_string()],
                    ))
                }
                TokenType::Eof | TokenType::RBrace => {
                    return Err(self.unexpected(
                        Construct::Field,
                        start,
                        "';' to end the field initializer",
                    ))
                }
                _ => {}
            }
            self.advance();
        }
        let raw = self.slice(from, self.position);
        self.advance();
        Ok(raw)
    }

    ///    Method ::= [ TypeParameters ] ( Type Identifier | Identifier ) Parameters
    ///               [ "throws" TypeList ] ( Block | ";" )
    fn method_rest(&mut self, prefix: Prefix) -> Result<MethodNode, JError> {
        let start = prefix.start;
        let mut builder = MethodBuilder::new();
        if self.peek_significant(0).ttype == TokenType::Lt {
            builder = builder.type_parameters(join_tokens(self.angle_group(Construct::Method, start)?));
        }

        let is_constructor = matches!(self.peek_significant(0).ttype, TokenType::Identifier(_))
            && self.peek_significant(1).ttype == TokenType::LParen;
        builder = if is_constructor {
            builder.constructor()
        } else {
            builder.return_type(self.parse_type(Construct::Method, start)?)
        };
        let name = self.expect_identifier(Construct::Method, start, "a method name")?;
        builder = builder.name(name.as_str());

        for parameter in self.parameters(start)? {
            builder = builder.parameter(parameter);
        }
        if self.peek_significant(0).keyword() == Some(Keyword::Throws) {
            self.bump();
            for exception in self.type_list(Construct::Method, start)? {
                builder = builder.throws(exception);
            }
        }

        self.skip_trivia();
        builder = match self.current().ttype {
            TokenType::LBrace => {
                let raw = self.block_text(Construct::Method, start)?;
                builder.body(normalize_block(&raw))
            }
            TokenType::Semicolon => {
                self.advance();
                builder.without_body()
            }
            _ => {
                return Err(self.unexpected(
                    Construct::Method,
                    start,
                    &format!("'{{' or ';' after the declaration of '{name}'"),
                ))
            }
        };
        let builder = with_prefix!(builder, prefix);
        self.finish(Construct::Method, start, Vec::new(), builder.build())
    }

    ///    Parameters ::= "(" [ Parameter { "," Parameter } ] ")"
    ///    Parameter  ::= { Annotation | "final" } Type Identifier { "[" "]" }
    fn parameters(&mut self, start: usize) -> Result<Vec<Parameter>, JError> {
        self.expect(&TokenType::LParen, Construct::Method, start, "'('")?;
        let mut parameters = Vec::new();
        if self.match_token(&TokenType::RParen) {
            return Ok(parameters);
        }
        loop {
            let mut annotations = Vec::new();
            let mut is_final = false;
            loop {
                self.skip_trivia();
                match self.current().ttype {
                    TokenType::At => annotations.push(self.annotation()?),
                    TokenType::Keyword(Keyword::Final) => {
                        is_final = true;
                        self.advance();
                    }
                    _ => break,
                }
            }
            let mut param_type = self.parse_type(Construct::Method, start)?;
            let name = self.expect_identifier(Construct::Method, start, "a parameter name")?;
            param_type.push_str(&self.array_dims());
            parameters.push(Parameter {
                annotations,
                is_final,
                param_type,
                name,
            });
            if !self.match_token(&TokenType::Comma) {
                self.expect(&TokenType::RParen, Construct::Method, start, "',' or ')'")?;
                return Ok(parameters);
            }
        }
    }

    ///    StaticBlock ::= "static" Block
    fn static_block(&mut self) -> Result<StaticBlockNode, JError> {
        self.skip_whitespace();
        let start = self.position;
        self.expect(
            &TokenType::Keyword(Keyword::Static),
            Construct::StaticBlock,
            start,
            "'static'",
        )?;
        self.skip_trivia();
        if !self.check(&TokenType::LBrace) {
            return Err(self.unexpected(Construct::StaticBlock, start, "'{'"));
        }
        let raw = self.block_text(Construct::StaticBlock, start)?;
        let builder = normalize_block(&raw)
            .into_iter()
            .fold(StaticBlockBuilder::new(), StaticBlockBuilder::line);
        self.finish(Construct::StaticBlock, start, Vec::new(), builder.build())
    }

    // === Small constructs ===

    ///    Package ::= "package" QualifiedName ";"
    fn package(&mut self) -> Result<PackageNode, JError> {
        self.skip_whitespace();
        let start = self.position;
        self.expect(
            &TokenType::Keyword(Keyword::Package),
            Construct::Package,
            start,
            "'package'",
        )?;
        let name = self.qualified_name(Construct::Package, start, "a package name")?;
        self.expect(&TokenType::Semicolon, Construct::Package, start, "';'")?;
        self.finish(
            Construct::Package,
            start,
            Vec::new(),
            PackageBuilder::new().name(name).build(),
        )
    }

    ///    Import ::= "import" [ "static" ] QualifiedName [ "." "*" ] ";"
    fn import(&mut self) -> Result<ImportNode, JError> {
        self.skip_whitespace();
        let start = self.position;
        self.expect(
            &TokenType::Keyword(Keyword::Import),
            Construct::Import,
            start,
            "'import'",
        )?;
        let is_static = self.peek_significant(0).keyword() == Some(Keyword::Static);
        if is_static {
            self.bump();
        }
        let name = self.qualified_name(Construct::Import, start, "an import name")?;
        let is_wildcard = self.peek_significant(0).ttype == TokenType::Dot
            && self.peek_significant(1).ttype == TokenType::Operator("*".to_string());
        if is_wildcard {
            self.bump();
            self.bump();
        }
        self.expect(&TokenType::Semicolon, Construct::Import, start, "';'")?;
        let built = ImportBuilder::new()
            .name(name)
            .is_static(is_static)
            .wildcard(is_wildcard)
            .build();
        self.finish(Construct::Import, start, Vec::new(), built)
    }

    ///    Annotation ::= "@" QualifiedName [ "(" [ Param { "," Param } ] ")" ]
    ///    Param      ::= [ Identifier "=" ] Value
    fn annotation(&mut self) -> Result<AnnotationNode, JError> {
        self.skip_whitespace();
        let start = self.position;
        self.expect(&TokenType::At, Construct::Annotation, start, "'@'")?;
        if self.peek_significant(0).keyword() == Some(Keyword::Interface) {
            return Err(self.error(
                Construct::Annotation,
                start,
                vec!["Annotation type declarations are not supported".to_string()],
            ));
        }
        let name = self.qualified_name(Construct::Annotation, start, "an annotation name")?;
        let mut builder = AnnotationBuilder::new().name(name);

        if self.peek_significant(0).ttype == TokenType::LParen {
            self.bump();
            if !self.match_token(&TokenType::RParen) {
                loop {
                    let named = matches!(self.peek_significant(0).ttype, TokenType::Identifier(_))
                        && self.peek_significant(1).ttype == TokenType::Equals;
                    let param_name = if named {
                        let name = self.bump().lexeme.clone();
                        self.bump();
                        Some(name)
                    } else {
                        None
                    };
                    let value = self.annotation_value(start)?;
                    builder = match param_name {
                        Some(name) => builder.param(name, value),
                        None => builder.value(value),
                    };
                    match self.bump().ttype {
                        TokenType::Comma => continue,
                        TokenType::RParen => break,
                        _ => return Err(self.unexpected(Construct::Annotation, start, "',' or ')'")),
                    }
                }
            }
        }
        self.finish(Construct::Annotation, start, Vec::new(), builder.build())
    }

    /// Value tokens up to the `,` or `)` that ends them, not consumed.
    fn annotation_value(&mut self, start: usize) -> Result<String, JError> {
        self.skip_trivia();
        let from = self.position;
        let mut depth = 0usize;
        loop {
            match self.current().ttype {
                TokenType::LParen | TokenType::LBrace | TokenType::LBracket => depth += 1,
                TokenType::Comma | TokenType::RParen if depth == 0 => break,
                TokenType::RParen | TokenType::RBrace | TokenType::RBracket => {
                    depth = depth.saturating_sub(1)
                }
                TokenType::Eof => {
                    return Err(self.error(
                        Construct::Annotation,
                        start,
                        vec!["Unterminated annotation parameter list".to_string()],
                    ))
                }
                _ => {}
            }
            self.advance();
        }
        Ok(collapse_token_whitespace(&self.tokens[from..self.position]))
    }

    /// A `/** ... */` comment, split into description and block tags.
    fn javadoc(&mut self) -> Result<JavadocNode, JError> {
        self.skip_whitespace();
        let start = self.position;
        let token = self.current();
        if token.ttype != TokenType::DocComment {
            return Err(self.unexpected(Construct::Javadoc, start, "a Javadoc comment"));
        }
        self.advance();

        let body = token
            .lexeme
            .strip_prefix("/**")
            .and_then(|rest| rest.strip_suffix("*/"))
            .unwrap_or_default();
        let mut description = Vec::new();
        let mut tags: Vec<(String, String)> = Vec::new();
        for line in comment_lines(body) {
            let trimmed = line.trim_start();
            if let Some(rest) = trimmed.strip_prefix('@') {
                let (tag, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                tags.push((tag.to_string(), text.trim().to_string()));
            } else if let Some((_, text)) = tags.last_mut() {
                if !trimmed.is_empty() {
                    if !text.is_empty() {
                        text.push(' ');
                    }
                    text.push_str(trimmed);
                }
            } else {
                description.push(line);
            }
        }

        let mut messages = Vec::new();
        let mut seen: Vec<String> = Vec::new();
        let mut builder = description
            .into_iter()
            .fold(JavadocBuilder::new(), JavadocBuilder::description);
        for (tag, text) in tags {
            match tag.as_str() {
                "param" => {
                    let (name, rest) = text
                        .split_once(char::is_whitespace)
                        .unwrap_or((text.as_str(), ""));
                    if name.is_empty() {
                        messages.push("Missing parameter name in @param tag".to_string());
                    } else {
                        builder = builder.param(name, rest.trim());
                    }
                }
                "return" | "author" | "version" | "since" => {
                    if seen.contains(&tag) {
                        messages.push(format!("Found duplicate @{tag} tag"));
                        continue;
                    }
                    builder = match tag.as_str() {
                        "return" => builder.return_desc(text),
                        "author" => builder.author(text),
                        "version" => builder.version(text),
                        _ => builder.since(text),
                    };
                    seen.push(tag.clone());
                }
                _ => builder = builder.tag(tag, text),
            }
        }
        self.finish(Construct::Javadoc, start, messages, builder.build())
    }

    /// A line, block or doc-style comment.
    fn comment(&mut self) -> Result<CommentNode, JError> {
        self.skip_whitespace();
        let start = self.position;
        let token = self.current();
        let builder = match token.ttype {
            TokenType::LineComment => CommentBuilder::line()
                .text(token.lexeme.strip_prefix("//").unwrap_or(&token.lexeme)),
            TokenType::BlockComment => {
                let body = token
                    .lexeme
                    .strip_prefix("/*")
                    .and_then(|rest| rest.strip_suffix("*/"))
                    .unwrap_or_default();
                CommentBuilder::block().text(comment_lines(body).join("\n"))
            }
            TokenType::DocComment => {
                let body = token
                    .lexeme
                    .strip_prefix("/**")
                    .and_then(|rest| rest.strip_suffix("*/"))
                    .unwrap_or_default();
                CommentBuilder::doc().text(comment_lines(body).join("\n"))
            }
            _ => return Err(self.unexpected(Construct::Comment, start, "a comment")),
        };
        self.advance();
        self.finish(Construct::Comment, start, Vec::new(), builder.build())
    }

    // === Types and names ===

    ///    Type ::= ( Identifier | Primitive ) { "." Identifier | TypeArguments | "[" "]" } [ "..." ]
    fn parse_type(&mut self, construct: Construct, start: usize) -> Result<String, JError> {
        self.skip_trivia();
        let first = self.current();
        let starts_type = matches!(first.ttype, TokenType::Identifier(_))
            || first.keyword().is_some_and(Keyword::is_type_keyword);
        if !starts_type {
            return Err(self.unexpected(construct, start, "a type"));
        }
        let mut parts = vec![self.bump()];
        loop {
            let next = self.peek_significant(0);
            match next.ttype {
                TokenType::Dot
                    if matches!(self.peek_significant(1).ttype, TokenType::Identifier(_)) =>
                {
                    parts.push(self.bump());
                    parts.push(self.bump());
                }
                TokenType::Lt => parts.extend(self.angle_group(construct, start)?),
                TokenType::LBracket if self.peek_significant(1).ttype == TokenType::RBracket => {
                    parts.push(self.bump());
                    parts.push(self.bump());
                }
                TokenType::Ellipsis => {
                    parts.push(self.bump());
                    break;
                }
                _ => break,
            }
        }
        Ok(join_tokens(parts))
    }

    fn type_list(&mut self, construct: Construct, start: usize) -> Result<Vec<String>, JError> {
        let mut types = vec![self.parse_type(construct, start)?];
        while self.match_token(&TokenType::Comma) {
            types.push(self.parse_type(construct, start)?);
        }
        Ok(types)
    }

    /// A balanced `<...>` group, brackets included.
    fn angle_group(&mut self, construct: Construct, start: usize) -> Result<Vec<&'t Token>, JError> {
        let mut group = Vec::new();
        let mut depth = 0usize;
        loop {
            let token = self.bump();
            match token.ttype {
                TokenType::Lt => depth += 1,
                TokenType::Gt => depth = depth.saturating_sub(1),
                TokenType::LBrace
                | TokenType::RBrace
                | TokenType::LParen
                | TokenType::RParen
                | TokenType::Semicolon
                | TokenType::Equals
                | TokenType::Eof => {
                    return Err(self.error(
                        construct,
                        start,
                        vec!["Unbalanced '<' in type".to_string()],
                    ))
                }
                _ => {}
            }
            group.push(token);
            if depth == 0 {
                return Ok(group);
            }
        }
    }

    /// Trailing `[]` pairs written after a name.
    fn array_dims(&mut self) -> String {
        let mut dims = String::new();
        while self.peek_significant(0).ttype == TokenType::LBracket
            && self.peek_significant(1).ttype == TokenType::RBracket
        {
            self.bump();
            self.bump();
            dims.push_str("[]");
        }
        dims
    }

    fn qualified_name(&mut self, construct: Construct, start: usize, what: &str) -> Result<String, JError> {
        let mut name = self.expect_identifier(construct, start, what)?;
        while self.peek_significant(0).ttype == TokenType::Dot
            && matches!(self.peek_significant(1).ttype, TokenType::Identifier(_))
        {
            self.bump();
            name.push('.');
            name.push_str(&self.bump().lexeme);
        }
        Ok(name)
    }

    /// The raw text between a `{` at the current position and its matching
    /// `}`. Both braces are consumed.
    fn block_text(&mut self, construct: Construct, start: usize) -> Result<String, JError> {
        let open = self.position;
        self.advance();
        let mut depth = 1usize;
        loop {
            match self.current().ttype {
                TokenType::LBrace => depth += 1,
                TokenType::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                TokenType::Eof => {
                    return Err(self.error(
                        construct,
                        start,
                        vec!["Reached end of input inside a block".to_string()],
                    ))
                }
                _ => {}
            }
            self.advance();
        }
        let raw = self.slice(open + 1, self.position);
        self.advance();
        Ok(raw)
    }

    /// Source text from the start of token `from` to the start of token `to`.
    fn slice(&self, from: usize, to: usize) -> String {
        let begin = self.tokens.get(from).map_or(0, |t| t.pos_start);
        let end = self.tokens.get(to).map_or(begin, |t| t.pos_start);
        self.stream.text().get(begin..end).unwrap_or_default().to_string()
    }

    // === Helper Methods ===

    fn current(&self) -> &'t Token {
        self.tokens.get(self.position).unwrap_or(&END)
    }

    fn advance(&mut self) {
        if self.current().ttype != TokenType::Eof {
            self.position += 1;
        }
    }

    /// The next significant token, consumed.
    fn bump(&mut self) -> &'t Token {
        self.skip_trivia();
        let token = self.current();
        self.advance();
        token
    }

    fn skip_whitespace(&mut self) {
        while self.current().is_whitespace() {
            self.advance();
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().is_trivia() {
            if !self.current().is_whitespace() {
                self.skipped_comments.push(self.position);
            }
            self.advance();
        }
    }

    /// One message per comment skipped at or after token `start`.
    fn take_skipped_comments(&mut self, construct: Construct, start: usize) -> Vec<String> {
        let (inside, before): (Vec<usize>, Vec<usize>) = std::mem::take(&mut self.skipped_comments)
            .into_iter()
            .partition(|&index| index >= start);
        self.skipped_comments = before;
        inside
            .into_iter()
            .filter_map(|index| self.tokens.get(index))
            .map(|token| {
                format!(
                    "Found comment inside {construct} with nowhere to keep it: {}",
                    token.lexeme.trim()
                )
            })
            .collect()
    }

    fn significant_index(&self, n: usize) -> usize {
        let mut index = self.position;
        let mut remaining = n;
        while let Some(token) = self.tokens.get(index) {
            if !token.is_trivia() {
                if remaining == 0 || token.ttype == TokenType::Eof {
                    break;
                }
                remaining -= 1;
            }
            index += 1;
        }
        index
    }

    fn peek_significant(&self, n: usize) -> &'t Token {
        self.tokens.get(self.significant_index(n)).unwrap_or(&END)
    }

    fn check(&self, ttype: &TokenType) -> bool {
        &self.current().ttype == ttype
    }

    fn match_token(&mut self, ttype: &TokenType) -> bool {
        self.skip_trivia();
        if self.check(ttype) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(
        &mut self,
        ttype: &TokenType,
        construct: Construct,
        start: usize,
        what: &str,
    ) -> Result<&'t Token, JError> {
        self.skip_trivia();
        let token = self.current();
        if &token.ttype == ttype {
            self.advance();
            Ok(token)
        } else {
            Err(self.unexpected(construct, start, what))
        }
    }

    fn expect_identifier(&mut self, construct: Construct, start: usize, what: &str) -> Result<String, JError> {
        self.skip_trivia();
        match &self.current().ttype {
            TokenType::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(construct, start, what)),
        }
    }

    fn unexpected(&self, construct: Construct, start: usize, expected: &str) -> JError {
        let found = describe(self.current());
        self.error(construct, start, vec![format!("Expected {expected}, found {found}")])
    }

    /// Combines messages found while parsing with whatever the builder
    /// rejects. Builder lines the parser already reported are dropped.
    fn finish<T>(
        &mut self,
        construct: Construct,
        start: usize,
        mut messages: Vec<String>,
        built: Result<T, BuildError>,
    ) -> Result<T, JError> {
        messages.extend(self.take_skipped_comments(construct, start));
        match built {
            Ok(node) if messages.is_empty() => Ok(node),
            Ok(_) => Err(self.error(construct, start, messages)),
            Err(err) => {
                let parsed = messages.len();
                for message in err.messages {
                    if !messages[..parsed].contains(&message) {
                        messages.push(message);
                    }
                }
                Err(self.error(construct, start, messages))
            }
        }
    }

    fn error(&self, construct: Construct, start: usize, messages: Vec<String>) -> JError {
        let begin = self.tokens.get(start).map_or(0, |t| t.pos_start);
        let end = self.current().pos_end.max(begin);
        let (line, column) = get_line_and_column(self.stream.text(), begin);
        debug!(
            "failed to parse {construct} at {}:{line}:{column}: {}",
            self.stream.name(),
            messages.join(" | ")
        );
        ParseError {
            construct,
            messages,
            src: (*self.stream.source).clone(),
            span: (begin, end - begin).into(),
        }
        .into()
    }
}

// === Parse implementations ===

impl Parse for PackageNode {
    const CONSTRUCT: Construct = Construct::Package;

    fn parse_with(parser: &mut Parser<'_>) -> Result<Self, JError> {
        parser.package()
    }
}

impl Parse for ImportNode {
    const CONSTRUCT: Construct = Construct::Import;

    fn parse_with(parser: &mut Parser<'_>) -> Result<Self, JError> {
        parser.import()
    }
}

impl Parse for AnnotationNode {
    const CONSTRUCT: Construct = Construct::Annotation;

    fn parse_with(parser: &mut Parser<'_>) -> Result<Self, JError> {
        parser.annotation()
    }
}

impl Parse for JavadocNode {
    const CONSTRUCT: Construct = Construct::Javadoc;

    fn parse_with(parser: &mut Parser<'_>) -> Result<Self, JError> {
        parser.javadoc()
    }
}

impl Parse for CommentNode {
    const CONSTRUCT: Construct = Construct::Comment;

    fn parse_with(parser: &mut Parser<'_>) -> Result<Self, JError> {
        parser.comment()
    }
}

impl Parse for StaticBlockNode {
    const CONSTRUCT: Construct = Construct::StaticBlock;

    fn parse_with(parser: &mut Parser<'_>) -> Result<Self, JError> {
        parser.static_block()
    }
}

impl Parse for FieldNode {
    const CONSTRUCT: Construct = Construct::Field;

    fn parse_with(parser: &mut Parser<'_>) -> Result<Self, JError> {
        let prefix = parser.prefix()?;
        let start = prefix.start;
        match parser.declaration(prefix, true)? {
            Declaration::Field(node) => Ok(node),
            other => Err(parser.error(
                Construct::Field,
                start,
                vec![format!("Expected a field declaration, found a {}", other.kind())],
            )),
        }
    }
}

impl Parse for MethodNode {
    const CONSTRUCT: Construct = Construct::Method;

    fn parse_with(parser: &mut Parser<'_>) -> Result<Self, JError> {
        let prefix = parser.prefix()?;
        let start = prefix.start;
        match parser.declaration(prefix, true)? {
            Declaration::Method(node) => Ok(node),
            other => Err(parser.error(
                Construct::Method,
                start,
                vec![format!("Expected a method declaration, found a {}", other.kind())],
            )),
        }
    }
}

/// A whole compilation unit: the outer class with its package, imports and
/// file comments.
impl Parse for ClassNode {
    const CONSTRUCT: Construct = Construct::CompilationUnit;

    fn parse_with(parser: &mut Parser<'_>) -> Result<Self, JError> {
        parser.compilation_unit()
    }
}

impl Parse for Member {
    const CONSTRUCT: Construct = Construct::Member;

    fn parse_with(parser: &mut Parser<'_>) -> Result<Self, JError> {
        parser.skip_whitespace();
        if parser.at_static_block() {
            return parser.static_block().map(Member::StaticBlock);
        }
        let is_comment = matches!(
            parser.current().ttype,
            TokenType::LineComment | TokenType::BlockComment
        );
        if is_comment && !parser.precedes_declaration_at(parser.position + 1, true) {
            return parser.comment().map(Member::Comment);
        }
        let prefix = parser.prefix()?;
        parser.declaration(prefix, true).map(Member::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_err<T: Parse + fmt::Debug>(source: &str) -> ParseError {
        match parse_str::<T>(source) {
            Err(JError::Parse(err)) => err,
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_field_and_method_from_same_entry_point() {
        let tokens = TokenStream::new("int x;").unwrap();
        let (member, next) = parse_member(&tokens, 0).unwrap();
        assert!(matches!(member, Member::Field(_)));
        assert_eq!(member.to_string(), "int x;");
        assert_eq!(next, tokens.len() - 1);

        let tokens = TokenStream::new("int getX(){ return x; }").unwrap();
        let (member, _) = parse_member(&tokens, 0).unwrap();
        assert!(matches!(member, Member::Method(_)));
        assert_eq!(member.to_string(), "int getX() {\n    return x;\n}");
    }

    #[test]
    fn test_classify_declaration_skips_generics() {
        let tokens = TokenStream::new("Map<String, List<Integer>> values = new HashMap<>();").unwrap();
        assert_eq!(
            classify_declaration(tokens.tokens(), 0),
            Some(DeclarationKind::Field)
        );
        let tokens = TokenStream::new("<T> List<T> copy(List<T> source);").unwrap();
        assert_eq!(
            classify_declaration(tokens.tokens(), 0),
            Some(DeclarationKind::Method)
        );
        let tokens = TokenStream::new("int x }").unwrap();
        assert_eq!(classify_declaration(tokens.tokens(), 0), None);
    }

    #[test]
    fn test_duplicate_modifiers_reported_in_order() {
        let err = parse_err::<ClassNode>("static static final final class Test{ }");
        assert_eq!(
            err.messages,
            vec![
                "Found duplicate modifier: static",
                "Found duplicate modifier: final",
            ]
        );
    }

    #[test]
    fn test_multiple_visibility_modifiers() {
        let err = parse_err::<ClassNode>("private public class Test{ }");
        assert_eq!(
            err.messages,
            vec!["Found multiple visibility modifiers: private, public"]
        );
    }

    #[test]
    fn test_unknown_declaration_reports_every_problem() {
        let tokens = TokenStream::new("public public 42;").unwrap();
        let err = match parse_member(&tokens, 0) {
            Err(JError::Parse(err)) => err,
            other => panic!("expected a parse error, got {other:?}"),
        };
        assert_eq!(err.construct, Construct::Member);
        assert_eq!(
            err.messages,
            vec![
                "Found duplicate modifier: public",
                "Failed to determine result type",
            ]
        );
    }

    #[test]
    fn test_pending_javadoc_and_annotations_attach_to_next_member() {
        let source = "class A {\n    /** doc */\n    @Deprecated\n    int x;\n}";
        let class = parse_str::<ClassNode>(source).unwrap();
        let field = class.fields().next().unwrap();
        assert_eq!(field.javadoc().unwrap().to_string(), "/** doc */");
        assert_eq!(field.annotations().len(), 1);
        assert_eq!(class.to_string(), source);
    }

    #[test]
    fn test_dangling_javadoc_is_an_error() {
        let err = parse_err::<ClassNode>("class A {\n    int x;\n    /** dangling */\n}");
        assert_eq!(err.construct, Construct::Class);
        assert_eq!(
            err.messages,
            vec!["Found Javadoc-equivalent at end of class with nothing to attach it to!"]
        );
    }

    #[test]
    fn test_two_javadocs_before_one_member() {
        let err = parse_err::<ClassNode>("class A {\n    /** a */\n    /** b */\n    int x;\n}");
        assert_eq!(
            err.messages,
            vec!["Found two Javadoc-equivalents before a single member!"]
        );
    }

    #[test]
    fn test_annotation_before_static_block() {
        let err = parse_err::<ClassNode>("class A {\n    @Foo\n    static {\n        x = 1;\n    }\n}");
        assert_eq!(
            err.messages,
            vec!["Cannot attach annotations to a static block!"]
        );
    }

    #[test]
    fn test_javadoc_tags() {
        let source = "/**\n * Adds two numbers.\n *\n * @param a the first\n * @param b the second\n * @return the sum\n */";
        let doc = parse_str::<JavadocNode>(source).unwrap();
        assert_eq!(doc.description(), ["Adds two numbers."]);
        assert_eq!(doc.params().len(), 2);
        assert_eq!(doc.return_desc(), Some("the sum"));
        assert_eq!(doc.to_string(), source);
    }

    #[test]
    fn test_duplicate_javadoc_tags() {
        let err = parse_err::<JavadocNode>("/**\n * @return a\n * @return b\n * @since 1\n * @since 2\n */");
        assert_eq!(
            err.messages,
            vec!["Found duplicate @return tag", "Found duplicate @since tag"]
        );
    }

    #[test]
    fn test_annotation_params() {
        let annotation =
            parse_str::<AnnotationNode>("@SuppressWarnings(value = {\"a\",  \"b\"}, since=\"1\")").unwrap();
        assert_eq!(annotation.params().len(), 2);
        assert_eq!(
            annotation.to_string(),
            "@SuppressWarnings(value = {\"a\", \"b\"}, since = \"1\")"
        );
        let single = parse_str::<AnnotationNode>("@Named(\"x\")").unwrap();
        assert_eq!(single.params()[0].name, None);
    }

    #[test]
    fn test_field_initializer_and_multiple_declarators() {
        let field = parse_str::<FieldNode>("private static final int MAX = 10 * 2;").unwrap();
        assert_eq!(field.value(), Some("10 * 2"));
        let err = parse_err::<FieldNode>("int a = 1, b = 2;");
        assert_eq!(
            err.messages,
            vec!["Multiple field declarators are not supported!"]
        );
    }

    #[test]
    fn test_trailing_input_rejected() {
        let err = parse_err::<PackageNode>("package a.b; extra");
        assert_eq!(
            err.messages,
            vec!["Unexpected input after package declaration: 'extra'"]
        );
    }
}
