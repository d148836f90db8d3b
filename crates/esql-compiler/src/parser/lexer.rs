//! Scanner for the query language.
//!
//! Logos recognizes raw tokens; the [`Scanner`] classifies words into
//! keywords or identifiers, skips trivia, and keeps the position cursor the
//! session reads when it reports errors.
//!
//! Words are keywords only where a keyword can appear: right after `.` a
//! word is always a member name, so `c.Select` is an identifier.

use std::ops::Range;

use logos::Logos;

use super::ast::{Identifier, Literal, LiteralKind, Node, NodeKind};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum RawKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token(";")]
    Semicolon,

    #[token("=")]
    Equal,

    #[token("<>")]
    #[token("!=")]
    NotEqual,

    #[token("<")]
    Less,

    #[token("<=")]
    LessEqual,

    #[token(">")]
    Greater,

    #[token(">=")]
    GreaterEqual,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]+")]
    Decimal,

    /// Single-quoted, `''` escapes a quote.
    #[regex(r"'(?:[^']|'')*'")]
    StringLiteral,

    #[regex(r"@[A-Za-z_][A-Za-z0-9_]*")]
    Parameter,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    /// `[name]`, lets keywords be used as names.
    #[regex(r"\[[^\]\r\n]+\]")]
    EscapedIdentifier,

    #[regex(r"[ \t\r\f]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"--[^\n]*", allow_greedy = true)]
    LineComment,
}

impl RawKind {
    fn is_trivia(self) -> bool {
        matches!(
            self,
            RawKind::Whitespace | RawKind::Newline | RawKind::LineComment
        )
    }
}

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// Reserved keywords. Matching is case-insensitive.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant,)*];

            /// Canonical (upper-case) spelling.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text,)*
                }
            }
        }
    };
}

keywords! {
    All => "ALL",
    And => "AND",
    AnyElement => "ANYELEMENT",
    Apply => "APPLY",
    As => "AS",
    Asc => "ASC",
    Between => "BETWEEN",
    By => "BY",
    Case => "CASE",
    Cast => "CAST",
    Collate => "COLLATE",
    Collection => "COLLECTION",
    Cross => "CROSS",
    CreateRef => "CREATEREF",
    Deref => "DEREF",
    Desc => "DESC",
    Distinct => "DISTINCT",
    Element => "ELEMENT",
    Else => "ELSE",
    End => "END",
    Escape => "ESCAPE",
    Except => "EXCEPT",
    Exists => "EXISTS",
    False => "FALSE",
    Flatten => "FLATTEN",
    From => "FROM",
    Full => "FULL",
    Function => "FUNCTION",
    Group => "GROUP",
    GroupPartition => "GROUPPARTITION",
    Having => "HAVING",
    In => "IN",
    Inner => "INNER",
    Intersect => "INTERSECT",
    Is => "IS",
    Join => "JOIN",
    Key => "KEY",
    Left => "LEFT",
    Like => "LIKE",
    Limit => "LIMIT",
    Multiset => "MULTISET",
    Navigate => "NAVIGATE",
    Not => "NOT",
    Null => "NULL",
    Of => "OF",
    OfType => "OFTYPE",
    On => "ON",
    Or => "OR",
    Order => "ORDER",
    Outer => "OUTER",
    Overlaps => "OVERLAPS",
    Ref => "REF",
    Relationship => "RELATIONSHIP",
    Right => "RIGHT",
    Row => "ROW",
    Select => "SELECT",
    Set => "SET",
    Skip => "SKIP",
    Then => "THEN",
    Top => "TOP",
    Treat => "TREAT",
    True => "TRUE",
    Union => "UNION",
    Using => "USING",
    Value => "VALUE",
    When => "WHEN",
    Where => "WHERE",
    With => "WITH",
}

impl Keyword {
    pub fn from_word(word: &str) -> Option<Keyword> {
        Self::ALL
            .iter()
            .copied()
            .find(|kw| kw.as_str().eq_ignore_ascii_case(word))
    }
}

/// Whether `term` spells a reserved keyword, in any case.
pub fn is_reserved_keyword(term: &str) -> bool {
    Keyword::from_word(term).is_some()
}

/// Token identifiers handed to the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenId {
    Keyword(Keyword),
    Identifier,
    Literal,
    Parameter,
    ParenOpen,
    ParenClose,
    BraceOpen,
    BraceClose,
    Comma,
    Dot,
    Semicolon,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// Sentinel returned once input is exhausted.
    EndOfInput,
}

/// Keyword or punctuation as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalToken {
    pub text: String,
    pub position: usize,
}

/// Value the grammar receives with a token.
///
/// Identifiers, literals and parameters arrive as AST nodes; everything else
/// as a bare terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticValue {
    Terminal(TerminalToken),
    Node(Node),
}

impl SemanticValue {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            SemanticValue::Node(node) => Some(node),
            SemanticValue::Terminal(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub id: TokenId,
    pub value: SemanticValue,
    /// Byte offset of the first character.
    pub start: usize,
}

impl Token {
    pub(crate) fn end_of_input(position: usize) -> Self {
        Self {
            id: TokenId::EndOfInput,
            value: SemanticValue::Terminal(TerminalToken {
                text: String::new(),
                position,
            }),
            start: position,
        }
    }
}

/// Character sequence the scanner cannot classify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub position: usize,
    pub text: String,
}

pub struct Scanner<'q> {
    source: &'q str,
    lexer: logos::Lexer<'q, RawKind>,
    current: Option<Range<usize>>,
    position: usize,
    after_dot: bool,
}

impl<'q> Scanner<'q> {
    pub fn new(source: &'q str) -> Self {
        Self {
            source,
            lexer: RawKind::lexer(source),
            current: None,
            position: 0,
            after_dot: false,
        }
    }

    /// Next significant token, `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            let Some(result) = self.lexer.next() else {
                self.current = None;
                return Ok(None);
            };
            let span = self.lexer.span();
            let kind = match result {
                Ok(kind) => kind,
                Err(()) => {
                    self.current = Some(span.clone());
                    return Err(LexError {
                        position: span.start,
                        text: self.source[span].to_string(),
                    });
                }
            };
            if kind.is_trivia() {
                continue;
            }

            let token = self.classify(kind, span.clone());
            self.current = Some(span);
            self.after_dot = kind == RawKind::Dot;
            return Ok(Some(token));
        }
    }

    /// Moves the cursor past the current token.
    pub fn advance_position(&mut self) {
        if let Some(span) = &self.current {
            self.position = span.end;
        }
    }

    /// Cursor: end offset of the last token handed to the grammar.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Raw text of the current token, empty at end of input.
    pub fn text(&self) -> &'q str {
        let source = self.source;
        self.current.clone().map_or("", |span| &source[span])
    }

    fn classify(&self, kind: RawKind, span: Range<usize>) -> Token {
        let start = span.start;
        let text = &self.source[span];
        let node = |kind: NodeKind| SemanticValue::Node(Node::new(kind));

        let (id, value) = match kind {
            RawKind::Word => match Keyword::from_word(text).filter(|_| !self.after_dot) {
                Some(kw) => (TokenId::Keyword(kw), terminal(text, start)),
                None => (
                    TokenId::Identifier,
                    node(NodeKind::Identifier(Identifier {
                        name: text.to_string(),
                        escaped: false,
                    })),
                ),
            },
            RawKind::EscapedIdentifier => (
                TokenId::Identifier,
                node(NodeKind::Identifier(Identifier {
                    name: text[1..text.len() - 1].to_string(),
                    escaped: true,
                })),
            ),
            RawKind::Integer => (TokenId::Literal, node(literal(LiteralKind::Integer, text))),
            RawKind::Decimal => (TokenId::Literal, node(literal(LiteralKind::Decimal, text))),
            RawKind::StringLiteral => (TokenId::Literal, node(literal(LiteralKind::String, text))),
            RawKind::Parameter => (
                TokenId::Parameter,
                node(NodeKind::Parameter(text[1..].to_string())),
            ),
            punct => (punctuation(punct), terminal(text, start)),
        };

        Token { id, value, start }
    }
}

fn terminal(text: &str, position: usize) -> SemanticValue {
    SemanticValue::Terminal(TerminalToken {
        text: text.to_string(),
        position,
    })
}

fn literal(kind: LiteralKind, text: &str) -> NodeKind {
    NodeKind::Literal(Literal {
        kind,
        text: text.to_string(),
    })
}

fn punctuation(kind: RawKind) -> TokenId {
    match kind {
        RawKind::ParenOpen => TokenId::ParenOpen,
        RawKind::ParenClose => TokenId::ParenClose,
        RawKind::BraceOpen => TokenId::BraceOpen,
        RawKind::BraceClose => TokenId::BraceClose,
        RawKind::Comma => TokenId::Comma,
        RawKind::Dot => TokenId::Dot,
        RawKind::Semicolon => TokenId::Semicolon,
        RawKind::Equal => TokenId::Equal,
        RawKind::NotEqual => TokenId::NotEqual,
        RawKind::Less => TokenId::Less,
        RawKind::LessEqual => TokenId::LessEqual,
        RawKind::Greater => TokenId::Greater,
        RawKind::GreaterEqual => TokenId::GreaterEqual,
        RawKind::Plus => TokenId::Plus,
        RawKind::Minus => TokenId::Minus,
        RawKind::Star => TokenId::Star,
        RawKind::Slash => TokenId::Slash,
        RawKind::Percent => TokenId::Percent,
        RawKind::Word
        | RawKind::EscapedIdentifier
        | RawKind::Integer
        | RawKind::Decimal
        | RawKind::StringLiteral
        | RawKind::Parameter
        | RawKind::Whitespace
        | RawKind::Newline
        | RawKind::LineComment => unreachable!("not punctuation: {kind:?}"),
    }
}
