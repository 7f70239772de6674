//! Token definitions for the lexer.

use crate::Span;

/// A token produced by the lexer.
///
/// The literal text is carried alongside the kind so literals can be
/// reproduced verbatim in the emitted output (string and char tokens keep
/// their quotes).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self { kind, text: text.into(), span }
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Identifiers + literals
    Ident,
    IntLit,
    FloatLit,
    StrLit,
    CharLit,
    BoolLit,

    // Type keywords
    Int,
    Float,
    Char,
    Bool,
    Varchar,
    Vi,
    Void,

    // Other keywords
    If,
    Else,
    While,
    For,
    Forn,
    Return,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Star,
    Slash,
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    BangEq,
    AmpAmp,
    PipePipe,

    // Delimiters
    Comma,
    Semi,
    LParen,
    RParen,
    LBrace,
    RBrace,

    /// End-of-input sentinel, always the last token in a stream.
    Eof,
}

impl TokenKind {
    /// True for keywords that can open a declaration or function definition.
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Float
                | TokenKind::Char
                | TokenKind::Bool
                | TokenKind::Varchar
                | TokenKind::Vi
                | TokenKind::Void
        )
    }

    /// True if a token of this kind can begin an expression.
    pub fn starts_expr(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::IntLit
                | TokenKind::FloatLit
                | TokenKind::StrLit
                | TokenKind::CharLit
                | TokenKind::BoolLit
                | TokenKind::LParen
                | TokenKind::Minus
                | TokenKind::Bang
        )
    }

    /// Human-readable name for error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::IntLit => "integer literal",
            TokenKind::FloatLit => "float literal",
            TokenKind::StrLit => "string literal",
            TokenKind::CharLit => "char literal",
            TokenKind::BoolLit => "boolean literal",
            TokenKind::Int => "'int'",
            TokenKind::Float => "'float'",
            TokenKind::Char => "'char'",
            TokenKind::Bool => "'bool'",
            TokenKind::Varchar => "'varchar'",
            TokenKind::Vi => "'vi'",
            TokenKind::Void => "'void'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::For => "'for'",
            TokenKind::Forn => "'forn'",
            TokenKind::Return => "'return'",
            TokenKind::Assign => "'='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Bang => "'!'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LtEq => "'<='",
            TokenKind::GtEq => "'>='",
            TokenKind::EqEq => "'=='",
            TokenKind::BangEq => "'!='",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::PipePipe => "'||'",
            TokenKind::Comma => "','",
            TokenKind::Semi => "';'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Eof => "end of input",
        }
    }
}
