// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The parser implementation: recursive descent for statements,
//! precedence climbing for expressions.

use fpp_ast::arena::{Arena, NodeId, NodeKind};
use fpp_ast::token::{Token, TokenKind};
use fpp_ast::Span;

/// Maximum number of errors to collect before stopping.
const MAX_ERRORS: usize = 20;

/// The parser for fpp source code.
///
/// Owns the token stream and the arena for the duration of one parse;
/// both are handed off in the [`ParseResult`].
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    arena: Arena,
    /// Collected errors during parsing
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.is_empty() {
            tokens.push(Token::new(TokenKind::Eof, "", Span::new(0, 0)));
        }
        Self { tokens, pos: 0, arena: Arena::new(), errors: Vec::new() }
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current(&self) -> &Token {
        // Reads past the Eof sentinel stay on the sentinel.
        self.tokens.get(self.pos).unwrap_or_else(|| self.tokens.last().unwrap())
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn peek(&self, n: usize) -> TokenKind {
        self.tokens.get(self.pos + n).map(|t| t.kind).unwrap_or(TokenKind::Eof)
    }

    fn at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn advance(&mut self) -> &Token {
        if self.at_end() {
            // Reads past the sentinel idempotently return the sentinel.
            return self.current();
        }
        self.pos += 1;
        &self.tokens[self.pos - 1]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(
                kind.display_name(),
                self.current_kind(),
                self.current().span,
            ))
        }
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        if self.check(TokenKind::Ident) {
            Ok(self.advance().text.clone())
        } else {
            Err(ParseError::expected(
                "identifier",
                self.current_kind(),
                self.current().span,
            ))
        }
    }

    // =========================================================================
    // Node Construction
    // =========================================================================

    fn make(&mut self, kind: NodeKind, text: impl Into<String>) -> NodeId {
        let id = self.arena.alloc(kind);
        self.arena.get_mut(id).text = text.into();
        id
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.arena.add_child(parent, child);
    }

    // =========================================================================
    // Program
    // =========================================================================

    /// Parse the whole token stream into the arena.
    ///
    /// Node 0 is always the `Program` root. Errors are collected, not
    /// thrown: a failed statement records a diagnostic and parsing resumes
    /// after skipping a single token.
    pub fn parse(&mut self) -> ParseResult {
        self.arena.clear();
        let root = self.arena.alloc(NodeKind::Program);

        while !self.at_end() {
            if self.errors.len() >= MAX_ERRORS {
                break;
            }
            match self.parse_stmt() {
                Ok(stmt) => self.add_child(root, stmt),
                Err(error) => {
                    self.errors.push(error);
                    // Single-token recovery: skip one token and try again.
                    self.advance();
                }
            }
        }

        ParseResult {
            arena: std::mem::take(&mut self.arena),
            root,
            errors: std::mem::take(&mut self.errors),
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_stmt(&mut self) -> Result<NodeId, ParseError> {
        let kind = self.current_kind();

        if kind.is_type_keyword() {
            // `type IDENT (` opens a function definition, `type IDENT`
            // anything else is a variable declaration.
            if self.peek(1) == TokenKind::Ident && self.peek(2) == TokenKind::LParen {
                return self.parse_function();
            }
            let decl = self.parse_declaration()?;
            self.expect(TokenKind::Semi)?;
            return Ok(decl);
        }

        match kind {
            TokenKind::Ident if self.peek(1) == TokenKind::Assign => {
                let stmt = self.parse_assignment()?;
                self.expect(TokenKind::Semi)?;
                Ok(stmt)
            }
            TokenKind::Return => self.parse_return(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Forn => self.parse_forn(),
            TokenKind::LBrace => self.parse_block(),
            k if k.starts_expr() => {
                let expr = self.parse_expr(0)?;
                self.expect(TokenKind::Semi)?;
                Ok(expr)
            }
            _ => Err(ParseError::expected(
                "statement",
                kind,
                self.current().span,
            )),
        }
    }

    /// `type IDENT` with an optional `= expression` initializer.
    /// The trailing semicolon belongs to the caller: declarations also
    /// appear as for-loop init clauses and function parameters.
    fn parse_declaration(&mut self) -> Result<NodeId, ParseError> {
        let ty = self.advance().text.clone();
        let name = self.expect_ident()?;

        let decl = self.make(NodeKind::Declaration, name);
        self.arena.get_mut(decl).declared_type = Some(ty);

        if self.match_token(TokenKind::Assign) {
            let init = self.parse_expr(0)?;
            self.add_child(decl, init);
        }
        Ok(decl)
    }

    /// `IDENT = expression`, semicolon left to the caller.
    fn parse_assignment(&mut self) -> Result<NodeId, ParseError> {
        let name = self.expect_ident()?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expr(0)?;

        let stmt = self.make(NodeKind::Assignment, name);
        self.add_child(stmt, value);
        Ok(stmt)
    }

    /// `type IDENT ( params ) { block }` — children are `[Params, Block]`.
    fn parse_function(&mut self) -> Result<NodeId, ParseError> {
        let ty = self.advance().text.clone();
        let name = self.expect_ident()?;
        self.expect(TokenKind::LParen)?;

        let params = self.make(NodeKind::Params, "");
        if !self.check(TokenKind::RParen) {
            loop {
                if !self.current_kind().is_type_keyword() {
                    return Err(ParseError::expected(
                        "parameter type",
                        self.current_kind(),
                        self.current().span,
                    ));
                }
                let param_ty = self.advance().text.clone();
                let param_name = self.expect_ident()?;
                let param = self.make(NodeKind::Declaration, param_name);
                self.arena.get_mut(param).declared_type = Some(param_ty);
                self.add_child(params, param);

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        let body = self.parse_block()?;

        let func = self.make(NodeKind::Function, name);
        self.arena.get_mut(func).declared_type = Some(ty);
        self.add_child(func, params);
        self.add_child(func, body);
        Ok(func)
    }

    /// `return;` or `return expression;`
    fn parse_return(&mut self) -> Result<NodeId, ParseError> {
        self.advance();
        let stmt = self.make(NodeKind::Return, "");
        if !self.check(TokenKind::Semi) {
            let value = self.parse_expr(0)?;
            self.add_child(stmt, value);
        }
        self.expect(TokenKind::Semi)?;
        Ok(stmt)
    }

    /// `if ( cond ) { .. }` with an optional `else { .. }`.
    fn parse_if(&mut self) -> Result<NodeId, ParseError> {
        self.advance();
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr(0)?;
        self.expect(TokenKind::RParen)?;
        let then_block = self.parse_block()?;

        let stmt = self.make(NodeKind::If, "");
        self.add_child(stmt, cond);
        self.add_child(stmt, then_block);

        if self.match_token(TokenKind::Else) {
            let else_block = self.parse_block()?;
            self.add_child(stmt, else_block);
        }
        Ok(stmt)
    }

    /// `while ( cond ) { .. }`
    fn parse_while(&mut self) -> Result<NodeId, ParseError> {
        self.advance();
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr(0)?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;

        let stmt = self.make(NodeKind::While, "");
        self.add_child(stmt, cond);
        self.add_child(stmt, body);
        Ok(stmt)
    }

    /// `for ( init ; cond ; update ) { .. }`. Empty clauses become `Empty`
    /// placeholder nodes so the node always has exactly 4 children.
    fn parse_for(&mut self) -> Result<NodeId, ParseError> {
        self.advance();
        self.expect(TokenKind::LParen)?;

        let init = if self.check(TokenKind::Semi) {
            self.make(NodeKind::Empty, "")
        } else {
            self.parse_for_clause()?
        };
        self.expect(TokenKind::Semi)?;

        let cond = if self.check(TokenKind::Semi) {
            self.make(NodeKind::Empty, "")
        } else {
            self.parse_expr(0)?
        };
        self.expect(TokenKind::Semi)?;

        let update = if self.check(TokenKind::RParen) {
            self.make(NodeKind::Empty, "")
        } else {
            self.parse_for_clause()?
        };
        self.expect(TokenKind::RParen)?;

        let body = self.parse_block()?;

        let stmt = self.make(NodeKind::For, "");
        self.add_child(stmt, init);
        self.add_child(stmt, cond);
        self.add_child(stmt, update);
        self.add_child(stmt, body);
        Ok(stmt)
    }

    /// A single for-header clause: declaration, assignment, or expression.
    fn parse_for_clause(&mut self) -> Result<NodeId, ParseError> {
        if self.current_kind().is_type_keyword() {
            self.parse_declaration()
        } else if self.check(TokenKind::Ident) && self.peek(1) == TokenKind::Assign {
            self.parse_assignment()
        } else {
            self.parse_expr(0)
        }
    }

    /// `forn ( IDENT , end ) { .. }` — sugar for an indexed for loop over
    /// `[0, end)`. The induction variable name rides on the node text and
    /// its type is always the native integer type.
    fn parse_forn(&mut self) -> Result<NodeId, ParseError> {
        self.advance();
        self.expect(TokenKind::LParen)?;
        let var = self.expect_ident()?;
        self.expect(TokenKind::Comma)?;
        let end = self.parse_expr(0)?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;

        let stmt = self.make(NodeKind::Forn, var);
        self.arena.get_mut(stmt).declared_type = Some("int".to_string());
        self.add_child(stmt, end);
        self.add_child(stmt, body);
        Ok(stmt)
    }

    /// `{ stmt* }`
    fn parse_block(&mut self) -> Result<NodeId, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let block = self.make(NodeKind::Block, "");
        while !self.check(TokenKind::RBrace) && !self.at_end() {
            let stmt = self.parse_stmt()?;
            self.add_child(block, stmt);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(block)
    }

    // =========================================================================
    // Expressions (precedence climbing)
    // =========================================================================

    const PREFIX_PREC: u8 = 7;

    /// Parse an expression folding in binary operators of precedence
    /// `>= min_prec`. The right operand recurses with `prec + 1`, which
    /// makes every operator left-associative.
    fn parse_expr(&mut self, min_prec: u8) -> Result<NodeId, ParseError> {
        let mut lhs = self.parse_primary()?;

        while let Some(prec) = infix_prec(self.current_kind()) {
            if prec < min_prec {
                break;
            }
            let op = self.advance().text.clone();
            let rhs = self.parse_expr(prec + 1)?;

            let node = self.make(NodeKind::BinaryOp, op);
            self.add_child(node, lhs);
            self.add_child(node, rhs);
            lhs = node;
        }

        // Anything else at this point (';', ')', ',', '}') belongs to the
        // enclosing construct.
        Ok(lhs)
    }

    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        match self.current_kind() {
            TokenKind::Ident => {
                let name = self.advance().text.clone();
                if self.check(TokenKind::LParen) {
                    self.parse_call(name)
                } else {
                    Ok(self.make(NodeKind::Identifier, name))
                }
            }
            TokenKind::IntLit
            | TokenKind::FloatLit
            | TokenKind::StrLit
            | TokenKind::CharLit
            | TokenKind::BoolLit => {
                let text = self.advance().text.clone();
                Ok(self.make(NodeKind::Literal, text))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr(0)?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::Minus | TokenKind::Bang => {
                let op = self.advance().text.clone();
                let operand = self.parse_expr(Self::PREFIX_PREC)?;
                let node = self.make(NodeKind::UnaryOp, op);
                self.add_child(node, operand);
                Ok(node)
            }
            kind => Err(ParseError::expected(
                "expression",
                kind,
                self.current().span,
            )),
        }
    }

    /// Argument list of a call; the callee identifier is already consumed.
    /// Children are `[Identifier, Arguments]`.
    fn parse_call(&mut self, name: String) -> Result<NodeId, ParseError> {
        let callee = self.make(NodeKind::Identifier, name);
        self.expect(TokenKind::LParen)?;

        let args = self.make(NodeKind::Arguments, "");
        if !self.check(TokenKind::RParen) {
            loop {
                let arg = self.parse_expr(0)?;
                self.add_child(args, arg);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        let call = self.make(NodeKind::Call, "");
        self.add_child(call, callee);
        self.add_child(call, args);
        Ok(call)
    }
}

/// Binary operator precedence, low to high. `None` for tokens that cannot
/// continue an expression, which terminates the climbing loop.
fn infix_prec(kind: TokenKind) -> Option<u8> {
    match kind {
        TokenKind::PipePipe => Some(1),
        TokenKind::AmpAmp => Some(2),
        TokenKind::EqEq | TokenKind::BangEq => Some(3),
        TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => Some(4),
        TokenKind::Plus | TokenKind::Minus => Some(5),
        TokenKind::Star | TokenKind::Slash => Some(6),
        _ => None,
    }
}

/// Result of parsing: the arena, its root, plus any errors found.
#[derive(Debug)]
pub struct ParseResult {
    pub arena: Arena,
    pub root: NodeId,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Returns true if parsing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A parser error with location and friendly message.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub span: Span,
    pub message: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    fn expected(expected: &str, found: TokenKind, span: Span) -> Self {
        Self {
            span,
            message: format!("Expected {}, found {}", expected, found.display_name()),
        }
    }
}
