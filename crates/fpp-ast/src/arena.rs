// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The AST arena.
//!
//! Nodes live in one append-only vector and refer to each other by index.
//! A `NodeId` stays valid for the lifetime of a parse; the only mutation a
//! node ever sees after allocation is appending to its child list. The
//! parser is the sole writer; the emitter only reads.

use std::fmt::Write;

/// Stable handle to a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The syntactic kind of a node.
///
/// Each kind has a fixed child arity, checked by the emitter:
/// `Function` is `[Params, Block]`, `BinaryOp` is `[left, right]`,
/// `If` is `[cond, then]` or `[cond, then, else]`, `For` is always
/// `[init, cond, update, block]` with `Empty` placeholders, `Forn` is
/// `[end, block]`, `Call` is `[Identifier, Arguments]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    Function,
    Declaration,
    Assignment,
    If,
    While,
    For,
    Forn,
    Block,
    Identifier,
    Literal,
    UnaryOp,
    BinaryOp,
    Call,
    Params,
    Arguments,
    Return,
    Empty,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Program => "PROGRAM",
            NodeKind::Function => "FUNCTION",
            NodeKind::Declaration => "DECLARATION",
            NodeKind::Assignment => "ASSIGNMENT",
            NodeKind::If => "IF",
            NodeKind::While => "WHILE",
            NodeKind::For => "FOR",
            NodeKind::Forn => "FORN",
            NodeKind::Block => "BLOCK",
            NodeKind::Identifier => "IDENTIFIER",
            NodeKind::Literal => "LITERAL",
            NodeKind::UnaryOp => "UNARY_OP",
            NodeKind::BinaryOp => "BINARY_OP",
            NodeKind::Call => "FUNCTION_CALL",
            NodeKind::Params => "PARAMS",
            NodeKind::Arguments => "ARGUMENTS",
            NodeKind::Return => "RETURN",
            NodeKind::Empty => "EMPTY",
        }
    }
}

/// A node in the AST.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Declared type for declarations, functions, and forn induction variables.
    pub declared_type: Option<String>,
    /// Identifier name, literal text, or operator symbol.
    pub text: String,
    pub children: Vec<NodeId>,
}

/// Append-only, index-addressed store of AST nodes.
#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append a blank node of the given kind, returning its handle.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            declared_type: None,
            text: String::new(),
            children: Vec::new(),
        });
        id
    }

    /// Look up a node. An out-of-range handle is a parser bug, never user
    /// input, so it aborts instead of clamping or defaulting.
    pub fn get(&self, id: NodeId) -> &Node {
        match self.nodes.get(id.index()) {
            Some(node) => node,
            None => panic!(
                "arena handle {} out of range (len {}): parser bug",
                id.0,
                self.nodes.len()
            ),
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        let len = self.nodes.len();
        match self.nodes.get_mut(id.index()) {
            Some(node) => node,
            None => panic!("arena handle {} out of range (len {}): parser bug", id.0, len),
        }
    }

    /// Append `child` to `parent`'s child list.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(child.index() < self.nodes.len());
        self.get_mut(parent).children.push(child);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop all nodes. Called at the start of each parse.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Render an indented view of the subtree at `root`, for debug output.
    pub fn dump(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.dump_node(root, 0, &mut out);
        out
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.get(id);
        for _ in 0..depth {
            out.push_str("  ");
        }
        let _ = write!(out, "{}", node.kind.name());
        if let Some(ty) = &node.declared_type {
            let _ = write!(out, " [{}]", ty);
        }
        if !node.text.is_empty() {
            let _ = write!(out, " {}", node.text);
        }
        out.push('\n');
        for &child in &node.children {
            self.dump_node(child, depth + 1, out);
        }
    }
}
