// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The arena-walking emitter.
//!
//! Dispatch is an exhaustive match over `NodeKind`; a child count that
//! violates a kind's arity contract is a structural error (a parser bug,
//! not a user error) and aborts emission of the whole artifact.

use fpp_ast::arena::{Arena, NodeId, NodeKind};
use thiserror::Error;

/// Fixed prologue: includes, type aliases, the multi-test flag, and the
/// bank of scratch globals available to generated logic.
const PROLOGUE: &str = "\
#include <string>
#include <vector>
using namespace std;
#include <iostream>
typedef long long ll;
typedef vector<int> vi;
bool multiTest = 0;
ll d, l, r, k, n, m, p, q, u, v, w, x, y, z;
";

/// Fixed epilogue: the driver `main` that calls the user's `solve` once,
/// or once per test case when `multiTest` is set.
const EPILOGUE: &str = "\
int main() {
int t = 1;
if (multiTest) cin >> t;
for (int ii = 0; ii < t; ii++) {solve(ii);}
}
";

/// A structural fault found while emitting. These indicate a defect in
/// node construction and are never silently patched over.
#[derive(Debug, Clone, Error)]
pub enum EmitError {
    #[error("{kind} node has {found} children, expected {expected}: parser bug")]
    ArityMismatch {
        kind: &'static str,
        expected: &'static str,
        found: usize,
    },
    #[error("{kind} node in {context} position: parser bug")]
    UnexpectedNode {
        kind: &'static str,
        context: &'static str,
    },
}

/// Emit the complete artifact: prologue, program body, epilogue.
///
/// Callers must only invoke this with an error-free parse; the emitter
/// assumes a structurally well-formed tree and reports anything else as
/// an [`EmitError`].
pub fn emit(arena: &Arena, root: NodeId) -> Result<String, EmitError> {
    let mut out = String::from(PROLOGUE);
    out.push_str(&render(arena, root)?);
    out.push_str(EPILOGUE);
    Ok(out)
}

/// Render the program body only (no prologue/epilogue). Used by tests and
/// debug output; the text stays within the grammar the parser accepts.
pub fn render(arena: &Arena, root: NodeId) -> Result<String, EmitError> {
    let mut emitter = Emitter { arena, out: String::new() };
    emitter.emit_program(root)?;
    Ok(emitter.out)
}

/// True for kinds that need a `;` terminator at statement position.
/// Block-bearing constructs are self-terminating.
fn needs_terminator(kind: NodeKind) -> bool {
    !matches!(
        kind,
        NodeKind::Function
            | NodeKind::If
            | NodeKind::While
            | NodeKind::For
            | NodeKind::Forn
            | NodeKind::Block
    )
}

struct Emitter<'a> {
    arena: &'a Arena,
    out: String,
}

impl<'a> Emitter<'a> {
    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn emit_program(&mut self, root: NodeId) -> Result<(), EmitError> {
        let node = self.arena.get(root);
        if node.kind != NodeKind::Program {
            return Err(EmitError::UnexpectedNode {
                kind: node.kind.name(),
                context: "program root",
            });
        }
        let children = node.children.clone();
        for child in children {
            self.emit_stmt(child)?;
        }
        Ok(())
    }

    /// A node at statement position: the node itself, a terminator if its
    /// kind needs one, and a newline.
    fn emit_stmt(&mut self, id: NodeId) -> Result<(), EmitError> {
        let kind = self.arena.get(id).kind;
        self.emit_node(id)?;
        if needs_terminator(kind) {
            self.push(";");
        }
        self.push("\n");
        Ok(())
    }

    fn emit_node(&mut self, id: NodeId) -> Result<(), EmitError> {
        let node = self.arena.get(id);
        let kind = node.kind;
        let children = node.children.clone();
        let text = node.text.clone();
        let declared_type = node.declared_type.clone();

        match kind {
            NodeKind::Function => {
                let [params, body] = exactly_2(kind, &children)?;
                self.push(declared_type.as_deref().unwrap_or(""));
                self.push(" ");
                self.push(&text);
                self.push("(");
                self.emit_comma_list(params, NodeKind::Params)?;
                self.push(")");
                self.emit_block(body)
            }
            NodeKind::Declaration => {
                let init = at_most_1(kind, &children)?;
                self.push(declared_type.as_deref().unwrap_or(""));
                self.push(" ");
                self.push(&text);
                if let Some(init) = init {
                    self.push(" = ");
                    self.emit_node(init)?;
                }
                Ok(())
            }
            NodeKind::Assignment => {
                let value = exactly_1(kind, &children)?;
                self.push(&text);
                self.push(" = ");
                self.emit_node(value)
            }
            NodeKind::If => {
                if children.len() != 2 && children.len() != 3 {
                    return Err(arity(kind, "2 or 3", children.len()));
                }
                self.push("if(");
                self.emit_node(children[0])?;
                self.push(")");
                self.emit_block(children[1])?;
                if let Some(&alt) = children.get(2) {
                    self.push("else");
                    self.emit_block(alt)?;
                }
                Ok(())
            }
            NodeKind::While => {
                let [cond, body] = exactly_2(kind, &children)?;
                self.push("while(");
                self.emit_node(cond)?;
                self.push(")");
                self.emit_block(body)
            }
            NodeKind::For => {
                if children.len() != 4 {
                    return Err(arity(kind, "4", children.len()));
                }
                self.push("for(");
                self.emit_node(children[0])?;
                self.push(";");
                self.emit_node(children[1])?;
                self.push(";");
                self.emit_node(children[2])?;
                self.push(")");
                self.emit_block(children[3])
            }
            NodeKind::Forn => {
                // Desugars to the equivalent three-clause for: the
                // induction variable starts at 0, runs while below the end
                // expression, and steps by one. The update is spelled as
                // an assignment so the output stays within the grammar
                // this compiler itself parses.
                let [end, body] = exactly_2(kind, &children)?;
                let var = &text;
                self.push(&format!("for(int {} = 0;({} < ", var, var));
                self.emit_node(end)?;
                self.push(&format!(");{} = ({} + 1))", var, var));
                self.emit_block(body)
            }
            NodeKind::Return => {
                let value = at_most_1(kind, &children)?;
                self.push("return");
                if let Some(value) = value {
                    self.push(" ");
                    self.emit_node(value)?;
                }
                Ok(())
            }
            NodeKind::BinaryOp => {
                // Fully parenthesized so precedence survives regardless of
                // target-language defaults.
                let [left, right] = exactly_2(kind, &children)?;
                self.push("(");
                self.emit_node(left)?;
                self.push(" ");
                self.push(&text);
                self.push(" ");
                self.emit_node(right)?;
                self.push(")");
                Ok(())
            }
            NodeKind::UnaryOp => {
                let operand = exactly_1(kind, &children)?;
                self.push(&text);
                self.emit_node(operand)
            }
            NodeKind::Call => {
                let [callee, args] = exactly_2(kind, &children)?;
                let callee_node = self.arena.get(callee);
                if callee_node.kind != NodeKind::Identifier {
                    return Err(EmitError::UnexpectedNode {
                        kind: callee_node.kind.name(),
                        context: "call target",
                    });
                }
                let name = callee_node.text.clone();
                self.push(&name);
                self.push("(");
                self.emit_comma_list(args, NodeKind::Arguments)?;
                self.push(")");
                Ok(())
            }
            NodeKind::Identifier | NodeKind::Literal => {
                if !children.is_empty() {
                    return Err(arity(kind, "0", children.len()));
                }
                self.push(&text);
                Ok(())
            }
            NodeKind::Empty => {
                if !children.is_empty() {
                    return Err(arity(kind, "0", children.len()));
                }
                Ok(())
            }
            NodeKind::Block => self.emit_block(id),
            // Program never nests; Params/Arguments are consumed by their
            // Function/Call parents above.
            NodeKind::Program | NodeKind::Params | NodeKind::Arguments => {
                Err(EmitError::UnexpectedNode {
                    kind: kind.name(),
                    context: "statement or expression",
                })
            }
        }
    }

    fn emit_block(&mut self, id: NodeId) -> Result<(), EmitError> {
        let node = self.arena.get(id);
        if node.kind != NodeKind::Block {
            return Err(EmitError::UnexpectedNode {
                kind: node.kind.name(),
                context: "block",
            });
        }
        let children = node.children.clone();
        self.push("{\n");
        for child in children {
            self.emit_stmt(child)?;
        }
        self.push("}");
        Ok(())
    }

    /// Comma-joined children of a Params or Arguments container.
    fn emit_comma_list(&mut self, id: NodeId, expected: NodeKind) -> Result<(), EmitError> {
        let node = self.arena.get(id);
        if node.kind != expected {
            return Err(EmitError::UnexpectedNode {
                kind: node.kind.name(),
                context: "parameter or argument list",
            });
        }
        let children = node.children.clone();
        for (i, child) in children.iter().enumerate() {
            self.emit_node(*child)?;
            if i + 1 != children.len() {
                self.push(",");
            }
        }
        Ok(())
    }
}

fn arity(kind: NodeKind, expected: &'static str, found: usize) -> EmitError {
    EmitError::ArityMismatch { kind: kind.name(), expected, found }
}

fn exactly_1(kind: NodeKind, children: &[NodeId]) -> Result<NodeId, EmitError> {
    match children {
        [only] => Ok(*only),
        _ => Err(arity(kind, "1", children.len())),
    }
}

fn exactly_2(kind: NodeKind, children: &[NodeId]) -> Result<[NodeId; 2], EmitError> {
    match children {
        [a, b] => Ok([*a, *b]),
        _ => Err(arity(kind, "2", children.len())),
    }
}

fn at_most_1(kind: NodeKind, children: &[NodeId]) -> Result<Option<NodeId>, EmitError> {
    match children {
        [] => Ok(None),
        [only] => Ok(Some(*only)),
        _ => Err(arity(kind, "0 or 1", children.len())),
    }
}
