// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Syntax types for the fpp language.
//!
//! This crate defines the tokens, spans, and the AST arena shared between
//! the lexer, parser, and emitter.

pub mod arena;
pub mod span;
pub mod token;

pub use arena::{Arena, Node, NodeId, NodeKind};
pub use span::{LineMap, Span};
