// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! C++ text emission for the fpp compiler.
//!
//! Walks the AST arena and re-synthesizes target text: a fixed prologue
//! (includes, type aliases, scratch globals), one line per top-level
//! construct, and a fixed `main` epilogue that drives `solve`.

mod emitter;

pub use emitter::{emit, render, EmitError};
