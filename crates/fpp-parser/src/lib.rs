//! Parser for the fpp language.
//!
//! Transforms a token stream into an indexed abstract syntax tree held in
//! an arena (see `fpp_ast::arena`).

mod parser;

pub use parser::{ParseError, ParseResult, Parser};

#[cfg(test)]
mod tests {
    use super::*;
    use fpp_ast::arena::{Arena, NodeId, NodeKind};

    fn parse(src: &str) -> ParseResult {
        let lex_result = fpp_lexer::Lexer::new(src).tokenize();
        assert!(lex_result.is_ok(), "Lex errors: {:?}", lex_result.errors);
        Parser::new(lex_result.tokens).parse()
    }

    fn parse_ok(src: &str) -> ParseResult {
        let result = parse(src);
        assert!(result.is_ok(), "Parse errors: {:?}", result.errors);
        result
    }

    fn child(arena: &Arena, id: NodeId, i: usize) -> NodeId {
        arena.get(id).children[i]
    }

    /// Parse a single `x = <expr>;` statement and return the expression node.
    fn parse_expr_of(src: &str) -> (Arena, NodeId) {
        let result = parse_ok(src);
        let assign = child(&result.arena, result.root, 0);
        assert_eq!(result.arena.get(assign).kind, NodeKind::Assignment);
        let expr = child(&result.arena, assign, 0);
        (result.arena, expr)
    }

    #[test]
    fn root_is_node_zero() {
        let result = parse_ok("int x;");
        assert_eq!(result.root, NodeId(0));
        assert_eq!(result.arena.get(result.root).kind, NodeKind::Program);
    }

    #[test]
    fn empty_source_parses_to_empty_program() {
        let result = parse_ok("");
        assert!(result.arena.get(result.root).children.is_empty());
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let (arena, expr) = parse_expr_of("x = a + b * c;");
        let node = arena.get(expr);
        assert_eq!(node.kind, NodeKind::BinaryOp);
        assert_eq!(node.text, "+");
        let left = arena.get(node.children[0]);
        let right = arena.get(node.children[1]);
        assert_eq!(left.kind, NodeKind::Identifier);
        assert_eq!(left.text, "a");
        assert_eq!(right.kind, NodeKind::BinaryOp);
        assert_eq!(right.text, "*");
    }

    #[test]
    fn subtraction_is_left_associative() {
        let (arena, expr) = parse_expr_of("x = a - b - c;");
        let node = arena.get(expr);
        assert_eq!(node.text, "-");
        let left = arena.get(node.children[0]);
        assert_eq!(left.kind, NodeKind::BinaryOp);
        assert_eq!(left.text, "-");
        assert_eq!(arena.get(left.children[0]).text, "a");
        assert_eq!(arena.get(left.children[1]).text, "b");
        assert_eq!(arena.get(node.children[1]).text, "c");
    }

    #[test]
    fn comparison_binds_tighter_than_logic() {
        let (arena, expr) = parse_expr_of("x = a < b && c < d;");
        let node = arena.get(expr);
        assert_eq!(node.text, "&&");
        assert_eq!(arena.get(node.children[0]).text, "<");
        assert_eq!(arena.get(node.children[1]).text, "<");
    }

    #[test]
    fn unary_binds_tighter_than_binary() {
        let (arena, expr) = parse_expr_of("x = -a * b;");
        let node = arena.get(expr);
        assert_eq!(node.text, "*");
        let left = arena.get(node.children[0]);
        assert_eq!(left.kind, NodeKind::UnaryOp);
        assert_eq!(left.text, "-");
    }

    #[test]
    fn parentheses_override_precedence() {
        let (arena, expr) = parse_expr_of("x = (a + b) * c;");
        let node = arena.get(expr);
        assert_eq!(node.text, "*");
        assert_eq!(arena.get(node.children[0]).text, "+");
    }

    #[test]
    fn end_to_end_example_program() {
        let result = parse_ok("int x = 7; int y = 10; result = x + y;");
        let arena = &result.arena;
        let top = &arena.get(result.root).children;
        assert_eq!(top.len(), 3);

        let x = arena.get(top[0]);
        assert_eq!(x.kind, NodeKind::Declaration);
        assert_eq!(x.declared_type.as_deref(), Some("int"));
        assert_eq!(x.text, "x");
        assert_eq!(arena.get(x.children[0]).text, "7");

        assert_eq!(arena.get(top[1]).kind, NodeKind::Declaration);

        let assign = arena.get(top[2]);
        assert_eq!(assign.kind, NodeKind::Assignment);
        assert_eq!(assign.text, "result");
        assert_eq!(assign.children.len(), 1);
        let sum = arena.get(assign.children[0]);
        assert_eq!(sum.kind, NodeKind::BinaryOp);
        assert_eq!(sum.text, "+");
        assert_eq!(arena.get(sum.children[0]).text, "x");
        assert_eq!(arena.get(sum.children[1]).text, "y");
    }

    #[test]
    fn declaration_without_initializer_has_no_children() {
        let result = parse_ok("vi nums;");
        let decl = result.arena.get(child(&result.arena, result.root, 0));
        assert_eq!(decl.kind, NodeKind::Declaration);
        assert_eq!(decl.declared_type.as_deref(), Some("vi"));
        assert!(decl.children.is_empty());
    }

    #[test]
    fn function_definition_shape() {
        let result = parse_ok("int add(int a, int b) { return a + b; }");
        let arena = &result.arena;
        let func = arena.get(child(arena, result.root, 0));
        assert_eq!(func.kind, NodeKind::Function);
        assert_eq!(func.text, "add");
        assert_eq!(func.declared_type.as_deref(), Some("int"));
        assert_eq!(func.children.len(), 2);

        let params = arena.get(func.children[0]);
        assert_eq!(params.kind, NodeKind::Params);
        assert_eq!(params.children.len(), 2);
        let a = arena.get(params.children[0]);
        assert_eq!(a.kind, NodeKind::Declaration);
        assert_eq!(a.declared_type.as_deref(), Some("int"));
        assert_eq!(a.text, "a");

        let body = arena.get(func.children[1]);
        assert_eq!(body.kind, NodeKind::Block);
        assert_eq!(body.children.len(), 1);
        let ret = arena.get(body.children[0]);
        assert_eq!(ret.kind, NodeKind::Return);
        assert_eq!(ret.children.len(), 1);
    }

    #[test]
    fn function_with_no_params() {
        let result = parse_ok("void solve() { x = 1; }");
        let arena = &result.arena;
        let func = arena.get(child(arena, result.root, 0));
        assert_eq!(func.kind, NodeKind::Function);
        assert!(arena.get(func.children[0]).children.is_empty());
    }

    #[test]
    fn if_without_else_has_two_children() {
        let result = parse_ok("if (x < 1) { x = 1; }");
        let stmt = result.arena.get(child(&result.arena, result.root, 0));
        assert_eq!(stmt.kind, NodeKind::If);
        assert_eq!(stmt.children.len(), 2);
    }

    #[test]
    fn if_with_else_has_three_children() {
        let result = parse_ok("if (x < 1) { x = 1; } else { x = 2; }");
        let arena = &result.arena;
        let stmt = arena.get(child(arena, result.root, 0));
        assert_eq!(stmt.children.len(), 3);
        assert_eq!(arena.get(stmt.children[2]).kind, NodeKind::Block);
    }

    #[test]
    fn while_shape() {
        let result = parse_ok("while (x < n) { x = x + 1; }");
        let arena = &result.arena;
        let stmt = arena.get(child(arena, result.root, 0));
        assert_eq!(stmt.kind, NodeKind::While);
        assert_eq!(stmt.children.len(), 2);
        assert_eq!(arena.get(stmt.children[0]).kind, NodeKind::BinaryOp);
        assert_eq!(arena.get(stmt.children[1]).kind, NodeKind::Block);
    }

    #[test]
    fn for_with_all_clauses() {
        let result = parse_ok("for (int i = 0; i < n; i = i + 1) { x = x + i; }");
        let arena = &result.arena;
        let stmt = arena.get(child(arena, result.root, 0));
        assert_eq!(stmt.kind, NodeKind::For);
        assert_eq!(stmt.children.len(), 4);
        assert_eq!(arena.get(stmt.children[0]).kind, NodeKind::Declaration);
        assert_eq!(arena.get(stmt.children[1]).kind, NodeKind::BinaryOp);
        assert_eq!(arena.get(stmt.children[2]).kind, NodeKind::Assignment);
        assert_eq!(arena.get(stmt.children[3]).kind, NodeKind::Block);
    }

    #[test]
    fn for_with_empty_clauses_keeps_arity_four() {
        let result = parse_ok("for (;;) { x = 1; }");
        let arena = &result.arena;
        let stmt = arena.get(child(arena, result.root, 0));
        assert_eq!(stmt.children.len(), 4);
        assert_eq!(arena.get(stmt.children[0]).kind, NodeKind::Empty);
        assert_eq!(arena.get(stmt.children[1]).kind, NodeKind::Empty);
        assert_eq!(arena.get(stmt.children[2]).kind, NodeKind::Empty);
        assert_eq!(arena.get(stmt.children[3]).kind, NodeKind::Block);
    }

    #[test]
    fn forn_shape() {
        let result = parse_ok("forn (i, n) { x = x + i; }");
        let arena = &result.arena;
        let stmt = arena.get(child(arena, result.root, 0));
        assert_eq!(stmt.kind, NodeKind::Forn);
        assert_eq!(stmt.text, "i");
        assert_eq!(stmt.declared_type.as_deref(), Some("int"));
        assert_eq!(stmt.children.len(), 2);
        assert_eq!(arena.get(stmt.children[0]).text, "n");
        assert_eq!(arena.get(stmt.children[1]).kind, NodeKind::Block);
    }

    #[test]
    fn call_statement_shape() {
        let result = parse_ok("print(x, 1 + 2);");
        let arena = &result.arena;
        let call = arena.get(child(arena, result.root, 0));
        assert_eq!(call.kind, NodeKind::Call);
        assert_eq!(call.children.len(), 2);
        let callee = arena.get(call.children[0]);
        assert_eq!(callee.kind, NodeKind::Identifier);
        assert_eq!(callee.text, "print");
        let args = arena.get(call.children[1]);
        assert_eq!(args.kind, NodeKind::Arguments);
        assert_eq!(args.children.len(), 2);
        assert_eq!(arena.get(args.children[1]).kind, NodeKind::BinaryOp);
    }

    #[test]
    fn call_inside_expression() {
        let (arena, expr) = parse_expr_of("x = f(y) + 1;");
        let node = arena.get(expr);
        assert_eq!(node.text, "+");
        assert_eq!(arena.get(node.children[0]).kind, NodeKind::Call);
    }

    #[test]
    fn standalone_block_statement() {
        let result = parse_ok("{ x = 1; y = 2; }");
        let block = result.arena.get(child(&result.arena, result.root, 0));
        assert_eq!(block.kind, NodeKind::Block);
        assert_eq!(block.children.len(), 2);
    }

    #[test]
    fn return_without_value() {
        let result = parse_ok("return;");
        let ret = result.arena.get(child(&result.arena, result.root, 0));
        assert_eq!(ret.kind, NodeKind::Return);
        assert!(ret.children.is_empty());
    }

    #[test]
    fn one_fault_yields_one_diagnostic_and_parsing_continues() {
        // `int = 9;` is the only malformed statement.
        let result = parse("int x = 7; int = 9; y = 1;");
        assert_eq!(result.errors.len(), 1, "errors: {:?}", result.errors);
        let msg = &result.errors[0].message;
        assert!(msg.contains("identifier"), "message: {}", msg);
        assert!(msg.contains("'='"), "message: {}", msg);
        // Recovery skipped the '=' only; `9;` parses as an expression
        // statement and `y = 1;` as an assignment.
        let top = &result.arena.get(result.root).children;
        assert_eq!(top.len(), 3);
        assert_eq!(result.arena.get(top[2]).kind, NodeKind::Assignment);
    }

    #[test]
    fn missing_semicolon_is_reported() {
        let result = parse("x = 1");
        assert_eq!(result.errors.len(), 1);
        let msg = &result.errors[0].message;
        assert!(msg.contains("';'"), "message: {}", msg);
        assert!(msg.contains("end of input"), "message: {}", msg);
    }

    #[test]
    fn unclosed_paren_is_reported() {
        let result = parse("x = (a + b;");
        assert!(!result.is_ok());
        assert!(result.errors[0].message.contains("')'"));
    }

    #[test]
    fn garbage_token_is_not_a_statement() {
        let result = parse(") x = 1;");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("statement"));
        // The valid assignment after the garbage still parses.
        assert_eq!(result.arena.get(result.root).children.len(), 1);
    }
}
