//! fppc - the fpp compiler CLI.
//!
//! Compiles `.fpp` source files to C++ text; `lex` and `parse` dump the
//! intermediate token stream and syntax tree for debugging.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use fpp_ast::LineMap;

mod output;

fn main() {
    output::init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: fppc lex <file.fpp>");
                process::exit(1);
            }
            cmd_lex(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: fppc parse <file.fpp>");
                process::exit(1);
            }
            cmd_parse(&args[2]);
        }
        "build" => {
            if args.len() < 3 {
                eprintln!("Usage: fppc build <file.fpp> [-o out.cpp]");
                process::exit(1);
            }
            let out = parse_output_flag(&args[3..]);
            cmd_build(&args[2], out.as_deref());
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("fppc {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            // Bare filename compiles it
            cmd_build(other, None);
        }
    }
}

fn print_usage() {
    println!("fppc - compile fpp source to ready-to-run C++");
    println!();
    println!("Usage: fppc <command> [args]");
    println!();
    println!("Commands:");
    println!("  build <file> [-o out]  Compile a file (default for a bare filename)");
    println!("  lex <file>             Tokenize a file and print tokens");
    println!("  parse <file>           Parse a file and print the syntax tree");
    println!("  help                   Show this help");
    println!("  version                Show version");
}

fn parse_output_flag(rest: &[String]) -> Option<PathBuf> {
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        if arg == "-o" {
            match iter.next() {
                Some(path) => return Some(PathBuf::from(path)),
                None => {
                    eprintln!("Missing path after -o");
                    process::exit(1);
                }
            }
        }
    }
    None
}

fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            process::exit(1);
        }
    }
}

fn cmd_lex(path: &str) {
    let source = read_source(path);

    let result = fpp_lexer::Lexer::new(&source).tokenize();
    for error in &result.errors {
        show_error(&source, path, error.span.start, &error.message);
    }

    if !result.is_ok() {
        eprintln!("\n{}", output::banner_failed("Lex", result.errors.len()));
        process::exit(1);
    }

    for tok in &result.tokens {
        println!("{:4}:{:<4} {:?} {}", tok.span.start, tok.span.end, tok.kind, tok.text);
    }
    println!("\n{}", output::banner_ok(&format!("Lex: {} tokens", result.tokens.len())));
}

fn cmd_parse(path: &str) {
    let source = read_source(path);

    let lex_result = fpp_lexer::Lexer::new(&source).tokenize();
    for error in &lex_result.errors {
        show_error(&source, path, error.span.start, &error.message);
    }
    if !lex_result.is_ok() {
        eprintln!("\n{}", output::banner_failed("Lex", lex_result.errors.len()));
        process::exit(1);
    }

    let result = fpp_parser::Parser::new(lex_result.tokens).parse();
    for error in &result.errors {
        show_error(&source, path, error.span.start, &error.message);
    }
    if !result.is_ok() {
        eprintln!("\n{}", output::banner_failed("Parse", result.errors.len()));
        process::exit(1);
    }

    print!("{}", result.arena.dump(result.root));
    println!("\n{}", output::banner_ok("Parse"));
}

fn cmd_build(path: &str, out_path: Option<&Path>) {
    let source = read_source(path);

    let lex_result = fpp_lexer::Lexer::new(&source).tokenize();
    for error in &lex_result.errors {
        show_error(&source, path, error.span.start, &error.message);
    }
    if !lex_result.is_ok() {
        eprintln!("\n{}", output::banner_failed("Lex", lex_result.errors.len()));
        process::exit(1);
    }

    let parse_result = fpp_parser::Parser::new(lex_result.tokens).parse();
    for error in &parse_result.errors {
        show_error(&source, path, error.span.start, &error.message);
    }
    // Emission is gated on a clean parse.
    if !parse_result.is_ok() {
        eprintln!("\n{}", output::banner_failed("Parse", parse_result.errors.len()));
        process::exit(1);
    }

    let text = match fpp_emit::emit(&parse_result.arena, parse_result.root) {
        Ok(text) => text,
        Err(e) => {
            // Structural fault: a compiler defect, not a user error.
            eprintln!("{}: internal: {}", output::error_label(), e);
            process::exit(1);
        }
    };

    let out_path = out_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Path::new(path).with_extension("cpp"));
    if let Err(e) = fs::write(&out_path, text) {
        eprintln!("Error writing {}: {}", out_path.display(), e);
        process::exit(1);
    }
    println!("{}", output::banner_ok(&format!("Build: {}", out_path.display())));
}

/// Print a diagnostic with the offending source line and a caret.
fn show_error(source: &str, path: &str, pos: usize, message: &str) {
    let line_map = LineMap::new(source);
    let (line, col) = line_map.offset_to_line_col(pos);
    let text = line_map.line_text(source, line).unwrap_or("");

    eprintln!();
    eprintln!("{}: {}", output::error_label(), message);
    eprintln!("  {} {}:{}:{}", output::error_arrow(), path, line, col);
    eprintln!("    {}", output::pipe());
    eprintln!("{} {} {}", output::line_number(line), output::pipe(), text);
    eprintln!(
        "    {} {}{}",
        output::pipe(),
        " ".repeat((col as usize).saturating_sub(1)),
        output::caret()
    );
}
