use super::*;

/// Significant tokens as the lexer reports them.
#[derive(Clone, Copy)]
enum Tok {
    Word(&'static str),
    Punct(&'static str),
    Literal,
    Template { resumes: bool, opens_hole: bool },
    Newline,
}

fn feed(tokens: &[Tok]) -> ScanContext {
    let mut ctx = ScanContext::new();
    for (index, tok) in (0u64..).zip(tokens) {
        match *tok {
            Tok::Word(word) => ctx.on_identifier(word.as_bytes()),
            Tok::Punct(text) => match Punctuator::from_lexeme(text.as_bytes()) {
                Some(punct) => ctx.on_punctuator(punct),
                None => panic!("not a punctuator: {text}"),
            },
            Tok::Literal => ctx.on_literal(),
            Tok::Template {
                resumes,
                opens_hole,
            } => ctx.on_template(resumes, opens_hole, index),
            Tok::Newline => ctx.on_line_terminator(),
        }
    }
    ctx
}

use Tok::{Literal, Newline, Punct as P, Word as W};

// === Initial state ===

#[test]
fn starts_at_statement() {
    let ctx = ScanContext::new();
    assert_eq!(ctx.state(), ScanState::Statement);
    assert!(ctx.regex_allowed());
    assert!(ctx.at_line_start());
    assert_eq!(ctx.depth(), 0);
}

// === Operands and operators ===

#[test]
fn identifiers_and_literals_end_operands() {
    assert!(!feed(&[W("a")]).regex_allowed());
    assert!(!feed(&[Literal]).regex_allowed());
    assert!(!feed(&[W("this")]).regex_allowed());
    assert!(!feed(&[W("true")]).regex_allowed());
}

#[test]
fn operators_expect_operands() {
    assert!(feed(&[W("a"), P("=")]).regex_allowed());
    assert!(feed(&[W("a"), P("(")]).regex_allowed());
    assert!(feed(&[W("a"), P(",")]).regex_allowed());
    assert!(feed(&[W("typeof")]).regex_allowed());
    assert!(feed(&[W("return")]).regex_allowed());
}

#[test]
fn property_names_are_identifiers() {
    let ctx = feed(&[W("a"), P("."), W("return")]);
    assert_eq!(ctx.state(), ScanState::Operator);
    let ctx = feed(&[W("a"), P("?."), W("if")]);
    assert_eq!(ctx.state(), ScanState::Operator);
}

#[test]
fn postfix_increment_keeps_operator() {
    assert!(!feed(&[W("a"), P("++")]).regex_allowed());
    assert!(feed(&[W("a"), P("="), P("++")]).regex_allowed());
}

#[test]
fn closing_bracket_ends_operand() {
    assert!(!feed(&[W("a"), P("["), Literal, P("]")]).regex_allowed());
}

// === Parentheses ===

#[test]
fn statement_parens_close_to_statement() {
    let ctx = feed(&[W("if"), P("("), W("a"), P(")")]);
    assert_eq!(ctx.state(), ScanState::Statement);
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn ordinary_parens_close_to_operator() {
    let ctx = feed(&[P("("), W("a"), P(")")]);
    assert_eq!(ctx.state(), ScanState::Operator);
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn nested_parens_inside_statement_head() {
    let ctx = feed(&[W("while"), P("("), W("f"), P("("), P(")"), P(")")]);
    assert_eq!(ctx.state(), ScanState::Statement);
}

#[test]
fn for_await_keeps_statement_head() {
    let ctx = feed(&[W("for"), W("await"), P("("), W("x"), P(")")]);
    assert_eq!(ctx.state(), ScanState::Statement);
}

#[test]
fn unbalanced_close_paren_is_operator() {
    let ctx = feed(&[P(")")]);
    assert_eq!(ctx.state(), ScanState::Operator);
    assert_eq!(ctx.depth(), 0);
}

// === Braces ===

#[test]
fn block_at_statement_start() {
    let ctx = feed(&[P("{"), P("}")]);
    assert_eq!(ctx.state(), ScanState::Statement);
}

#[test]
fn object_in_operand_position() {
    let ctx = feed(&[W("a"), P("="), P("{"), P("}")]);
    assert_eq!(ctx.state(), ScanState::Operator);
    let ctx = feed(&[P("("), P("{"), P("}")]);
    assert_eq!(ctx.state(), ScanState::Operator);
}

#[test]
fn object_keys_are_property_names() {
    let ctx = feed(&[W("x"), P("="), P("{"), W("if")]);
    assert_eq!(ctx.state(), ScanState::Operator);
}

#[test]
fn arrow_body_is_block() {
    let ctx = feed(&[P("("), P(")"), P("=>"), P("{"), P("}")]);
    assert_eq!(ctx.state(), ScanState::Statement);
}

#[test]
fn stray_close_brace_is_statement() {
    let ctx = feed(&[P("}")]);
    assert_eq!(ctx.state(), ScanState::Statement);
}

// === Functions & classes ===

#[test]
fn function_declaration_body_closes_to_statement() {
    let ctx = feed(&[
        W("function"),
        W("f"),
        P("("),
        P(")"),
        P("{"),
        P("}"),
    ]);
    assert_eq!(ctx.state(), ScanState::Statement);
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn function_expression_body_closes_to_operator() {
    let ctx = feed(&[
        W("x"),
        P("="),
        W("function"),
        P("("),
        P(")"),
        P("{"),
        P("}"),
    ]);
    assert_eq!(ctx.state(), ScanState::Operator);
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn generator_star_keeps_the_header() {
    let ctx = feed(&[
        P("("),
        W("function"),
        P("*"),
        W("g"),
        P("("),
        P(")"),
        P("{"),
        P("}"),
    ]);
    assert_eq!(ctx.state(), ScanState::Operator);
    assert_eq!(ctx.depth(), 1);
}

#[test]
fn async_function_uses_position_before_async() {
    let expr = feed(&[
        W("x"),
        P("="),
        W("async"),
        W("function"),
        P("("),
        P(")"),
        P("{"),
        P("}"),
    ]);
    assert_eq!(expr.state(), ScanState::Operator);
    let decl = feed(&[
        W("async"),
        W("function"),
        W("f"),
        P("("),
        P(")"),
        P("{"),
        P("}"),
    ]);
    assert_eq!(decl.state(), ScanState::Statement);
}

#[test]
fn async_alone_is_an_identifier() {
    assert!(!feed(&[W("async")]).regex_allowed());
}

#[test]
fn method_body_after_params_is_block() {
    // class A { m() {} }
    let ctx = feed(&[
        W("class"),
        W("A"),
        P("{"),
        W("m"),
        P("("),
        P(")"),
        P("{"),
        P("}"),
    ]);
    assert_eq!(ctx.state(), ScanState::Statement);
    assert_eq!(ctx.depth(), 1);
}

#[test]
fn class_declaration_vs_expression() {
    let decl = feed(&[W("class"), W("A"), P("{"), P("}")]);
    assert_eq!(decl.state(), ScanState::Statement);
    let expr = feed(&[W("x"), P("="), W("class"), P("{"), P("}")]);
    assert_eq!(expr.state(), ScanState::Operator);
}

#[test]
fn class_heritage_with_call() {
    // x = class extends f(function () {}) {}
    let ctx = feed(&[
        W("x"),
        P("="),
        W("class"),
        W("extends"),
        W("f"),
        P("("),
        W("function"),
        P("("),
        P(")"),
        P("{"),
        P("}"),
        P(")"),
        P("{"),
        P("}"),
    ]);
    assert_eq!(ctx.state(), ScanState::Operator);
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn body_marker_is_dropped_by_other_tokens() {
    // function f() x {}: the brace is an ordinary block.
    let ctx = feed(&[W("function"), W("f"), P("("), P(")"), W("x")]);
    assert_eq!(ctx.depth(), 0);
}

// === Templates ===

#[test]
fn template_holes_nest() {
    let mut ctx = ScanContext::new();
    ctx.on_template(false, true, 0);
    assert!(ctx.right_brace_resumes_template());
    assert!(ctx.regex_allowed());
    ctx.on_punctuator(Punctuator::LeftBrace);
    assert!(!ctx.right_brace_resumes_template());
    ctx.on_punctuator(Punctuator::RightBrace);
    assert!(ctx.right_brace_resumes_template());
    ctx.on_template(true, false, 7);
    assert_eq!(ctx.depth(), 0);
    assert_eq!(ctx.state(), ScanState::Operator);
    assert_eq!(ctx.open_template(), None);
}

#[test]
fn open_template_reports_innermost_backtick() {
    let mut ctx = ScanContext::new();
    assert_eq!(ctx.open_template(), None);
    // `a${ `b${
    ctx.on_template(false, true, 0);
    ctx.on_template(false, true, 5);
    assert_eq!(ctx.open_template(), Some(5));
    // }c` closes the inner template; `}d${` keeps the outer backtick.
    ctx.on_template(true, false, 9);
    assert_eq!(ctx.open_template(), Some(0));
    ctx.on_template(true, true, 12);
    assert_eq!(ctx.open_template(), Some(0));
    ctx.on_template(true, false, 16);
    assert_eq!(ctx.open_template(), None);
}

#[test]
fn hole_resumes_past_unclosed_parens() {
    let ctx = feed(&[
        Tok::Template {
            resumes: false,
            opens_hole: true,
        },
        P("("),
    ]);
    assert!(ctx.right_brace_resumes_template());
}

#[test]
fn close_brace_never_pops_a_hole() {
    let ctx = feed(&[
        Tok::Template {
            resumes: false,
            opens_hole: true,
        },
        P("}"),
    ]);
    assert_eq!(ctx.depth(), 1);
    assert!(ctx.right_brace_resumes_template());
}

// === Line terminators ===

#[test]
fn restricted_production_ends_at_newline() {
    let ctx = feed(&[W("return"), Newline, P("{"), P("}")]);
    assert_eq!(ctx.state(), ScanState::Statement);
    let ctx = feed(&[W("return"), P("{"), P("}")]);
    assert_eq!(ctx.state(), ScanState::Operator);
}

#[test]
fn newline_elsewhere_keeps_state() {
    let ctx = feed(&[W("a"), Newline]);
    assert_eq!(ctx.state(), ScanState::Operator);
    assert!(ctx.at_line_start());
}

#[test]
fn significant_token_clears_line_start() {
    let ctx = feed(&[Newline, W("a")]);
    assert!(!ctx.at_line_start());
}
