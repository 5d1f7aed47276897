#[cfg(test)]
mod parser_tests {
    use rox::ast::{Expr, LiteralValue, Stmt};
    use rox::ast_printer::AstPrinter;
    use rox::error::LoxError;
    use rox::parser::Parser;
    use rox::scanner::Scanner;

    fn parse(source: &str) -> Result<Vec<Stmt>, Vec<LoxError>> {
        let (tokens, errors) = Scanner::new(source).scan_tokens();
        assert!(errors.is_empty(), "unexpected lex errors: {:?}", errors);
        Parser::new(tokens).parse()
    }

    fn print_expr(source: &str) -> String {
        let (tokens, _) = Scanner::new(source).scan_tokens();
        let expr = Parser::new(tokens)
            .parse_expression()
            .unwrap_or_else(|e| panic!("parse failed: {:?}", e));
        AstPrinter.print(&expr)
    }

    fn messages(errors: &[LoxError]) -> Vec<String> {
        errors.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn precedence_climbs_from_assignment_to_primary() {
        assert_eq!(print_expr("1 + 2 * 3"), "(+ 1.0 (* 2.0 3.0))");
        assert_eq!(print_expr("(1 + 2) * 3"), "(* (group (+ 1.0 2.0)) 3.0)");
        assert_eq!(print_expr("!-x == y < 2"), "(== (! (- x)) (< y 2.0))");
        assert_eq!(
            print_expr("a or b and c"),
            "(or a (and b c))"
        );
    }

    #[test]
    fn binary_operators_associate_left() {
        assert_eq!(print_expr("1 - 2 - 3"), "(- (- 1.0 2.0) 3.0)");
        assert_eq!(print_expr("8 / 4 / 2"), "(/ (/ 8.0 4.0) 2.0)");
    }

    #[test]
    fn assignment_associates_right() {
        assert_eq!(print_expr("a = b = 1"), "(= a (= b 1.0))");
    }

    #[test]
    fn chained_calls_nest() {
        assert_eq!(print_expr("f(1)(2, 3)()"), "(call (call (call f 1.0) 2.0 3.0))");
    }

    #[test]
    fn for_loop_lowers_to_block_and_while() {
        let statements = parse("for (var i = 0; i < 3; i = i + 1) print i;").expect("parses");
        assert_eq!(statements.len(), 1);

        let Stmt::Block(outer) = &statements[0] else {
            panic!("expected block, got {:?}", statements[0]);
        };
        assert!(matches!(outer[0], Stmt::Var { .. }));

        let Stmt::While { body, .. } = &outer[1] else {
            panic!("expected while, got {:?}", outer[1]);
        };
        let Stmt::Block(inner) = body.as_ref() else {
            panic!("expected body block, got {:?}", body);
        };
        assert!(matches!(inner[0], Stmt::Print(_)));
        assert!(matches!(inner[1], Stmt::Expression(Expr::Assign { .. })));
    }

    #[test]
    fn empty_for_clauses_loop_on_true() {
        let statements = parse("for (;;) print 1;").expect("parses");

        match &statements[0] {
            Stmt::While { condition, body } => {
                assert_eq!(*condition, Expr::Literal(LiteralValue::Bool(true)));
                assert!(matches!(body.as_ref(), Stmt::Print(_)));
            }
            other => panic!("expected bare while, got {:?}", other),
        }
    }

    #[test]
    fn function_declaration_keeps_params_and_body() {
        let statements = parse("fun add(a, b) { return a + b; }").expect("parses");

        let Stmt::Function(decl) = &statements[0] else {
            panic!("expected function");
        };
        assert_eq!(decl.name.lexeme, "add");
        let params: Vec<&str> = decl.params.iter().map(|p| p.lexeme.as_str()).collect();
        assert_eq!(params, vec!["a", "b"]);
        assert!(matches!(decl.body[0], Stmt::Return { value: Some(_), .. }));
    }

    #[test]
    fn invalid_assignment_target_is_reported_once() {
        let errors = parse("1 + 2 = 3;").expect_err("must fail");

        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at '=': Invalid assignment target."]
        );
    }

    #[test]
    fn error_location_renders_at_end_for_eof() {
        let errors = parse("print 1").expect_err("must fail");

        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at end: Expect ';' after value."]
        );
    }

    #[test]
    fn one_error_per_malformed_statement() {
        let source = "var = 1;\nprint 1;\nprint (2;\nvar ok = 3;\nfun () {}\nprint ok;";
        let errors = parse(source).expect_err("must fail");

        assert_eq!(
            messages(&errors),
            vec![
                "[line 1] Error at '=': Expect variable name.",
                "[line 3] Error at ';': Expect ')' after expression.",
                "[line 5] Error at '(': Expect function name.",
            ]
        );
    }

    #[test]
    fn errors_inside_blocks_recover_within_the_block() {
        let errors = parse("{ var x = ; print x; }\nprint 2;").expect_err("must fail");

        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at ';': Expect expression."]
        );
    }

    #[test]
    fn argument_cap_is_reported_without_stopping() {
        let args = vec!["1"; 256].join(", ");
        let source = format!("f({});\nprint 1;", args);
        let errors = parse(&source).expect_err("must fail");

        assert_eq!(errors.len(), 1);
        assert!(errors[0]
            .to_string()
            .ends_with("Can't have more than 255 arguments."));
    }

    #[test]
    fn parameter_cap_is_reported_without_stopping() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let source = format!("fun f({}) {{}}\nprint 1;", params.join(", "));
        let errors = parse(&source).expect_err("must fail");

        assert_eq!(errors.len(), 1);
        assert!(errors[0]
            .to_string()
            .ends_with("Can't have more than 255 parameters."));
    }

    #[test]
    fn class_keyword_is_reserved_but_not_parsed() {
        let errors = parse("class Foo {}").expect_err("must fail");

        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at 'class': Expect expression."]
        );
    }
}
