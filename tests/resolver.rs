mod common;

#[cfg(test)]
mod resolver_tests {
    use super::common::{run, session};
    use rox::interpreter::Interpreter;
    use rox::parser::Parser;
    use rox::resolver::Resolver;
    use rox::scanner::Scanner;

    fn resolve_messages(source: &str) -> Vec<String> {
        let (tokens, _) = Scanner::new(source).scan_tokens();
        let statements = Parser::new(tokens).parse().expect("parses");
        let mut interpreter = Interpreter::new();

        match Resolver::new(&mut interpreter).resolve(&statements) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn self_initializer_in_local_scope_is_rejected() {
        assert_eq!(
            resolve_messages("var a = 1;\n{\n  var a = a;\n}"),
            vec!["[line 3] Error at 'a': Can't read local variable in its own initializer."]
        );
    }

    #[test]
    fn self_initializer_at_top_scope_is_rejected() {
        assert_eq!(
            resolve_messages("var a = a;"),
            vec!["[line 1] Error at 'a': Can't read local variable in its own initializer."]
        );
    }

    #[test]
    fn self_initializer_error_prevents_execution() {
        let (out, report) = run("print 1;\nvar a = a;");

        assert_eq!(out, "");
        assert_eq!(report.resolve_errors.len(), 1);
        assert!(report.runtime_error.is_none());
        assert_eq!(report.exit_code(), Some(65));
    }

    #[test]
    fn top_level_return_is_rejected() {
        assert_eq!(
            resolve_messages("return 1;"),
            vec!["[line 1] Error at 'return': Can't return from top-level code."]
        );
    }

    #[test]
    fn return_inside_nested_function_is_fine_and_flag_is_restored() {
        let source = "fun outer() {\n  fun inner() { return 1; }\n  return inner();\n}\nreturn 2;";

        assert_eq!(
            resolve_messages(source),
            vec!["[line 5] Error at 'return': Can't return from top-level code."]
        );
    }

    #[test]
    fn duplicate_local_declaration_is_rejected() {
        assert_eq!(
            resolve_messages("fun f(a) {\n  var a = 1;\n}"),
            vec!["[line 2] Error at 'a': Already a variable with this name in this scope."]
        );
    }

    #[test]
    fn global_redeclaration_is_allowed() {
        assert!(resolve_messages("var a = 1; var a = 2;").is_empty());
    }

    #[test]
    fn global_can_be_redefined_from_its_own_value() {
        assert!(resolve_messages("var count = 1;\nvar count = count + 1;").is_empty());
        assert!(resolve_messages("fun f() {}\nvar f = f;").is_empty());

        let (out, report) = run("var count = 1;\nvar count = count + 1;\nprint count;");
        assert!(report.exit_code().is_none());
        assert_eq!(out, "2\n");
    }

    #[test]
    fn global_from_an_earlier_run_can_be_redefined_from_its_own_value() {
        let (mut lox, buffer) = session();

        assert!(lox.run("var count = 1;").exit_code().is_none());

        let report = lox.run("var count = count + 1; print count;");
        assert!(report.resolve_errors.is_empty());
        assert_eq!(buffer.contents(), "2\n");
    }

    #[test]
    fn self_initializer_after_a_global_of_another_name_is_still_rejected() {
        assert_eq!(
            resolve_messages("var a = 1;\nvar b = b;"),
            vec!["[line 2] Error at 'b': Can't read local variable in its own initializer."]
        );
    }

    #[test]
    fn failed_pass_leaves_no_resolved_locals_behind() {
        let (tokens, _) = Scanner::new("fun f(x) { return x; }\nreturn;").scan_tokens();
        let statements = Parser::new(tokens).parse().expect("parses");
        let mut interpreter = Interpreter::new();

        assert!(Resolver::new(&mut interpreter).resolve(&statements).is_err());
        assert_eq!(interpreter.resolved_locals(), 0);

        let (tokens, _) = Scanner::new("fun g(y) { return y; }").scan_tokens();
        let statements = Parser::new(tokens).parse().expect("parses");

        assert!(Resolver::new(&mut interpreter).resolve(&statements).is_ok());
        assert_eq!(interpreter.resolved_locals(), 1);
    }

    #[test]
    fn all_errors_are_collected() {
        let source = "return;\n{ var b = b; }\nreturn;";

        assert_eq!(resolve_messages(source).len(), 3);
    }

    #[test]
    fn resolved_distances_pick_the_defining_scope() {
        // `a` inside show() must bind to the global, not the later block local.
        let source = r#"
var a = "global";
{
  fun show() { print a; }
  show();
  var a = "block";
  show();
}
"#;
        let (out, report) = run(source);

        assert!(report.exit_code().is_none());
        assert_eq!(out, "global\nglobal\n");
    }
}
