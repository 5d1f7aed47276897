#[cfg(test)]
mod scanner_tests {
    use rox::error::LoxError;
    use rox::scanner::*;
    use rox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_two_char_operators_munch_longest() {
        assert_token_sequence(
            "!= ! == = <= < >= >",
            &[
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::BANG, "!"),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::EQUAL, "="),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::LESS, "<"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::GREATER, ">"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "var orchid = nil; fun or_ else",
            &[
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "orchid"),
                (TokenType::EQUAL, "="),
                (TokenType::NIL, "nil"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::FUN, "fun"),
                (TokenType::IDENTIFIER, "or_"),
                (TokenType::ELSE, "else"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_numbers_leave_trailing_dot() {
        let (tokens, errors) = Scanner::new("12.5 7.").scan_tokens();
        assert!(errors.is_empty());

        assert_eq!(tokens[0].literal(), Some(rox::ast::LiteralValue::Number(12.5)));
        assert_eq!(tokens[1].lexeme, "7");
        assert_eq!(tokens[1].literal(), Some(rox::ast::LiteralValue::Number(7.0)));
        assert_eq!(tokens[2].token_type, TokenType::DOT);
        assert_eq!(tokens[3].token_type, TokenType::EOF);
    }

    #[test]
    fn test_scanner_05_strings_and_comments() {
        let (tokens, errors) = Scanner::new("// leading\n\"hi\nthere\" // trailing").scan_tokens();
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 2);

        match &tokens[0].token_type {
            TokenType::STRING(s) => assert_eq!(s, "hi\nthere"),
            other => panic!("expected string, got {:?}", other),
        }
        assert_eq!(tokens[0].lexeme, "\"hi\nthere\"");
        assert_eq!(tokens[1].token_type, TokenType::EOF);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn test_scanner_06_unterminated_string_keeps_scanning() {
        let (tokens, errors) = Scanner::new("print \"oops\n\n").scan_tokens();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "[line 3] Error: Unterminated string.");

        let last = tokens.last().expect("EOF token");
        assert_eq!(last.token_type, TokenType::EOF);
        assert_eq!(last.line, 3);
    }

    #[test]
    fn test_scanner_07_eof_line_tracks_newlines() {
        for (source, line) in [("", 1), ("\n", 2), ("a\nb\n\n", 4), ("// c\n// d", 2)] {
            let (tokens, _) = Scanner::new(source).scan_tokens();
            let last = tokens.last().expect("EOF token");

            assert_eq!(last.token_type, TokenType::EOF, "source {:?}", source);
            assert_eq!(last.line, line, "source {:?}", source);
            assert_eq!(
                tokens.iter().filter(|t| t.token_type == TokenType::EOF).count(),
                1
            );
        }
    }

    #[test]
    fn test_scanner_08_display_format() {
        let (tokens, _) = Scanner::new("x 42 \"s\" 1.5").scan_tokens();
        let printed: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        assert_eq!(
            printed,
            vec![
                "IDENTIFIER x null",
                "NUMBER 42 42.0",
                "STRING \"s\" s",
                "NUMBER 1.5 1.5",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let scanner = Scanner::new(source);

        let results: Vec<_> = scanner.collect();

        // COMMA, DOT, error '$', LEFT_PAREN, error '#', EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let error_count = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(error_count, 2, "Expected 2 error messages");

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(
                err.to_string().contains("Unexpected character"),
                "Error message should contain 'Unexpected character', got: {}",
                err
            );
        }

        fn assert_token_matches(
            result: &Result<Token, LoxError>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(
                        token.token_type, expected_type,
                        "Expected token type {:?}, got {:?}",
                        expected_type, token.token_type
                    );
                    assert_eq!(
                        token.lexeme, expected_lexeme,
                        "Expected lexeme '{}', got '{}'",
                        expected_lexeme, token.lexeme
                    );
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }

    #[test]
    fn test_multibyte_character_reported_once() {
        let (tokens, errors) = Scanner::new("a é b").scan_tokens();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "[line 1] Error: Unexpected character: é");
        assert_eq!(tokens.len(), 3);
    }
}
