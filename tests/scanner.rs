#[cfg(test)]
mod scanner_tests {
    use rox as lox;

    use lox::error::{ErrorSink, LoxError};
    use lox::scanner::*;
    use lox::token::*;

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
    fn test_scanner_02_two_char_operators_munch() {
        assert_token_sequence(
            "! != = == < <= > >= / ;",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::SLASH, "/"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::EOF, ""),
            ],
        );

        // "===" is "==" then "="
        assert_token_sequence(
            "===",
            &[
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::EQUAL, "="),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "and andy or_ _x fun classy class nil while",
            &[
                (TokenType::AND, "and"),
                (TokenType::IDENTIFIER, "andy"),
                (TokenType::IDENTIFIER, "or_"),
                (TokenType::IDENTIFIER, "_x"),
                (TokenType::FUN, "fun"),
                (TokenType::IDENTIFIER, "classy"),
                (TokenType::CLASS, "class"),
                (TokenType::NIL, "nil"),
                (TokenType::WHILE, "while"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_numbers() {
        assert_token_sequence(
            "123 45.67 8.",
            &[
                (TokenType::NUMBER(123.0), "123"),
                (TokenType::NUMBER(45.67), "45.67"),
                (TokenType::NUMBER(8.0), "8"),
                (TokenType::DOT, "."),
                (TokenType::EOF, ""),
            ],
        );

        // No leading-dot numbers and no sign: ".5" is DOT then 5, "-1" is MINUS then 1.
        assert_token_sequence(
            ".5 -1",
            &[
                (TokenType::DOT, "."),
                (TokenType::NUMBER(5.0), "5"),
                (TokenType::MINUS, "-"),
                (TokenType::NUMBER(1.0), "1"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_05_strings_span_lines() {
        let tokens: Vec<Token> = Scanner::new("\"a\nb\" x").filter_map(Result::ok).collect();

        assert_eq!(tokens[0].token_type, TokenType::STRING("a\nb".to_string()));
        assert_eq!(tokens[0].lexeme, "\"a\nb\"");
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[1].token_type, TokenType::IDENTIFIER);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_scanner_06_comments_and_lines() {
        let tokens: Vec<Token> = Scanner::new("// hi there (\nprint // trailing\n\n1")
            .filter_map(Result::ok)
            .collect();

        let kinds: Vec<(&str, usize)> = tokens
            .iter()
            .map(|t| (t.token_type.name(), t.line))
            .collect();

        assert_eq!(kinds, vec![("PRINT", 2), ("NUMBER", 4), ("EOF", 4)]);
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let scanner = Scanner::new(source);

        let results: Vec<_> = scanner.collect();

        // 0: COMMA ','
        // 1: DOT '.'
        // 2: Error for '$'
        // 3: LEFT_PAREN '('
        // 4: Error for '#'
        // 5: EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();

        assert_eq!(
            errors,
            vec![
                "[line 1] Error: Unexpected character.",
                "[line 1] Error: Unexpected character."
            ]
        );

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
    fn test_unterminated_string_reports_final_line() {
        let mut sink = ErrorSink::new();
        let tokens = Scanner::new("print \"never\nclosed").scan_tokens(&mut sink);

        assert!(sink.had_error());
        assert_eq!(sink.errors().len(), 1);
        assert_eq!(
            sink.errors()[0].to_string(),
            "[line 2] Error: Unterminated string."
        );

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].token_type, TokenType::PRINT);
        assert_eq!(tokens[1].token_type, TokenType::EOF);
    }

    #[test]
    fn test_unicode_input_never_panics() {
        let mut sink = ErrorSink::new();
        let tokens = Scanner::new("héllo ✓ \"ünï ✓\" 🦀").scan_tokens(&mut sink);

        // 'é', '✓' and the crab are one error each.
        assert_eq!(sink.errors().len(), 3);

        let kinds: Vec<&str> = tokens.iter().map(|t| t.token_type.name()).collect();
        assert_eq!(kinds, vec!["IDENTIFIER", "IDENTIFIER", "STRING", "EOF"]);
        assert_eq!(tokens[2].token_type, TokenType::STRING("ünï ✓".to_string()));
    }

    #[test]
    fn test_empty_source_is_just_eof() {
        let mut sink = ErrorSink::new();
        let tokens = Scanner::new("").scan_tokens(&mut sink);

        assert!(!sink.had_error());
        assert_eq!(tokens, vec![Token::new(TokenType::EOF, "", 1)]);
    }

    #[test]
    fn test_scanner_is_fused() {
        let mut scanner = Scanner::new("x");

        assert!(scanner.next().is_some());
        assert!(scanner.next().is_some());
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_token_display() {
        let tokens: Vec<String> = Scanner::new("3 2.5 \"hi\" foo")
            .filter_map(Result::ok)
            .map(|t| t.to_string())
            .collect();

        assert_eq!(
            tokens,
            vec![
                "NUMBER 3 3.0",
                "NUMBER 2.5 2.5",
                "STRING \"hi\" hi",
                "IDENTIFIER foo null",
                "EOF  null",
            ]
        );
    }

    #[test]
    fn test_token_literal_payload() {
        let tokens: Vec<Token> = Scanner::new("42 \"s\" x").filter_map(Result::ok).collect();

        assert_eq!(
            tokens[0].literal(),
            Some(lox::ast::LiteralValue::Number(42.0))
        );
        assert_eq!(
            tokens[1].literal(),
            Some(lox::ast::LiteralValue::Str("s".to_string()))
        );
        assert_eq!(tokens[2].literal(), None);

        // Kind comparison ignores the payload; structural equality does not.
        assert!(tokens[0].is(&TokenType::NUMBER(0.0)));
        assert_ne!(tokens[0].token_type, TokenType::NUMBER(0.0));
    }
}
