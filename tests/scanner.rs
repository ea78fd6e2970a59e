#[cfg(test)]
mod scanner_tests {
    use spartie::scanner::*;
    use spartie::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source.as_bytes());
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
    fn test_scanner_02_operators() {
        assert_token_sequence(
            "! != = == > >= < <= - / ;",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::MINUS, "-"),
                (TokenType::SLASH, "/"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "var answer = null; while if else print and or true false done",
            &[
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "answer"),
                (TokenType::EQUAL, "="),
                (TokenType::NULL, "null"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::WHILE, "while"),
                (TokenType::IF, "if"),
                (TokenType::ELSE, "else"),
                (TokenType::PRINT, "print"),
                (TokenType::AND, "and"),
                (TokenType::OR, "or"),
                (TokenType::TRUE, "true"),
                (TokenType::FALSE, "false"),
                (TokenType::IDENTIFIER, "done"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_number_literals_carry_values() {
        let tokens: Vec<Token> = Scanner::new(b"3 3.14 0.5")
            .collect::<Result<Vec<_>, _>>()
            .expect("valid numbers should scan");

        let values: Vec<f64> = tokens
            .iter()
            .filter_map(|t| match t.token_type {
                TokenType::NUMBER(n) => Some(n),
                _ => None,
            })
            .collect();

        assert_eq!(values, vec![3.0, 3.14, 0.5]);
    }

    #[test]
    fn test_scanner_05_string_literal() {
        let tokens: Vec<Token> = Scanner::new(b"\"hello world\"")
            .collect::<Result<Vec<_>, _>>()
            .expect("string should scan");

        assert_eq!(tokens.len(), 2); // STRING + EOF
        assert_eq!(tokens[0].lexeme, "\"hello world\"");

        match &tokens[0].token_type {
            TokenType::STRING(s) => assert_eq!(s, "hello world"),
            other => panic!("Expected STRING token, got {:?}", other),
        }
    }

    #[test]
    fn test_scanner_06_unterminated_string() {
        let results: Vec<_> = Scanner::new(b"\"oops").collect();

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();

        assert_eq!(errors.len(), 1);
        assert!(
            errors[0].contains("Unterminated string"),
            "Error message should mention the unterminated string, got: {}",
            errors[0]
        );
    }

    #[test]
    fn test_scanner_07_comments_and_lines() {
        let tokens: Vec<Token> = Scanner::new(b"// a comment\nvar x")
            .collect::<Result<Vec<_>, _>>()
            .expect("comment input should scan");

        assert_eq!(tokens[0].token_type, TokenType::VAR);
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[1].token_type, TokenType::IDENTIFIER);
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let scanner = Scanner::new(source.as_bytes());

        // Collect all results (both tokens and errors)
        let results: Vec<_> = scanner.collect();

        // We expect this sequence:
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

        let error_count = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(error_count, 2, "Expected 2 error messages");

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            let message = err.to_string();
            assert!(
                message.contains("Unexpected character"),
                "Error message should contain 'Unexpected character', got: {}",
                message
            );
        }

        // Helper function
        fn assert_token_matches(
            result: &Result<Token, spartie::error::SpartieError>,
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
}
