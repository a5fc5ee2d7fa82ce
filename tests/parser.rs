#[cfg(test)]
mod parser_tests {
    use rox as lox;

    use lox::ast::{Expr, LiteralValue, Stmt};
    use lox::ast_printer::AstPrinter;
    use lox::error::ErrorSink;
    use lox::parser::Parser;
    use lox::runner::parse_source;
    use lox::scanner::Scanner;
    use lox::token::TokenType;

    fn parse(source: &str) -> (Vec<Stmt>, Vec<String>) {
        let mut sink = ErrorSink::new();
        let statements = parse_source(source, &mut sink);
        let errors = sink.drain().map(|e| e.to_string()).collect();

        (statements, errors)
    }

    /// Parse a single expression statement and render it in prefix form.
    fn print_expr(source: &str) -> String {
        let (statements, errors) = parse(source);

        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        assert_eq!(statements.len(), 1);

        match &statements[0] {
            Stmt::Expression(expr) => AstPrinter::print(expr),
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_factor_binds_tighter_than_term() {
        assert_eq!(print_expr("1 + 2 * 3;"), "(+ 1.0 (* 2.0 3.0))");
        assert_eq!(print_expr("(1 + 2) * 3;"), "(* (group (+ 1.0 2.0)) 3.0)");
    }

    #[test]
    fn test_comparison_is_left_associative() {
        assert_eq!(
            print_expr("1 <= 2 >= 3 < 4 > 5;"),
            "(> (< (>= (<= 1.0 2.0) 3.0) 4.0) 5.0)"
        );
        assert_eq!(print_expr("1 - 2 - 3;"), "(- (- 1.0 2.0) 3.0)");
    }

    #[test]
    fn test_binary_tree_shape() {
        let (statements, _) = parse("1 + 2 * 3;");

        let Stmt::Expression(Expr::Binary {
            left,
            operator,
            right,
        }) = &statements[0]
        else {
            panic!("expected a binary expression");
        };

        assert_eq!(operator.token_type, TokenType::PLUS);
        assert_eq!(**left, Expr::Literal(LiteralValue::Number(1.0)));
        assert!(matches!(
            **right,
            Expr::Binary { ref operator, .. } if operator.token_type == TokenType::STAR
        ));
    }

    #[test]
    fn test_equality_and_unary() {
        assert_eq!(print_expr("!-1 == 2 != nil;"), "(!= (== (! (- 1.0)) 2.0) nil)");
        assert_eq!(print_expr("!!true;"), "(! (! true))");
    }

    #[test]
    fn test_logical_precedence() {
        assert_eq!(print_expr("a or b and c;"), "(or a (and b c))");
        assert_eq!(print_expr("a and b or c;"), "(or (and a b) c)");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(print_expr("a = b = 1;"), "(= a (= b 1.0))");
        assert_eq!(print_expr("a = 1 or 2;"), "(= a (or 1.0 2.0))");
    }

    #[test]
    fn test_call_chaining() {
        assert_eq!(print_expr("f()();"), "(call (call f))");
        assert_eq!(print_expr("f(1, \"two\")(x);"), "(call (call f 1.0 two) x)");
    }

    #[test]
    fn test_invalid_assignment_target_is_reported_not_fatal() {
        let (statements, errors) = parse("1 = 2;\nprint 3;");

        assert_eq!(
            errors,
            vec!["[line 1] Error at '=': Invalid assignment target."]
        );
        // Both statements survive: the error did not unwind.
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_unmatched_paren_recovers_at_next_statement() {
        let (statements, errors) = parse("print (1;\nprint 2;\nvar x = 3;");

        assert_eq!(
            errors,
            vec!["[line 1] Error at ';': Expect ')' after expression."]
        );
        assert_eq!(statements.len(), 2);
        assert!(matches!(statements[0], Stmt::Print(_)));
        assert!(matches!(statements[1], Stmt::Var { .. }));
    }

    #[test]
    fn test_multiple_independent_errors() {
        let (statements, errors) = parse("var = 1;\nprint 2;\nprint ;\nvar ok;");

        assert_eq!(
            errors,
            vec![
                "[line 1] Error at '=': Expect variable name.",
                "[line 3] Error at ';': Expect expression.",
            ]
        );
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_error_at_end() {
        let (_, errors) = parse("print 1");

        assert_eq!(errors, vec!["[line 1] Error at end: Expect ';' after value."]);
    }

    #[test]
    fn test_class_keyword_is_not_an_expression() {
        let (_, errors) = parse("class Foo {}");

        assert_eq!(
            errors,
            vec!["[line 1] Error at 'class': Expect expression."]
        );
    }

    #[test]
    fn test_for_desugars_to_while_in_block() {
        let (statements, errors) = parse("for (var i = 0; i < 3; i = i + 1) print i;");

        assert!(errors.is_empty());
        assert_eq!(statements.len(), 1);

        let Stmt::Block(outer) = &statements[0] else {
            panic!("expected the initializer block");
        };
        assert_eq!(outer.len(), 2);
        assert!(matches!(outer[0], Stmt::Var { .. }));

        let Stmt::While { condition, body } = &outer[1] else {
            panic!("expected a while loop");
        };
        assert_eq!(AstPrinter::print(condition), "(< i 3.0)");

        let Stmt::Block(inner) = body.as_ref() else {
            panic!("expected body block with increment");
        };
        assert!(matches!(inner[0], Stmt::Print(_)));
        assert!(matches!(inner[1], Stmt::Expression(Expr::Assign { .. })));
    }

    #[test]
    fn test_for_with_empty_clauses() {
        let (statements, errors) = parse("for (;;) print 1;");

        assert!(errors.is_empty());
        assert_eq!(
            statements,
            vec![Stmt::While {
                condition: Expr::Literal(LiteralValue::Bool(true)),
                body: Box::new(Stmt::Print(Expr::Literal(LiteralValue::Number(1.0)))),
            }]
        );
    }

    #[test]
    fn test_function_declaration() {
        let (statements, errors) = parse("fun add(a, b) { return a + b; }");

        assert!(errors.is_empty());

        let Stmt::Function(decl) = &statements[0] else {
            panic!("expected a function declaration");
        };

        assert_eq!(decl.name.lexeme, "add");

        let params: Vec<&str> = decl.params.iter().map(|p| p.lexeme.as_str()).collect();
        assert_eq!(params, vec!["a", "b"]);

        assert!(matches!(decl.body[0], Stmt::Return { value: Some(_), .. }));
    }

    #[test]
    fn test_top_level_return_is_rejected() {
        let (_, errors) = parse("return 1;");

        assert_eq!(
            errors,
            vec!["[line 1] Error at 'return': Can't return from top-level code."]
        );

        let (_, errors) = parse("fun f() { { if (true) return; } }");
        assert!(errors.is_empty());

        // Leaving a function body restores the top-level check.
        let (_, errors) = parse("fun f() { return; }\nreturn;");
        assert_eq!(
            errors,
            vec!["[line 2] Error at 'return': Can't return from top-level code."]
        );
    }

    #[test]
    fn test_argument_ceiling_is_soft() {
        let args = vec!["0"; 256].join(", ");
        let (statements, errors) = parse(&format!("f({});", args));

        assert_eq!(
            errors,
            vec!["[line 1] Error at '0': Can't have more than 255 arguments."]
        );
        assert_eq!(statements.len(), 1);

        let args = vec!["0"; 255].join(", ");
        let (_, errors) = parse(&format!("f({});", args));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_parameter_ceiling_is_soft() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let (statements, errors) = parse(&format!("fun f({}) {{}}", params.join(", ")));

        assert_eq!(
            errors,
            vec!["[line 1] Error at 'p255': Can't have more than 255 parameters."]
        );
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_parser_without_eof_token() {
        let mut sink = ErrorSink::new();
        let mut tokens: Vec<_> = Scanner::new("print 1;").filter_map(Result::ok).collect();
        tokens.pop();

        let statements = Parser::new(tokens).parse(&mut sink);

        assert!(!sink.had_error());
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_error_inside_block_resyncs_inside_block() {
        let (statements, errors) = parse("{ print ; print 1; }\nprint 2;");

        assert_eq!(errors, vec!["[line 1] Error at ';': Expect expression."]);
        assert_eq!(statements.len(), 2);

        let Stmt::Block(inner) = &statements[0] else {
            panic!("expected block");
        };
        assert_eq!(inner.len(), 1);
    }
}
