#[cfg(test)]
mod interpreter_tests {
    use spartie::error::SpartieError;
    use spartie::interpreter::Interpreter;
    use spartie::parser::Parser;
    use spartie::scanner::Scanner;
    use spartie::token::Token;
    use spartie::value::Value;

    /// Scans, parses, and runs `source`, returning everything the program
    /// printed.
    fn run_source(source: &str) -> Result<String, SpartieError> {
        let tokens: Vec<Token> = Scanner::new(source.as_bytes()).collect::<Result<Vec<_>, _>>()?;

        let mut parser = Parser::new(&tokens);
        let statements = parser.parse()?;

        let mut out: Vec<u8> = Vec::new();
        Interpreter::with_output(&mut out).run(&statements)?;

        Ok(String::from_utf8(out).expect("interpreter output is UTF-8"))
    }

    fn run_ok(source: &str) -> String {
        run_source(source).expect("program should run")
    }

    fn run_err(source: &str) -> SpartieError {
        run_source(source).err().expect("program should fail")
    }

    /// Evaluates a single expression against a fresh interpreter.
    fn eval_source(source: &str) -> Result<Value, SpartieError> {
        let tokens: Vec<Token> = Scanner::new(source.as_bytes()).collect::<Result<Vec<_>, _>>()?;

        let mut parser = Parser::new(&tokens);
        let expr = parser.parse_expression()?;

        Interpreter::with_output(Vec::new()).evaluate(&expr)
    }

    // ─────────────────────────── printing ───────────────────────────

    #[test]
    fn test_interp_01_print_literals() {
        assert_eq!(
            run_ok("print 1; print \"hi\"; print true; print null;"),
            "1\nhi\ntrue\nnull\n"
        );
    }

    #[test]
    fn test_interp_02_print_fractional_number() {
        assert_eq!(run_ok("print 3.25;"), "3.25\n");
    }

    // ─────────────────────── operators and coercion ─────────────────

    #[test]
    fn test_interp_03_arithmetic_precedence() {
        assert_eq!(run_ok("print 1 + 2 * 3;"), "7\n");
        assert_eq!(run_ok("print (1 + 2) * 3;"), "9\n");
        assert_eq!(run_ok("print -3 + 1;"), "-2\n");
    }

    #[test]
    fn test_interp_04_addition_overloads() {
        assert_eq!(run_ok("print 2 + 3;"), "5\n");
        assert_eq!(run_ok("print \"ab\" + \"cd\";"), "abcd\n");
        assert_eq!(run_ok("print 2.5 + \"x\";"), "2.50x\n");
        assert_eq!(run_ok("print \"x\" + 2.5;"), "x2.50\n");
    }

    #[test]
    fn test_interp_05_integral_mixed_addition_keeps_two_decimals() {
        assert_eq!(run_ok("print 2 + \"x\";"), "2.00x\n");
    }

    #[test]
    fn test_interp_06_division_by_zero_is_infinity() {
        assert_eq!(run_ok("print 1 / 0;"), "inf\n");
        assert_eq!(run_ok("print -1 / 0;"), "-inf\n");
    }

    #[test]
    fn test_interp_07_comparisons() {
        assert_eq!(run_ok("print 1 < 2; print 2 <= 2; print 3 > 4; print 4 >= 4;"),
            "true\ntrue\nfalse\ntrue\n"
        );
    }

    #[test]
    fn test_interp_08_equality_has_no_coercion() {
        assert_eq!(run_ok("print null == null;"), "true\n");
        assert_eq!(run_ok("print null == 0;"), "false\n");
        assert_eq!(run_ok("print \"1\" == 1;"), "false\n");
        assert_eq!(run_ok("print 1 != 2;"), "true\n");
        assert_eq!(run_ok("print true == true;"), "true\n");
    }

    #[test]
    fn test_interp_09_unary_operators() {
        assert_eq!(run_ok("print !true; print !false;"), "false\ntrue\n");
        assert_eq!(run_ok("print -(3);"), "-3\n");
    }

    // ──────────────────────────── type errors ───────────────────────

    #[test]
    fn test_interp_10_arithmetic_on_string_is_a_type_error() {
        let err = run_err("print \"a\" - 1;");

        assert!(
            matches!(err, SpartieError::InvalidType { .. }),
            "Expected InvalidType, got {:?}",
            err
        );
    }

    #[test]
    fn test_interp_11_more_type_errors() {
        assert!(matches!(run_err("print !5;"), SpartieError::InvalidType { .. }));
        assert!(matches!(run_err("print -\"x\";"), SpartieError::InvalidType { .. }));
        assert!(matches!(run_err("print true + 1;"), SpartieError::InvalidType { .. }));
        assert!(matches!(run_err("print 1 < \"2\";"), SpartieError::InvalidType { .. }));
        assert!(matches!(run_err("print null + \"s\";"), SpartieError::InvalidType { .. }));
    }

    #[test]
    fn test_interp_12_type_error_names_operator_and_line() {
        let err = run_err("print 1;\nprint \"a\" * 2;");
        let message = err.to_string();

        assert!(message.contains("line 2"), "got: {}", message);
        assert!(message.contains('*'), "got: {}", message);
    }

    // ─────────────────────────── truthiness ─────────────────────────

    #[test]
    fn test_interp_13_zero_and_empty_string_are_truthy() {
        assert_eq!(run_ok("if (0) print \"y\"; else print \"n\";"), "y\n");
        assert_eq!(run_ok("if (\"\") print \"y\"; else print \"n\";"), "y\n");
    }

    #[test]
    fn test_interp_14_null_and_false_are_falsy() {
        assert_eq!(run_ok("if (null) print \"y\"; else print \"n\";"), "n\n");
        assert_eq!(run_ok("if (false) print \"y\"; else print \"n\";"), "n\n");
    }

    // ─────────────────────── logical short-circuit ──────────────────

    #[test]
    fn test_interp_15_or_skips_right_when_left_truthy() {
        // The right-hand assignment must never execute.
        assert_eq!(run_ok("var a = 1; true or (a = 2); print a;"), "1\n");
    }

    #[test]
    fn test_interp_16_and_skips_right_when_left_falsy() {
        assert_eq!(run_ok("var a = 1; false and (a = 2); print a;"), "1\n");
    }

    #[test]
    fn test_interp_17_logical_operators_yield_operand_values() {
        assert_eq!(run_ok("print null or \"fallback\";"), "fallback\n");
        assert_eq!(run_ok("print 1 or 2;"), "1\n");
        assert_eq!(run_ok("print null and 2;"), "null\n");
        assert_eq!(run_ok("print 1 and 2;"), "2\n");
    }

    #[test]
    fn test_interp_18_non_short_circuit_path_evaluates_right() {
        assert_eq!(run_ok("var a = 1; false or (a = 2); print a;"), "2\n");
        assert_eq!(run_ok("var a = 1; true and (a = 3); print a;"), "3\n");
    }

    // ───────────────────── variables and scoping ────────────────────

    #[test]
    fn test_interp_19_var_without_initializer_is_null() {
        assert_eq!(run_ok("var a; print a;"), "null\n");
    }

    #[test]
    fn test_interp_20_assignment_is_an_expression() {
        assert_eq!(run_ok("var a = 0; print a = 3; print a;"), "3\n3\n");
    }

    #[test]
    fn test_interp_21_block_declaration_shadows_then_restores() {
        let source = "var a = \"outer\"; { var a = \"inner\"; print a; } print a;";

        assert_eq!(run_ok(source), "inner\nouter\n");
    }

    #[test]
    fn test_interp_22_assignment_inside_block_reaches_outer() {
        assert_eq!(run_ok("var a = 1; { a = 2; } print a;"), "2\n");
    }

    #[test]
    fn test_interp_23_nested_blocks_resolve_nearest_binding() {
        let source = "var a = 1; { var a = 2; { print a; a = 3; } print a; } print a;";

        assert_eq!(run_ok(source), "2\n3\n1\n");
    }

    #[test]
    fn test_interp_24_undefined_variable_read_fails() {
        let err = run_err("print ghost;");

        assert!(matches!(
            err,
            SpartieError::UndefinedVariable { ref name, .. } if name == "ghost"
        ));
    }

    #[test]
    fn test_interp_25_undefined_variable_assignment_fails() {
        let err = run_err("ghost = 1;");

        assert!(matches!(
            err,
            SpartieError::UndefinedVariable { ref name, .. } if name == "ghost"
        ));
    }

    #[test]
    fn test_interp_26_block_locals_do_not_leak() {
        let err = run_err("{ var hidden = 1; } print hidden;");

        assert!(matches!(
            err,
            SpartieError::UndefinedVariable { ref name, .. } if name == "hidden"
        ));
    }

    // ────────────────────────── control flow ────────────────────────

    #[test]
    fn test_interp_27_if_else_branches() {
        assert_eq!(run_ok("if (1 < 2) print \"then\"; else print \"else\";"), "then\n");
        assert_eq!(run_ok("if (1 > 2) print \"then\"; else print \"else\";"), "else\n");
        assert_eq!(run_ok("if (1 > 2) print \"then\";"), "");
    }

    #[test]
    fn test_interp_28_while_runs_body_exactly_n_times() {
        let source = "var i = 0; var hits = 0; while (i < 5) { hits = hits + 1; i = i + 1; } print hits;";

        assert_eq!(run_ok(source), "5\n");
    }

    #[test]
    fn test_interp_29_while_with_falsy_condition_never_runs() {
        assert_eq!(run_ok("while (false) print \"never\"; print \"done\";"), "done\n");
    }

    #[test]
    fn test_interp_30_long_while_loop_terminates() {
        // Iterative execution: iteration count must not grow the call stack.
        let source = "var i = 0; while (i < 100000) i = i + 1; print i;";

        assert_eq!(run_ok(source), "100000\n");
    }

    // ─────────────────────── expression evaluation ──────────────────

    #[test]
    fn test_interp_31_evaluate_single_expression() {
        assert_eq!(eval_source("1 + 2 * 3").unwrap(), Value::Number(7.0));
        assert_eq!(
            eval_source("\"a\" + \"b\"").unwrap(),
            Value::String("ab".to_string())
        );
        assert_eq!(eval_source("null").unwrap(), Value::Null);
        assert_eq!(eval_source("!(1 == 2)").unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_interp_32_failed_statement_keeps_prior_output() {
        // The first print lands in the sink before the error propagates.
        let tokens: Vec<Token> = Scanner::new(b"print \"first\"; print ghost;")
            .collect::<Result<Vec<_>, _>>()
            .expect("source should scan");

        let mut parser = Parser::new(&tokens);
        let statements = parser.parse().expect("program should parse");

        let mut out: Vec<u8> = Vec::new();
        let result = Interpreter::with_output(&mut out).run(&statements);

        assert!(result.is_err());
        assert_eq!(String::from_utf8(out).unwrap(), "first\n");
    }
}
