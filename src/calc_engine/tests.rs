use super::*;

fn kind(input: &str) -> ErrorKind {
    match evaluate(input) {
        Ok(value) => panic!("expected an error for {:?}, got {}", input, value),
        Err(err) => err.kind(),
    }
}

fn approx(input: &str, expected: f64) {
    let value = evaluate(input).unwrap_or_else(|e| panic!("{:?} failed: {}", input, e));
    assert!(
        (value - expected).abs() < 1e-9,
        "{:?} gave {}, expected {}",
        input,
        value,
        expected
    );
}

#[test]
fn test_basic_arithmetic() {
    assert_eq!(evaluate("2+2"), Ok(4.0));
    assert_eq!(evaluate("10 - 4"), Ok(6.0));
    assert_eq!(evaluate("6 * 7"), Ok(42.0));
    assert_eq!(evaluate("15 / 4"), Ok(3.75));
    assert_eq!(evaluate("15 // 4"), Ok(3.0));
    approx("0.1 + 0.2", 0.3);
}

#[test]
fn test_precedence() {
    assert_eq!(evaluate("2 + 3 * 4"), Ok(14.0));
    assert_eq!(evaluate("(2 + 3) * 4"), Ok(20.0));
    assert_eq!(evaluate("10 - 4 - 3"), Ok(3.0));
    assert_eq!(evaluate("48 / 4 / 2"), Ok(6.0));
    assert_eq!(evaluate("2 * 3 ** 2"), Ok(18.0));
    assert_eq!(evaluate("7 + 10 % 4"), Ok(9.0));
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(evaluate("2**3**2"), Ok(512.0));
    assert_eq!(evaluate("(2**3)**2"), Ok(64.0));
}

#[test]
fn test_unary_operators() {
    assert_eq!(evaluate("-2**2"), Ok(-4.0));
    assert_eq!(evaluate("(-2)**2"), Ok(4.0));
    assert_eq!(evaluate("2**-1"), Ok(0.5));
    assert_eq!(evaluate("--3"), Ok(3.0));
    assert_eq!(evaluate("+-+3"), Ok(-3.0));
    assert_eq!(evaluate("2 * -3"), Ok(-6.0));
    assert_eq!(evaluate("4 - -1"), Ok(5.0));
}

#[test]
fn test_floor_mod_convention() {
    assert_eq!(evaluate("7 % 3"), Ok(1.0));
    assert_eq!(evaluate("-7 % 3"), Ok(2.0));
    assert_eq!(evaluate("7 % -3"), Ok(-2.0));
    assert_eq!(evaluate("-7 // 2"), Ok(-4.0));
}

#[test]
fn test_division_by_zero() {
    assert_eq!(kind("10/0"), ErrorKind::DivisionByZero);
    assert_eq!(kind("10//0"), ErrorKind::DivisionByZero);
    assert_eq!(kind("10 % 0"), ErrorKind::DivisionByZero);
    assert_eq!(kind("1 / (2 - 2)"), ErrorKind::DivisionByZero);
    assert_eq!(kind("0 ** -1"), ErrorKind::DivisionByZero);
}

#[test]
fn test_not_a_number_and_overflow() {
    assert_eq!(kind("(-8) ** 0.5"), ErrorKind::NotANumber);
    assert_eq!(kind("10 ** 400"), ErrorKind::Overflow);
    assert_eq!(kind(&"9".repeat(400)), ErrorKind::Overflow);
}

#[test]
fn test_negative_zero_result() {
    let value = evaluate("-0").unwrap_or(f64::NAN);
    assert_eq!(value, 0.0);
    assert!(value.is_sign_positive());
    assert_eq!(calculate("0 * -1"), Ok("0".to_string()));
}

#[test]
fn test_empty_input() {
    assert_eq!(evaluate(""), Err(EvalError::EmptyInput));
    assert_eq!(evaluate("   \t\n"), Err(EvalError::EmptyInput));
}

#[test]
fn test_syntax_errors() {
    for input in ["3+", "(2", "2)", "()", "2 3", "2 * / 3", "2 */ 3", "***2", ".", "1..2", "007", "2 $ 3", "2 ** ** 3"] {
        assert_eq!(kind(input), ErrorKind::Syntax, "input {:?}", input);
    }
}

#[test]
fn test_syntax_error_positions() {
    assert_eq!(
        evaluate("3+"),
        Err(EvalError::Syntax {
            message: "unexpected end of expression".to_string(),
            position: 2,
        })
    );
    assert!(matches!(evaluate("1 + ?"), Err(EvalError::Syntax { position: 4, .. })));
    assert!(matches!(evaluate("(1 + 2"), Err(EvalError::Syntax { position: 6, .. })));
}

#[test]
fn test_disallowed_constructs() {
    assert_eq!(
        evaluate("__import__('os')"),
        Err(EvalError::DisallowedConstruct {
            construct: Construct::FunctionCall,
            position: 0,
        })
    );
    for input in [
        "x",
        "2 + x",
        "abs(-1)",
        "(1).real",
        "'2' + 2",
        "True",
        "None",
        "[1, 2]",
        "{1: 2}",
        "1 == 1",
        "1 < 2",
        "1 and 2",
        "not 1",
        "x = 1",
        "1 | 2",
        "1 ^ 2",
        "1e5",
        "exec('print(1)')",
    ] {
        assert_eq!(kind(input), ErrorKind::DisallowedConstruct, "input {:?}", input);
    }
}

#[test]
fn test_first_problem_wins() {
    assert_eq!(kind("2 + $ + x"), ErrorKind::Syntax);
    assert_eq!(kind("2 + x + $"), ErrorKind::DisallowedConstruct);
}

#[test]
fn test_nesting_limits() {
    let deep = format!("{}1{}", "(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
    assert_eq!(kind(&deep), ErrorKind::Syntax);

    let shallow = format!("{}1{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(evaluate(&shallow), Ok(1.0));

    let signs = format!("{}1", "-".repeat(10_000));
    assert_eq!(kind(&signs), ErrorKind::Syntax);

    let long_chain = vec!["1"; MAX_HEIGHT + 10].join("+");
    assert_eq!(kind(&long_chain), ErrorKind::Syntax);

    let ok_chain = vec!["1"; 500].join("+");
    assert_eq!(evaluate(&ok_chain), Ok(500.0));
}

#[test]
fn test_parse_builds_tree() {
    let tree = parse("1 + 2 * -3").map(|t| t.to_string());
    assert_eq!(tree, Ok("(1 + (2 * (-3)))".to_string()));

    let tree = parse("2 ** 3 ** 2").map(|t| t.to_string());
    assert_eq!(tree, Ok("(2 ** (3 ** 2))".to_string()));

    assert_eq!(
        parse("+4"),
        Ok(Expr::unary(UnaryOp::Identity, Expr::Number(4.0)))
    );
}

#[test]
fn test_round_trip_of_formatted_result() {
    for input in ["2+2", "1/3", "-7 % 3", "2**0.5", "100000 * 3.5", "-1/8"] {
        let first = evaluate(input).unwrap_or(f64::NAN);
        let shown = format_result(first);
        let again = evaluate(&shown).unwrap_or(f64::NAN);
        assert_eq!(format_result(again), shown, "input {:?}", input);
    }
    assert_eq!(evaluate(&format_result(evaluate("2+2").unwrap_or(0.0))), evaluate("2+2"));
}

#[test]
fn test_calculate_formats() {
    assert_eq!(calculate("2**3**2"), Ok("512".to_string()));
    assert_eq!(calculate("1/3"), Ok("0.3333333333".to_string()));
    assert_eq!(calculate("10**20"), Ok("1e+20".to_string()));
    assert_eq!(calculate("10/0"), Err(EvalError::DivisionByZero));
}
