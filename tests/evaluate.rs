use safecalc::{calculate, evaluate, format_result, parse, ErrorKind, EvalError};

fn kind_of(input: &str) -> Option<ErrorKind> {
    evaluate(input).err().map(|e| e.kind())
}

#[test]
fn test_documented_examples() {
    assert_eq!(evaluate("2+2"), Ok(4.0));
    assert_eq!(kind_of("10/0"), Some(ErrorKind::DivisionByZero));
    assert_eq!(evaluate("7 % 3"), Ok(1.0));
    assert_eq!(evaluate("-7 % 3"), Ok(2.0));
    assert_eq!(evaluate("2**3**2"), Ok(512.0));
    assert_eq!(kind_of("__import__('os')"), Some(ErrorKind::DisallowedConstruct));
    assert_eq!(kind_of(""), Some(ErrorKind::EmptyInput));
    assert_eq!(kind_of("3+"), Some(ErrorKind::Syntax));
    assert_eq!(format_result(-0.0), "0");
}

#[test]
fn test_round_trip() {
    let first = evaluate("2+2");
    let again = first.clone().map(format_result).and_then(|s| evaluate(&s));
    assert_eq!(again, first);
}

#[test]
fn test_identifier_like_input_is_never_evaluated() {
    for input in [
        "os",
        "open('/etc/passwd')",
        "(1).__class__",
        "lambda: 1",
        "[x for x in (1,)]",
        "a.b.c",
        "print(1)",
    ] {
        assert_eq!(
            kind_of(input),
            Some(ErrorKind::DisallowedConstruct),
            "input {:?}",
            input
        );
    }
}

#[test]
fn test_every_ascii_string_is_handled() {
    // Every short input over the arithmetic alphabet gives a finite number
    // or a typed error.
    let alphabet = ['1', '0', '.', '+', '-', '*', '/', '%', '(', ')'];
    let mut inputs = vec![String::new()];
    for _ in 0..4 {
        inputs = inputs
            .iter()
            .flat_map(|prefix| {
                alphabet.iter().map(move |c| {
                    let mut s = prefix.clone();
                    s.push(*c);
                    s
                })
            })
            .collect();
        for input in &inputs {
            if let Ok(value) = evaluate(input) {
                assert!(value.is_finite(), "input {:?} gave {}", input, value);
            }
        }
    }
}

#[test]
fn test_failure_does_not_touch_input() {
    let input = String::from("1 + (2 * x)");
    let before = input.clone();
    assert!(evaluate(&input).is_err());
    assert_eq!(input, before);
}

#[test]
fn test_parse_then_evaluate_matches_evaluate() {
    let tree = parse("(1.5 + 2.5) * -2");
    assert_eq!(tree.as_ref().map(|t| t.evaluate()), Ok(Ok(-8.0)));
    assert_eq!(evaluate("(1.5 + 2.5) * -2"), Ok(-8.0));
}

#[test]
fn test_error_messages() {
    assert_eq!(EvalError::DivisionByZero.to_string(), "Division by zero");
    let err = evaluate("1 +").err().map(|e| e.to_string());
    assert_eq!(
        err,
        Some("Syntax error at position 3: unexpected end of expression".to_string())
    );
    let err = evaluate("sqrt(4)").err().map(|e| e.to_string());
    assert_eq!(err, Some("function call is not allowed (position 0)".to_string()));
}

#[test]
fn test_calculate() {
    assert_eq!(calculate(" 22 / 7 "), Ok("3.142857143".to_string()));
    assert_eq!(calculate("2 ** 0.5"), Ok("1.414213562".to_string()));
    assert_eq!(calculate("-1 * 0"), Ok("0".to_string()));
}
