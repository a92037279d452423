use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{
    environment::prelude::{Env, Environment, Object, NULL},
    parser::prelude::{parse, Expression},
};

use super::{eval, EvalError, Evaluator};

fn eval_input(input: &str) -> Result<Object, EvalError> {
    let program = parse(input).unwrap();
    let env = Environment::new().shared();

    eval(&program, &env)
}

fn run(input: &str) -> Object {
    eval_input(input).unwrap()
}

fn assert_integer(input: &str, expected: i64) {
    assert_eq!(Object::Integer(expected), run(input), "evaluating `{input}`");
}

fn assert_boolean(input: &str, expected: bool) {
    assert_eq!(Object::Boolean(expected), run(input), "evaluating `{input}`");
}

fn assert_error(input: &str, expected: &str) {
    assert_eq!(Object::Error(expected.to_string()), run(input), "evaluating `{input}`");
}

#[test]
fn test_integer_expressions() {
    let cases = [
        ("0", 0),
        ("5", 5),
        ("-5", -5),
        ("-10", -10),
        ("1 + 2", 3),
        ("2 - 1", 1),
        ("2 * 3", 6),
        ("3 / 3", 1),
        ("3 / 2", 1),
        ("5 + 5 + 5 + 5 - 10", 10),
        ("2 * 2 * 2 * 2 * 2", 32),
        ("-50 + 100 + -50", 0),
        ("5 * 2 + 10", 20),
        ("5 + 2 * 10", 25),
        ("20 + 2 * -10", 0),
        ("50 / 2 * 2 + 10", 60),
        ("2 * (5 + 10)", 30),
        ("3 * 3 * 3 + 10", 37),
        ("3 * (3 * 3) + 10", 37),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
    ];

    for (input, expected) in cases {
        assert_integer(input, expected);
    }
}

#[test]
fn test_division_floors() {
    assert_integer("-7 / 2", -4);
    assert_integer("7 / -2", -4);
    assert_integer("-7 / -2", 3);
    assert_integer("-8 / 2", -4);
}

#[test]
fn test_division_by_zero_is_fatal() {
    assert_eq!(Err(EvalError::DivisionByZero), eval_input("5 / 0"));
    assert_eq!(Err(EvalError::DivisionByZero), eval_input("let f = fn(x) { if (true) { 1 / x } }; f(0); 99"));
    assert_eq!(
        "evaluation error: cannot divide by zero",
        EvalError::DivisionByZero.to_string()
    );
}

#[test]
fn test_boolean_expressions() {
    let cases = [
        ("true", true),
        ("false", false),
        ("1 < 2", true),
        ("1 > 2", false),
        ("1 < 1", false),
        ("1 > 1", false),
        ("1 == 1", true),
        ("1 != 1", false),
        ("1 == 2", false),
        ("1 != 2", true),
        ("true == true", true),
        ("false == false", true),
        ("true == false", false),
        ("true != false", true),
        ("false != true", true),
        ("(1 < 2) == true", true),
        ("(1 < 2) == false", false),
        ("(1 > 2) == true", false),
        ("(1 > 2) == false", true),
    ];

    for (input, expected) in cases {
        assert_boolean(input, expected);
    }
}

#[test]
fn test_bang_operator() {
    assert_boolean("!true", false);
    assert_boolean("!false", true);
    assert_boolean("!5", false);
    assert_boolean("!0", false);
    assert_boolean("!!true", true);
    assert_boolean("!!false", false);
    assert_boolean("!!5", true);
    assert_boolean("!if (false) { 1 }", true);
}

#[test]
fn test_if_else_expressions() {
    assert_integer("if (true) { 10 }", 10);
    assert_eq!(NULL, run("if (false) { 10 }"));
    assert_integer("if (1) { 10 }", 10);
    assert_integer("if (0) { 10 }", 10);
    assert_integer("if (1 < 2) { 10 }", 10);
    assert_eq!(NULL, run("if (1 > 2) { 10 }"));
    assert_integer("if (1 > 2) { 10 } else { 20 }", 20);
    assert_integer("if (1 < 2) { 10 } else { 20 }", 10);
    assert_integer("let x = if (true) { 3 } else { 4 }; x * 2", 6);
}

#[test]
fn test_return_statements() {
    assert_integer("return 10;", 10);
    assert_integer("return 10; 9;", 10);
    assert_integer("return 2 * 5; 9;", 10);
    assert_integer("9; return 2 * 5; 9;", 10);

    let input = r#"
        if (10 > 1) {
            if (10 > 1) {
                return 10;
            }

            return 1;
        }
    "#;

    assert_integer(input, 10);
}

#[test]
fn test_return_unwinds_only_to_the_call() {
    let input = r#"
        let f = fn(x) {
            if (x > 0) {
                if (x > 1) {
                    return x * 10;
                }
                return 0;
            }
            -1;
        };
        f(5) + f(1) + 1
    "#;

    assert_integer(input, 51);
}

#[test]
fn test_error_handling() {
    let cases = [
        ("5 + true;", "type mismatch: 5 + true"),
        ("5 + true; 5;", "type mismatch: 5 + true"),
        ("-true", "unknown operator: -true"),
        ("true + false", "unknown operator: true + false"),
        ("5; true + false; 5;", "unknown operator: true + false"),
        ("if (10 > 1) { true + false; }", "unknown operator: true + false"),
        (
            "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
            "unknown operator: true + false"
        ),
        (
            "if (10 > 1) { if (10 > 1) { true + false; return 1; } return 1; }",
            "unknown operator: true + false"
        ),
        ("foobar", "identifier not found: foobar"),
        (r#""Hello" - "world!""#, r#"unknown operator: "Hello" - "world!""#),
        ("[foo]", "identifier not found: foo"),
        ("foo[1]", "identifier not found: foo"),
        ("[1][foo]", "identifier not found: foo"),
        ("1[1]", "index operator not supported: 1[1]"),
        ("[1, 2] + [3]", "unknown operator: [1, 2] + [3]"),
        (r#""a" == 1"#, r#"type mismatch: "a" == 1"#),
        ("5(1)", "not a function: 5"),
        ("let x = 1; x(2)", "not a function: 1"),
        ("fn(a, b) { a }(1)", "wrong number of arguments. expected 2, got 1"),
        ("-fn(x) { x }", "unknown operator: -fn(x) { ... }"),
    ];

    for (input, expected) in cases {
        assert_error(input, expected);
    }
}

#[test]
fn test_errors_short_circuit() {
    let input = r#"
        let f = fn() { puts_missing; };
        let g = fn(a, b) { a + b };
        g(f(), undefined_name);
    "#;

    assert_error(input, "identifier not found: puts_missing");
    assert_error("let a = 1 + true; a", "type mismatch: 1 + true");
}

#[test]
fn test_let_statements() {
    assert_integer("let a = 5; a;", 5);
    assert_integer("let a = 5 * 5; a;", 25);
    assert_integer("let a = 5; let b = a; a;", 5);
    assert_integer("let a = 5; let b = a; let c = a + b + 5; c;", 15);
    assert_eq!(NULL, run("let a = 5;"));
}

#[test]
fn test_function_object() {
    match run("fn(x) { x + 2; };") {
        Object::Function(function) => {
            assert_eq!(1, function.parameters.len());
            assert_eq!("x", function.parameters[0].value);
            assert_eq!("(x + 2);", function.body.to_string());
        },
        other => panic!("expected a function, got {other}"),
    }
}

#[test]
fn test_function_application() {
    assert_integer("let identity = fn(x) { x; }; identity(5);", 5);
    assert_integer("let identity = fn(x) { return x; }; identity(5);", 5);
    assert_integer("let double = fn(x) { x * 2; }; double(5);", 10);
    assert_integer("let add = fn(x, y) { x + y; }; add(5, 5);", 10);
    assert_integer("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20);
    assert_integer("fn(x) { x; }(5)", 5);
    assert_eq!(NULL, run("fn() { }()"));
}

#[test]
fn test_closures_keep_definition_time_bindings() {
    let input = r#"
        let x = 12;
        let add_to_x = fn(y) {
            x + y;
        };
        let x = 1;

        let result = add_to_x(5);
        result;
    "#;

    assert_integer(input, 17);
}

#[test]
fn test_closures_outlive_their_scope() {
    let input = r#"
        let newAdder = fn(x) { fn(y) { x + y } };
        let addTwo = newAdder(2);
        let addTen = newAdder(10);
        addTwo(3) * addTen(0);
    "#;

    assert_integer(input, 50);
}

#[test]
fn test_inner_let_shadows_outer_binding() {
    let input = r#"
        let x = 1;
        let f = fn() { let x = 100; x };
        f() + x;
    "#;

    assert_integer(input, 101);
}

#[test]
fn test_recursive_functions() {
    let input = r#"
        let fib = fn(n) {
            if (n < 2) { return n; }
            fib(n - 1) + fib(n - 2)
        };
        fib(15);
    "#;

    assert_integer(input, 610);
}

#[test]
fn test_recursive_function_is_freed_with_its_environment() {
    let input = r#"
        let f = fn(x) {
            let helper = fn(y) { y - 1 };
            if (x > 0) { f(helper(x)) } else { x }
        };
        f(3);
    "#;

    let env = Environment::new().shared();
    assert_eq!(Ok(Object::Integer(0)), eval(&parse(input).unwrap(), &env));

    let function = match env.borrow().get("f") {
        Some(Object::Function(function)) => Rc::downgrade(&function),
        other => panic!("expected a function, got {other:?}"),
    };

    drop(env);

    assert!(function.upgrade().is_none());
}

#[test]
fn test_named_function_survives_rebinding_its_name() {
    let input = r#"
        let count = fn(n) { if (n == 0) { 0 } else { 1 + count(n - 1) } };
        let tally = count;
        let count = 99;
        tally(4);
    "#;

    assert_integer(input, 4);
}

#[test]
fn test_deeply_nested_prefix_expression() {
    let input = "-".repeat(200_000) + "1";

    assert_integer(&input, 1);
    assert_boolean(&("!".repeat(100_001) + "true"), false);
}

#[test]
fn test_call_depth_limit() {
    let program = parse("let f = fn(x) { f(x + 1) }; f(0);").unwrap();
    let env = Environment::new().shared();

    let mut evaluator = Evaluator::with_max_depth(64);
    assert_eq!(64, evaluator.max_depth());

    assert_eq!(
        Err(EvalError::CallDepthExceeded { limit: 64 }),
        evaluator.eval_program(&program, &env)
    );

    // The evaluator is usable again afterwards.
    let program = parse("let g = fn(n) { if (n == 0) { 0 } else { g(n - 1) } }; g(63)").unwrap();
    assert_eq!(Ok(Object::Integer(0)), evaluator.eval_program(&program, &env));
}

#[test]
fn test_default_depth_handles_deep_recursion() {
    let input = r#"
        let count = fn(n) { if (n == 0) { 0 } else { 1 + count(n - 1) } };
        count(1500);
    "#;

    assert_integer(input, 1500);
}

#[test]
fn test_strings() {
    assert_eq!(Object::string("Hello world!"), run(r#""Hello world!""#));
    assert_eq!(Object::string("Hello world!"), run(r#""Hello" + " " + "world!""#));
    assert_eq!(r#""Hello world!""#, run(r#""Hello world!""#).inspect());
}

#[test]
fn test_builtin_functions() {
    assert_integer(r#"len("")"#, 0);
    assert_integer(r#"len("four")"#, 4);
    assert_integer(r#"len("hello world")"#, 11);
    assert_integer("len([])", 0);
    assert_integer("len([1, 2, 3])", 3);
    assert_integer(r#"len({"a": 1, "b": 2})"#, 2);
    assert_error("len(1)", "argument to `len` not supported. got 1");
    assert_error(r#"len("one", "two")"#, "wrong number of arguments. expected 1, got 2");

    assert_integer("first([1, 2, 3])", 1);
    assert_eq!(NULL, run("first([])"));
    assert_error("first(1)", "argument to `first` not supported. got 1");

    assert_integer("last([1, 2, 3])", 3);
    assert_eq!(NULL, run("last([])"));

    assert_eq!(Object::array(vec![Object::Integer(2), Object::Integer(3)]), run("rest([1, 2, 3])"));
    assert_eq!(NULL, run("rest([1])"));
    assert_eq!(NULL, run("rest([])"));

    assert_eq!("[1, 2, 3]", run("push([1, 2], 3)").inspect());
    assert_error("push(1, 1)", "argument to `push` not supported. got 1");
    assert_error("push([1])", "wrong number of arguments. expected 2, got 1");
}

#[test]
fn test_push_does_not_mutate() {
    assert_eq!("[1, 2]", run("let a = [1, 2]; let b = push(a, 3); a").inspect());
    assert_eq!("[1, 2, 3]", run("let a = [1, 2]; let b = push(a, 3); b").inspect());
}

#[test]
fn test_builtins_can_be_shadowed() {
    assert_integer("let len = fn(x) { 42 }; len([1])", 42);
}

#[test]
fn test_array_literals() {
    assert_eq!("[1, 4, 6]", run("[1, 2 * 2, 3 + 3]").inspect());
}

#[test]
fn test_array_index_expressions() {
    assert_integer("[1, 2, 3][0]", 1);
    assert_integer("[1, 2, 3][1]", 2);
    assert_integer("[1, 2, 3][2]", 3);
    assert_integer("let i = 0; [1][i]", 1);
    assert_integer("[1, 2, 3][1 + 1]", 3);
    assert_integer("let myArray = [1, 2, 3]; myArray[2]", 3);
    assert_integer("let myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];", 6);
    assert_integer("let myArray = [1, 2, 3]; let i = myArray[0]; myArray[i]", 2);
    assert_eq!(NULL, run("[1, 2, 3][3]"));
    assert_eq!(NULL, run("[1, 2, 3][-1]"));
}

#[test]
fn test_hash_literals() {
    let input = r#"
        let two = "two";
        {
            "one": 10 - 9,
            two: 1 + 1,
            "thr" + "ee": 6 / 2,
            4: 4,
            true: 5,
            false: 6
        }
    "#;

    assert_eq!(
        r#"{4: 4, false: 6, true: 5, "one": 1, "three": 3, "two": 2}"#,
        run(input).inspect()
    );
}

#[test]
fn test_hash_index_expressions() {
    assert_integer(r#"{"foo": 5}["foo"]"#, 5);
    assert_eq!(NULL, run(r#"{"foo": 5}["bar"]"#));
    assert_integer(r#"let key = "foo"; {"foo": 5}[key]"#, 5);
    assert_eq!(NULL, run(r#"{}["foo"]"#));
    assert_integer("{5: 5}[5]", 5);
    assert_integer("{true: 5}[true]", 5);
    assert_integer("{false: 5}[false]", 5);
    assert_integer(r#"{"a": 1, "a": 2}["a"]"#, 2);
}

#[test]
fn test_hash_errors() {
    assert_error(r#"{"name": "Monkey"}[fn(x) { x }];"#, "unusable as hash key: fn(x) { ... }");
    assert_error("{[1]: 2}", "unusable as hash key: [1]");
    assert_error("{1: missing}", "identifier not found: missing");
}

#[test]
fn test_persistent_environment() {
    let env: Env = Environment::new().shared();
    let mut evaluator = Evaluator::new();

    for line in ["let a = 2;", "let double = fn(x) { x * a };"] {
        evaluator.eval_program(&parse(line).unwrap(), &env).unwrap();
    }

    let result = evaluator.eval_program(&parse("double(21)").unwrap(), &env);

    assert_eq!(Ok(Object::Integer(42)), result);
}

#[test]
fn test_eval_single_expression_node() {
    let program = parse("1 + 2 * 3").unwrap();
    let env = Environment::new().shared();

    let expression = match &program.statements[0] {
        crate::parser::prelude::Statement::Expression { expression } => expression,
        other => panic!("expected an expression statement, got {other}"),
    };

    assert!(matches!(expression, Expression::Infix { .. }));
    assert_eq!(Ok(Object::Integer(7)), Evaluator::new().eval(expression, &env));
}
