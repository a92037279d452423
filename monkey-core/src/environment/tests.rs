use std::{collections::BTreeMap, rc::Rc};

use pretty_assertions::assert_eq;

use crate::parser::prelude::{parse, Expression, Statement};

use super::prelude::*;

#[test]
fn test_get_and_set() {
    let mut env = Environment::new();

    assert_eq!(None, env.get("x"));

    env.set("x", Object::Integer(1));
    assert_eq!(Some(Object::Integer(1)), env.get("x"));

    env.set("x", Object::Integer(2));
    assert_eq!(Some(Object::Integer(2)), env.get("x"));
}

#[test]
fn test_enclosed_lookup_and_shadowing() {
    let mut outer = Environment::new();
    outer.set("x", Object::Integer(1));
    outer.set("y", Object::Integer(2));
    let outer = outer.shared();

    let mut inner = Environment::new_enclosed(outer.clone());
    inner.set("x", Object::Integer(10));

    assert_eq!(Some(Object::Integer(10)), inner.get("x"));
    assert_eq!(Some(Object::Integer(2)), inner.get("y"));
    assert_eq!(None, inner.get("z"));

    // Binding in the inner scope never touches the outer one.
    assert_eq!(Some(Object::Integer(1)), outer.borrow().get("x"));
}

#[test]
fn test_outer_updates_are_visible_through_chain() {
    let outer = Environment::new().shared();
    let inner = Environment::new_enclosed(outer.clone());

    outer.borrow_mut().set("late", TRUE);

    assert_eq!(Some(TRUE), inner.get("late"));
}

#[test]
fn test_snapshot_freezes_own_bindings() {
    let global = Environment::new().shared();
    global.borrow_mut().set("x", Object::Integer(12));

    let captured = global.borrow().snapshot().shared();

    global.borrow_mut().set("x", Object::Integer(1));
    global.borrow_mut().set("y", Object::Integer(5));

    assert_eq!(Some(Object::Integer(12)), captured.borrow().get("x"));
    assert_eq!(None, captured.borrow().get("y"));
}

#[test]
fn test_snapshot_shares_outer_chain() {
    let global = Environment::new().shared();
    let local = Environment::new_enclosed(global.clone()).shared();

    let captured = local.borrow().snapshot();
    global.borrow_mut().set("g", FALSE);

    assert_eq!(Some(FALSE), captured.get("g"));
}

#[test]
fn test_truthiness() {
    assert!(TRUE.is_truthy());
    assert!(!FALSE.is_truthy());
    assert!(!NULL.is_truthy());
    assert!(Object::Integer(0).is_truthy());
    assert!(Object::string("").is_truthy());
    assert!(Object::array(vec![]).is_truthy());
}

#[test]
fn test_from_bool() {
    assert_eq!(TRUE, Object::from_bool(true));
    assert_eq!(FALSE, Object::from_bool(false));
}

#[test]
fn test_hash_keys() {
    assert_eq!(Some(HashKey::Integer(1)), Object::Integer(1).hash_key());
    assert_eq!(Some(HashKey::Boolean(true)), TRUE.hash_key());
    assert_eq!(Object::string("name").hash_key(), Object::string("name").hash_key());
    assert_ne!(Object::string("name").hash_key(), Object::string("other").hash_key());
    assert_eq!(None, NULL.hash_key());
    assert_eq!(None, Object::array(vec![]).hash_key());
    assert_eq!(None, Object::error("boom").hash_key());
}

#[test]
fn test_inspect() {
    let mut pairs = BTreeMap::new();
    pairs.insert(HashKey::Str(Rc::from("a")), Object::Integer(1));
    pairs.insert(HashKey::Integer(2), Object::string("b"));

    let cases = [
        (Object::Integer(-3), "-3"),
        (TRUE, "true"),
        (FALSE, "false"),
        (NULL, "null"),
        (Object::string("hi"), "\"hi\""),
        (Object::array(vec![Object::Integer(1), Object::string("x"), NULL]), "[1, \"x\", null]"),
        (Object::array(vec![]), "[]"),
        (Object::Hash(Rc::new(pairs)), "{2: \"b\", \"a\": 1}"),
        (Object::Hash(Rc::new(BTreeMap::new())), "{}"),
        (Object::error("identifier not found: x"), "Error: identifier not found: x"),
        (Object::ReturnValue(Box::new(Object::Integer(5))), "5"),
    ];

    for (object, expected) in cases {
        assert_eq!(expected, object.inspect());
    }
}

#[test]
fn test_function_inspect_and_identity() {
    let program = parse("fn(x, y) { x + y }").unwrap();
    let Statement::Expression { expression: Expression::Function { parameters, body } } = &program.statements[0] else {
        panic!("expected a function literal");
    };

    let function = Rc::new(Function {
        name: None,
        parameters: parameters.clone(),
        body: body.clone(),
        env: Environment::new().shared(),
    });

    let a = Object::Function(function.clone());
    let b = Object::Function(function.clone());
    let c = Object::Function(Rc::new(Function {
        name: None,
        parameters: parameters.clone(),
        body: body.clone(),
        env: Environment::new().shared(),
    }));

    assert_eq!("fn(x, y) { ... }", a.inspect());
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_type_names() {
    assert_eq!("INTEGER", Object::Integer(1).type_name());
    assert_eq!("BOOLEAN", TRUE.type_name());
    assert_eq!("STRING", Object::string("").type_name());
    assert_eq!("ARRAY", Object::array(vec![]).type_name());
    assert_eq!("NULL", NULL.type_name());
    assert_eq!("ERROR", Object::error("x").type_name());
}

#[test]
fn test_builtin_lookup() {
    for name in ["len", "first", "last", "rest", "push"] {
        let builtin = lookup_builtin(name).unwrap();

        assert_eq!(name, builtin.name);
        assert_eq!(format!("builtin function {name}"), Object::Builtin(builtin).inspect());
    }

    assert!(lookup_builtin("puts").is_none());
}

#[test]
fn test_builtin_len() {
    let len = lookup_builtin("len").unwrap();

    assert_eq!(Object::Integer(0), len.call(&[Object::string("")]));
    assert_eq!(Object::Integer(2), len.call(&[Object::string("né")]));
    assert_eq!(Object::Integer(3), len.call(&[Object::array(vec![TRUE, FALSE, NULL])]));
    assert_eq!(
        Object::error("argument to `len` not supported. got 1"),
        len.call(&[Object::Integer(1)])
    );
    assert_eq!(
        Object::error("wrong number of arguments. expected 1, got 0"),
        len.call(&[])
    );
}

#[test]
fn test_builtin_array_helpers() {
    let array = Object::array(vec![Object::Integer(1), Object::Integer(2), Object::Integer(3)]);
    let call = |name: &str, args: &[Object]| lookup_builtin(name).unwrap().call(args);

    assert_eq!(Object::Integer(1), call("first", &[array.clone()]));
    assert_eq!(Object::Integer(3), call("last", &[array.clone()]));
    assert_eq!("[2, 3]", call("rest", &[array.clone()]).inspect());
    assert_eq!(NULL, call("rest", &[Object::array(vec![Object::Integer(1)])]));
    assert_eq!(NULL, call("first", &[Object::array(vec![])]));
    assert_eq!(NULL, call("last", &[Object::array(vec![])]));

    assert_eq!("[1, 2, 3, 4]", call("push", &[array.clone(), Object::Integer(4)]).inspect());
    assert_eq!("[1, 2, 3]", array.inspect());

    assert_eq!(
        Object::error("argument to `last` not supported. got \"abc\""),
        call("last", &[Object::string("abc")])
    );
    assert_eq!(
        Object::error("wrong number of arguments. expected 2, got 3"),
        call("push", &[array.clone(), NULL, NULL])
    );
}
