use super::object::{Object, NULL};

pub type BuiltinFn = fn(&[Object]) -> Object;

/// Native function callable from programs. Failures come back as `Object::Error`.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Builtin {
    pub fn call(&self, args: &[Object]) -> Object {
        (self.func)(args)
    }
}

const BUILTINS: &[Builtin] = &[
    Builtin { name: "len", func: len },
    Builtin { name: "first", func: first },
    Builtin { name: "last", func: last },
    Builtin { name: "rest", func: rest },
    Builtin { name: "push", func: push },
];

pub fn lookup_builtin(name: &str) -> Option<Builtin> {
    BUILTINS.iter()
        .find(|builtin| builtin.name == name)
        .copied()
}

fn wrong_number_of_arguments(expected: usize, got: usize) -> Object {
    Object::error(format!("wrong number of arguments. expected {expected}, got {got}"))
}

fn not_supported(name: &str, arg: &Object) -> Object {
    Object::error(format!("argument to `{name}` not supported. got {arg}"))
}

fn len(args: &[Object]) -> Object {
    let [arg] = args else {
        return wrong_number_of_arguments(1, args.len());
    };

    match arg {
        Object::Str(value) => Object::Integer(value.chars().count() as i64),
        Object::Array(elements) => Object::Integer(elements.len() as i64),
        Object::Hash(pairs) => Object::Integer(pairs.len() as i64),
        other => not_supported("len", other),
    }
}

fn first(args: &[Object]) -> Object {
    let [arg] = args else {
        return wrong_number_of_arguments(1, args.len());
    };

    match arg {
        Object::Array(elements) => elements.first().cloned().unwrap_or(NULL),
        other => not_supported("first", other),
    }
}

fn last(args: &[Object]) -> Object {
    let [arg] = args else {
        return wrong_number_of_arguments(1, args.len());
    };

    match arg {
        Object::Array(elements) => elements.last().cloned().unwrap_or(NULL),
        other => not_supported("last", other),
    }
}

fn rest(args: &[Object]) -> Object {
    let [arg] = args else {
        return wrong_number_of_arguments(1, args.len());
    };

    match arg {
        Object::Array(elements) if elements.len() > 1 => Object::array(elements[1..].to_vec()),
        Object::Array(_) => NULL,
        other => not_supported("rest", other),
    }
}

fn push(args: &[Object]) -> Object {
    let [target, value] = args else {
        return wrong_number_of_arguments(2, args.len());
    };

    match target {
        Object::Array(elements) => {
            let mut pushed = Vec::with_capacity(elements.len() + 1);
            pushed.extend(elements.iter().cloned());
            pushed.push(value.clone());

            Object::array(pushed)
        },
        other => not_supported("push", other),
    }
}
