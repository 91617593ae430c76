// tests/compiled_path_tests.rs
use navpath::config::{Config, SelectOneMode};
use navpath::document::{from_yaml_str, Focus, Value};
use navpath::path;
use navpath::path::{
    compile, compile_with_config, compiled_select, compiled_select_one, compiled_setval,
    compiled_transform, filterer, NavError, Navigate, Navigator, SelectFn, Step, TransformFn,
    ALL, MAP_VALS,
};

fn yaml(text: &str) -> Value {
    from_yaml_str(text).unwrap()
}

fn double(focus: Focus) -> Focus {
    focus.map(|v| Value::Integer(v.as_i64().unwrap_or(0) * 2))
}

/// Visits the elements at even positions of a sequence.
struct EvenPositions;

impl Navigate for EvenPositions {
    fn select(&self, structure: &Value, next: &mut SelectFn<'_>) -> Result<(), NavError> {
        if let Some(items) = structure.as_sequence() {
            for item in items.iter().step_by(2) {
                next(item)?;
            }
        }
        Ok(())
    }

    fn transform(&self, structure: Focus, next: &mut TransformFn<'_>) -> Result<Focus, NavError> {
        match structure {
            Focus::Value(Value::Sequence(items)) => {
                let mut rebuilt = Vec::with_capacity(items.len());
                for (i, item) in items.into_iter().enumerate() {
                    if i % 2 != 0 {
                        rebuilt.push(item);
                    } else if let Focus::Value(value) = next(Focus::Value(item))? {
                        rebuilt.push(value);
                    }
                }
                Ok(Value::Sequence(rebuilt).into())
            }
            other => Ok(other),
        }
    }
}

// ============================================================================
// Reuse Safety
// ============================================================================

#[test]
fn test_compiled_path_reuse_matches_fresh_compile() {
    let data = yaml("{a: [1, 2], b: [3]}");
    let steps = || path![MAP_VALS, ALL];
    let reused = compile(steps());

    let selected = reused.select(&data).unwrap();
    let transformed = reused.transform(double, data.clone()).unwrap();
    let selected_again = reused.select(&data).unwrap();

    assert_eq!(selected, compile(steps()).select(&data).unwrap());
    assert_eq!(
        transformed,
        compile(steps()).transform(double, data.clone()).unwrap()
    );
    assert_eq!(selected_again, selected);
    assert_eq!(transformed, yaml("{a: [2, 4], b: [6]}"));
}

#[test]
fn test_compiled_path_survives_failed_call() {
    let path = compile(path!["a", MAP_VALS]);
    assert!(path.select(&yaml("{a: [1]}")).is_err());
    assert_eq!(
        path.select(&yaml("{a: {x: 1, y: 2}}")).unwrap(),
        vec![Value::from(1), Value::from(2)]
    );
}

#[test]
fn test_compiled_path_shared_across_threads() {
    let path = compile(path![ALL, "n"]);
    let data = yaml("[{n: 1}, {n: 2}, {n: 3}]");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let path = &path;
                let data = data.clone();
                scope.spawn(move || path.setval(i, data).unwrap())
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.join().unwrap();
            let expected = Value::from(i as i64);
            assert_eq!(
                path.select(&result).unwrap(),
                vec![expected.clone(), expected.clone(), expected]
            );
        }
    });
}

#[test]
fn test_compiled_path_clone_is_independent() {
    let path = compile([ALL]);
    let copy = path.clone();
    drop(path);
    assert_eq!(copy.select(&yaml("[7]")).unwrap(), vec![Value::from(7)]);
}

// ============================================================================
// Compiled Operations
// ============================================================================

#[test]
fn test_compiled_free_functions() {
    let path = compile(path!["xs", ALL]);
    let data = yaml("{xs: [1, 2]}");

    assert_eq!(
        compiled_select(&path, &data).unwrap(),
        vec![Value::from(1), Value::from(2)]
    );
    assert_eq!(
        compiled_transform(&path, double, data.clone()).unwrap(),
        yaml("{xs: [2, 4]}")
    );
    assert_eq!(
        compiled_setval(&path, 0, data.clone()).unwrap(),
        yaml("{xs: [0, 0]}")
    );
    assert_eq!(
        compiled_select_one(&path, &data).unwrap_err(),
        NavError::MultipleFocuses { count: 2 }
    );
}

#[test]
fn test_try_transform_stops_on_error() {
    let path = compile([ALL]);
    let mut calls = 0;
    let err = path
        .try_transform(
            |focus| {
                calls += 1;
                match focus.value().and_then(Value::as_i64) {
                    Some(2) => Err(NavError::custom("two")),
                    _ => Ok(focus),
                }
            },
            yaml("[1, 2, 3]"),
        )
        .unwrap_err();
    assert_eq!(err, NavError::custom("two"));
    assert_eq!(calls, 2);
}

#[test]
fn test_matches_ignores_undefined_focuses() {
    let path = compile(["a"]);
    assert!(path.matches(&yaml("{a: 0}")).unwrap());
    assert!(!path.matches(&yaml("{b: 0}")).unwrap());
}

#[test]
fn test_config_travels_with_compiled_path() {
    let config = Config {
        select_one: SelectOneMode::Last,
        allow_root_removal: true,
    };
    let path = compile_with_config([ALL], config.clone());
    assert_eq!(path.config(), &config);
    assert_eq!(path.len(), 1);
    assert_eq!(
        path.select_one(&yaml("[1, 2]")).unwrap(),
        Some(Value::from(2))
    );
}

// ============================================================================
// Custom Navigators
// ============================================================================

#[test]
fn test_custom_navigator_select_and_transform() {
    let evens = Navigator::custom(EvenPositions);
    let data = yaml("[1, 2, 3, 4, 5]");

    assert_eq!(
        navpath::path::select([evens.clone()], &data).unwrap(),
        vec![Value::from(1), Value::from(3), Value::from(5)]
    );
    assert_eq!(
        navpath::path::transform([evens], double, data).unwrap(),
        yaml("[2, 2, 6, 4, 10]")
    );
}

#[test]
fn test_custom_navigator_composes_with_builtins() {
    let data = yaml("{rows: [{v: 1}, {v: 2}, {v: 3}]}");
    let path = compile(path!["rows", Navigator::custom(EvenPositions), "v"]);
    assert_eq!(
        path.select(&data).unwrap(),
        vec![Value::from(1), Value::from(3)]
    );
    assert_eq!(
        path.setval(0, data).unwrap(),
        yaml("{rows: [{v: 0}, {v: 2}, {v: 0}]}")
    );
}

#[test]
fn test_navigator_from_fns() {
    let identity =
        Navigator::from_fns(|structure, next| next(structure), |focus, next| next(focus));
    let data = yaml("[1, 2]");
    assert_eq!(
        navpath::path::select(path![identity.clone(), ALL], &data).unwrap(),
        vec![Value::from(1), Value::from(2)]
    );
    assert_eq!(
        navpath::path::transform(path![identity, ALL], double, data).unwrap(),
        yaml("[2, 4]")
    );
}

#[test]
fn test_filterer_path_is_compiled_once() {
    let nested = filterer(vec![Step::from("a")]);
    assert_eq!(format!("{:?}", nested), "filterer([key(\"a\")])");
    let path = compile(path![nested, ALL, "a"]);
    let data = yaml("[{a: 1}, {b: 2}]");
    for _ in 0..3 {
        assert_eq!(path.select(&data).unwrap(), vec![Value::from(1)]);
    }
}
