//! Path compilation.
//!
//! Compiling resolves every step to a navigator once and folds the chain
//! right-to-left into two composed stages, one per operation. The terminal
//! continuation is an argument of every stage rather than something the
//! compiled path holds on to, so a `CompiledPath` keeps no state between
//! calls. It can be reused, shared across threads, and re-entered from
//! inside its own continuations.

use std::fmt;
use std::sync::Arc;

use super::error::{NavError, Result};
use super::navigator::{Navigate, Navigator, SelectFn, TransformFn};
use super::step::Step;
use crate::config::{Config, SelectOneMode};
use crate::document::node::{Focus, Value};

type SelectStage = Arc<dyn for<'n> Fn(&Value, &mut SelectFn<'n>) -> Result<()> + Send + Sync>;

type TransformStage =
    Arc<dyn for<'n> Fn(Focus, &mut TransformFn<'n>) -> Result<Focus> + Send + Sync>;

fn select_stage<F>(f: F) -> SelectStage
where
    F: for<'n> Fn(&Value, &mut SelectFn<'n>) -> Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

fn transform_stage<F>(f: F) -> TransformStage
where
    F: for<'n> Fn(Focus, &mut TransformFn<'n>) -> Result<Focus> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A path resolved and folded into one traversal per operation.
///
/// # Example
///
/// ```
/// use navpath::path::{compile, ALL};
/// use navpath::document::Value;
///
/// let double = compile([ALL]);
/// let data = Value::Sequence(vec![Value::Integer(1), Value::Integer(2)]);
///
/// assert_eq!(double.select(&data).unwrap().len(), 2);
/// let doubled = double
///     .transform(
///         |focus| focus.map(|v| Value::Integer(v.as_i64().unwrap_or(0) * 2)),
///         data,
///     )
///     .unwrap();
/// assert_eq!(doubled, Value::Sequence(vec![Value::Integer(2), Value::Integer(4)]));
/// ```
#[derive(Clone)]
pub struct CompiledPath {
    select: SelectStage,
    transform: TransformStage,
    navigators: Vec<Navigator>,
    config: Config,
}

/// Compiles a path with the default configuration.
pub fn compile<I, S>(path: I) -> CompiledPath
where
    I: IntoIterator<Item = S>,
    S: Into<Step>,
{
    compile_with_config(path, Config::default())
}

/// Compiles a path; `config` governs `select_one` and root removal.
pub fn compile_with_config<I, S>(path: I, config: Config) -> CompiledPath
where
    I: IntoIterator<Item = S>,
    S: Into<Step>,
{
    let navigators: Vec<Navigator> = path.into_iter().map(|step| step.into().resolve()).collect();

    let mut select = select_stage(|structure, terminal| terminal(structure));
    let mut transform = transform_stage(|focus, terminal| terminal(focus));
    for navigator in navigators.iter().rev() {
        select = wrap_select(navigator.clone(), select);
        transform = wrap_transform(navigator.clone(), transform);
    }

    log::trace!("compiled path {:?}", navigators);
    CompiledPath {
        select,
        transform,
        navigators,
        config,
    }
}

fn wrap_select(navigator: Navigator, inner: SelectStage) -> SelectStage {
    select_stage(move |structure, terminal| {
        navigator.select(structure, &mut |focus: &Value| inner(focus, &mut *terminal))
    })
}

fn wrap_transform(navigator: Navigator, inner: TransformStage) -> TransformStage {
    transform_stage(move |structure, terminal| {
        navigator.transform(structure, &mut |focus: Focus| inner(focus, &mut *terminal))
    })
}

impl CompiledPath {
    /// Number of navigators in the path.
    pub fn len(&self) -> usize {
        self.navigators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.navigators.is_empty()
    }

    pub fn navigators(&self) -> &[Navigator] {
        &self.navigators
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the select traversal with a caller-supplied terminal.
    pub fn select_with(&self, structure: &Value, terminal: &mut SelectFn<'_>) -> Result<()> {
        (self.select)(structure, terminal)
    }

    /// Runs the transform traversal with a caller-supplied terminal.
    pub fn transform_with(&self, focus: Focus, terminal: &mut TransformFn<'_>) -> Result<Focus> {
        (self.transform)(focus, terminal)
    }

    /// Collects every focus in traversal order.
    pub fn select(&self, structure: &Value) -> Result<Vec<Value>> {
        let mut focuses = Vec::new();
        self.select_with(structure, &mut |focus: &Value| {
            focuses.push(focus.clone());
            Ok(())
        })?;
        Ok(focuses)
    }

    /// Returns a single focus, or `None` when nothing matches.
    ///
    /// `Undefined` focuses (missing keys and indices) are not matches, the
    /// same rule `matches` and `filterer` apply. With more than one match
    /// the result depends on `Config::select_one`: an error in strict mode,
    /// otherwise the first or last match.
    pub fn select_one(&self, structure: &Value) -> Result<Option<Value>> {
        let mode = self.config.select_one;
        let mut chosen: Option<Value> = None;
        let mut count = 0usize;
        self.select_with(structure, &mut |focus: &Value| {
            if !focus.is_defined() {
                return Ok(());
            }
            count += 1;
            if mode != SelectOneMode::First || chosen.is_none() {
                chosen = Some(focus.clone());
            }
            Ok(())
        })?;

        if mode == SelectOneMode::Strict && count > 1 {
            log::debug!("select_one matched {} focuses on {:?}", count, self.navigators);
            return Err(NavError::MultipleFocuses { count });
        }
        Ok(chosen)
    }

    /// Returns true if the path selects at least one defined focus.
    pub fn matches(&self, structure: &Value) -> Result<bool> {
        let mut found = false;
        self.select_with(structure, &mut |focus: &Value| {
            found |= focus.is_defined();
            Ok(())
        })?;
        Ok(found)
    }

    /// Rebuilds `structure` with every focus replaced by `update(focus)`.
    pub fn transform<F>(&self, mut update: F, structure: Value) -> Result<Value>
    where
        F: FnMut(Focus) -> Focus,
    {
        let result = self.transform_with(Focus::Value(structure), &mut |focus: Focus| {
            Ok(update(focus))
        })?;
        self.finish(result)
    }

    /// Like `transform`, with an update that can fail.
    pub fn try_transform<F>(&self, mut update: F, structure: Value) -> Result<Value>
    where
        F: FnMut(Focus) -> Result<Focus>,
    {
        let result = self.transform_with(Focus::Value(structure), &mut |focus: Focus| {
            update(focus)
        })?;
        self.finish(result)
    }

    /// Replaces every focus with `value`; `ABSENT` removes them.
    pub fn setval(&self, value: impl Into<Focus>, structure: Value) -> Result<Value> {
        let value = value.into();
        self.transform(|_| value.clone(), structure)
    }

    fn finish(&self, result: Focus) -> Result<Value> {
        match result {
            Focus::Value(value) => Ok(value),
            Focus::Absent if self.config.allow_root_removal => Ok(Value::Null),
            Focus::Absent => Err(NavError::RootRemoved),
        }
    }
}

impl fmt::Debug for CompiledPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.navigators).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::from_yaml_str;
    use crate::path::navigator::{key, ALL};

    fn yaml(text: &str) -> Value {
        from_yaml_str(text).unwrap()
    }

    #[test]
    fn test_empty_path_is_identity() {
        let path = compile(Vec::<Step>::new());
        assert!(path.is_empty());
        assert_eq!(path.select(&yaml("[1]")).unwrap(), vec![yaml("[1]")]);
        assert_eq!(
            path.setval(Value::Integer(7), yaml("[1]")).unwrap(),
            Value::Integer(7)
        );
    }

    #[test]
    fn test_debug_lists_navigators() {
        let path = compile(vec![Step::from("a"), Step::from(ALL), Step::from(0)]);
        assert_eq!(format!("{:?}", path), "[key(\"a\"), ALL, nth(0)]");
    }

    #[test]
    fn test_terminal_can_reenter_the_same_path() {
        // The inner call runs with its own terminal while the outer one is
        // still on the stack.
        let path = compile([ALL]);
        let data = yaml("[[1, 2], [3]]");
        let mut lengths = Vec::new();
        path.select_with(&data, &mut |inner: &Value| {
            lengths.push(path.select(inner)?.len());
            Ok(())
        })
        .unwrap();
        assert_eq!(lengths, vec![2, 1]);
    }

    #[test]
    fn test_terminal_errors_stop_traversal() {
        let path = compile([ALL]);
        let mut visited = 0;
        let err = path
            .select_with(&yaml("[1, 2, 3]"), &mut |_: &Value| {
                visited += 1;
                Err(NavError::custom("stop"))
            })
            .unwrap_err();
        assert_eq!(err, NavError::custom("stop"));
        assert_eq!(visited, 1);
    }

    #[test]
    fn test_root_removal() {
        let path = compile(Vec::<Step>::new());
        assert_eq!(
            path.setval(Focus::Absent, yaml("1")).unwrap_err(),
            NavError::RootRemoved
        );

        let lenient = compile_with_config(
            Vec::<Step>::new(),
            Config {
                allow_root_removal: true,
                ..Config::default()
            },
        );
        assert_eq!(lenient.setval(Focus::Absent, yaml("1")).unwrap(), Value::Null);
    }

    #[test]
    fn test_select_one_skips_undefined() {
        assert_eq!(compile(["z"]).select_one(&yaml("{a: 1}")).unwrap(), None);
        assert_eq!(
            compile([ALL, key("a")]).select_one(&yaml("[{b: 1}, {a: 2}]")).unwrap(),
            Some(Value::Integer(2))
        );
    }

    #[test]
    fn test_matches_ignores_undefined() {
        let path = compile([key("a")]);
        assert!(path.matches(&yaml("{a: 1}")).unwrap());
        assert!(!path.matches(&yaml("{b: 1}")).unwrap());
    }
}
