//! Named function sets shared by templates.
//!
//! A [`Functions`] value collects callables that templates can invoke as
//! `{{ name(args) }}`. Managers carry a default set that is attached to every
//! template they build; callers can merge extra sets on top, in which case the
//! later set wins on name collisions.

use std::collections::BTreeMap;
use std::fmt;

use minijinja::functions::Function;
use minijinja::value::{FunctionArgs, FunctionResult, Value};
use minijinja::Environment;

/// An ordered set of named template functions.
///
/// Functions are stored as type-erased MiniJinja values so sets can be
/// cloned, merged, and attached to any number of environments.
///
/// # Name collisions
///
/// Functions are template globals and share one namespace with the data a
/// template is executed against. A top-level data key with the same name as a
/// function shadows it: with `{"title": "Home"}` as data, `{{ title(x) }}`
/// fails because a string is not callable. Keep function names and page data
/// keys distinct.
///
/// # Example
///
/// ```rust
/// use pagekit_render::Functions;
///
/// let funcs = Functions::new()
///     .add("shout", |s: String| s.to_uppercase())
///     .add("year", || 2024);
///
/// assert!(funcs.contains("shout"));
/// assert_eq!(funcs.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct Functions {
    entries: BTreeMap<String, Value>,
}

impl Functions {
    /// Creates an empty function set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a function, builder style.
    pub fn add<F, Rv, Args>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Function<Rv, Args>,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        self.insert(name, f);
        self
    }

    /// Adds a function, replacing any function with the same name.
    pub fn insert<F, Rv, Args>(&mut self, name: impl Into<String>, f: F)
    where
        F: Function<Rv, Args>,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        self.entries.insert(name.into(), Value::from_function(f));
    }

    /// Adds an already-built callable value.
    pub fn insert_value(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    /// Copies every entry of `other` into this set. Entries of `other` win.
    pub fn extend(&mut self, other: &Functions) {
        for (name, value) in &other.entries {
            self.entries.insert(name.clone(), value.clone());
        }
    }

    /// Returns a new set with `overrides` layered on top of `self`.
    pub fn merged(&self, overrides: &Functions) -> Functions {
        let mut out = self.clone();
        out.extend(overrides);
        out
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Function names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers every function as a global on `env`.
    pub fn register(&self, env: &mut Environment<'static>) {
        for (name, value) in &self.entries {
            env.add_global(name.clone(), value.clone());
        }
    }
}

impl fmt::Debug for Functions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
