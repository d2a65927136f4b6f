//! Destination specifications.
//!
//! A mapping table entry names where a selected value goes. The typed form is
//! [`DestSpec`]; [`DestSpec::from_json`] reads the JSON surface syntax:
//!
//! - `null`: no write target, only `default`/`transform` run
//! - `"a.b[]"`: a destination path
//! - `["a", "b"]`: several destinations for the same value
//! - `[["a", null, 10]]`: positional `[path, transform, default]`
//! - `{"key": "a", "default": 10}`: object form; `key` may be a positional tuple

use std::fmt;
use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt};

use crate::context::CallbackScope;
use crate::error::{CallbackError, SpecError};
use crate::value::Value;

/// What a callback resolves to: the value to store, or `None` for nothing.
pub type CallbackResult = Result<Option<Value>, CallbackError>;

pub type TransformFn =
    dyn for<'a> Fn(Option<Value>, CallbackScope<'a>) -> BoxFuture<'a, CallbackResult> + Send + Sync;

pub type DefaultFn = dyn for<'a> Fn(CallbackScope<'a>) -> BoxFuture<'a, CallbackResult> + Send + Sync;

/// Rewrites a value right before it is stored.
///
/// Receives the incoming value (`None` when nothing was selected and no default
/// applied) and resolves to the value to store. Resolving to `None` stores
/// nothing.
///
/// ```
/// use futures_util::FutureExt;
/// use object_mapper::{Transform, Value};
///
/// let double = Transform::from_async(|value, _| {
///     async move { Ok(value.and_then(|v| v.as_i64()).map(|n| Value::from(n * 2))) }.boxed()
/// });
/// let upper = Transform::new(|value, _| {
///     Ok(value.and_then(|v| v.as_str().map(str::to_uppercase)).map(Value::from))
/// });
/// # let _ = (double, upper);
/// ```
#[derive(Clone)]
pub struct Transform(Arc<TransformFn>);

impl Transform {
    /// Wraps a synchronous function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<Value>, CallbackScope<'_>) -> CallbackResult + Send + Sync + 'static,
    {
        Self::from_async(move |value, scope| future::ready(f(value, scope)).boxed())
    }

    pub fn from_async<F>(f: F) -> Self
    where
        F: for<'a> Fn(Option<Value>, CallbackScope<'a>) -> BoxFuture<'a, CallbackResult>
            + Send
            + Sync
            + 'static,
    {
        Transform(Arc::new(f))
    }

    pub(crate) fn call<'a>(
        &self,
        value: Option<Value>,
        scope: CallbackScope<'a>,
    ) -> BoxFuture<'a, CallbackResult> {
        (self.0)(value, scope)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

/// Substitute for a missing or `null` value.
#[derive(Clone)]
pub enum DefaultValue {
    /// A literal. A literal `null` also lets `null` through to the destination.
    Value(Value),
    /// Computed from the source root and the destination being written.
    Computed(Arc<DefaultFn>),
}

impl DefaultValue {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(CallbackScope<'_>) -> CallbackResult + Send + Sync + 'static,
    {
        Self::computed_async(move |scope| future::ready(f(scope)).boxed())
    }

    pub fn computed_async<F>(f: F) -> Self
    where
        F: for<'a> Fn(CallbackScope<'a>) -> BoxFuture<'a, CallbackResult> + Send + Sync + 'static,
    {
        DefaultValue::Computed(Arc::new(f))
    }

    pub fn is_null_literal(&self) -> bool {
        matches!(self, DefaultValue::Value(Value::Null))
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Value(v) => f.debug_tuple("Value").field(v).finish(),
            DefaultValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Value(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(n: i64) -> Self {
        DefaultValue::Value(n.into())
    }
}

impl From<bool> for DefaultValue {
    fn from(b: bool) -> Self {
        DefaultValue::Value(b.into())
    }
}

impl From<&str> for DefaultValue {
    fn from(s: &str) -> Self {
        DefaultValue::Value(s.into())
    }
}

/// Where a selected value is written.
#[derive(Debug, Clone, Default)]
pub enum DestSpec {
    /// No write target. `default` and `transform` still run, so a transform
    /// can write into the destination itself.
    #[default]
    None,
    /// A destination path string.
    Path(String),
    /// Each alternative receives the same value.
    Many(Vec<DestSpec>),
    /// A destination with its own `transform`/`default`. Fields left `None`
    /// are inherited from the enclosing context.
    Target {
        key: Box<DestSpec>,
        transform: Option<Transform>,
        default: Option<DefaultValue>,
    },
}

impl DestSpec {
    pub fn path(path: impl Into<String>) -> Self {
        DestSpec::Path(path.into())
    }

    pub fn many<I, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<DestSpec>,
    {
        DestSpec::Many(specs.into_iter().map(Into::into).collect())
    }

    /// The positional `[path, transform, default]` form.
    pub fn tuple(
        key: impl Into<DestSpec>,
        transform: Option<Transform>,
        default: Option<DefaultValue>,
    ) -> Self {
        DestSpec::Target {
            key: Box::new(key.into()),
            transform,
            default,
        }
    }

    /// Attaches a synchronous transform, wrapping `self` in a
    /// [`DestSpec::Target`] if needed.
    pub fn with_transform<F>(self, f: F) -> Self
    where
        F: Fn(Option<Value>, CallbackScope<'_>) -> CallbackResult + Send + Sync + 'static,
    {
        self.with(Transform::new(f))
    }

    /// Attaches a transform returning a future.
    pub fn with_async_transform<F>(self, f: F) -> Self
    where
        F: for<'a> Fn(Option<Value>, CallbackScope<'a>) -> BoxFuture<'a, CallbackResult>
            + Send
            + Sync
            + 'static,
    {
        self.with(Transform::from_async(f))
    }

    fn with(self, transform: Transform) -> Self {
        match self {
            DestSpec::Target { key, default, .. } => DestSpec::Target {
                key,
                transform: Some(transform),
                default,
            },
            other => DestSpec::tuple(other, Some(transform), None),
        }
    }

    /// Attaches a default, wrapping `self` in a [`DestSpec::Target`] if needed.
    pub fn with_default(self, default: impl Into<DefaultValue>) -> Self {
        match self {
            DestSpec::Target { key, transform, .. } => DestSpec::Target {
                key,
                transform,
                default: Some(default.into()),
            },
            other => DestSpec::tuple(other, None, Some(default.into())),
        }
    }

    /// Attaches a computed default.
    pub fn with_default_fn<F>(self, f: F) -> Self
    where
        F: Fn(CallbackScope<'_>) -> CallbackResult + Send + Sync + 'static,
    {
        self.with_default(DefaultValue::computed(f))
    }

    /// Attaches a default computed by a future.
    pub fn with_async_default_fn<F>(self, f: F) -> Self
    where
        F: for<'a> Fn(CallbackScope<'a>) -> BoxFuture<'a, CallbackResult> + Send + Sync + 'static,
    {
        self.with_default(DefaultValue::computed_async(f))
    }

    /// Reads the JSON surface syntax.
    ///
    /// # Example
    ///
    /// ```
    /// use object_mapper::DestSpec;
    /// use serde_json::json;
    ///
    /// let spec = DestSpec::from_json(&json!(["a.b", {"key": "c", "default": 1}])).unwrap();
    /// assert!(matches!(spec, DestSpec::Many(ref alts) if alts.len() == 2));
    /// assert!(DestSpec::from_json(&json!(42)).is_err());
    /// ```
    pub fn from_json(value: &serde_json::Value) -> Result<Self, SpecError> {
        match value {
            serde_json::Value::Null => Ok(DestSpec::None),
            serde_json::Value::String(s) => Ok(DestSpec::path(s.as_str())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Self::alternative_from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(DestSpec::Many),
            serde_json::Value::Object(map) => Self::object_from_json(map),
            other => Err(SpecError::Unsupported(other.to_string())),
        }
    }

    /// One element of a top-level array. Nested arrays are positional tuples
    /// here, not further alternatives.
    fn alternative_from_json(value: &serde_json::Value) -> Result<Self, SpecError> {
        match value {
            serde_json::Value::Array(items) => Self::tuple_from_json(items),
            other => Self::from_json(other),
        }
    }

    fn tuple_from_json(items: &[serde_json::Value]) -> Result<Self, SpecError> {
        let key = match items.first() {
            Some(key) => Self::from_json(key)?,
            None => DestSpec::None,
        };
        if items.get(1).is_some_and(|t| !t.is_null()) {
            return Err(SpecError::TransformNotSupported);
        }
        let default = items.get(2).map(|d| DefaultValue::Value(d.clone().into()));
        Ok(DestSpec::tuple(key, None, default))
    }

    fn object_from_json(
        map: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, SpecError> {
        if map.get("transform").is_some_and(|t| !t.is_null()) {
            return Err(SpecError::TransformNotSupported);
        }
        let key = match map.get("key") {
            Some(serde_json::Value::Array(items)) => Self::tuple_from_json(items)?,
            Some(key) => Self::from_json(key)?,
            None => DestSpec::None,
        };
        let default = map
            .get("default")
            .map(|d| DefaultValue::Value(d.clone().into()));
        Ok(DestSpec::tuple(key, None, default))
    }
}

impl From<&str> for DestSpec {
    fn from(path: &str) -> Self {
        DestSpec::path(path)
    }
}

impl From<String> for DestSpec {
    fn from(path: String) -> Self {
        DestSpec::Path(path)
    }
}

impl From<Vec<DestSpec>> for DestSpec {
    fn from(specs: Vec<DestSpec>) -> Self {
        DestSpec::Many(specs)
    }
}
