use crate::parser::DEFAULT_DELIMITER;
use crate::spec::{CallbackResult, DefaultValue, DestSpec, Transform};
use crate::value::Value;

/// What a `transform` or `default` callback gets to see.
pub struct CallbackScope<'a> {
    /// The whole source document.
    pub src: &'a Value,
    /// The source path of the mapping entry.
    pub src_key: &'a str,
    /// The container the value is about to be written into.
    pub dest: &'a mut Value,
    /// The destination spec of the mapping entry.
    pub dest_key: &'a DestSpec,
}

/// Per-entry state threaded through one destination spec.
///
/// Immutable: a [`DestSpec::Target`] that carries its own `transform` or
/// `default` gets a scoped copy, so sibling alternatives never see each
/// other's overrides.
#[derive(Debug, Clone)]
pub struct MappingContext<'a> {
    pub src: &'a Value,
    pub src_key: &'a str,
    pub dest_key: &'a DestSpec,
    pub transform: Option<Transform>,
    pub default: Option<DefaultValue>,
    pub delimiter: char,
}

impl<'a> MappingContext<'a> {
    pub fn new(src: &'a Value, src_key: &'a str, dest_key: &'a DestSpec) -> Self {
        MappingContext {
            src,
            src_key,
            dest_key,
            transform: None,
            default: None,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_default(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// A copy with the given fields replaced; `None` keeps the current value.
    pub(crate) fn scoped(
        &self,
        transform: Option<&Transform>,
        default: Option<&DefaultValue>,
    ) -> MappingContext<'a> {
        MappingContext {
            transform: transform.or(self.transform.as_ref()).cloned(),
            default: default.or(self.default.as_ref()).cloned(),
            ..self.clone()
        }
    }

    /// Whether the configured default is literally `null`, which lets `null`
    /// values through to the destination.
    pub(crate) fn default_is_null(&self) -> bool {
        self.default
            .as_ref()
            .is_some_and(DefaultValue::is_null_literal)
    }

    fn scope<'s>(&'s self, dest: &'s mut Value) -> CallbackScope<'s> {
        CallbackScope {
            src: self.src,
            src_key: self.src_key,
            dest,
            dest_key: self.dest_key,
        }
    }

    /// Substitutes the configured default for a missing or `null` value.
    pub(crate) async fn apply_default(&self, value: Option<Value>, dest: &mut Value) -> CallbackResult {
        if value.as_ref().is_some_and(|v| !v.is_null()) {
            return Ok(value);
        }
        match &self.default {
            None => Ok(value),
            Some(DefaultValue::Value(v)) => Ok(Some(v.clone())),
            Some(DefaultValue::Computed(f)) => f(self.scope(dest)).await,
        }
    }

    /// Runs the configured transform, or passes `value` through.
    pub(crate) async fn apply_transform(&self, value: Option<Value>, dest: &mut Value) -> CallbackResult {
        match &self.transform {
            Some(transform) => transform.call(value, self.scope(dest)).await,
            None => Ok(value),
        }
    }
}
