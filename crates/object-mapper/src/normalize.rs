//! Drives the updater from a [`DestSpec`].

use futures_util::future::{BoxFuture, FutureExt};

use crate::context::MappingContext;
use crate::error::MapError;
use crate::parser::parse_path_with;
use crate::spec::DestSpec;
use crate::update::update;
use crate::value::Value;

/// Writes `value` into `dest` for every destination named by `spec`.
///
/// A [`DestSpec::Target`] scopes its `transform`/`default` to its own key;
/// alternatives of a [`DestSpec::Many`] each start from the context they were
/// given.
pub fn set_key_value<'a>(
    dest: Option<Value>,
    spec: &'a DestSpec,
    value: Option<Value>,
    ctx: &'a MappingContext<'_>,
) -> BoxFuture<'a, Result<Option<Value>, MapError>> {
    async move {
        match spec {
            DestSpec::None => update(dest, value, &[], ctx).await,
            DestSpec::Path(path) => {
                let path = parse_path_with(path, ctx.delimiter);
                update(dest, value, &path, ctx).await
            }
            DestSpec::Many(alternatives) => {
                let mut dest = dest;
                for alternative in alternatives {
                    dest = set_key_value(dest, alternative, value.clone(), ctx).await?;
                }
                Ok(dest)
            }
            DestSpec::Target {
                key,
                transform,
                default,
            } => {
                let scoped = ctx.scoped(transform.as_ref(), default.as_ref());
                set_key_value(dest, key, value, &scoped).await
            }
        }
    }
    .boxed()
}

/// Writes `value` into `dest` as directed by `spec`, outside of a mapping
/// table. Callbacks see a `null` source.
///
/// # Example
///
/// ```
/// use futures::executor::block_on;
/// use object_mapper::{set_value, Value};
/// use serde_json::json;
///
/// let out = block_on(set_value(None, &"foo.bar[].baz".into(), Some(Value::from("x")))).unwrap();
/// assert_eq!(out, Some(Value::from(json!({"foo": {"bar": [{"baz": "x"}]}}))));
///
/// assert_eq!(block_on(set_value(None, &"foo".into(), None)).unwrap(), None);
/// ```
pub async fn set_value(
    dest: Option<Value>,
    spec: &DestSpec,
    value: Option<Value>,
) -> Result<Option<Value>, MapError> {
    let src = Value::Null;
    let ctx = MappingContext::new(&src, "", spec);
    set_key_value(dest, spec, value, &ctx).await
}
