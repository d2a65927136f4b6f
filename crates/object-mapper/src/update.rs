//! Writing values into a destination tree.
//!
//! Every function here takes the destination by value and hands back the new
//! one. `None` means "no container here"; a container is only created once a
//! value has to be stored in it, so paths that resolve to no data leave no
//! empty objects or arrays behind.
//!
//! Handing `Some(_)` in always yields `Some(_)` back. Callers rely on this to
//! put a sub-tree back into its parent after recursing into it.
//!
//! Callbacks may suspend, so the walk is async. Writes still happen one after
//! another in path order.

use futures_util::future::{BoxFuture, FutureExt};

use crate::context::MappingContext;
use crate::error::MapError;
use crate::types::{parse_position, resolve_position, PathSegment};
use crate::value::{Map, Value};

const TARGET: &str = "object_mapper::update";

/// Largest array index a write may create, `2^32 - 2`. Writes past it, or
/// ones whose holes cannot be allocated, are skipped.
pub const MAX_ARRAY_INDEX: usize = (u32::MAX - 1) as usize;

/// Writes `value` into `dest` at `path`.
pub fn update<'a>(
    dest: Option<Value>,
    value: Option<Value>,
    path: &'a [PathSegment],
    ctx: &'a MappingContext<'_>,
) -> BoxFuture<'a, Result<Option<Value>, MapError>> {
    async move {
        // An explicit null in the destination is as good as nothing.
        let dest = dest.filter(|d| !d.is_null());
        match path.split_first() {
            None => set_data(dest, None, value, ctx).await,
            Some((PathSegment::Name { name, nulls }, rest)) => {
                update_obj(dest, name, *nulls, value, rest, ctx).await
            }
            Some((PathSegment::Index { ix, add }, rest)) => {
                update_arr(dest, ix, *add, value, rest, ctx).await
            }
        }
    }
    .boxed()
}

async fn update_obj(
    dest: Option<Value>,
    name: &str,
    nulls: bool,
    value: Option<Value>,
    rest: &[PathSegment],
    ctx: &MappingContext<'_>,
) -> Result<Option<Value>, MapError> {
    if rest.is_empty() {
        return set_data(dest, Some((name, nulls)), value, ctx).await;
    }
    match dest {
        Some(Value::Object(mut map)) => {
            // Leaves a null behind, which is correct if nothing comes back.
            let child = map.get_mut(name).map(std::mem::take);
            if let Some(next) = update(child, value, rest, ctx).await? {
                map.insert(name.to_string(), next);
            }
            Ok(Some(Value::Object(map)))
        }
        None => Ok(update(None, value, rest, ctx).await?.map(|next| {
            let mut map = Map::new();
            map.insert(name.to_string(), next);
            Value::Object(map)
        })),
        Some(other) => {
            tracing::debug!(target: TARGET, key = name, "destination is not an object; skipping write");
            Ok(Some(other))
        }
    }
}

/// The leaf writer: default, then transform, then the write itself.
///
/// `null` is only written when the segment carries `?` or the configured
/// default is a literal `null`.
async fn set_data(
    dest: Option<Value>,
    target: Option<(&str, bool)>,
    value: Option<Value>,
    ctx: &MappingContext<'_>,
) -> Result<Option<Value>, MapError> {
    let created = dest.is_none();
    let mut dest = dest.unwrap_or_else(|| Value::Object(Map::new()));

    let value = ctx.apply_default(value, &mut dest).await?;
    let value = ctx.apply_transform(value, &mut dest).await?;

    if let (Some(value), Some((name, nulls))) = (value, target) {
        if !value.is_null() || nulls || ctx.default_is_null() {
            match &mut dest {
                Value::Object(map) => {
                    map.insert(name.to_string(), value);
                }
                _ => {
                    tracing::debug!(target: TARGET, key = name, "destination is not an object; skipping write");
                }
            }
        }
    }

    if created && matches!(&dest, Value::Object(map) if map.is_empty()) {
        return Ok(None);
    }
    Ok(Some(dest))
}

async fn update_arr(
    dest: Option<Value>,
    ix: &str,
    add: bool,
    value: Option<Value>,
    rest: &[PathSegment],
    ctx: &MappingContext<'_>,
) -> Result<Option<Value>, MapError> {
    let created = dest.is_none();
    let mut dest = match dest {
        None => Value::Array(Vec::new()),
        Some(arr @ Value::Array(_)) => arr,
        Some(other) => {
            tracing::debug!(target: TARGET, ix, "destination is not an array; skipping write");
            return Ok(Some(other));
        }
    };

    if add {
        append(&mut dest, value, rest, ctx).await?;
    } else if ix.is_empty() {
        match value {
            // One write per source element, each into the matching index.
            Some(Value::Array(items)) => {
                for (i, item) in items.into_iter().enumerate() {
                    if let Some(item) = item {
                        update_arr_ix(&mut dest, i, Some(item), rest, ctx).await?;
                    }
                }
            }
            other => update_arr_ix(&mut dest, 0, other, rest, ctx).await?,
        }
    } else {
        let len = dest.as_array().map_or(0, Vec::len);
        match parse_position(ix).and_then(|pos| resolve_position(pos, len)) {
            Some(i) => update_arr_ix(&mut dest, i, value, rest, ctx).await?,
            None => {
                tracing::debug!(target: TARGET, ix, len, "index does not resolve; skipping write");
            }
        }
    }

    if created && matches!(&dest, Value::Array(items) if items.is_empty()) {
        return Ok(None);
    }
    Ok(Some(dest))
}

/// Pushes one element. A transform that resolves to an explicit `null` gets
/// it appended; resolving to nothing appends nothing.
async fn append(
    dest: &mut Value,
    value: Option<Value>,
    rest: &[PathSegment],
    ctx: &MappingContext<'_>,
) -> Result<(), MapError> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(());
    };
    let item = if rest.is_empty() {
        ctx.apply_transform(Some(value), dest).await?
    } else {
        update(None, Some(value), rest, ctx).await?
    };
    if let (Some(item), Value::Array(items)) = (item, dest) {
        items.push(Some(item));
    }
    Ok(())
}

async fn update_arr_ix(
    dest: &mut Value,
    ix: usize,
    value: Option<Value>,
    rest: &[PathSegment],
    ctx: &MappingContext<'_>,
) -> Result<(), MapError> {
    let next = if rest.is_empty() {
        ctx.apply_transform(value, dest).await?
    } else {
        let existing = match dest {
            Value::Array(items) => items.get_mut(ix).and_then(Option::take),
            _ => None,
        };
        let was_null = matches!(existing, Some(Value::Null));
        let next = update(existing, value, rest, ctx).await?;
        if next.is_none() && was_null {
            store(dest, ix, Value::Null);
        }
        next
    };
    if let Some(next) = next.filter(|v| !v.is_null()) {
        store(dest, ix, next);
    }
    Ok(())
}

fn store(dest: &mut Value, ix: usize, value: Value) {
    let Value::Array(items) = dest else {
        return;
    };
    if items.len() <= ix {
        let extra = ix - items.len() + 1;
        if ix > MAX_ARRAY_INDEX || items.try_reserve_exact(extra).is_err() {
            tracing::debug!(target: TARGET, ix, len = items.len(), "index out of range; skipping write");
            return;
        }
        items.resize(ix + 1, None);
    }
    items[ix] = Some(value);
}
