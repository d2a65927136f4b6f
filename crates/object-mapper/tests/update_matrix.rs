use object_mapper::{
    parse_path, set_value, update, DestSpec, Map, MappingContext, Transform, Value, MAX_ARRAY_INDEX,
};
use serde_json::json;

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

async fn set(dest: Option<Value>, path: &str, value: serde_json::Value) -> Option<Value> {
    set_value(dest, &DestSpec::path(path), Some(v(value))).await.unwrap()
}

#[tokio::test]
async fn set_into_objects() {
    assert_eq!(set(None, "foo", json!("bar")).await, Some(v(json!({"foo": "bar"}))));
    assert_eq!(
        set(Some(v(json!({"baz": "foo"}))), "foo", json!("bar")).await,
        Some(v(json!({"baz": "foo", "foo": "bar"})))
    );
    assert_eq!(
        set(Some(v(json!({}))), "foo.bar", json!("baz")).await,
        Some(v(json!({"foo": {"bar": "baz"}})))
    );
    assert_eq!(
        set(Some(v(json!({}))), "foo.bar.baz", json!("foo")).await,
        Some(v(json!({"foo": {"bar": {"baz": "foo"}}})))
    );
}

#[tokio::test]
async fn set_into_root_arrays() {
    assert_eq!(set(None, "[]", json!("bar")).await, Some(v(json!(["bar"]))));
    assert_eq!(set(Some(v(json!(["foo"]))), "[]", json!("bar")).await, Some(v(json!(["bar"]))));
    assert_eq!(set(None, "[0]", json!("bar")).await, Some(v(json!(["bar"]))));
    assert_eq!(set(Some(v(json!(["foo"]))), "[0]", json!("bar")).await, Some(v(json!(["bar"]))));
    assert_eq!(
        set(None, "[1]", json!("bar")).await,
        Some(Value::Array(vec![None, Some(v(json!("bar")))]))
    );
}

#[tokio::test]
async fn set_objects_inside_arrays() {
    assert_eq!(set(None, "[].foo", json!("bar")).await, Some(v(json!([{"foo": "bar"}]))));
    assert_eq!(
        set(None, "[].foo", json!(["bar", "baz"])).await,
        Some(v(json!([{"foo": "bar"}, {"foo": "baz"}])))
    );
    assert_eq!(
        set(None, "[3].foo", json!("bar")).await,
        Some(Value::Array(vec![None, None, None, Some(v(json!({"foo": "bar"})))]))
    );
    assert_eq!(
        set(Some(v(json!({}))), "foo.bar[]", json!("baz")).await,
        Some(v(json!({"foo": {"bar": ["baz"]}})))
    );
    assert_eq!(
        set(Some(v(json!({}))), "foo.bar[].baz", json!("foo")).await,
        Some(v(json!({"foo": {"bar": [{"baz": "foo"}]}})))
    );
    assert_eq!(
        set(
            Some(v(json!({"foo": {"bar": [{"bar": "baz"}]}}))),
            "foo.bar[].baz",
            json!("foo")
        ).await,
        Some(v(json!({"foo": {"bar": [{"bar": "baz", "baz": "foo"}]}})))
    );
}

#[tokio::test]
async fn set_arrays_element_wise() {
    assert_eq!(
        set(Some(v(json!({}))), "foo[].baz", json!(["foo", "var"])).await,
        Some(v(json!({"foo": [{"baz": "foo"}, {"baz": "var"}]})))
    );
    assert_eq!(
        set(Some(v(json!({}))), "bar.foo[].baz.foo", json!(["foo", "var"])).await,
        Some(v(json!({"bar": {"foo": [{"baz": {"foo": "foo"}}, {"baz": {"foo": "var"}}]}})))
    );
    assert_eq!(
        set(Some(v(json!({}))), "foo[].bar[].baz", json!([["foo", "var"]])).await,
        Some(v(json!({"foo": [{"bar": [{"baz": "foo"}, {"baz": "var"}]}]})))
    );
}

#[tokio::test]
async fn set_deep_sparse_indices() {
    let thing = v(json!({"thing": "foo"}));
    let baz = Value::Array(vec![None, None, Some(thing)]);
    let mut item = Map::new();
    item.insert("baz".to_string(), baz);
    let bar = Value::Array(vec![None, Some(Value::Object(item))]);
    let mut foo = Map::new();
    foo.insert("bar".to_string(), bar);
    let mut expected = Map::new();
    expected.insert("foo".to_string(), Value::Object(foo));

    assert_eq!(
        set(Some(v(json!({}))), "foo.bar[1].baz[2].thing", json!("foo")).await,
        Some(Value::Object(expected))
    );
}

#[tokio::test]
async fn set_nothing_leaves_no_containers() {
    assert_eq!(set_value(None, &"foo".into(), None).await.unwrap(), None);
    assert_eq!(set(None, "foo.bar", json!(null)).await, None);
    assert_eq!(set(None, "foo[].bar", json!(null)).await, None);
    assert_eq!(set(None, "foo[]", json!([])).await, None);
    assert_eq!(set(None, "xs[-1]", json!(9)).await, None);
    assert_eq!(set(Some(v(json!({"a": 1}))), "b.c", json!(null)).await, Some(v(json!({"a": 1}))));
}

#[tokio::test]
async fn set_null_only_where_allowed() {
    assert_eq!(set(None, "foo?", json!(null)).await, Some(v(json!({"foo": null}))));
    assert_eq!(set(None, "a.b?", json!(null)).await, Some(v(json!({"a": {"b": null}}))));
    // Nulls inside a wildcard write leave holes.
    let mut expected = Map::new();
    expected.insert(
        "xs".to_string(),
        Value::Array(vec![Some(v(json!(1))), None, Some(v(json!(3)))]),
    );
    assert_eq!(set(None, "xs[]", json!([1, null, 3])).await, Some(Value::Object(expected)));
}

#[tokio::test]
async fn set_negative_indices_resolve_against_length() {
    assert_eq!(
        set(Some(v(json!({"xs": [1, 2, 3]}))), "xs[-1]", json!(9)).await,
        Some(v(json!({"xs": [1, 2, 9]})))
    );
    assert_eq!(
        set(Some(v(json!({"xs": [{"a": 1}, {"a": 2}]}))), "xs[-2].b", json!(true)).await,
        Some(v(json!({"xs": [{"a": 1, "b": true}, {"a": 2}]})))
    );
    assert_eq!(
        set(Some(v(json!({"xs": [1]}))), "xs[-5]", json!(9)).await,
        Some(v(json!({"xs": [1]})))
    );
}

#[tokio::test]
async fn set_skips_shape_mismatches() {
    assert_eq!(
        set(Some(v(json!({"foo": "scalar"}))), "foo.bar", json!(1)).await,
        Some(v(json!({"foo": "scalar"})))
    );
    assert_eq!(
        set(Some(v(json!({"foo": {"a": 1}}))), "foo[0]", json!(1)).await,
        Some(v(json!({"foo": {"a": 1}})))
    );
    assert_eq!(set(Some(v(json!([1]))), "foo", json!(1)).await, Some(v(json!([1]))));
}

#[tokio::test]
async fn set_treats_stored_null_as_absent() {
    assert_eq!(
        set(Some(v(json!({"foo": null}))), "foo.bar", json!(1)).await,
        Some(v(json!({"foo": {"bar": 1}})))
    );
    assert_eq!(set(Some(v(json!(null))), "foo", json!(1)).await, Some(v(json!({"foo": 1}))));
    // A null element that receives nothing stays null.
    assert_eq!(
        set(Some(v(json!({"xs": [null]}))), "xs[0].a", json!(null)).await,
        Some(v(json!({"xs": [null]})))
    );
}

#[tokio::test]
async fn append_matrix() {
    assert_eq!(
        set(Some(v(json!({"xs": [1]}))), "xs[]+", json!(2)).await,
        Some(v(json!({"xs": [1, 2]})))
    );
    assert_eq!(
        set(Some(v(json!({"xs": [1]}))), "xs[]+", json!([2, 3])).await,
        Some(v(json!({"xs": [1, [2, 3]]})))
    );
    assert_eq!(
        set(Some(v(json!({"xs": [1]}))), "xs[]+", json!(null)).await,
        Some(v(json!({"xs": [1]})))
    );
    assert_eq!(set(None, "xs[]+", json!(null)).await, None);

    let once = set(None, "xs[]+.name", json!("a")).await;
    assert_eq!(once, Some(v(json!({"xs": [{"name": "a"}]}))));
    assert_eq!(
        set(once, "xs[]+.name", json!("b")).await,
        Some(v(json!({"xs": [{"name": "a"}, {"name": "b"}]})))
    );
}

#[tokio::test]
async fn update_with_context_transform() {
    let src = v(json!({"n": 2}));
    let dest_key = DestSpec::None;
    let ctx = MappingContext::new(&src, "n", &dest_key).with_transform(Transform::new(
        |value, _scope| Ok(value.and_then(|v| v.as_i64()).map(|n| Value::from(n * 10))),
    ));

    let out = update(None, Some(v(json!(2))), &parse_path("a.b"), &ctx).await.unwrap();
    assert_eq!(out, Some(v(json!({"a": {"b": 20}}))));

    let out = update(None, Some(v(json!([1, 2]))), &parse_path("xs[]"), &ctx).await.unwrap();
    assert_eq!(out, Some(v(json!({"xs": [10, 20]}))));
}

#[tokio::test]
async fn update_with_context_default() {
    let src = Value::Null;
    let dest_key = DestSpec::None;
    let ctx = MappingContext::new(&src, "", &dest_key).with_default("fallback");

    let out = update(None, None, &parse_path("a"), &ctx).await.unwrap();
    assert_eq!(out, Some(v(json!({"a": "fallback"}))));

    let out = update(None, Some(v(json!("given"))), &parse_path("a"), &ctx).await.unwrap();
    assert_eq!(out, Some(v(json!({"a": "given"}))));
}

#[tokio::test]
async fn set_index_past_array_limit_is_skipped() {
    assert_eq!(set(None, "a[9223372036854775807]", json!(1)).await, None);
    assert_eq!(
        set(Some(v(json!({"a": [1]}))), "a[9223372036854775807]", json!(2)).await,
        Some(v(json!({"a": [1]})))
    );
    let past_limit = format!("xs[{}].b", MAX_ARRAY_INDEX + 1);
    assert_eq!(
        set(Some(v(json!({"xs": []}))), &past_limit, json!(true)).await,
        Some(v(json!({"xs": []})))
    );
}

#[tokio::test]
async fn append_keeps_null_from_transform() {
    let src = Value::Null;
    let dest_key = DestSpec::None;
    let to_null = MappingContext::new(&src, "", &dest_key)
        .with_transform(Transform::new(|_, _| Ok(Some(Value::Null))));
    let out = update(Some(v(json!({"xs": [1]}))), Some(v(json!(2))), &parse_path("xs[]+"), &to_null)
        .await
        .unwrap();
    assert_eq!(out, Some(v(json!({"xs": [1, null]}))));

    let to_nothing = MappingContext::new(&src, "", &dest_key).with_transform(Transform::new(|_, _| Ok(None)));
    let out = update(Some(v(json!({"xs": [1]}))), Some(v(json!(2))), &parse_path("xs[]+"), &to_nothing)
        .await
        .unwrap();
    assert_eq!(out, Some(v(json!({"xs": [1]}))));
}
