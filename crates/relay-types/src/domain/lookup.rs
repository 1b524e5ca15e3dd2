//! Ordered key-lookup chains over upstream JSON bodies.
//!
//! The upstream is inconsistent about casing and wrapping (`data` vs `Data`,
//! `OrderId` vs `orderId`). Each extraction is a fixed list of accessors tried
//! in order.

use serde_json::Value;

/// One candidate location of a value inside a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    /// The body itself, when it is an object containing this key.
    SelfIfKey(&'static str),
    Path(&'static [&'static str]),
    /// The body itself, when it is an object.
    Whole,
}

impl Accessor {
    pub fn resolve<'a>(&self, body: &'a Value) -> Option<&'a Value> {
        match self {
            Accessor::SelfIfKey(key) => body.as_object()?.contains_key(*key).then_some(body),
            Accessor::Path(path) => path
                .iter()
                .try_fold(body, |current, key| current.as_object()?.get(*key)),
            Accessor::Whole => body.is_object().then_some(body),
        }
    }
}

/// Where an order lives in a lookup response: the body itself when it carries
/// `OrderId`, else a `data`/`Data` wrapper, else the whole body.
pub const ORDER_BODY: &[Accessor] = &[
    Accessor::SelfIfKey("OrderId"),
    Accessor::Path(&["data"]),
    Accessor::Path(&["Data"]),
    Accessor::Whole,
];

pub const LIST_KEYS: &[Accessor] = &[Accessor::Path(&["data"]), Accessor::Path(&["Data"])];

/// Where a created order's identifier lives.
pub const ORDER_ID: &[Accessor] = &[
    Accessor::Path(&["OrderId"]),
    Accessor::Path(&["orderId"]),
    Accessor::Path(&["data", "OrderId"]),
];

pub fn first_present<'a>(body: &'a Value, chain: &[Accessor]) -> Option<&'a Value> {
    chain.iter().find_map(|accessor| accessor.resolve(body))
}

pub fn first_truthy<'a>(body: &'a Value, chain: &[Accessor]) -> Option<&'a Value> {
    chain
        .iter()
        .filter_map(|accessor| accessor.resolve(body))
        .find(|value| is_truthy(value))
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// The list under `data`/`Data`; anything that is not an array becomes empty.
pub fn extract_list(body: &Value) -> Vec<Value> {
    match first_truthy(body, LIST_KEYS) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_body_prefers_self_when_order_id_present() {
        let body = json!({ "OrderId": "123", "data": { "other": true } });
        assert_eq!(first_present(&body, ORDER_BODY), Some(&body));
    }

    #[test]
    fn order_body_unwraps_lowercase_before_uppercase() {
        let body = json!({ "data": { "OrderId": "a" }, "Data": { "OrderId": "b" } });
        assert_eq!(
            first_present(&body, ORDER_BODY),
            Some(&json!({ "OrderId": "a" }))
        );
    }

    #[test]
    fn order_body_presence_keeps_null_wrapper() {
        let body = json!({ "data": null, "Data": { "OrderId": "b" } });
        assert_eq!(first_present(&body, ORDER_BODY), Some(&Value::Null));
    }

    #[test]
    fn order_body_falls_back_to_whole_object_only() {
        let body = json!({ "Status": "Open" });
        assert_eq!(first_present(&body, ORDER_BODY), Some(&body));
        assert_eq!(first_present(&json!([1, 2]), ORDER_BODY), None);
    }

    #[test]
    fn order_id_chain_order() {
        assert_eq!(
            first_truthy(&json!({ "OrderId": "A", "orderId": "B" }), ORDER_ID),
            Some(&json!("A"))
        );
        assert_eq!(
            first_truthy(&json!({ "OrderId": "", "orderId": "B" }), ORDER_ID),
            Some(&json!("B"))
        );
        assert_eq!(
            first_truthy(&json!({ "data": { "OrderId": "C" } }), ORDER_ID),
            Some(&json!("C"))
        );
        assert_eq!(first_truthy(&json!({ "data": [1] }), ORDER_ID), None);
    }

    #[test]
    fn list_extraction_skips_empty_and_coerces_non_arrays() {
        assert_eq!(
            extract_list(&json!({ "data": [], "Data": [{ "ItemId": "A" }] })).len(),
            1
        );
        assert!(extract_list(&json!({ "data": { "ItemId": "A" } })).is_empty());
        assert!(extract_list(&json!({})).is_empty());
        assert!(extract_list(&json!("text")).is_empty());
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!({})));
        assert!(is_truthy(&json!(0.5)));
        assert!(is_truthy(&json!([0])));
    }
}
