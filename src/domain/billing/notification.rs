//! Normalization of asynchronous payment notifications.
//!
//! The gateway delivers several body shapes depending on delivery mode and
//! API version. Everything is folded into [`NotificationPayload`] at ingress
//! so nothing downstream inspects raw JSON again.

use serde_json::Value;

/// Normalized notification.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationPayload {
    /// A payment changed; `id` is the gateway payment id.
    Payment { id: String },

    /// A merchant order changed; `order_id` is extracted from a resource URL
    /// or taken as given.
    MerchantOrder { order_id: String },

    /// Anything else, kept for logging.
    Unknown { kind: Option<String>, raw: Value },
}

impl NotificationPayload {
    /// Classifies a notification body. Never fails.
    ///
    /// `type` and `topic` are synonyms; `type` wins when both are present.
    pub fn parse(body: &Value) -> Self {
        let kind = discriminator(body);

        let parsed = match kind.as_deref() {
            Some("payment") => payment_id(body).map(|id| NotificationPayload::Payment { id }),
            Some("merchant_order") => {
                order_ref(body).map(|order_id| NotificationPayload::MerchantOrder { order_id })
            }
            _ => None,
        };

        parsed.unwrap_or_else(|| NotificationPayload::Unknown {
            kind,
            raw: body.clone(),
        })
    }

    /// Short label for logs.
    pub fn kind(&self) -> &str {
        match self {
            NotificationPayload::Payment { .. } => "payment",
            NotificationPayload::MerchantOrder { .. } => "merchant_order",
            NotificationPayload::Unknown { .. } => "unknown",
        }
    }

    /// Gateway id the notification refers to, if recognized.
    pub fn reference(&self) -> Option<&str> {
        match self {
            NotificationPayload::Payment { id } => Some(id),
            NotificationPayload::MerchantOrder { order_id } => Some(order_id),
            NotificationPayload::Unknown { .. } => None,
        }
    }
}

fn discriminator(body: &Value) -> Option<String> {
    ["type", "topic"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .map(|s| s.trim().to_lowercase())
        .find(|s| !s.is_empty())
}

fn payment_id(body: &Value) -> Option<String> {
    body.get("data")
        .and_then(|data| data.get("id"))
        .and_then(scalar_id)
        .or_else(|| body.get("id").and_then(scalar_id))
        .or_else(|| body.get("data").and_then(scalar_id))
        .or_else(|| body.get("resource").and_then(Value::as_str).and_then(last_segment))
}

fn order_ref(body: &Value) -> Option<String> {
    body.get("resource")
        .and_then(Value::as_str)
        .and_then(last_segment)
        .or_else(|| {
            body.get("data")
                .and_then(|data| data.get("id"))
                .and_then(scalar_id)
        })
        .or_else(|| body.get("id").and_then(scalar_id))
}

/// Longest id accepted from a notification.
pub const MAX_GATEWAY_ID_LEN: usize = 64;

/// True for ids that can be placed in a gateway URL path as-is:
/// ASCII letters, digits, `-` and `_`.
pub fn is_gateway_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_GATEWAY_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Accepts string or integer ids. Blank or non-plain strings are absent.
fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            is_gateway_id(trimmed).then(|| trimmed.to_string())
        }
        Value::Number(n) if n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

/// Last non-empty path segment of a URL or path, query string removed.
/// A bare id is returned unchanged. Segments that are not plain ids are
/// absent.
pub fn last_segment(resource: &str) -> Option<String> {
    let without_query = resource.split(['?', '#']).next().unwrap_or_default();
    without_query
        .split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .last()
        .filter(|segment| is_gateway_id(segment))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn payment_with_nested_data_id() {
        let body = json!({"type": "payment", "action": "payment.updated", "data": {"id": "PAY1"}});
        assert_eq!(
            NotificationPayload::parse(&body),
            NotificationPayload::Payment { id: "PAY1".to_string() }
        );
    }

    #[test]
    fn payment_with_numeric_id() {
        let body = json!({"type": "payment", "data": {"id": 123456789}});
        assert_eq!(
            NotificationPayload::parse(&body),
            NotificationPayload::Payment { id: "123456789".to_string() }
        );
    }

    #[test]
    fn payment_with_topic_and_top_level_id() {
        let body = json!({"topic": "payment", "id": "PAY2"});
        assert_eq!(
            NotificationPayload::parse(&body),
            NotificationPayload::Payment { id: "PAY2".to_string() }
        );
    }

    #[test]
    fn payment_with_resource_only() {
        let body = json!({"topic": "payment", "resource": "https://api.mercadolibre.com/collections/notifications/777"});
        assert_eq!(
            NotificationPayload::parse(&body),
            NotificationPayload::Payment { id: "777".to_string() }
        );
    }

    #[test]
    fn type_wins_over_topic() {
        let body = json!({"type": "merchant_order", "topic": "payment", "resource": "https://api.mercadolibre.com/merchant_orders/55", "id": "PAY3"});
        assert_eq!(
            NotificationPayload::parse(&body),
            NotificationPayload::MerchantOrder { order_id: "55".to_string() }
        );
    }

    #[test]
    fn merchant_order_from_resource_url() {
        let body = json!({"topic": "merchant_order", "resource": "https://api.mercadolibre.com/merchant_orders/12345/"});
        assert_eq!(
            NotificationPayload::parse(&body),
            NotificationPayload::MerchantOrder { order_id: "12345".to_string() }
        );
    }

    #[test]
    fn merchant_order_from_bare_resource_id() {
        let body = json!({"topic": "merchant_order", "resource": "98765"});
        assert_eq!(
            NotificationPayload::parse(&body),
            NotificationPayload::MerchantOrder { order_id: "98765".to_string() }
        );
    }

    #[test]
    fn merchant_order_from_data_id() {
        let body = json!({"type": "merchant_order", "data": {"id": "ORD9"}});
        assert_eq!(
            NotificationPayload::parse(&body),
            NotificationPayload::MerchantOrder { order_id: "ORD9".to_string() }
        );
    }

    #[test]
    fn unrecognized_kind_is_unknown() {
        let body = json!({"type": "plan", "data": {"id": "X"}});
        match NotificationPayload::parse(&body) {
            NotificationPayload::Unknown { kind, .. } => assert_eq!(kind.as_deref(), Some("plan")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn payment_without_any_id_is_unknown() {
        let body = json!({"type": "payment", "data": {}});
        assert_eq!(NotificationPayload::parse(&body).kind(), "unknown");
    }

    #[test]
    fn non_object_body_is_unknown() {
        assert_eq!(NotificationPayload::parse(&json!("hello")).kind(), "unknown");
        assert_eq!(NotificationPayload::parse(&Value::Null).kind(), "unknown");
    }

    #[test]
    fn last_segment_strips_query() {
        assert_eq!(last_segment("https://x/merchant_orders/42?foo=bar"), Some("42".to_string()));
        assert_eq!(last_segment("///"), None);
    }

    #[test]
    fn path_traversal_in_payment_id_is_unknown() {
        let body = json!({"type": "payment", "data": {"id": "../../merchant_orders/55"}});
        assert!(matches!(
            NotificationPayload::parse(&body),
            NotificationPayload::Unknown { .. }
        ));
    }

    #[test]
    fn encoded_or_spaced_ids_are_rejected() {
        for id in ["55%2F..", "55 66", "55?x=1", "a.b", "-1.5"] {
            let body = json!({"type": "payment", "data": {"id": id}});
            assert!(
                matches!(NotificationPayload::parse(&body), NotificationPayload::Unknown { .. }),
                "{id}"
            );
        }
        let body = json!({"type": "payment", "data": {"id": -3}});
        assert!(matches!(NotificationPayload::parse(&body), NotificationPayload::Unknown { .. }));
    }

    #[test]
    fn order_resource_with_dot_segment_is_unknown() {
        let body = json!({"topic": "merchant_order", "resource": "https://x/merchant_orders/.."});
        assert!(matches!(
            NotificationPayload::parse(&body),
            NotificationPayload::Unknown { .. }
        ));
    }

    #[test]
    fn gateway_id_rules() {
        assert!(is_gateway_id("123456789"));
        assert!(is_gateway_id("PAY-1_a"));
        assert!(!is_gateway_id(""));
        assert!(!is_gateway_id("a/b"));
        assert!(!is_gateway_id(&"9".repeat(MAX_GATEWAY_ID_LEN + 1)));
    }

    proptest! {
        #[test]
        fn ids_outside_the_plain_alphabet_never_parse(
            prefix in "[A-Za-z0-9]{0,6}",
            bad in "[/.%?# :]",
            suffix in "[A-Za-z0-9]{0,6}",
        ) {
            let id = format!("{prefix}{bad}{suffix}");
            let body = json!({"type": "payment", "data": {"id": id}});
            let is_unknown = matches!(
                NotificationPayload::parse(&body),
                NotificationPayload::Unknown { .. }
            );
            prop_assert!(is_unknown);
        }

        #[test]
        fn parse_never_panics(kind in "[a-z_]{0,16}", id in "[A-Za-z0-9]{0,12}") {
            let body = json!({"type": kind, "data": {"id": id}, "resource": format!("https://x/{}", id)});
            let _ = NotificationPayload::parse(&body);
        }

        #[test]
        fn payment_id_round_trips_through_data(id in "[A-Za-z0-9]{1,20}") {
            let body = json!({"type": "payment", "data": {"id": id.clone()}});
            prop_assert_eq!(NotificationPayload::parse(&body), NotificationPayload::Payment { id });
        }
    }
}
