//! # JSONP Wire Format
//!
//! Callback-name generation and response parsing for the script-tag
//! transport. The request URL carries a freshly generated callback name;
//! the endpoint answers with a script invoking that exact name with one
//! JSON argument.

use bridge_core::{BridgeError, BridgeResult};
use uuid::Uuid;

/// Generate a globally-unique callback name for one request.
///
/// The name only lives for the duration of the request future; nothing is
/// registered globally, so there is no binding to clean up afterwards.
pub(crate) fn callback_name() -> String {
    format!("jsonp_{}", Uuid::new_v4().simple())
}

/// Parse a JSONP response body of the form `callback(<json>);`.
///
/// A body invoking any other name is rejected. Trailing whitespace and an
/// optional trailing semicolon are tolerated.
pub(crate) fn parse_invocation(callback: &str, body: &str) -> BridgeResult<serde_json::Value> {
    let rest = body
        .trim()
        .strip_prefix(callback)
        .ok_or_else(|| {
            BridgeError::MalformedResponse(
                "response does not invoke the issued callback".to_string(),
            )
        })?
        .trim_start();

    let rest = rest.strip_prefix('(').ok_or_else(|| {
        BridgeError::MalformedResponse("response is not a callback invocation".to_string())
    })?;

    let rest = rest.trim_end();
    let rest = rest.strip_suffix(';').unwrap_or(rest).trim_end();
    let inner = rest.strip_suffix(')').ok_or_else(|| {
        BridgeError::MalformedResponse("unterminated callback invocation".to_string())
    })?;

    serde_json::from_str(inner.trim())
        .map_err(|e| BridgeError::MalformedResponse(format!("invalid callback argument: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_names_are_unique() {
        let a = callback_name();
        let b = callback_name();

        assert!(a.starts_with("jsonp_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_parses_invocation() {
        let value = parse_invocation("jsonp_ab12", r#"jsonp_ab12({"token":"tok_1"});"#).unwrap();
        assert_eq!(value["token"], "tok_1");
    }

    #[test]
    fn test_parses_without_semicolon_and_with_whitespace() {
        let value = parse_invocation("cb", " cb ( {\"ok\": true} ) \n").unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn test_rejects_wrong_callback() {
        let err = parse_invocation("jsonp_expected", r#"jsonp_other({"ok":true});"#).unwrap_err();
        assert_eq!(err.code(), "request-malformed");
    }

    #[test]
    fn test_rejects_plain_json_body() {
        let err = parse_invocation("cb", r#"{"ok":true}"#).unwrap_err();
        assert_eq!(err.code(), "request-malformed");
    }

    #[test]
    fn test_rejects_unterminated_invocation() {
        let err = parse_invocation("cb", r#"cb({"ok":true}"#).unwrap_err();
        assert_eq!(err.code(), "request-malformed");
    }

    #[test]
    fn test_rejects_non_json_argument() {
        let err = parse_invocation("cb", "cb(alert(1))").unwrap_err();
        assert_eq!(err.code(), "request-malformed");
    }
}
