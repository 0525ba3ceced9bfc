use serde_json::Value;

/// Lookup request extracted from an invocation event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteRequest {
    pub symbol: Option<String>,
}

impl QuoteRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
        }
    }

    /// Reads the top-level `symbol` field. Non-string values count as absent.
    pub fn from_event(event: &Value) -> Self {
        let symbol = event
            .get("symbol")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { symbol }
    }

    /// Uppercased symbol, or `None` when missing or empty.
    pub fn normalized_symbol(&self) -> Option<String> {
        self.symbol
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_uppercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uppercases_direct_event_symbol() {
        let req = QuoteRequest::from_event(&json!({"symbol": "aapl"}));
        assert_eq!(req.normalized_symbol().as_deref(), Some("AAPL"));
    }

    #[test]
    fn missing_empty_and_non_string_symbols_are_absent() {
        for event in [
            json!({}),
            json!({"symbol": ""}),
            json!({"symbol": null}),
            json!({"symbol": 42}),
            json!("aapl"),
        ] {
            assert_eq!(QuoteRequest::from_event(&event).normalized_symbol(), None);
        }
    }

    #[test]
    fn ignores_proxy_event_parameters() {
        let event = json!({
            "resource": "/stock",
            "httpMethod": "GET",
            "queryStringParameters": {"symbol": "msft"},
            "pathParameters": {"symbol": "tsla"},
        });
        assert_eq!(QuoteRequest::from_event(&event).normalized_symbol(), None);
    }

    #[test]
    fn top_level_symbol_is_the_only_source() {
        let event = json!({
            "symbol": "goog",
            "queryStringParameters": {"symbol": "amzn"},
        });
        assert_eq!(
            QuoteRequest::from_event(&event).normalized_symbol().as_deref(),
            Some("GOOG")
        );
    }

    #[test]
    fn does_not_trim() {
        let req = QuoteRequest::new(" ibm");
        assert_eq!(req.normalized_symbol().as_deref(), Some(" IBM"));
    }
}
