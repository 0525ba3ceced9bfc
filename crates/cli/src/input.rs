use anyhow::Context;
use quote_core::domain::event::QuoteRequest;
use serde_json::Value;
use std::path::Path;

/// Builds the lookup request from either a bare symbol or an event file.
/// With neither, the request carries no symbol and the handler answers 400.
pub fn resolve_request(symbol: Option<&str>, event_path: Option<&Path>) -> anyhow::Result<QuoteRequest> {
    if let Some(path) = event_path {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event file {}", path.display()))?;
        let event = serde_json::from_str::<Value>(&text)
            .with_context(|| format!("event file {} is not valid JSON", path.display()))?;
        return Ok(QuoteRequest::from_event(&event));
    }

    Ok(QuoteRequest {
        symbol: symbol.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("quote_cli_{}_{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn bare_symbol_is_passed_through() {
        let req = resolve_request(Some("tsla"), None).unwrap();
        assert_eq!(req.normalized_symbol().as_deref(), Some("TSLA"));
    }

    #[test]
    fn no_input_yields_request_without_symbol() {
        let req = resolve_request(None, None).unwrap();
        assert_eq!(req.normalized_symbol(), None);
    }

    #[test]
    fn reads_symbol_from_event_file() {
        let path = write_temp("direct.json", r#"{"symbol": "amzn"}"#);
        let req = resolve_request(None, Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(req.normalized_symbol().as_deref(), Some("AMZN"));
    }

    #[test]
    fn proxy_event_file_has_no_symbol() {
        let path = write_temp(
            "proxy.json",
            r#"{"httpMethod": "GET", "queryStringParameters": {"symbol": "amzn"}}"#,
        );
        let req = resolve_request(None, Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(req.normalized_symbol(), None);
    }

    #[test]
    fn rejects_invalid_event_file() {
        let path = write_temp("broken.json", "{symbol: aapl");
        let res = resolve_request(None, Some(&path));
        std::fs::remove_file(&path).ok();
        assert!(res.is_err());

        assert!(resolve_request(None, Some(Path::new("/nonexistent/event.json"))).is_err());
    }
}
