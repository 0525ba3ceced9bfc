use lambda_runtime::{service_fn, Error, LambdaEvent};
use quote_core::domain::event::QuoteRequest;
use quote_core::domain::quote::InvocationResponse;
use quote_core::ingest::provider::{AlphaVantageClient, DailySeriesProvider};
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    let settings = quote_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    // CloudWatch stamps each line already.
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_ansi(false).without_time())
        .with(sentry_tracing::layer())
        .init();

    let client = AlphaVantageClient::from_settings(&settings)?;
    let client = &client;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle(client, event).await
    }))
    .await
}

async fn handle(
    provider: &dyn DailySeriesProvider,
    event: LambdaEvent<Value>,
) -> Result<InvocationResponse, Error> {
    let request_id = event.context.request_id.clone();
    let request = QuoteRequest::from_event(&event.payload);

    match quote_core::handler::lookup_latest_quote(provider, &request).await {
        Ok(resp) => {
            tracing::info!(%request_id, status = resp.status_code, "invocation finished");
            Ok(resp)
        }
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(%request_id, error = %format!("{err:#}"), "invocation failed");
            Err(err.into())
        }
    }
}

fn init_sentry(settings: &quote_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_runtime::Context;
    use serde_json::json;

    struct StaticProvider(Value);

    #[async_trait::async_trait]
    impl DailySeriesProvider for StaticProvider {
        fn provider_name(&self) -> &'static str {
            "static"
        }

        async fn fetch_daily_series(&self, _symbol: &str) -> anyhow::Result<Value> {
            Ok(self.0.clone())
        }
    }

    struct UnreachableProvider;

    #[async_trait::async_trait]
    impl DailySeriesProvider for UnreachableProvider {
        fn provider_name(&self) -> &'static str {
            "unreachable"
        }

        async fn fetch_daily_series(&self, _symbol: &str) -> anyhow::Result<Value> {
            anyhow::bail!("dns error: failed to lookup address information")
        }
    }

    fn event(payload: Value) -> LambdaEvent<Value> {
        LambdaEvent::new(payload, Context::default())
    }

    #[tokio::test]
    async fn empty_symbol_returns_bad_request() {
        let provider = UnreachableProvider;
        let resp = handle(&provider, event(json!({"symbol": ""}))).await.unwrap();
        assert_eq!(resp.status_code, 400);
        assert_eq!(resp.body, r#"{"error": "Stock symbol is required"}"#);
    }

    #[tokio::test]
    async fn returns_latest_bar_for_direct_event() {
        let provider = StaticProvider(json!({
            "Time Series (Daily)": {
                "2024-05-02": {"1. open": "1", "2. high": "2", "3. low": "0.5", "4. close": "1.5"},
                "2024-05-03": {"1. open": "3", "2. high": "4", "3. low": "2", "4. close": "3.5"},
            }
        }));
        let resp = handle(&provider, event(json!({"symbol": "ibm"}))).await.unwrap();
        assert_eq!(resp.status_code, 200);
        let body: Value = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(body["symbol"], json!("IBM"));
        assert_eq!(body["date"], json!("2024-05-03"));
    }

    #[tokio::test]
    async fn provider_failure_fails_the_invocation() {
        let provider = UnreachableProvider;
        let err = handle(&provider, event(json!({"symbol": "ibm"}))).await.unwrap_err();
        assert!(err.to_string().contains("dns error"));
    }
}
