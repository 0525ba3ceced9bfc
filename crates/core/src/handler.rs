use anyhow::Result;

use crate::domain::event::QuoteRequest;
use crate::domain::quote::InvocationResponse;
use crate::ingest::provider::DailySeriesProvider;
use crate::ingest::types::latest_daily_quote;

/// Looks up the most recent daily bar for the requested symbol.
///
/// Returns 400 without touching the provider when the symbol is missing,
/// 404 when the provider body carries no daily series, 200 otherwise.
/// Transport and decoding failures are returned as errors.
pub async fn lookup_latest_quote(
    provider: &dyn DailySeriesProvider,
    request: &QuoteRequest,
) -> Result<InvocationResponse> {
    let Some(symbol) = request.normalized_symbol() else {
        tracing::info!("rejected lookup without symbol");
        return InvocationResponse::missing_symbol();
    };

    tracing::info!(%symbol, provider = provider.provider_name(), "looking up latest daily quote");

    let body = provider.fetch_daily_series(&symbol).await?;

    match latest_daily_quote(&symbol, &body)? {
        Some(quote) => {
            tracing::info!(%symbol, date = %quote.date, "latest daily quote found");
            InvocationResponse::ok(&quote)
        }
        None => {
            tracing::warn!(%symbol, "provider response has no daily time series");
            InvocationResponse::no_data(&symbol)
        }
    }
}
