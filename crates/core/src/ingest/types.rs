use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::quote::LatestQuote;

pub const TIME_SERIES_DAILY_KEY: &str = "Time Series (Daily)";

/// One day's OHLC entry as Alpha Vantage labels it. Volume is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
}

/// Returns `Ok(None)` when the body has no daily series at all (unknown
/// symbol, rate-limit note, error message). A series that is present but
/// unusable is an error.
pub fn latest_daily_quote(symbol: &str, body: &Value) -> Result<Option<LatestQuote>> {
    let Some(series) = body.get(TIME_SERIES_DAILY_KEY) else {
        return Ok(None);
    };

    // Entries are deserialized lazily so only the selected day has to be well formed.
    let series: BTreeMap<String, Value> = serde_json::from_value(series.clone())
        .with_context(|| format!("{TIME_SERIES_DAILY_KEY} is not an object: {series}"))?;

    // YYYY-MM-DD keys sort chronologically.
    let (date, entry) = series
        .into_iter()
        .next_back()
        .with_context(|| format!("{TIME_SERIES_DAILY_KEY} for {symbol} is empty"))?;

    let bar = serde_json::from_value::<DailyBar>(entry)
        .with_context(|| format!("malformed daily bar for {symbol} on {date}"))?;

    Ok(Some(LatestQuote {
        symbol: symbol.to_string(),
        date,
        open: bar.open,
        high: bar.high,
        low: bar.low,
        close: bar.close,
    }))
}
