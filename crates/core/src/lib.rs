pub mod domain;
pub mod handler;
pub mod ingest;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_ALPHAVANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";
    // Alpha Vantage accepts `demo` for a handful of symbols only.
    pub const DEFAULT_ALPHAVANTAGE_API_KEY: &str = "demo";

    #[derive(Debug, Clone, Default)]
    pub struct Settings {
        pub alphavantage_api_key: Option<String>,
        pub alphavantage_base_url: Option<String>,
        pub sentry_dsn: Option<String>,
        pub port: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                alphavantage_api_key: non_empty_var("ALPHAVANTAGE_API_KEY"),
                alphavantage_base_url: non_empty_var("ALPHAVANTAGE_BASE_URL"),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
                port: non_empty_var("PORT"),
            })
        }

        pub fn alphavantage_api_key(&self) -> &str {
            self.alphavantage_api_key
                .as_deref()
                .unwrap_or(DEFAULT_ALPHAVANTAGE_API_KEY)
        }

        pub fn alphavantage_base_url(&self) -> &str {
            self.alphavantage_base_url
                .as_deref()
                .unwrap_or(DEFAULT_ALPHAVANTAGE_BASE_URL)
        }

        pub fn port(&self) -> anyhow::Result<u16> {
            match self.port.as_deref() {
                Some(p) => p
                    .parse()
                    .with_context(|| format!("PORT is not a valid port number: {p}")),
                None => Ok(3000),
            }
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

}
