use std::{env, fmt, path::PathBuf, str::FromStr, time::Duration};

const DEFAULT_WEBHOOK_URL: &str = "http://127.0.0.1:5678/webhook/ads-report";

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub data_path: PathBuf,
    pub webhook_url: String,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub webhook_timeout: Duration,
    pub poll_interval: Duration,
    pub upload_limit_bytes: usize,
    pub pdf_converter: Option<String>,
    pub pdf_converter_args: String,
    pub agency_name: String,
}

#[derive(Debug)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: {:?}", self.key, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 8080,
            data_path: PathBuf::from("data/reports.json"),
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            max_retries: 3,
            retry_delay_ms: 2000,
            webhook_timeout: Duration::from_secs(300),
            poll_interval: Duration::from_millis(5000),
            upload_limit_bytes: 20 * 1024 * 1024,
            pdf_converter: None,
            pdf_converter_args: "{input} {output}".to_string(),
            agency_name: "Digital Growth Agency".to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            port: env_parse("PORT", defaults.port)?,
            data_path: env::var("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            webhook_url: env_string("WEBHOOK_URL").unwrap_or(defaults.webhook_url),
            max_retries: env_parse("WEBHOOK_MAX_RETRIES", defaults.max_retries)?,
            retry_delay_ms: env_parse("WEBHOOK_RETRY_DELAY_MS", defaults.retry_delay_ms)?,
            webhook_timeout: Duration::from_secs(env_parse(
                "WEBHOOK_TIMEOUT_SECS",
                defaults.webhook_timeout.as_secs(),
            )?),
            poll_interval: Duration::from_millis(env_parse(
                "REPORT_POLL_INTERVAL_MS",
                defaults.poll_interval.as_millis() as u64,
            )?),
            upload_limit_bytes: env_parse("UPLOAD_LIMIT_BYTES", defaults.upload_limit_bytes)?,
            pdf_converter: env_string("PDF_CONVERTER"),
            pdf_converter_args: env_string("PDF_CONVERTER_ARGS")
                .unwrap_or(defaults.pdf_converter_args),
            agency_name: env_string("REPORT_AGENCY_NAME").unwrap_or(defaults.agency_name),
        })
    }

    /// Linear backoff: the wait after failed attempt `attempt` (0-based).
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_delay_ms.saturating_mul(u64::from(attempt) + 1))
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_parse<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env_string(key) {
        Some(value) => value.parse().map_err(|_| ConfigError { key, value }),
        None => Ok(default),
    }
}
