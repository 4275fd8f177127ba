pub mod domain;
pub mod engine;
pub mod storage;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_PORT: u16 = 3000;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub database_url: Option<String>,
        pub sentry_dsn: Option<String>,
        pub port: u16,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let port = match std::env::var("PORT") {
                Ok(raw) => raw
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a valid port number (got {raw:?})"))?,
                Err(_) => DEFAULT_PORT,
            };

            Ok(Self {
                database_url: non_empty_var("DATABASE_URL"),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
                port,
            })
        }

        pub fn require_database_url(&self) -> anyhow::Result<&str> {
            self.database_url
                .as_deref()
                .context("DATABASE_URL is required")
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn missing_database_url_is_a_contextual_error() {
            let settings = Settings {
                database_url: None,
                sentry_dsn: None,
                port: DEFAULT_PORT,
            };
            let err = settings.require_database_url().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
        }

        #[test]
        fn present_database_url_is_returned() {
            let settings = Settings {
                database_url: Some("postgres://localhost/runway".to_string()),
                sentry_dsn: None,
                port: DEFAULT_PORT,
            };
            assert_eq!(
                settings.require_database_url().unwrap(),
                "postgres://localhost/runway"
            );
        }
    }
}
