use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub from: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub smtp: SmtpConfig,
    pub storage: StorageConfig,
    /// Base URL the reset-password links point at.
    pub base_url: String,
    /// Frontend URL used in credential emails.
    pub client_url: String,
}

const DEFAULT_TOKEN_TTL_DAYS: i64 = 3;

/// Zero, negative and unparseable values fall back to the default so the TTL
/// can never go backwards or wrap.
fn parse_ttl_days(raw: Option<String>) -> i64 {
    raw.and_then(|v| v.parse::<i64>().ok())
        .filter(|days| *days > 0)
        .unwrap_or(DEFAULT_TOKEN_TTL_DAYS)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_days: parse_ttl_days(std::env::var("TOKEN_TTL_DAYS").ok()),
        };
        let smtp = SmtpConfig {
            host: std::env::var("SMTP_HOST")?,
            username: std::env::var("SMTP_USERNAME")?,
            password: std::env::var("SMTP_PASSWORD")?,
            from: std::env::var("SMTP_FROM")?,
        };
        let storage = StorageConfig {
            endpoint: std::env::var("S3_ENDPOINT")?,
            bucket: std::env::var("S3_BUCKET")?,
            access_key: std::env::var("S3_ACCESS_KEY")?,
            secret_key: std::env::var("S3_SECRET_KEY")?,
            region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".into()),
        };
        let base_url =
            std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".into());
        let client_url = std::env::var("CLIENT_URL").unwrap_or_else(|_| base_url.clone());
        Ok(Self {
            database_url,
            jwt,
            smtp,
            storage,
            base_url,
            client_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_days_accepts_positive_values() {
        assert_eq!(parse_ttl_days(Some("7".into())), 7);
        assert_eq!(parse_ttl_days(Some("1".into())), 1);
    }

    #[test]
    fn ttl_days_rejects_zero_negative_and_garbage() {
        assert_eq!(parse_ttl_days(Some("0".into())), DEFAULT_TOKEN_TTL_DAYS);
        assert_eq!(parse_ttl_days(Some("-3".into())), DEFAULT_TOKEN_TTL_DAYS);
        assert_eq!(parse_ttl_days(Some("three".into())), DEFAULT_TOKEN_TTL_DAYS);
        assert_eq!(parse_ttl_days(None), DEFAULT_TOKEN_TTL_DAYS);
    }
}
