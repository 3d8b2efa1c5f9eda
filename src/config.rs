use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub reset_token_ttl_minutes: i64,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

const SMTP_VARS: [&str; 5] = [
    "SHOTLOG_SMTP_HOST",
    "SHOTLOG_SMTP_PORT",
    "SHOTLOG_SMTP_USER",
    "SHOTLOG_SMTP_PASS",
    "SHOTLOG_SMTP_FROM",
];

impl SmtpConfig {
    /// Resolve the SMTP settings through `lookup`. All five variables or none;
    /// a partial set is an error naming what is missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let values = SMTP_VARS.map(|key| lookup(key).filter(|v| !v.trim().is_empty()));
        let missing: Vec<&str> = SMTP_VARS
            .iter()
            .zip(&values)
            .filter(|(_, value)| value.is_none())
            .map(|(key, _)| *key)
            .collect();

        match values {
            [None, None, None, None, None] => Ok(None),
            [Some(host), Some(port), Some(user), Some(pass), Some(from)] => Ok(Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid SHOTLOG_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            })),
            _ => Err(format!(
                "Incomplete SMTP configuration, missing: {}",
                missing.join(", ")
            )),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("SHOTLOG_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid SHOTLOG_HOST: {e}"))?;

        let port: u16 = env_or("SHOTLOG_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid SHOTLOG_PORT: {e}"))?;

        let base_url = env_or("SHOTLOG_BASE_URL", &format!("http://{host}:{port}"))
            .trim_end_matches('/')
            .to_string();

        let reset_token_ttl_minutes: i64 = env_or("SHOTLOG_RESET_TOKEN_TTL_MINUTES", "60")
            .parse()
            .map_err(|e| format!("Invalid SHOTLOG_RESET_TOKEN_TTL_MINUTES: {e}"))?;
        if reset_token_ttl_minutes <= 0 {
            return Err("SHOTLOG_RESET_TOKEN_TTL_MINUTES must be positive".to_string());
        }

        let log_level = env_or("SHOTLOG_LOG_LEVEL", "info");

        let smtp = SmtpConfig::from_lookup(|key| std::env::var(key).ok())?;

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            base_url,
            reset_token_ttl_minutes,
            log_level,
            smtp,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
