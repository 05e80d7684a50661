//! Process configuration, read once at startup.

use std::net::SocketAddr;

use chrono::Duration;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SESSION_COOKIE: &str = "auth_token";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set; refusing to start without a signing secret")]
    MissingSecret,

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Credentials for an administrator account seeded at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone)]
pub struct GateConfig {
    jwt_secret: String,
    pub bind_addr: SocketAddr,
    pub cookie_name: String,
    pub login_path: String,
    pub session_ttl: Duration,
    pub secure_cookies: bool,
    pub admin_seed: Option<AdminSeed>,
}

impl GateConfig {
    /// Config with defaults for everything except the secret.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            session_ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
            secure_cookies: true,
            admin_seed: None,
        }
    }

    pub fn jwt_secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingSecret`] when `JWT_SECRET` is absent or blank;
    /// [`ConfigError::Invalid`] when an optional variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingSecret)?;
        let mut config = Self::new(secret);

        let bind = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        config.bind_addr = bind.parse().map_err(|e| ConfigError::Invalid {
            var: "BIND_ADDR",
            reason: format!("{e}"),
        })?;

        if let Some(name) = lookup("SESSION_COOKIE") {
            if name.is_empty() || name.contains([';', '=', ' ']) {
                return Err(ConfigError::Invalid {
                    var: "SESSION_COOKIE",
                    reason: format!("'{name}' is not a valid cookie name"),
                });
            }
            config.cookie_name = name;
        }

        if let Some(path) = lookup("LOGIN_PATH") {
            if !path.starts_with('/') {
                return Err(ConfigError::Invalid {
                    var: "LOGIN_PATH",
                    reason: "must be an absolute path".to_string(),
                });
            }
            config.login_path = path;
        }

        if let Some(hours) = lookup("SESSION_TTL_HOURS") {
            let hours: i64 = hours.parse().map_err(|_| ConfigError::Invalid {
                var: "SESSION_TTL_HOURS",
                reason: format!("'{hours}' is not a whole number of hours"),
            })?;
            if !(1..=24 * 7).contains(&hours) {
                return Err(ConfigError::Invalid {
                    var: "SESSION_TTL_HOURS",
                    reason: "must be between 1 and 168".to_string(),
                });
            }
            config.session_ttl = Duration::hours(hours);
        }

        if let Some(flag) = lookup("SECURE_COOKIES") {
            config.secure_cookies = match flag.as_str() {
                "1" | "true" => true,
                "0" | "false" => false,
                other => {
                    return Err(ConfigError::Invalid {
                        var: "SECURE_COOKIES",
                        reason: format!("'{other}' is not a boolean"),
                    });
                }
            };
        }

        config.admin_seed = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed { email, password }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Invalid {
                    var: "ADMIN_EMAIL",
                    reason: "ADMIN_EMAIL and ADMIN_PASSWORD must be set together".to_string(),
                });
            }
        };

        Ok(config)
    }
}

impl core::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GateConfig")
            .field("jwt_secret", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("cookie_name", &self.cookie_name)
            .field("login_path", &self.login_path)
            .field("session_ttl", &self.session_ttl)
            .field("secure_cookies", &self.secure_cookies)
            .field("admin_seed", &self.admin_seed)
            .finish()
    }
}
