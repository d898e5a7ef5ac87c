use secrecy::{ExposeSecret, SecretString};

/// Wraps an API key with secrecy protection (zeroized on drop, redacted in Debug).
#[derive(Clone)]
pub struct ApiKey(pub SecretString);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// The raw key, for placing in a request header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

impl From<SecretString> for ApiKey {
    fn from(secret: SecretString) -> Self {
        Self(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_key() {
        let key = ApiKey::new("sk-ant-secret");
        let debug = format!("{key:?}");
        assert_eq!(debug, "ApiKey([REDACTED])");
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn expose_returns_raw_value() {
        let key = ApiKey::new("sk-ant-123");
        assert_eq!(key.expose(), "sk-ant-123");
    }
}
