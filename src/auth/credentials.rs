use crate::error::Error;
use secrecy::{ExposeSecret, SecretString};

/// Key under which the IONOS API key is looked up.
pub const IONOS_API_TOKEN: &str = "ionos_api_token";

#[cfg_attr(test, mockall::automock)]
pub trait CredentialManager: Send + Sync {
    fn get(&self, key: &str) -> Result<SecretString, Error>;
}

/// Serves one fixed API key.
pub struct StaticCredentialManager {
    token: SecretString,
}

impl StaticCredentialManager {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

impl CredentialManager for StaticCredentialManager {
    fn get(&self, key: &str) -> Result<SecretString, Error> {
        match key {
            IONOS_API_TOKEN => Ok(SecretString::from(
                self.token.expose_secret().to_owned(),
            )),
            _ => Err(Error::CredentialError(format!("Unknown key: {key}"))),
        }
    }
}

/// Reads credentials from the process environment, upper-casing the key
/// (`ionos_api_token` -> `IONOS_API_TOKEN`).
#[derive(Default)]
pub struct EnvCredentialManager;

impl CredentialManager for EnvCredentialManager {
    fn get(&self, key: &str) -> Result<SecretString, Error> {
        let var = key.to_ascii_uppercase();
        match std::env::var(&var) {
            Ok(value) if !value.is_empty() => Ok(SecretString::from(value)),
            Ok(_) => Err(Error::CredentialError(format!("{var} is empty"))),
            Err(e) => Err(Error::CredentialError(format!("{var}: {e}"))),
        }
    }
}
