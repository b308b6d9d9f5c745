pub mod credentials;

pub use credentials::{CredentialManager, EnvCredentialManager, StaticCredentialManager};
