//! Authorization for document API requests.
//!
//! Each submission asks a [`CredentialsProvider`] for the value of its
//! `Authorization` header. Secrets are held in [`secrecy::SecretString`]
//! and redacted from debug output.

mod credentials;

pub use credentials::{
    Credential, CredentialsProvider, EnvCredentials, PLACEHOLDER_TOKEN, StaticCredentials,
    TOKEN_ENV_VAR,
};
