pub mod credential;
pub mod session;

pub use credential::{
    CREDENTIAL_FILE_NAME, CredentialError, CredentialStore, default_credential_path,
};
pub use session::SearchSession;
