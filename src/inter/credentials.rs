use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::errors::StatementResult;

/// Banco Inter API application credentials, read from a JSON file.
///
/// ```json
/// {"client_id": "...", "client_secret": "...", "cert": "inter.crt", "key": "inter.key", "conta": "12345678"}
/// ```
///
/// Relative `cert`/`key` paths are resolved against the credentials file.
#[derive(Clone, Deserialize)]
pub struct BankCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub cert: PathBuf,
    pub key: PathBuf,
    /// Checking account sent as `x-conta-corrente`; only needed when the
    /// application is linked to more than one account.
    #[serde(default, alias = "account")]
    pub conta: Option<String>,
}

impl BankCredentials {
    pub fn load(path: &Path) -> StatementResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut credentials: BankCredentials = serde_json::from_str(&content)?;

        if let Some(dir) = path.parent() {
            credentials.cert = dir.join(&credentials.cert);
            credentials.key = dir.join(&credentials.key);
        }

        Ok(credentials)
    }

    /// Certificate followed by private key, the PEM bundle mutual TLS expects.
    pub fn identity_pem(&self) -> StatementResult<Vec<u8>> {
        let mut pem = fs::read(&self.cert)?;
        if !pem.ends_with(b"\n") {
            pem.push(b'\n');
        }
        pem.extend(fs::read(&self.key)?);
        Ok(pem)
    }
}

impl fmt::Debug for BankCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BankCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("cert", &self.cert)
            .field("key", &self.key)
            .field("conta", &self.conta)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StatementError;
    use tempfile::tempdir;

    const CREDENTIALS: &str = r#"{
        "client_id": "client-123",
        "client_secret": "s3cr3t",
        "cert": "inter.crt",
        "key": "/etc/inter/inter.key"
    }"#;

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bank.json");
        fs::write(&path, CREDENTIALS).unwrap();

        let credentials = BankCredentials::load(&path).unwrap();
        assert_eq!(credentials.client_id, "client-123");
        assert_eq!(credentials.cert, dir.path().join("inter.crt"));
        assert_eq!(credentials.key, PathBuf::from("/etc/inter/inter.key"));
        assert_eq!(credentials.conta, None);
    }

    #[test]
    fn test_load_accepts_account_alias() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bank.json");
        fs::write(
            &path,
            r#"{"client_id":"a","client_secret":"b","cert":"c","key":"d","account":"98765"}"#,
        )
        .unwrap();

        let credentials = BankCredentials::load(&path).unwrap();
        assert_eq!(credentials.conta.as_deref(), Some("98765"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = BankCredentials::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(StatementError::Io(_))));
    }

    #[test]
    fn test_load_missing_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bank.json");
        fs::write(&path, r#"{"client_id":"a"}"#).unwrap();

        let result = BankCredentials::load(&path);
        assert!(matches!(result, Err(StatementError::Json(_))));
    }

    #[test]
    fn test_identity_pem_concatenates_cert_and_key() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("inter.crt"), "CERT").unwrap();
        fs::write(dir.path().join("inter.key"), "KEY\n").unwrap();
        let path = dir.path().join("bank.json");
        fs::write(
            &path,
            r#"{"client_id":"a","client_secret":"b","cert":"inter.crt","key":"inter.key"}"#,
        )
        .unwrap();

        let pem = BankCredentials::load(&path).unwrap().identity_pem().unwrap();
        assert_eq!(pem, b"CERT\nKEY\n");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let credentials: BankCredentials = serde_json::from_str(CREDENTIALS).unwrap();
        let debug_str = format!("{:?}", credentials);
        assert!(debug_str.contains("client-123"));
        assert!(!debug_str.contains("s3cr3t"));
    }
}
