//! OAuth access token retrieval.
//!
//! Claude Code stores its credentials as a small JSON blob, either in the
//! macOS keychain or in `~/.claude/.credentials.json`. Sources are tried in
//! order by [`ChainedCredentials`]; the first one to yield a token wins.

use crate::errors::CredentialError;
use crate::paths::ClaudePaths;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Keychain service name used by Claude Code.
pub const KEYCHAIN_SERVICE: &str = "Claude Code-credentials";

/// Anything that can hand out an OAuth access token.
pub trait CredentialSource {
    /// Short name for diagnostics.
    fn name(&self) -> &str;

    fn access_token(&self) -> Result<String, CredentialError>;
}

#[derive(Debug, Deserialize)]
struct CredentialsBlob {
    #[serde(rename = "claudeAiOauth")]
    claude_ai_oauth: Option<OAuthSection>,
}

#[derive(Debug, Deserialize)]
struct OAuthSection {
    #[serde(rename = "accessToken", default)]
    access_token: String,
}

/// Extract the access token from a credentials JSON blob.
pub fn parse_credentials(raw: &str) -> Result<String, CredentialError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CredentialError::Malformed("empty credentials".to_string()));
    }
    let blob: CredentialsBlob =
        serde_json::from_str(raw).map_err(|e| CredentialError::Malformed(e.to_string()))?;
    let token = blob
        .claude_ai_oauth
        .ok_or_else(|| CredentialError::Malformed("missing claudeAiOauth section".to_string()))?
        .access_token;
    let token = token.trim();
    if token.is_empty() {
        return Err(CredentialError::EmptyToken);
    }
    Ok(token.to_string())
}

/// A token supplied up front, e.g. from `CCSTATUS_OAUTH_TOKEN`.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl CredentialSource for StaticToken {
    fn name(&self) -> &str {
        "environment"
    }

    fn access_token(&self) -> Result<String, CredentialError> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(CredentialError::EmptyToken);
        }
        Ok(token.to_string())
    }
}

/// The macOS keychain, queried through the `security` tool.
#[derive(Debug, Clone)]
pub struct KeychainCredentials {
    service: String,
}

impl Default for KeychainCredentials {
    fn default() -> Self {
        Self {
            service: KEYCHAIN_SERVICE.to_string(),
        }
    }
}

impl CredentialSource for KeychainCredentials {
    fn name(&self) -> &str {
        "keychain"
    }

    fn access_token(&self) -> Result<String, CredentialError> {
        let output = Command::new("security")
            .args(["find-generic-password", "-s", &self.service, "-w"])
            .output()
            .map_err(|e| CredentialError::Unavailable(format!("cannot run security: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CredentialError::Unavailable(format!(
                "keychain item '{}' not readable: {}",
                self.service,
                stderr.trim()
            )));
        }

        parse_credentials(&String::from_utf8_lossy(&output.stdout))
    }
}

/// `~/.claude/.credentials.json`
#[derive(Debug, Clone)]
pub struct CredentialsFile {
    path: PathBuf,
}

impl CredentialsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_paths(paths: &ClaudePaths) -> Self {
        Self::new(paths.credentials_file())
    }
}

impl CredentialSource for CredentialsFile {
    fn name(&self) -> &str {
        "credentials file"
    }

    fn access_token(&self) -> Result<String, CredentialError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CredentialError::Unavailable(format!(
                    "{} does not exist",
                    self.path.display()
                )));
            }
            Err(e) => {
                return Err(CredentialError::Unavailable(format!(
                    "cannot read {}: {e}",
                    self.path.display()
                )));
            }
        };
        parse_credentials(&raw)
    }
}

/// Tries each source in turn.
#[derive(Default)]
pub struct ChainedCredentials {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl ChainedCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl CredentialSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// The standard lookup order: explicit override, keychain (macOS only),
    /// then the credentials file.
    pub fn standard(override_token: Option<String>, paths: Option<&ClaudePaths>) -> Self {
        let mut chain = Self::new();
        if let Some(token) = override_token {
            chain = chain.with(StaticToken::new(token));
        }
        if cfg!(target_os = "macos") {
            chain = chain.with(KeychainCredentials::default());
        }
        if let Some(paths) = paths {
            chain = chain.with(CredentialsFile::from_paths(paths));
        }
        chain
    }

    /// Token plus the name of the source that produced it.
    pub fn resolve(&self) -> Result<(String, &str), CredentialError> {
        let mut failures = Vec::new();
        for source in &self.sources {
            match source.access_token() {
                Ok(token) => return Ok((token, source.name())),
                Err(e) => {
                    debug!(source = source.name(), error = %e, "credential source failed");
                    failures.push(format!("{}: {e}", source.name()));
                }
            }
        }
        if failures.is_empty() {
            return Err(CredentialError::Unavailable(
                "no credential sources configured".to_string(),
            ));
        }
        Err(CredentialError::Unavailable(failures.join("; ")))
    }
}

impl CredentialSource for ChainedCredentials {
    fn name(&self) -> &str {
        "chain"
    }

    fn access_token(&self) -> Result<String, CredentialError> {
        self.resolve().map(|(token, _)| token)
    }
}
