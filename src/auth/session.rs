use anyhow::Context;

use argon2::{Argon2, PasswordHash, PasswordVerifier};

use secrecy::Secret;

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::crypto::SigningKey;
use crate::telemetry::spawn_blocking_with_tracing;

/// The authenticated admin identity. Signed into the session token on login;
/// the client holds the token and presents it on every admin request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub id: Uuid,
    pub email: String,
}

impl AdminIdentity {
    pub fn sign_token(&self, key: &SigningKey) -> anyhow::Result<String> {
        use jwt::SignWithKey;

        let token = self.clone().sign_with_key(key)?;
        Ok(token)
    }

    /// Restore the identity from a presented token. Fails on any corrupt or
    /// badly-signed token; the caller treats that as logged out.
    pub fn verify_token(key: &SigningKey, token: &str) -> anyhow::Result<Self> {
        use jwt::VerifyWithKey;

        let claims = token.verify_with_key(key)?;
        Ok(claims)
    }
}

/// The single recognized admin credential pair, loaded from settings.
/// This is a placeholder scheme, not a credential store.
#[derive(Clone)]
pub struct AdminCredentials {
    identity: AdminIdentity,
    password_hash: Secret<String>,
}

impl AdminCredentials {
    pub fn new(id: Uuid, email: String, password_hash: Secret<String>) -> Self {
        Self {
            identity: AdminIdentity { id, email },
            password_hash,
        }
    }

    /// Check a login attempt against the recognized pair. `Ok(None)` on any
    /// mismatch; `Err` only for infrastructure failures.
    #[tracing::instrument(name = "Check admin credentials", skip(self, password))]
    pub async fn check(
        &self,
        username: &str,
        password: Secret<String>,
    ) -> anyhow::Result<Option<AdminIdentity>> {
        if username != self.identity.email {
            return Ok(None);
        }

        let password_hash = self.password_hash.clone();
        let verified =
            spawn_blocking_with_tracing(move || verify_password_hash(password, password_hash))
                .await
                .context("Failed to spawn blocking task")??;

        Ok(verified.then(|| self.identity.clone()))
    }
}

#[tracing::instrument(name = "Verify password hash", skip(password, password_hash))]
fn verify_password_hash(
    password: Secret<String>,
    password_hash: Secret<String>,
) -> anyhow::Result<bool> {
    use secrecy::ExposeSecret;

    let password_hash = PasswordHash::new(password_hash.expose_secret())
        .map_err(|e| anyhow::anyhow!("Failed to parse stored password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.expose_secret().as_bytes(), &password_hash)
        .is_ok())
}
