use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

const MINIMUM_PASSWORD_LENGTH: usize = 6;

/// Opaque handle issued by the identity provider for an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityId(pub String);

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authentication capability consumed by the portal.
pub trait IdentityProvider: Send + Sync {
    fn sign_in(&self, email: &str, password: &str) -> Result<IdentityId, AuthError>;
    fn create_account(&self, email: &str, password: &str) -> Result<IdentityId, AuthError>;
    fn sign_out(&self, identity: &IdentityId) -> Result<(), AuthError>;
}

/// Failures reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("email address is malformed")]
    InvalidEmail,
    #[error("credentials rejected")]
    InvalidCredentials,
    #[error("email address already registered")]
    EmailInUse,
    #[error("password shorter than six characters")]
    WeakPassword,
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

impl AuthError {
    /// Short message suitable for the login form.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidEmail => "Please enter a valid email address.",
            AuthError::InvalidCredentials => "Incorrect email or password.",
            AuthError::EmailInUse => "An account with this email already exists.",
            AuthError::WeakPassword => "Password must be at least 6 characters.",
            AuthError::Unavailable(_) => "Sign-in is unavailable right now. Please try again.",
        }
    }
}

struct Account {
    identity: IdentityId,
    password_digest: String,
}

/// Process-local identity provider used by the seeded portal and tests.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account under a fixed identity, replacing any previous one.
    pub fn register(&self, identity: IdentityId, email: &str, password: &str) {
        let mut guard = self.accounts.lock().expect("identity mutex poisoned");
        guard.insert(
            normalize_email(email),
            Account {
                identity,
                password_digest: digest(password),
            },
        );
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().expect("identity mutex poisoned").len()
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    fn sign_in(&self, email: &str, password: &str) -> Result<IdentityId, AuthError> {
        let email = validated_email(email)?;
        let guard = self.accounts.lock().expect("identity mutex poisoned");
        match guard.get(&email) {
            Some(account) if account.password_digest == digest(password) => {
                Ok(account.identity.clone())
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    fn create_account(&self, email: &str, password: &str) -> Result<IdentityId, AuthError> {
        let email = validated_email(email)?;
        if password.chars().count() < MINIMUM_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword);
        }

        let mut guard = self.accounts.lock().expect("identity mutex poisoned");
        if guard.contains_key(&email) {
            return Err(AuthError::EmailInUse);
        }

        let identity = IdentityId(Uuid::new_v4().simple().to_string());
        guard.insert(
            email,
            Account {
                identity: identity.clone(),
                password_digest: digest(password),
            },
        );
        Ok(identity)
    }

    fn sign_out(&self, _identity: &IdentityId) -> Result<(), AuthError> {
        Ok(())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

fn validated_email(email: &str) -> Result<String, AuthError> {
    let email = normalize_email(email);
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AuthError::InvalidEmail),
    }
}

fn digest(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_accounts_can_sign_in() {
        let provider = InMemoryIdentityProvider::new();
        let identity = provider
            .create_account("Nimali@Example.com", "s3cret-pass")
            .expect("account created");

        let signed_in = provider
            .sign_in("nimali@example.com ", "s3cret-pass")
            .expect("sign in succeeds");
        assert_eq!(signed_in, identity);
    }

    #[test]
    fn rejects_wrong_password_and_unknown_email_alike() {
        let provider = InMemoryIdentityProvider::new();
        provider.register(IdentityId("uid-1".into()), "ops@example.com", "correct-horse");

        assert_eq!(
            provider.sign_in("ops@example.com", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            provider.sign_in("nobody@example.com", "correct-horse"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn signup_validates_email_password_and_duplicates() {
        let provider = InMemoryIdentityProvider::new();
        assert_eq!(
            provider.create_account("not-an-email", "longenough"),
            Err(AuthError::InvalidEmail)
        );
        assert_eq!(
            provider.create_account("a@example.com", "12345"),
            Err(AuthError::WeakPassword)
        );
        provider
            .create_account("a@example.com", "123456")
            .expect("six characters is enough");
        assert_eq!(
            provider.create_account("A@example.com", "abcdefg"),
            Err(AuthError::EmailInUse)
        );
        assert_eq!(provider.account_count(), 1);
    }

    #[test]
    fn user_messages_are_short() {
        for error in [
            AuthError::InvalidEmail,
            AuthError::InvalidCredentials,
            AuthError::EmailInUse,
            AuthError::WeakPassword,
            AuthError::Unavailable("timeout".into()),
        ] {
            assert!(error.user_message().len() < 60, "{error}");
        }
    }
}
