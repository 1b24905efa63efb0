//! # Identity Backend
//!
//! The boundary to the identity service. A backend authenticates and *pushes* the
//! current identity to every subscriber; the session actor never stores it.

use super::error::SessionError;
use crate::model::{Identity, SignIn, SignUp};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 6;

#[async_trait]
pub trait IdentityBackend: Send + Sync + 'static {
    /// Creates the account, sets its display name and signs it in.
    async fn sign_up(&self, params: SignUp) -> Result<Identity, SessionError>;

    async fn sign_in(&self, params: SignIn) -> Result<Identity, SessionError>;

    async fn sign_out(&self) -> Result<(), SessionError>;

    /// Subscribe to the current identity. `None` means signed out.
    fn watch_identity(&self) -> watch::Receiver<Option<Identity>>;
}

struct Account {
    uid: String,
    password: String,
    display_name: String,
}

/// In-process identity service keyed by lower-cased e-mail.
pub struct MemoryIdentityBackend {
    accounts: Mutex<HashMap<String, Account>>,
    current: watch::Sender<Option<Identity>>,
    offline: AtomicBool,
}

impl MemoryIdentityBackend {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            current: watch::channel(None).0,
            offline: AtomicBool::new(false),
        }
    }

    /// While offline every operation fails with [`SessionError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn accounts(&self) -> MutexGuard<'_, HashMap<String, Account>> {
        self.accounts.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_online(&self) -> Result<(), SessionError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(SessionError::Unavailable("offline".to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryIdentityBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_email(email: &str) -> Result<String, SessionError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(SessionError::InvalidEmail(email)),
    }
}

#[async_trait]
impl IdentityBackend for MemoryIdentityBackend {
    async fn sign_up(&self, params: SignUp) -> Result<Identity, SessionError> {
        self.check_online()?;
        let email = normalize_email(&params.email)?;
        if params.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SessionError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }

        let identity = {
            let mut accounts = self.accounts();
            if accounts.contains_key(&email) {
                return Err(SessionError::EmailInUse(email));
            }
            let account = Account {
                uid: Uuid::new_v4().to_string(),
                password: params.password,
                display_name: params.display_name,
            };
            let identity = Identity {
                uid: account.uid.clone(),
                email: email.clone(),
                display_name: account.display_name.clone(),
            };
            accounts.insert(email, account);
            identity
        };

        info!(uid = %identity.uid, "Account created");
        self.current.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in(&self, params: SignIn) -> Result<Identity, SessionError> {
        self.check_online()?;
        let email = normalize_email(&params.email)?;

        let identity = {
            let accounts = self.accounts();
            match accounts.get(&email) {
                Some(account) if account.password == params.password => Identity {
                    uid: account.uid.clone(),
                    email: email.clone(),
                    display_name: account.display_name.clone(),
                },
                _ => return Err(SessionError::InvalidCredentials),
            }
        };

        debug!(uid = %identity.uid, "Signed in");
        self.current.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        self.check_online()?;
        self.current.send_replace(None);
        Ok(())
    }

    fn watch_identity(&self) -> watch::Receiver<Option<Identity>> {
        self.current.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up(email: &str, password: &str) -> SignUp {
        SignUp {
            email: email.to_string(),
            password: password.to_string(),
            display_name: "Sam".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_publishes_identity() {
        let backend = MemoryIdentityBackend::new();
        let watch = backend.watch_identity();

        let identity = backend.sign_up(sign_up("Sam@Example.com", "secret1")).await.unwrap();

        assert_eq!(identity.email, "sam@example.com");
        assert_eq!(identity.display_name, "Sam");
        assert_eq!(watch.borrow().as_ref(), Some(&identity));
    }

    #[tokio::test]
    async fn test_sign_up_validation() {
        let backend = MemoryIdentityBackend::new();

        assert!(matches!(
            backend.sign_up(sign_up("not-an-email", "secret1")).await,
            Err(SessionError::InvalidEmail(_))
        ));
        assert_eq!(
            backend.sign_up(sign_up("sam@example.com", "short")).await,
            Err(SessionError::WeakPassword { min: 6 })
        );

        backend.sign_up(sign_up("sam@example.com", "secret1")).await.unwrap();
        assert!(matches!(
            backend.sign_up(sign_up("sam@example.com", "secret2")).await,
            Err(SessionError::EmailInUse(_))
        ));
    }

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let backend = MemoryIdentityBackend::new();
        let created = backend.sign_up(sign_up("sam@example.com", "secret1")).await.unwrap();
        backend.sign_out().await.unwrap();
        assert!(backend.watch_identity().borrow().is_none());

        let wrong = SignIn {
            email: "sam@example.com".to_string(),
            password: "nope".to_string(),
        };
        assert_eq!(backend.sign_in(wrong).await, Err(SessionError::InvalidCredentials));

        let right = SignIn {
            email: "sam@example.com".to_string(),
            password: "secret1".to_string(),
        };
        let identity = backend.sign_in(right).await.unwrap();
        assert_eq!(identity.uid, created.uid);
    }
}
