//! The session actor: runs identity operations one at a time and reports each
//! outcome as a notice.

use super::backend::IdentityBackend;
use super::error::SessionError;
use crate::clients::SessionClient;
use crate::model::{Identity, SignIn, SignUp};
use crate::notice::{Notice, Notifier};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

pub type SessionResponse<T> = oneshot::Sender<Result<T, SessionError>>;

#[derive(Debug)]
pub enum SessionRequest {
    SignUp {
        params: SignUp,
        respond_to: SessionResponse<Identity>,
    },
    SignIn {
        params: SignIn,
        respond_to: SessionResponse<Identity>,
    },
    SignOut {
        respond_to: SessionResponse<()>,
    },
}

pub struct SessionActor {
    receiver: mpsc::Receiver<SessionRequest>,
    backend: Arc<dyn IdentityBackend>,
}

impl SessionActor {
    pub fn new(backend: Arc<dyn IdentityBackend>, buffer_size: usize) -> (Self, SessionClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let client = SessionClient::new(sender, backend.watch_identity());
        let actor = Self { receiver, backend };
        (actor, client)
    }

    /// Runs until every [`SessionClient`] has been dropped.
    pub async fn run(mut self, notifier: Notifier) {
        info!("Session actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SessionRequest::SignUp { params, respond_to } => {
                    let email = params.email.clone();
                    let result = self.backend.sign_up(params).await;
                    match &result {
                        Ok(identity) => {
                            info!(uid = %identity.uid, "Signed up");
                            notifier.notify(Notice::info("Account created!", "Welcome to FoodieExpress!"));
                        }
                        Err(e) => {
                            warn!(%email, error = %e, "Sign-up failed");
                            notifier.notify(Notice::destructive("Signup failed", e.to_string()));
                        }
                    }
                    let _ = respond_to.send(result);
                }
                SessionRequest::SignIn { params, respond_to } => {
                    let email = params.email.clone();
                    let result = self.backend.sign_in(params).await;
                    match &result {
                        Ok(identity) => {
                            info!(uid = %identity.uid, "Signed in");
                            notifier.notify(Notice::info("Welcome back!", "You've successfully logged in."));
                        }
                        Err(e) => {
                            warn!(%email, error = %e, "Sign-in failed");
                            notifier.notify(Notice::destructive("Login failed", e.to_string()));
                        }
                    }
                    let _ = respond_to.send(result);
                }
                SessionRequest::SignOut { respond_to } => {
                    let result = self.backend.sign_out().await;
                    match &result {
                        Ok(()) => {
                            info!("Signed out");
                            notifier.notify(Notice::info("Logged out", "See you next time!"));
                        }
                        Err(e) => {
                            warn!(error = %e, "Sign-out failed");
                            notifier.notify(Notice::destructive("Logout failed", e.to_string()));
                        }
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!("Session actor shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeLevel;
    use crate::session_actor::MemoryIdentityBackend;

    #[tokio::test]
    async fn test_failed_sign_in_notifies_and_returns_error() {
        let notifier = Notifier::default();
        let mut notices = notifier.subscribe();
        let (actor, client) = SessionActor::new(Arc::new(MemoryIdentityBackend::new()), 8);
        tokio::spawn(actor.run(notifier));

        let result = client.sign_in("ghost@example.com", "whatever").await;

        assert_eq!(result, Err(SessionError::InvalidCredentials));
        let notice = notices.recv().await.unwrap();
        assert_eq!(notice.title, "Login failed");
        assert_eq!(notice.level, NoticeLevel::Destructive);
        assert!(client.current().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_failure_is_returned() {
        let backend = Arc::new(MemoryIdentityBackend::new());
        let notifier = Notifier::default();
        let mut notices = notifier.subscribe();
        let (actor, client) = SessionActor::new(backend.clone(), 8);
        tokio::spawn(actor.run(notifier));

        client.sign_up("sam@example.com", "secret1", "Sam").await.unwrap();
        assert_eq!(notices.recv().await.unwrap().title, "Account created!");

        backend.set_offline(true);
        assert!(matches!(client.sign_out().await, Err(SessionError::Unavailable(_))));
        assert_eq!(notices.recv().await.unwrap().title, "Logout failed");
        assert!(client.current().is_some());
    }
}
