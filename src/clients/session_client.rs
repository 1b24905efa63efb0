use crate::model::{Identity, SignIn, SignUp};
use crate::session_actor::{SessionError, SessionRequest};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

/// Client for interacting with the Session actor.
///
/// Identity operations go through the actor; the current identity is read straight
/// from the backend's `watch` channel.
#[derive(Clone)]
pub struct SessionClient {
    sender: mpsc::Sender<SessionRequest>,
    identity: watch::Receiver<Option<Identity>>,
}

impl SessionClient {
    pub fn new(sender: mpsc::Sender<SessionRequest>, identity: watch::Receiver<Option<Identity>>) -> Self {
        Self { sender, identity }
    }

    #[instrument(skip(self, password))]
    pub async fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<Identity, SessionError> {
        debug!("Sending request");
        let params = SignUp {
            email: email.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
        };
        let (respond_to, response) = oneshot::channel();
        self.send(SessionRequest::SignUp { params, respond_to }).await?;
        response.await.map_err(|e| SessionError::ActorCommunicationError(e.to_string()))?
    }

    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        debug!("Sending request");
        let params = SignIn {
            email: email.to_string(),
            password: password.to_string(),
        };
        let (respond_to, response) = oneshot::channel();
        self.send(SessionRequest::SignIn { params, respond_to }).await?;
        response.await.map_err(|e| SessionError::ActorCommunicationError(e.to_string()))?
    }

    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(SessionRequest::SignOut { respond_to }).await?;
        response.await.map_err(|e| SessionError::ActorCommunicationError(e.to_string()))?
    }

    pub fn current(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.identity.clone()
    }

    async fn send(&self, request: SessionRequest) -> Result<(), SessionError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| SessionError::ActorCommunicationError("Session actor closed".to_string()))
    }
}
