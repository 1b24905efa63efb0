//! # Generic List Client
//!
//! A type-safe, cheaply clonable handle for sending intents to a [`ListActor`].
//!
//! [`ListActor`]: crate::framework::ListActor

use crate::framework::{AddOutcome, Attachment, FrameworkError, ListKind, ListRequest, Outcome};
use crate::model::CatalogItem;
use tokio::sync::{mpsc, oneshot};

pub struct ListClient<K: ListKind> {
    sender: mpsc::Sender<ListRequest<K>>,
}

// Derived Clone would require `K: Clone`.
impl<K: ListKind> Clone for ListClient<K> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<K: ListKind> ListClient<K> {
    pub fn new(sender: mpsc::Sender<ListRequest<K>>) -> Self {
        Self { sender }
    }

    pub async fn add(&self, item: CatalogItem) -> Result<Outcome<AddOutcome>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ListRequest::Add { item, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn remove(&self, item_id: impl Into<String>) -> Result<Outcome<()>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ListRequest::Remove { item_id: item_id.into(), respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn clear(&self) -> Result<Outcome<()>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ListRequest::Clear { respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn perform_action(&self, action: K::Action) -> Result<Outcome<K::ActionResult>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ListRequest::Action { action, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Current entries; empty while detached.
    pub async fn items(&self) -> Result<Vec<K::Entry>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ListRequest::Items { respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn status(&self) -> Result<Attachment, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ListRequest::Status { respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}
