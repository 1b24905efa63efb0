//! # Generic List Actor
//!
//! The server half of a per-user list. One `ListActor<K>` task owns the entries of
//! one list kind and reacts to three event sources:
//!
//! 1. identity changes from the session provider,
//! 2. snapshots of the remote document `<K::COLLECTION>/<uid>`,
//! 3. requests from [`ListClient`]s.
//!
//! The loop polls them in that order (`tokio::select!` with `biased;`), so a request
//! sent after a sign-in has completed always observes the attached state, and a
//! snapshot that was already pushed is applied before the next request reads the list.

use crate::framework::{
    Attachment, FrameworkError, ListClient, ListKind, ListRequest, Outcome, Rejection,
};
use crate::model::{Identity, ListDocument};
use crate::notice::{Notice, Notifier};
use crate::store::{Document, DocumentPath, DocumentStore, DocumentWatch};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

/// Dependencies injected into a list actor when it starts running.
#[derive(Clone)]
pub struct ListContext {
    pub store: Arc<dyn DocumentStore>,
    pub identity: watch::Receiver<Option<Identity>>,
    pub notifier: Notifier,
}

/// The remote document the list currently follows.
struct Attached {
    uid: String,
    path: DocumentPath,
    // None when the subscription could not be opened or was closed by the store.
    watch: Option<DocumentWatch>,
}

enum Event<K: ListKind> {
    Identity(Option<Identity>),
    IdentityClosed,
    Snapshot(Option<Document>),
    SnapshotClosed,
    Request(ListRequest<K>),
}

/// The generic actor that manages one per-user list.
///
/// # State Machine
/// - **Detached**: no identity. `entries` is empty and every mutation is rejected
///   with [`Rejection::Unauthenticated`].
/// - **Attached(uid)**: subscribed to `<K::COLLECTION>/<uid>`. Snapshots replace
///   `entries` wholesale; accepted mutations write the whole list back.
///
/// An identity switch is a detach followed by an attach.
pub struct ListActor<K: ListKind> {
    kind: K,
    receiver: mpsc::Receiver<ListRequest<K>>,
    entries: Vec<K::Entry>,
    attached: Option<Attached>,
}

impl<K: ListKind> ListActor<K> {
    pub fn new(kind: K, buffer_size: usize) -> (Self, ListClient<K>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            kind,
            receiver,
            entries: Vec::new(),
            attached: None,
        };
        (actor, ListClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// # Context Injection
    /// The identity receiver and the store are handed over here rather than in `new`,
    /// so the session provider can be spawned after the list actors.
    pub async fn run(mut self, context: ListContext) {
        let ListContext {
            store,
            mut identity,
            notifier,
        } = context;
        let list = K::LABEL;
        info!(list, "Actor started");

        let current = identity.borrow_and_update().clone();
        self.follow(current, store.as_ref(), &notifier).await;
        let mut identity_open = true;

        loop {
            let event = tokio::select! {
                biased;
                changed = identity.changed(), if identity_open => match changed {
                    Ok(()) => Event::Identity(identity.borrow_and_update().clone()),
                    Err(_) => Event::IdentityClosed,
                },
                snapshot = next_snapshot(&mut self.attached) => match snapshot {
                    Some(document) => Event::Snapshot(document),
                    None => Event::SnapshotClosed,
                },
                request = self.receiver.recv() => match request {
                    Some(request) => Event::Request(request),
                    None => break,
                },
            };

            match event {
                Event::Identity(next) => self.follow(next, store.as_ref(), &notifier).await,
                Event::IdentityClosed => {
                    warn!(list, "Identity channel closed, keeping current attachment");
                    identity_open = false;
                }
                Event::Snapshot(document) => self.apply_snapshot(document),
                Event::SnapshotClosed => {
                    if let Some(attached) = self.attached.as_mut() {
                        warn!(list, uid = %attached.uid, "Document subscription closed");
                        attached.watch = None;
                    }
                }
                Event::Request(request) => {
                    self.handle_request(request, store.as_ref(), &notifier).await
                }
            }
        }

        info!(list, size = self.entries.len(), "Shutdown");
    }

    pub fn attachment(&self) -> Attachment {
        match &self.attached {
            Some(attached) => Attachment::Attached {
                uid: attached.uid.clone(),
            },
            None => Attachment::Detached,
        }
    }

    /// Moves the actor to the state matching `identity`.
    async fn follow(
        &mut self,
        identity: Option<Identity>,
        store: &dyn DocumentStore,
        notifier: &Notifier,
    ) {
        let uid = identity.map(|identity| identity.uid);
        let current = self.attached.as_ref().map(|attached| attached.uid.as_str());
        if current == uid.as_deref() {
            return;
        }

        if self.attached.is_some() {
            self.detach();
        }
        if let Some(uid) = uid {
            self.attach(uid, store, notifier).await;
        }
    }

    fn detach(&mut self) {
        if let Some(attached) = self.attached.take() {
            info!(list = K::LABEL, uid = %attached.uid, dropped = self.entries.len(), "Detached");
        }
        self.entries.clear();
    }

    async fn attach(&mut self, uid: String, store: &dyn DocumentStore, notifier: &Notifier) {
        let path = DocumentPath::new(K::COLLECTION, uid.clone());
        let watch = match store.watch_document(&path).await {
            Ok(mut watch) => {
                let initial = watch.borrow_and_update().clone();
                self.apply_snapshot(initial);
                Some(watch)
            }
            Err(e) => {
                error!(list = K::LABEL, %path, error = %e, "Subscribe failed");
                notifier.notify(Notice::destructive(
                    format!("Couldn't load your {}", K::LABEL),
                    e.to_string(),
                ));
                None
            }
        };
        info!(list = K::LABEL, %uid, size = self.entries.len(), "Attached");
        self.attached = Some(Attached { uid, path, watch });
    }

    fn apply_snapshot(&mut self, document: Option<Document>) {
        let Some(document) = document else {
            debug!(list = K::LABEL, "Snapshot of missing document ignored");
            return;
        };
        match serde_json::from_value::<ListDocument<K::Entry>>(document.data) {
            Ok(list) => {
                self.entries = list.items;
                debug!(list = K::LABEL, id = %document.id, size = self.entries.len(), "Snapshot applied");
            }
            Err(e) => {
                warn!(list = K::LABEL, id = %document.id, error = %e, "Malformed snapshot, treating as empty");
                self.entries.clear();
            }
        }
    }

    async fn handle_request(
        &mut self,
        request: ListRequest<K>,
        store: &dyn DocumentStore,
        notifier: &Notifier,
    ) {
        let list = K::LABEL;
        match request {
            ListRequest::Add { item, respond_to } => {
                debug!(list, item_id = %item.id, "Add");
                if self.reject_detached(&format!("add items to {list}"), notifier) {
                    let _ = respond_to.send(Ok(Outcome::Rejected(Rejection::Unauthenticated)));
                    return;
                }
                let result = self.kind.on_add(&mut self.entries, item, notifier);
                let result = self.settle(result, store, notifier).await;
                let _ = respond_to.send(result);
            }
            ListRequest::Remove { item_id, respond_to } => {
                debug!(list, %item_id, "Remove");
                if self.reject_detached(&format!("remove items from your {list}"), notifier) {
                    let _ = respond_to.send(Ok(Outcome::Rejected(Rejection::Unauthenticated)));
                    return;
                }
                let result = self
                    .kind
                    .on_remove(&mut self.entries, &item_id, notifier)
                    .map(Outcome::Applied);
                let result = self.settle(result, store, notifier).await;
                let _ = respond_to.send(result);
            }
            ListRequest::Clear { respond_to } => {
                debug!(list, "Clear");
                if self.reject_detached(&format!("clear your {list}"), notifier) {
                    let _ = respond_to.send(Ok(Outcome::Rejected(Rejection::Unauthenticated)));
                    return;
                }
                self.entries.clear();
                let result = self
                    .settle::<_, K::Error>(Ok(Outcome::Applied(())), store, notifier)
                    .await;
                let _ = respond_to.send(result);
            }
            ListRequest::Action { action, respond_to } => {
                debug!(list, ?action, "Action");
                if self.reject_detached(&format!("change your {list}"), notifier) {
                    let _ = respond_to.send(Ok(Outcome::Rejected(Rejection::Unauthenticated)));
                    return;
                }
                let result = self
                    .kind
                    .handle_action(&mut self.entries, action, notifier)
                    .map(Outcome::Applied);
                let result = self.settle(result, store, notifier).await;
                let _ = respond_to.send(result);
            }
            ListRequest::Items { respond_to } => {
                debug!(list, size = self.entries.len(), "Items");
                let _ = respond_to.send(Ok(self.entries.clone()));
            }
            ListRequest::Status { respond_to } => {
                let _ = respond_to.send(Ok(self.attachment()));
            }
        }
    }

    /// Posts the log-in notice for `intent` when detached. Returns true if the request
    /// must be rejected.
    fn reject_detached(&self, intent: &str, notifier: &Notifier) -> bool {
        if self.attached.is_some() {
            return false;
        }
        warn!(list = K::LABEL, intent, "Mutation rejected, not signed in");
        notifier.notify(Notice::destructive(
            "Please log in",
            format!("You need to be logged in to {intent}."),
        ));
        true
    }

    /// Writes the list back after an applied hook and maps hook errors.
    async fn settle<T, E>(
        &self,
        result: Result<Outcome<T>, E>,
        store: &dyn DocumentStore,
        notifier: &Notifier,
    ) -> Result<Outcome<T>, FrameworkError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match result {
            Ok(Outcome::Applied(value)) => {
                self.write_back(store, notifier).await;
                Ok(Outcome::Applied(value))
            }
            Ok(Outcome::Rejected(reason)) => {
                info!(list = K::LABEL, ?reason, "Rejected");
                Ok(Outcome::Rejected(reason))
            }
            Err(e) => {
                warn!(list = K::LABEL, error = %e, "Hook failed");
                Err(FrameworkError::ListError(Box::new(e)))
            }
        }
    }

    async fn write_back(&self, store: &dyn DocumentStore, notifier: &Notifier) {
        let Some(attached) = &self.attached else {
            return;
        };
        let document = ListDocument::now(self.entries.clone());
        let written = match serde_json::to_value(&document) {
            Ok(data) => store.set_document(&attached.path, data).await,
            Err(e) => Err(e.into()),
        };
        match written {
            Ok(()) => {
                info!(list = K::LABEL, uid = %attached.uid, size = self.entries.len(), "Saved")
            }
            Err(e) => {
                error!(list = K::LABEL, path = %attached.path, error = %e, "Write-back failed");
                notifier.notify(Notice::destructive(
                    format!("Couldn't save your {}", K::LABEL),
                    e.to_string(),
                ));
            }
        }
    }
}

/// Resolves with the next version of the followed document, or `None` once the
/// store closes the subscription. Never resolves while there is nothing to follow.
async fn next_snapshot(attached: &mut Option<Attached>) -> Option<Option<Document>> {
    match attached.as_mut().and_then(|attached| attached.watch.as_mut()) {
        Some(watch) => match watch.changed().await {
            Ok(()) => Some(watch.borrow_and_update().clone()),
            Err(_) => None,
        },
        None => std::future::pending().await,
    }
}
