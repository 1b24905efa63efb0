use crate::framework::{Attachment, FrameworkError, ListClient, ListKind, Outcome};
use async_trait::async_trait;

/// Trait for list-specific clients to inherit the shared list operations.
///
/// This trait reduces boilerplate by providing default implementations for
/// the intents every list supports: reading, removing, clearing.
#[async_trait]
pub trait ActorClient<K: ListKind>: Send + Sync {
    /// The list-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ListClient.
    fn inner(&self) -> &ListClient<K>;

    /// Map framework errors to the specific list error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Current entries; empty while signed out.
    #[tracing::instrument(skip(self), fields(list = K::LABEL))]
    async fn items(&self) -> Result<Vec<K::Entry>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().items().await.map_err(Self::map_error)
    }

    /// Remove an entry by item id. Removing an absent id succeeds.
    #[tracing::instrument(skip(self), fields(list = K::LABEL))]
    async fn remove(&self, item_id: String) -> Result<Outcome<()>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().remove(item_id).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self), fields(list = K::LABEL))]
    async fn clear(&self) -> Result<Outcome<()>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().clear().await.map_err(Self::map_error)
    }

    async fn status(&self) -> Result<Attachment, Self::Error> {
        self.inner().status().await.map_err(Self::map_error)
    }
}

/// Recovers the list's own error from a framework error, or wraps the framework error.
pub(crate) fn downcast_list_error<E>(e: FrameworkError) -> E
where
    E: std::error::Error + From<String> + 'static,
{
    match e {
        FrameworkError::ListError(inner) => match inner.downcast::<E>() {
            Ok(error) => *error,
            Err(other) => E::from(other.to_string()),
        },
        other => E::from(other.to_string()),
    }
}
