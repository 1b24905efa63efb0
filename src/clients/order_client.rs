use crate::model::{Identity, OrderRecord};
use crate::notice::{Notice, Notifier};
use crate::store::{Direction, DocumentStore, Query};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, instrument, warn};

pub const ORDERS_COLLECTION: &str = "orders";

/// Read-only access to the signed-in user's past orders.
///
/// Orders are not owned by an actor: each call runs one query against the store.
#[derive(Clone)]
pub struct OrderClient {
    store: Arc<dyn DocumentStore>,
    identity: watch::Receiver<Option<Identity>>,
    notifier: Notifier,
}

impl OrderClient {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        identity: watch::Receiver<Option<Identity>>,
        notifier: Notifier,
    ) -> Self {
        Self {
            store,
            identity,
            notifier,
        }
    }

    /// Orders of the current user, newest first. Empty when signed out or when the
    /// query fails; records that don't decode are skipped.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Vec<OrderRecord> {
        let Some(uid) = self.identity.borrow().as_ref().map(|identity| identity.uid.clone()) else {
            debug!("Signed out, no orders");
            return Vec::new();
        };

        let query = Query::collection(ORDERS_COLLECTION)
            .where_eq("userId", uid.clone())
            .order_by("createdAt", Direction::Descending);
        let documents = match self.store.query(&query).await {
            Ok(documents) => documents,
            Err(e) => {
                error!(%uid, error = %e, "Order query failed");
                self.notifier
                    .notify(Notice::destructive("Couldn't load orders", e.to_string()));
                return Vec::new();
            }
        };

        let orders: Vec<OrderRecord> = documents
            .into_iter()
            .filter_map(|document| {
                let mut data = document.data;
                if let Some(fields) = data.as_object_mut() {
                    fields
                        .entry("id")
                        .or_insert_with(|| Value::String(document.id.clone()));
                }
                match serde_json::from_value(data) {
                    Ok(order) => Some(order),
                    Err(e) => {
                        warn!(id = %document.id, error = %e, "Skipping malformed order");
                        None
                    }
                }
            })
            .collect();
        debug!(%uid, count = orders.len(), "Orders loaded");
        orders
    }
}
