//! # Mock Framework
//!
//! Utilities for testing list clients in isolation.
//!
//! Use [`MockListClient`] to script the responses a list actor would give, or
//! [`create_mock_client`] to get a client and the raw receiver. Then use helpers like
//! [`expect_add`] or [`expect_action`] to assert behavior.

use crate::framework::{
    AddOutcome, FrameworkError, ListClient, ListKind, ListRequest, Outcome, Response,
};
use crate::model::CatalogItem;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
enum Expectation<K: ListKind> {
    Add {
        response: Result<Outcome<AddOutcome>, FrameworkError>,
    },
    Remove {
        item_id: String,
        response: Result<Outcome<()>, FrameworkError>,
    },
    Action {
        response: Result<Outcome<K::ActionResult>, FrameworkError>,
    },
    Items {
        response: Result<Vec<K::Entry>, FrameworkError>,
    },
}

type Expectations<K> = Arc<Mutex<VecDeque<Expectation<K>>>>;

/// A mock list client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockListClient::<Cart>::new();
/// mock.expect_add().return_ok(Outcome::Applied(AddOutcome::Added));
/// mock.expect_items().return_ok(vec![entry]);
///
/// let client = CartClient::new(mock.client());
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockListClient<K: ListKind> {
    client: ListClient<K>,
    expectations: Expectations<K>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<K: ListKind> MockListClient<K> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ListRequest<K>>(100);
        let expectations: Expectations<K> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ListRequest::Add { respond_to, .. }, Some(Expectation::Add { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ListRequest::Remove { item_id, respond_to },
                        Some(Expectation::Remove { item_id: expected, response }),
                    ) => {
                        assert_eq!(item_id, expected, "Unexpected item id in remove");
                        let _ = respond_to.send(response);
                    }
                    (ListRequest::Action { respond_to, .. }, Some(Expectation::Action { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ListRequest::Items { respond_to }, Some(Expectation::Items { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ListClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ListClient<K> {
        self.client.clone()
    }

    /// Expects an `add` operation.
    pub fn expect_add(&mut self) -> ExpectationBuilder<K, Outcome<AddOutcome>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Add { response })
    }

    /// Expects a `remove` operation for `item_id`.
    pub fn expect_remove(&mut self, item_id: impl Into<String>) -> ExpectationBuilder<K, Outcome<()>> {
        let item_id = item_id.into();
        ExpectationBuilder::new(self.expectations.clone(), move |response| Expectation::Remove {
            item_id,
            response,
        })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self) -> ExpectationBuilder<K, Outcome<K::ActionResult>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Action { response })
    }

    /// Expects an `items` read.
    pub fn expect_items(&mut self) -> ExpectationBuilder<K, Vec<K::Entry>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Items { response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<K: ListKind> Default for MockListClient<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that records the response of one expected request.
pub struct ExpectationBuilder<K: ListKind, T> {
    expectations: Expectations<K>,
    make: Box<dyn FnOnce(Result<T, FrameworkError>) -> Expectation<K> + Send>,
}

impl<K: ListKind, T> ExpectationBuilder<K, T> {
    fn new(
        expectations: Expectations<K>,
        make: impl FnOnce(Result<T, FrameworkError>) -> Expectation<K> + Send + 'static,
    ) -> Self {
        Self {
            expectations,
            make: Box::new(make),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, FrameworkError>) {
        let expectation = (self.make)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// When testing a domain client (e.g., `CartClient`) we don't want to spin up a full
/// `ListActor`. The returned client sends its requests to a channel we control, so
/// the test can inspect each request and answer it deterministically.
///
/// **Note**: Consider using [`MockListClient`] for a more fluent API.
pub fn create_mock_client<K: ListKind>(buffer_size: usize) -> (ListClient<K>, mpsc::Receiver<ListRequest<K>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ListClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Add request
pub async fn expect_add<K: ListKind>(
    receiver: &mut mpsc::Receiver<ListRequest<K>>,
) -> Option<(CatalogItem, Response<Outcome<AddOutcome>>)> {
    match receiver.recv().await {
        Some(ListRequest::Add { item, respond_to }) => Some((item, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<K: ListKind>(
    receiver: &mut mpsc::Receiver<ListRequest<K>>,
) -> Option<(K::Action, Response<Outcome<K::ActionResult>>)> {
    match receiver.recv().await {
        Some(ListRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}
