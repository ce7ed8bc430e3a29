//! Submit controller
//!
//! A submit runs in three steps so the UI can keep drawing while the
//! request is outstanding:
//! 1. [`Submitter::begin`] validates, normalizes and takes the in-flight guard
//! 2. [`PendingSubmit::send`] awaits the transport (usually on a spawned task)
//! 3. [`SubmitOutcome::finish`] commits the normalized draft on success
//!
//! The guard lives until the outcome is finished or dropped, so it is
//! released whatever the result.

use crate::engine::{normalize, Normalization, NormalizedField};
use crate::state::{DraftStore, StoreError};
use crate::transport::{FieldTransport, TransportError};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("A submit is already in progress")]
    InFlight,
    #[error("The field has validation errors")]
    Invalid,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Holds the in-flight flag; clears it on drop
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Gates submits on validation and allows one outstanding request at a time
pub struct Submitter {
    transport: Arc<dyn FieldTransport>,
    in_flight: Arc<AtomicBool>,
    delay: Duration,
}

impl Submitter {
    pub fn new(transport: Arc<dyn FieldTransport>) -> Self {
        Self {
            transport,
            in_flight: Arc::new(AtomicBool::new(false)),
            delay: Duration::ZERO,
        }
    }

    /// Wait this long before each request (demo pacing)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate and normalize the draft, then take the in-flight guard.
    ///
    /// Validation errors are recorded in the store for display.
    pub fn begin(&self, store: &mut DraftStore) -> Result<PendingSubmit, SubmitError> {
        if self.is_in_flight() {
            return Err(SubmitError::InFlight);
        }

        if !store.validate().is_valid() {
            tracing::info!("Submit blocked by validation: {:?}", store.report().errors);
            return Err(SubmitError::Invalid);
        }

        let normalization = normalize(store.choices(), store.draft());
        let guard = InFlightGuard::acquire(&self.in_flight).ok_or(SubmitError::InFlight)?;

        Ok(PendingSubmit {
            normalization,
            transport: Arc::clone(&self.transport),
            delay: self.delay,
            guard,
        })
    }
}

/// A validated submit that has not been sent yet
pub struct PendingSubmit {
    normalization: Normalization,
    transport: Arc<dyn FieldTransport>,
    delay: Duration,
    guard: InFlightGuard,
}

impl PendingSubmit {
    pub fn payload(&self) -> &NormalizedField {
        &self.normalization.field
    }

    pub async fn send(self) -> SubmitOutcome {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        tracing::info!("Submitting field '{}'", self.normalization.field.label);
        let response = self.transport.save_field(&self.normalization.field).await;

        SubmitOutcome {
            normalization: self.normalization,
            response,
            _guard: self.guard,
        }
    }
}

/// Transport result paired with the normalization it was sent for
pub struct SubmitOutcome {
    normalization: Normalization,
    response: Result<Value, TransportError>,
    _guard: InFlightGuard,
}

impl SubmitOutcome {
    /// Commit on success; leave the draft untouched on failure
    pub fn finish(self, store: &mut DraftStore) -> Result<Value, SubmitError> {
        let reply = self.response?;
        store.commit(&self.normalization)?;
        tracing::debug!("Response from server: {}", reply);
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{MemoryStorage, Selection};
    use crate::transport::MockFieldTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn valid_store() -> DraftStore {
        let mut store = DraftStore::load(Box::new(MemoryStorage::default()));
        store.set_label("Color".to_string()).unwrap();
        store.set_choice(0, "b".to_string()).unwrap();
        store.insert_blank().unwrap();
        store.set_choice(1, "a".to_string()).unwrap();
        store.toggle_selection(0).unwrap();
        store
    }

    fn echo_transport() -> Arc<dyn FieldTransport> {
        let mut mock = MockFieldTransport::new();
        mock.expect_save_field()
            .returning(|field| Ok(json!({ "message": "ok", "data": field })));
        Arc::new(mock)
    }

    fn failing_transport(status: u16) -> Arc<dyn FieldTransport> {
        let mut mock = MockFieldTransport::new();
        mock.expect_save_field()
            .times(1)
            .returning(move |_| Err(TransportError::Status(status)));
        Arc::new(mock)
    }

    #[tokio::test]
    async fn test_success_commits_normalized_draft() {
        let submitter = Submitter::new(echo_transport());
        let mut store = valid_store();

        let pending = submitter.begin(&mut store).unwrap();
        assert_eq!(pending.payload().choices, vec!["a", "b"]);
        let reply = pending.send().await.finish(&mut store).unwrap();

        assert_eq!(reply["message"], "ok");
        assert_eq!(reply["data"]["selectedChoices"], json!(["b"]));
        assert_eq!(store.choices().rows(), &["a".to_string(), "b".to_string()]);
        assert_eq!(store.draft().selection, Selection::Multi(vec![1]));
        assert!(!submitter.is_in_flight());
    }

    #[tokio::test]
    async fn test_transport_failure_leaves_draft_unchanged() {
        let submitter = Submitter::new(failing_transport(500));
        let mut store = valid_store();
        let before = (store.draft().clone(), store.choices().clone());

        let outcome = submitter.begin(&mut store).unwrap().send().await;
        let err = outcome.finish(&mut store).unwrap_err();

        assert_eq!(err.to_string(), "Server responded with 500");
        assert_eq!((store.draft().clone(), store.choices().clone()), before);
        assert!(!submitter.is_in_flight());
    }

    #[test]
    fn test_invalid_draft_is_not_sent() {
        let mut mock = MockFieldTransport::new();
        mock.expect_save_field().never();
        let submitter = Submitter::new(Arc::new(mock));
        let mut store = DraftStore::load(Box::new(MemoryStorage::default()));

        let err = submitter.begin(&mut store).err().unwrap();

        assert!(matches!(err, SubmitError::Invalid));
        assert!(!store.report().is_valid());
        assert!(!submitter.is_in_flight());
    }

    #[tokio::test]
    async fn test_second_submit_rejected_while_in_flight() {
        let submitter = Submitter::new(echo_transport());
        let mut store = valid_store();

        let pending = submitter.begin(&mut store).unwrap();
        assert!(submitter.is_in_flight());
        assert!(matches!(submitter.begin(&mut store), Err(SubmitError::InFlight)));

        let outcome = pending.send().await;
        // The guard is held until the outcome is consumed
        assert!(submitter.is_in_flight());
        outcome.finish(&mut store).unwrap();
        assert!(submitter.begin(&mut store).is_ok());
    }

    #[tokio::test]
    async fn test_dropping_outcome_releases_guard() {
        let submitter = Submitter::new(failing_transport(503));
        let mut store = valid_store();

        drop(submitter.begin(&mut store).unwrap().send().await);

        assert!(!submitter.is_in_flight());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_awaited_before_sending() {
        let submitter = Submitter::new(echo_transport()).with_delay(Duration::from_secs(2));
        let mut store = valid_store();
        let started = tokio::time::Instant::now();

        let outcome = submitter.begin(&mut store).unwrap().send().await;

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert!(outcome.finish(&mut store).is_ok());
    }
}
