//! Debounced subdomain availability checks
//!
//! Every edit bumps a generation counter, aborts the pending debounce timer
//! and (for values of at least three characters) schedules a new one. When
//! the timer fires the probe is spawned on its own: later edits cancel timers,
//! never requests already on the wire. A probe only writes its verdict back if
//! its generation and value are still current, so a slow answer for an old
//! value can never overwrite the status of the new one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use projecthub_shared::{
    normalize_subdomain, HubError, HubResult, SubdomainCandidate, SubdomainStatus,
    MIN_SUBDOMAIN_LEN,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::directory::DirectoryService;

/// Owns the subdomain candidate and the single pending-check slot
pub struct AvailabilityChecker {
    directory: Arc<dyn DirectoryService>,
    debounce: Duration,
    state: Arc<Mutex<CheckerState>>,
    updates: Arc<watch::Sender<SubdomainCandidate>>,
}

#[derive(Default)]
struct CheckerState {
    candidate: SubdomainCandidate,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

fn lock(state: &Mutex<CheckerState>) -> MutexGuard<'_, CheckerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AvailabilityChecker {
    pub fn new(directory: Arc<dyn DirectoryService>, debounce: Duration) -> Self {
        let (updates, _) = watch::channel(SubdomainCandidate::default());
        Self {
            directory,
            debounce,
            state: Arc::new(Mutex::new(CheckerState::default())),
            updates: Arc::new(updates),
        }
    }

    /// Probe the Directory Service once, without debouncing or touching the
    /// candidate
    pub async fn check(&self, subdomain: &str) -> HubResult<bool> {
        let normalized = normalize_subdomain(subdomain);
        if normalized.len() < MIN_SUBDOMAIN_LEN {
            return Err(HubError::Validation(format!(
                "Subdomain must be at least {} characters long",
                MIN_SUBDOMAIN_LEN
            )));
        }

        let availability = self.directory.check_subdomain(&normalized).await?;
        Ok(availability.available)
    }

    /// Record a new raw value typed by the user.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn update(&self, raw: &str) -> SubdomainCandidate {
        let mut candidate = SubdomainCandidate::from_input(raw);
        let mut state = lock(&self.state);

        state.generation += 1;
        let generation = state.generation;
        if let Some(pending) = state.pending.take() {
            pending.abort();
        }

        if candidate.is_checkable() {
            candidate.status = SubdomainStatus::Checking;
            state.pending = Some(self.schedule(candidate.normalized.clone(), generation));
            tracing::debug!(
                subdomain = %candidate.normalized,
                generation,
                "Availability check scheduled"
            );
        }

        state.candidate = candidate.clone();
        self.updates.send_replace(candidate.clone());
        candidate
    }

    /// Current candidate
    pub fn candidate(&self) -> SubdomainCandidate {
        lock(&self.state).candidate.clone()
    }

    /// Receive every candidate change
    pub fn subscribe(&self) -> watch::Receiver<SubdomainCandidate> {
        self.updates.subscribe()
    }

    fn schedule(&self, value: String, generation: u64) -> JoinHandle<()> {
        let directory = Arc::clone(&self.directory);
        let state = Arc::clone(&self.state);
        let updates = Arc::clone(&self.updates);
        let debounce = self.debounce;

        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            if lock(&state).generation != generation {
                return;
            }
            tokio::spawn(probe(directory, state, updates, value, generation));
        })
    }
}

impl Drop for AvailabilityChecker {
    fn drop(&mut self) {
        if let Some(pending) = lock(&self.state).pending.take() {
            pending.abort();
        }
    }
}

async fn probe(
    directory: Arc<dyn DirectoryService>,
    state: Arc<Mutex<CheckerState>>,
    updates: Arc<watch::Sender<SubdomainCandidate>>,
    value: String,
    generation: u64,
) {
    let outcome = directory.check_subdomain(&value).await;

    let mut state = lock(&state);
    if state.generation != generation || state.candidate.normalized != value {
        tracing::debug!(subdomain = %value, generation, "Discarding stale availability result");
        return;
    }

    state.candidate.status = match outcome {
        Ok(availability) if availability.available => SubdomainStatus::Available,
        Ok(_) => SubdomainStatus::Taken,
        Err(err) => {
            // Submission stays possible; the service validates again on signup
            tracing::warn!(subdomain = %value, error = %err, "Availability check failed");
            SubdomainStatus::Unchecked
        }
    };
    tracing::debug!(subdomain = %value, status = %state.candidate.status, "Availability resolved");
    updates.send_replace(state.candidate.clone());
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::MockDirectory;
    use tokio::time::sleep;

    const DEBOUNCE: Duration = Duration::from_millis(500);

    fn checker(directory: &Arc<MockDirectory>) -> AvailabilityChecker {
        AvailabilityChecker::new(directory.clone(), DEBOUNCE)
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_input_is_never_checked() {
        let directory = Arc::new(MockDirectory::new());
        let checker = checker(&directory);

        let candidate = checker.update("ab");
        assert_eq!(candidate.status, SubdomainStatus::Unchecked);

        sleep(Duration::from_secs(2)).await;
        assert!(directory.check_calls().is_empty());
        assert_eq!(checker.candidate().status, SubdomainStatus::Unchecked);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_edits_issues_one_check() {
        let directory = Arc::new(MockDirectory::new());
        let checker = checker(&directory);

        for raw in ["a", "ac", "acm", "acme", "Acme-Co"] {
            checker.update(raw);
            sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(checker.candidate().status, SubdomainStatus::Checking);

        sleep(Duration::from_secs(1)).await;
        assert_eq!(directory.check_calls(), vec!["acme-co".to_string()]);
        assert_eq!(checker.candidate().status, SubdomainStatus::Available);
    }

    #[tokio::test(start_paused = true)]
    async fn test_taken_subdomain() {
        let directory = Arc::new(MockDirectory::new().with_taken("acme"));
        let checker = checker(&directory);

        checker.update("acme");
        sleep(Duration::from_secs(1)).await;
        assert_eq!(checker.candidate().status, SubdomainStatus::Taken);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_result_for_old_value_is_discarded() {
        let directory = Arc::new(
            MockDirectory::new()
                .with_taken("foo")
                .with_delay("foo", Duration::from_secs(2)),
        );
        let checker = checker(&directory);

        checker.update("foo");
        // Timer fired at 500ms; the "foo" probe is now in flight until 2.5s
        sleep(Duration::from_millis(600)).await;
        assert_eq!(directory.check_calls(), vec!["foo".to_string()]);

        checker.update("bar");
        sleep(Duration::from_millis(600)).await;
        assert_eq!(checker.candidate().normalized, "bar");
        assert_eq!(checker.candidate().status, SubdomainStatus::Available);

        // "foo" resolves Taken now, after "bar" was settled
        sleep(Duration::from_secs(2)).await;
        let candidate = checker.candidate();
        assert_eq!(candidate.normalized, "bar");
        assert_eq!(candidate.status, SubdomainStatus::Available);
        assert_eq!(directory.check_calls(), vec!["foo".to_string(), "bar".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_invalidates_settled_status() {
        let directory = Arc::new(MockDirectory::new());
        let checker = checker(&directory);

        checker.update("acme");
        sleep(Duration::from_secs(1)).await;
        assert_eq!(checker.candidate().status, SubdomainStatus::Available);

        assert_eq!(checker.update("acme2").status, SubdomainStatus::Checking);
        assert_eq!(checker.update("ac").status, SubdomainStatus::Unchecked);

        sleep(Duration::from_secs(1)).await;
        assert_eq!(directory.check_calls(), vec!["acme".to_string()]);
        assert_eq!(checker.candidate().status, SubdomainStatus::Unchecked);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_check_downgrades_to_unchecked() {
        let directory = Arc::new(MockDirectory::new().failing_checks());
        let checker = checker(&directory);

        checker.update("acme");
        sleep(Duration::from_secs(1)).await;
        assert_eq!(directory.check_calls().len(), 1);
        assert_eq!(checker.candidate().status, SubdomainStatus::Unchecked);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_transitions() {
        let directory = Arc::new(MockDirectory::new());
        let checker = checker(&directory);
        let mut updates = checker.subscribe();

        checker.update("Acme");
        assert_eq!(updates.borrow_and_update().status, SubdomainStatus::Checking);

        let settled = updates
            .wait_for(|c| c.status != SubdomainStatus::Checking)
            .await
            .unwrap()
            .clone();
        assert_eq!(settled.raw, "Acme");
        assert_eq!(settled.normalized, "acme");
        assert_eq!(settled.status, SubdomainStatus::Available);
    }

    #[tokio::test]
    async fn test_check_contract() {
        let directory = Arc::new(MockDirectory::new().with_taken("globex"));
        let checker = checker(&directory);

        assert!(matches!(checker.check("ab").await, Err(HubError::Validation(_))));
        assert!(checker.check("Acme").await.unwrap());
        assert!(!checker.check("globex").await.unwrap());
        assert_eq!(
            directory.check_calls(),
            vec!["acme".to_string(), "globex".to_string()]
        );

        let failing = Arc::new(MockDirectory::new().failing_checks());
        let checker = AvailabilityChecker::new(failing, DEBOUNCE);
        assert!(matches!(checker.check("acme").await, Err(HubError::Network(_))));
    }
}
