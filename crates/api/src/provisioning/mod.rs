//! Workspace provisioning
//!
//! A `ProvisioningFlow` drives one signup form from first keystroke to the
//! redirect onto the new workspace. Subdomain edits go through an
//! `AvailabilityChecker`, which debounces probes against the Directory
//! Service and discards results for values that are no longer current.

mod availability;
mod errors;
mod flow;

use std::time::Duration;

pub use availability::AvailabilityChecker;
pub use errors::{SubmissionError, GENERIC_SUBMISSION_ERROR};
pub use flow::{FlowError, FlowState, FormField, Navigator, ProvisioningFlow};

/// Default quiet period before an availability check is sent
pub const DEFAULT_CHECK_DEBOUNCE: Duration = Duration::from_millis(500);

/// Default delay between a successful signup and the redirect
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Timing knobs for a provisioning flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowSettings {
    pub debounce: Duration,
    pub redirect_delay: Duration,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_CHECK_DEBOUNCE,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }
}
