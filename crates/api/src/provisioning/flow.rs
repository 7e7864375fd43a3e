//! Workspace provisioning state machine
//!
//! `Editing -> Submitting -> Succeeded`, with `Submitting -> Editing` when the
//! Directory Service rejects the form. `Succeeded` is terminal: the only thing
//! left to happen is the scheduled redirect, which cannot be cancelled.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use projecthub_shared::{
    FieldErrors, ProvisioningResult, SignupRequest, SignupResponse, SubdomainCandidate,
    SubdomainStatus, WorkspaceForm,
};
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::{AvailabilityChecker, FlowSettings, SubmissionError, GENERIC_SUBMISSION_ERROR};
use crate::directory::DirectoryService;

/// Moves the client to another URL
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

/// Where a flow currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    Editing,
    Submitting,
    Succeeded(ProvisioningResult),
}

impl FlowState {
    fn name(&self) -> &'static str {
        match self {
            FlowState::Editing => "editing",
            FlowState::Submitting => "submitting",
            FlowState::Succeeded(_) => "succeeded",
        }
    }
}

/// Editable form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Subdomain,
    CompanyName,
    AdminName,
    AdminEmail,
}

impl FormField {
    /// Wire name of the field, as used in Directory Service error maps
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Subdomain => "subdomain",
            FormField::CompanyName => "company_name",
            FormField::AdminName => "admin_name",
            FormField::AdminEmail => "admin_email",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Form cannot be changed while {0}")]
    NotEditing(&'static str),

    #[error("Submission blocked: {0}")]
    SubmissionBlocked(String),
}

/// One signup form, from first keystroke to redirect
pub struct ProvisioningFlow {
    id: Uuid,
    directory: Arc<dyn DirectoryService>,
    navigator: Arc<dyn Navigator>,
    checker: AvailabilityChecker,
    settings: FlowSettings,
    inner: Mutex<FlowInner>,
}

struct FlowInner {
    state: FlowState,
    company_name: String,
    admin_name: String,
    admin_email: String,
    field_errors: FieldErrors,
    general_error: Option<String>,
    redirect: Option<JoinHandle<()>>,
}

impl ProvisioningFlow {
    pub fn new(
        directory: Arc<dyn DirectoryService>,
        navigator: Arc<dyn Navigator>,
        settings: FlowSettings,
    ) -> Self {
        let checker = AvailabilityChecker::new(Arc::clone(&directory), settings.debounce);
        Self {
            id: Uuid::new_v4(),
            directory,
            navigator,
            checker,
            settings,
            inner: Mutex::new(FlowInner {
                state: FlowState::Editing,
                company_name: String::new(),
                admin_name: String::new(),
                admin_email: String::new(),
                field_errors: FieldErrors::new(),
                general_error: None,
                redirect: None,
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> FlowState {
        self.lock().state.clone()
    }

    pub fn checker(&self) -> &AvailabilityChecker {
        &self.checker
    }

    /// Snapshot of the form as it would be rendered
    pub fn form(&self) -> WorkspaceForm {
        let inner = self.lock();
        self.compose(&inner)
    }

    /// Apply a subdomain edit. Triggers a debounced availability check.
    pub fn set_subdomain(&self, raw: &str) -> Result<SubdomainCandidate, FlowError> {
        let inner = self.lock();
        ensure_editing(&inner)?;
        Ok(self.checker.update(raw))
    }

    /// Apply an edit to any field
    pub fn set_field(&self, field: FormField, value: &str) -> Result<(), FlowError> {
        let mut inner = self.lock();
        ensure_editing(&inner)?;

        match field {
            FormField::Subdomain => {
                self.checker.update(value);
            }
            FormField::CompanyName => inner.company_name = value.to_string(),
            FormField::AdminName => inner.admin_name = value.to_string(),
            FormField::AdminEmail => inner.admin_email = value.to_string(),
        }
        Ok(())
    }

    /// Whether the submit trigger is enabled
    pub fn can_submit(&self) -> bool {
        let inner = self.lock();
        ensure_editing(&inner).is_ok() && submission_blocker(&self.compose(&inner)).is_none()
    }

    /// Send the form to the Directory Service.
    ///
    /// Returns the state the flow settled in: `Succeeded` with a redirect
    /// scheduled, or `Editing` with field or general errors populated.
    pub async fn submit(&self) -> Result<FlowState, FlowError> {
        let request = {
            let mut inner = self.lock();
            ensure_editing(&inner)?;

            let form = self.compose(&inner);
            if let Some(reason) = submission_blocker(&form) {
                return Err(FlowError::SubmissionBlocked(reason));
            }

            inner.field_errors.clear();
            inner.general_error = None;
            inner.state = FlowState::Submitting;
            SignupRequest::from(&form)
        };

        tracing::info!(
            flow_id = %self.id,
            subdomain = %request.subdomain,
            "Submitting workspace signup"
        );
        let pending = SubmissionInFlight { flow: self };
        let outcome = self.directory.signup(&request).await;
        std::mem::forget(pending);

        let mut inner = self.lock();
        match outcome {
            Ok(SignupResponse {
                success: true,
                data: Some(data),
                ..
            }) => {
                let result = ProvisioningResult::from(data);
                inner.redirect = Some(self.schedule_redirect(result.workspace_url.clone()));
                inner.state = FlowState::Succeeded(result);
            }
            Ok(response) => {
                tracing::warn!(
                    flow_id = %self.id,
                    success = response.success,
                    "Workspace signup answered without a workspace"
                );
                inner.general_error = Some(
                    response
                        .message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| GENERIC_SUBMISSION_ERROR.to_string()),
                );
                inner.state = FlowState::Editing;
            }
            Err(err) => {
                tracing::warn!(flow_id = %self.id, error = %err, "Workspace signup rejected");
                match SubmissionError::from(&err) {
                    SubmissionError::Fields(fields) => inner.field_errors = fields,
                    SubmissionError::General(message) => inner.general_error = Some(message),
                }
                inner.state = FlowState::Editing;
            }
        }

        Ok(inner.state.clone())
    }

    /// Hand over the scheduled redirect task, if one exists. Awaiting it
    /// waits for the navigation; dropping it does not cancel it.
    pub fn take_redirect(&self) -> Option<JoinHandle<()>> {
        self.lock().redirect.take()
    }

    fn schedule_redirect(&self, url: String) -> JoinHandle<()> {
        let navigator = Arc::clone(&self.navigator);
        let delay = self.settings.redirect_delay;
        let flow_id = self.id;

        tracing::info!(flow_id = %flow_id, url = %url, delay = ?delay, "Workspace ready; redirect scheduled");
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::info!(flow_id = %flow_id, url = %url, "Redirecting to workspace");
            navigator.navigate(&url);
        })
    }

    fn compose(&self, inner: &FlowInner) -> WorkspaceForm {
        WorkspaceForm {
            subdomain: self.checker.candidate(),
            company_name: inner.company_name.clone(),
            admin_name: inner.admin_name.clone(),
            admin_email: inner.admin_email.clone(),
            field_errors: inner.field_errors.clone(),
            general_error: inner.general_error.clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FlowInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Puts an abandoned submission back into `Editing`. Forgotten once the
/// Directory Service has answered.
struct SubmissionInFlight<'a> {
    flow: &'a ProvisioningFlow,
}

impl Drop for SubmissionInFlight<'_> {
    fn drop(&mut self) {
        let mut inner = self.flow.lock();
        if inner.state == FlowState::Submitting {
            tracing::warn!(flow_id = %self.flow.id, "Workspace signup abandoned before an answer");
            inner.state = FlowState::Editing;
        }
    }
}

fn ensure_editing(inner: &FlowInner) -> Result<(), FlowError> {
    match inner.state {
        FlowState::Editing => Ok(()),
        ref other => Err(FlowError::NotEditing(other.name())),
    }
}

/// Why the form cannot be submitted right now, if it cannot
fn submission_blocker(form: &WorkspaceForm) -> Option<String> {
    match form.subdomain.status {
        SubdomainStatus::Checking => {
            return Some("subdomain availability check in progress".to_string())
        }
        SubdomainStatus::Taken => return Some("subdomain is already taken".to_string()),
        _ => {}
    }

    let missing = form.missing_fields();
    if !missing.is_empty() {
        return Some(format!("missing required fields: {}", missing.join(", ")));
    }
    None
}
