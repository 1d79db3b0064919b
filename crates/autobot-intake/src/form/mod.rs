//! The intake form: field store, submission controller, and text presentation.

pub mod fields;
pub mod presentation;
pub mod status;
pub mod store;
pub mod submission;
pub mod validation;

use std::sync::{Mutex, PoisonError};

use tracing::debug;

pub use self::fields::{
    parse_salary, DisabilityStatus, FieldName, Gender, Salary, UnknownField, VeteranStatus,
};
pub use self::presentation::{FormPrompter, FormView};
pub use self::status::{Status, StatusKind};
pub use self::store::{FieldSet, FieldValue};
pub use self::submission::{
    HttpJobStartTransport, JobStartTransport, SubmissionController, SubmitAttempt, TransportError,
};
pub use self::validation::{FieldViolation, ValidationError, ViolationReason};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A required field is missing or malformed; nothing was sent.
    Blocked(ValidationError),
    /// A submission was already in flight; nothing was sent.
    Refused,
    Finished(Status),
}

/// Owns the field set and routes submits through the controller. Field edits
/// take `&self` so they stay possible while a request is outstanding.
pub struct IntakeForm<T> {
    fields: Mutex<FieldSet>,
    controller: SubmissionController<T>,
}

impl<T> IntakeForm<T>
where
    T: JobStartTransport,
{
    pub fn new(transport: T) -> Self {
        Self::with_fields(transport, FieldSet::default())
    }

    pub fn with_fields(transport: T, fields: FieldSet) -> Self {
        Self {
            fields: Mutex::new(fields),
            controller: SubmissionController::new(transport),
        }
    }

    pub fn set_field(&self, name: FieldName, raw: &str) {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_field(name, raw);
    }

    pub fn fields(&self) -> FieldSet {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn status(&self) -> Status {
        self.controller.status()
    }

    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    pub fn controller(&self) -> &SubmissionController<T> {
        &self.controller
    }

    /// Validate, then hand a snapshot of the fields to the controller.
    pub async fn submit(&self) -> SubmitOutcome {
        if self.controller.is_busy() {
            return SubmitOutcome::Refused;
        }

        let snapshot = self.fields();
        if let Err(err) = snapshot.validate() {
            debug!(fields = err.violations.len(), "submit blocked by validation");
            return SubmitOutcome::Blocked(err);
        }

        match self.controller.submit(&snapshot).await {
            SubmitAttempt::Refused => SubmitOutcome::Refused,
            SubmitAttempt::Finished(status) => SubmitOutcome::Finished(status),
        }
    }

    /// Render the current state. Takes a snapshot, so the returned string is
    /// stable even if fields change afterwards.
    pub fn render(&self) -> String {
        let fields = self.fields();
        let status = self.status();
        FormView::new(&fields, self.is_busy(), &status).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct CountingTransport {
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl JobStartTransport for CountingTransport {
        async fn start_job(&self, _body: &FieldSet) -> Result<(), TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            Ok(())
        }
    }

    fn filled_form(transport: CountingTransport) -> IntakeForm<CountingTransport> {
        let form = IntakeForm::new(transport);
        for (name, value) in [
            (FieldName::GroqApiKey, "gsk_x"),
            (FieldName::LinkedinEmail, "a@b.com"),
            (FieldName::LinkedinPassword, "p"),
            (FieldName::CvPath, "/r.pdf"),
            (FieldName::Phone, "5551234567"),
            (FieldName::Address, "1 Main St"),
            (FieldName::Location, "NY"),
            (FieldName::ZipCode, "10001"),
            (FieldName::SalaryExpectation, "75000"),
            (FieldName::Commuting, "NYC"),
        ] {
            form.set_field(name, value);
        }
        form
    }

    #[tokio::test]
    async fn blocked_submit_sends_nothing_and_keeps_status() {
        let form = filled_form(CountingTransport::default());
        form.set_field(FieldName::SalaryExpectation, "75abc");

        let SubmitOutcome::Blocked(err) = form.submit().await else {
            panic!("expected validation to block");
        };
        assert_eq!(
            err.fields().collect::<Vec<_>>(),
            vec![FieldName::SalaryExpectation]
        );
        assert_eq!(form.controller().transport().calls.load(Ordering::SeqCst), 0);
        assert_eq!(form.status(), Status::none());
    }

    #[tokio::test]
    async fn fields_survive_a_successful_submit() {
        let form = filled_form(CountingTransport::default());

        assert_eq!(form.submit().await, SubmitOutcome::Finished(Status::success()));
        assert_eq!(form.fields().groq_api_key, "gsk_x");
        assert!(form.render().contains("[ok] Agent started"));
    }

    #[tokio::test]
    async fn edits_remain_possible_while_request_in_flight() {
        let gate = Arc::new(Notify::new());
        let form = filled_form(CountingTransport {
            gate: Some(gate.clone()),
            ..CountingTransport::default()
        });

        let edit_while_busy = async {
            while !form.is_busy() {
                tokio::task::yield_now().await;
            }
            form.set_field(FieldName::Ethnicity, "Hispanic or Latino");
            let rendered = form.render();
            let second = form.submit().await;
            gate.notify_one();
            (rendered, second)
        };

        let (first, (rendered, second)) = tokio::join!(form.submit(), edit_while_busy);

        assert_eq!(first, SubmitOutcome::Finished(Status::success()));
        assert_eq!(second, SubmitOutcome::Refused);
        assert!(rendered.contains("[ Initializing Agent… ] (disabled)"));
        assert_eq!(form.fields().ethnicity, "Hispanic or Latino");
        assert_eq!(form.controller().transport().calls.load(Ordering::SeqCst), 1);
    }
}
