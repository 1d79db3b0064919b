use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::status::Status;
use super::store::FieldSet;
use crate::config::BackendConfig;

/// The one outbound call the form makes.
pub trait JobStartTransport: Send + Sync {
    fn start_job(
        &self,
        body: &FieldSet,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Reasons a job-start request did not succeed. The controller reports all of
/// them to the operator the same way.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("unable to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to automation service failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("automation service answered {0}")]
    Rejected(StatusCode),
}

/// Posts the field set as JSON to the automation service.
#[derive(Debug, Clone)]
pub struct HttpJobStartTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpJobStartTransport {
    pub fn new(config: &BackendConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::Client)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl JobStartTransport for HttpJobStartTransport {
    async fn start_job(&self, body: &FieldSet) -> Result<(), TransportError> {
        let response = self.client.post(&self.endpoint).json(body).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Rejected(status))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Another submission was still in flight; nothing was sent.
    Refused,
    Finished(Status),
}

/// Owns the busy flag and the last status. At most one request is in flight.
pub struct SubmissionController<T> {
    transport: T,
    busy: AtomicBool,
    status: Mutex<Status>,
}

impl<T> SubmissionController<T>
where
    T: JobStartTransport,
{
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            busy: AtomicBool::new(false),
            status: Mutex::new(Status::none()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn status(&self) -> Status {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Send one job-start request built from `fields`. The busy flag is
    /// released after the status is published, or when this future is dropped.
    pub async fn submit(&self, fields: &FieldSet) -> SubmitAttempt {
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            debug!("submission already in flight; ignoring submit");
            return SubmitAttempt::Refused;
        };
        self.publish(Status::none());

        let body = fields.clone();
        debug!("dispatching job-start request");
        let status = match self.transport.start_job(&body).await {
            Ok(()) => {
                info!("automation agent accepted the job");
                Status::success()
            }
            Err(err) => {
                warn!(error = %err, "job-start request failed");
                Status::error()
            }
        };

        self.publish(status.clone());
        SubmitAttempt::Finished(status)
    }

    fn publish(&self, status: Status) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
    }
}

struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::fields::FieldName;
    use crate::form::status::StatusKind;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct FakeTransport {
        calls: AtomicUsize,
        bodies: Mutex<Vec<FieldSet>>,
        reject: bool,
        gate: Option<Arc<Notify>>,
    }

    impl FakeTransport {
        fn rejecting() -> Self {
            Self {
                reject: true,
                ..Self::default()
            }
        }

        fn gated(gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl JobStartTransport for FakeTransport {
        async fn start_job(&self, body: &FieldSet) -> Result<(), TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.bodies.lock().expect("bodies mutex").push(body.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.reject {
                Err(TransportError::Rejected(StatusCode::INTERNAL_SERVER_ERROR))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn success_publishes_started_message_and_releases_busy() {
        let controller = SubmissionController::new(FakeTransport::default());
        let fields = FieldSet::default().with_field(FieldName::Phone, "5551234567");

        let attempt = controller.submit(&fields).await;

        assert_eq!(attempt, SubmitAttempt::Finished(Status::success()));
        assert_eq!(controller.status().kind, StatusKind::Success);
        assert_eq!(
            controller.status().message,
            "Agent started — watch your terminal for live logs."
        );
        assert!(!controller.is_busy());
        let bodies = controller.transport().bodies.lock().expect("bodies mutex");
        assert_eq!(bodies.as_slice(), &[fields]);
    }

    #[tokio::test]
    async fn failure_collapses_into_generic_error() {
        let controller = SubmissionController::new(FakeTransport::rejecting());

        let attempt = controller.submit(&FieldSet::default()).await;

        assert_eq!(attempt, SubmitAttempt::Finished(Status::error()));
        assert_eq!(
            controller.status().message,
            "Could not reach backend. Is server.py running?"
        );
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn refuses_reentry_while_request_in_flight() {
        let gate = Arc::new(Notify::new());
        let controller = SubmissionController::new(FakeTransport::gated(gate.clone()));
        let fields = FieldSet::default();

        let second = async {
            while !controller.is_busy() {
                tokio::task::yield_now().await;
            }
            assert_eq!(controller.status(), Status::none());
            let attempt = controller.submit(&fields).await;
            gate.notify_one();
            attempt
        };

        let (first, second) = tokio::join!(controller.submit(&fields), second);

        assert_eq!(second, SubmitAttempt::Refused);
        assert_eq!(first, SubmitAttempt::Finished(Status::success()));
        assert_eq!(controller.transport().calls(), 1);
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn next_attempt_clears_previous_status() {
        let gate = Arc::new(Notify::new());
        let controller = SubmissionController::new(FakeTransport {
            reject: true,
            gate: Some(gate.clone()),
            ..FakeTransport::default()
        });
        gate.notify_one();
        controller.submit(&FieldSet::default()).await;
        assert_eq!(controller.status(), Status::error());

        let observe = async {
            while !controller.is_busy() {
                tokio::task::yield_now().await;
            }
            let in_flight = controller.status();
            gate.notify_one();
            in_flight
        };
        let blank = FieldSet::default();
        let (_, in_flight) = tokio::join!(controller.submit(&blank), observe);

        assert!(in_flight.is_empty());
        assert_eq!(controller.status(), Status::error());
    }

    #[tokio::test]
    async fn dropping_in_flight_submit_releases_busy() {
        let gate = Arc::new(Notify::new());
        let controller = SubmissionController::new(FakeTransport::gated(gate));

        let outcome =
            tokio::time::timeout(Duration::from_millis(20), controller.submit(&FieldSet::default()))
                .await;

        assert!(outcome.is_err(), "gate is never opened");
        assert!(!controller.is_busy());
        assert_eq!(controller.transport().calls(), 1);
    }
}
