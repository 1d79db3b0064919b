use crate::cli::{FieldArgs, SubmitArgs};
use autobot_intake::config::IntakeConfig;
use autobot_intake::error::AppError;
use autobot_intake::form::presentation::BUSY_LABEL;
use autobot_intake::form::{
    FormPrompter, FormView, HttpJobStartTransport, IntakeForm, Status, StatusKind, SubmitOutcome,
};
use autobot_intake::telemetry;
use std::io;
use tracing::info;

pub(crate) async fn run_fill(args: SubmitArgs) -> Result<(), AppError> {
    let form = prepare(&args)?;

    {
        let stdin = io::stdin();
        let mut prompter = FormPrompter::new(stdin.lock(), io::stdout());
        let edits = prompter.fill(&form)?;
        info!(edits, "form filled from prompt");
    }

    submit_and_report(&form).await
}

pub(crate) async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let form = prepare(&args)?;
    submit_and_report(&form).await
}

pub(crate) fn run_preview(args: FieldArgs) -> Result<(), AppError> {
    let fields = args.field_set();
    let status = Status::none();
    println!("{}", FormView::new(&fields, false, &status));

    if let Err(err) = fields.validate() {
        println!();
        println!("Not ready to submit:");
        for violation in &err.violations {
            println!("- {violation}");
        }
    }
    Ok(())
}

fn prepare(args: &SubmitArgs) -> Result<IntakeForm<HttpJobStartTransport>, AppError> {
    let config = IntakeConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let mut backend = config.backend;
    if let Some(endpoint) = args.endpoint.clone() {
        backend = backend.with_endpoint(endpoint)?;
    }
    if let Some(timeout) = args.timeout {
        backend.request_timeout = Some(timeout);
    }

    let transport = HttpJobStartTransport::new(&backend)?;
    info!(?config.environment, endpoint = transport.endpoint(), "intake form ready");

    Ok(IntakeForm::with_fields(transport, args.fields.field_set()))
}

async fn submit_and_report(form: &IntakeForm<HttpJobStartTransport>) -> Result<(), AppError> {
    if let Err(err) = form.fields().validate() {
        println!("{}", form.render());
        return Err(err.into());
    }
    println!("{BUSY_LABEL}");

    match form.submit().await {
        SubmitOutcome::Blocked(err) => Err(err.into()),
        SubmitOutcome::Refused => Err(AppError::Submission(
            "a submission is already in progress".to_string(),
        )),
        SubmitOutcome::Finished(status) => {
            println!("{}", form.render());
            if status.kind == StatusKind::Error {
                Err(AppError::Submission(status.message))
            } else {
                Ok(())
            }
        }
    }
}
