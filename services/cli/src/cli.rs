use crate::intake::{run_fill, run_preview, run_submit};
use autobot_intake::config::{parse_timeout, ConfigError};
use autobot_intake::error::AppError;
use autobot_intake::form::{FieldName, FieldSet};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "AutoBot Intake",
    about = "Collect job-application settings and start the AutoBot automation agent",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prompt for every field, then start the agent (default command)
    Fill(SubmitArgs),
    /// Start the agent from `--set` values without prompting
    Submit(SubmitArgs),
    /// Render the form with `--set` values; nothing is sent
    Preview(FieldArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct FieldArgs {
    /// Field assignment such as `--set zip_code=10001`; repeatable
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub(crate) assignments: Vec<(FieldName, String)>,
}

impl FieldArgs {
    pub(crate) fn field_set(&self) -> FieldSet {
        self.assignments
            .iter()
            .fold(FieldSet::default(), |fields, (name, value)| {
                fields.with_field(*name, value)
            })
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct SubmitArgs {
    #[command(flatten)]
    pub(crate) fields: FieldArgs,
    /// Override the configured automation endpoint
    #[arg(long)]
    pub(crate) endpoint: Option<String>,
    /// Give up on the automation service after this many seconds
    #[arg(long = "timeout-secs", value_name = "SECONDS", value_parser = parse_timeout_arg)]
    pub(crate) timeout: Option<Duration>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Fill(SubmitArgs::default()));

    match command {
        Command::Fill(args) => run_fill(args).await,
        Command::Submit(args) => run_submit(args).await,
        Command::Preview(args) => run_preview(args),
    }
}

/// `name=value`; the value is kept verbatim and may itself contain `=`.
fn parse_assignment(raw: &str) -> Result<(FieldName, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, found '{raw}'"))?;
    let name = name.parse::<FieldName>().map_err(|err| err.to_string())?;
    Ok((name, value.to_string()))
}

fn parse_timeout_arg(raw: &str) -> Result<Duration, ConfigError> {
    parse_timeout(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autobot_intake::form::Salary;

    #[test]
    fn assignment_keeps_value_verbatim() {
        assert_eq!(
            parse_assignment("linkedin_password=a=b ").expect("valid assignment"),
            (FieldName::LinkedinPassword, "a=b ".to_string())
        );
        assert!(parse_assignment("zip_code").is_err());
        assert_eq!(
            parse_assignment("zip=10001").expect_err("unknown field"),
            "unknown intake field 'zip'"
        );
    }

    #[test]
    fn submit_collects_repeated_assignments() {
        let cli = Cli::try_parse_from([
            "autobot-intake",
            "submit",
            "--set",
            "salary_expectation=75000",
            "--set",
            "gender=Female",
            "--timeout-secs",
            "15",
        ])
        .expect("arguments parse");

        let Some(Command::Submit(args)) = cli.command else {
            panic!("expected submit command");
        };
        assert_eq!(args.timeout, Some(Duration::from_secs(15)));
        let fields = args.fields.field_set();
        assert_eq!(fields.salary_expectation, Salary(Some(75_000)));
        assert_eq!(fields.gender.as_str(), "Female");
    }

    #[test]
    fn fill_is_the_default_command() {
        let cli = Cli::try_parse_from(["autobot-intake"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
