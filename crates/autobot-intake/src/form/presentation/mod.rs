pub mod layout;
pub mod prompt;

use std::fmt;

use self::layout::{FieldSpec, InputKind, SECTIONS};
use super::status::{Status, StatusKind};
use super::store::{FieldSet, FieldValue};

pub use self::prompt::FormPrompter;

pub const IDLE_LABEL: &str = "Start Automation";
pub const BUSY_LABEL: &str = "Initializing Agent…";

const MASK: &str = "••••••••";
const LABEL_WIDTH: usize = 28;

/// Text rendering of the whole form: sections, submit control, status banner.
#[derive(Debug, Clone, Copy)]
pub struct FormView<'a> {
    pub fields: &'a FieldSet,
    pub busy: bool,
    pub status: &'a Status,
}

impl<'a> FormView<'a> {
    pub fn new(fields: &'a FieldSet, busy: bool, status: &'a Status) -> Self {
        Self {
            fields,
            busy,
            status,
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.busy {
            BUSY_LABEL
        } else {
            IDLE_LABEL
        }
    }

    pub fn submit_enabled(&self) -> bool {
        !self.busy
    }
}

impl fmt::Display for FormView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AutoBot")?;
        writeln!(f, "Agentic AI Job Applicator · Powered by Groq")?;

        for section in &SECTIONS {
            writeln!(f)?;
            writeln!(f, "== {} ==", section.title)?;
            for spec in section.fields {
                let label = required_label(spec);
                writeln!(
                    f,
                    "  {label:<width$}{}",
                    display_value(spec, self.fields),
                    width = LABEL_WIDTH
                )?;
            }
        }

        writeln!(f)?;
        if self.submit_enabled() {
            writeln!(f, "[ {} ]", self.submit_label())?;
        } else {
            writeln!(f, "[ {} ] (disabled)", self.submit_label())?;
        }

        if let Some(banner) = status_banner(self.status) {
            writeln!(f, "{banner}")?;
        }

        writeln!(f)?;
        writeln!(f, "For educational & research purposes only.")?;
        write!(
            f,
            "Automated job applications violate LinkedIn's Terms of Service."
        )
    }
}

/// `None` while there is nothing to report.
pub fn status_banner(status: &Status) -> Option<String> {
    if status.is_empty() {
        return None;
    }
    let marker = match status.kind {
        StatusKind::Success => "[ok]",
        StatusKind::Error => "[error]",
        StatusKind::None => "[info]",
    };
    Some(format!("{marker} {}", status.message))
}

pub(crate) fn required_label(spec: &FieldSpec) -> String {
    if spec.is_required() {
        format!("{} *", spec.label())
    } else {
        spec.label().to_string()
    }
}

pub(crate) fn display_value(spec: &FieldSpec, fields: &FieldSet) -> String {
    let value = fields.get(spec.name);
    match (spec.input, value) {
        (InputKind::Select, FieldValue::Choice(current)) => spec
            .name
            .options()
            .unwrap_or_default()
            .iter()
            .map(|option| {
                if *option == current {
                    format!("(x) {option}")
                } else {
                    format!("( ) {option}")
                }
            })
            .collect::<Vec<_>>()
            .join("  "),
        _ if value.is_empty() => format!("<{}>", spec.placeholder),
        (InputKind::Password, _) => MASK.to_string(),
        (_, FieldValue::Text(text)) => text.to_string(),
        (_, FieldValue::Salary(salary)) => salary.to_string(),
        (_, FieldValue::Choice(choice)) => choice.to_string(),
    }
}
