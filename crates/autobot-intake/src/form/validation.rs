use std::fmt;

use super::fields::FieldName;
use super::store::FieldSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationReason {
    Missing,
    NotAnEmail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: FieldName,
    pub reason: ViolationReason,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            ViolationReason::Missing => write!(f, "{} is required", self.field.label()),
            ViolationReason::NotAnEmail => {
                write!(f, "{} must be an email address", self.field.label())
            }
        }
    }
}

/// Fields that keep the form from being submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("form is incomplete: {}", summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.violations.iter().map(|violation| violation.field)
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl FieldSet {
    /// Required-field check run before anything is sent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let violations: Vec<FieldViolation> = FieldName::ALL
            .into_iter()
            .filter_map(|field| self.check(field).map(|reason| FieldViolation { field, reason }))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }

    fn check(&self, field: FieldName) -> Option<ViolationReason> {
        let value = self.get(field);
        if field.is_required() && value.is_empty() {
            return Some(ViolationReason::Missing);
        }
        if field == FieldName::LinkedinEmail && !is_email_shaped(&self.linkedin_email) {
            return Some(ViolationReason::NotAnEmail);
        }
        None
    }
}

/// Same shape the HTML `type="email"` control accepts: an atext local part,
/// then dot-separated labels of ASCII letters, digits, and inner hyphens.
pub fn is_email_shaped(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && local.chars().all(is_local_char)
        && domain.split('.').all(is_domain_label)
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c)
}

fn is_domain_label(label: &str) -> bool {
    (1..=63).contains(&label.len())
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !label.starts_with('-')
        && !label.ends_with('-')
}
