use serde::Serialize;
use tracing::warn;

use super::fields::{parse_salary, DisabilityStatus, FieldName, Gender, Salary, VeteranStatus};

/// Current value of every intake field. Serializes to exactly the
/// job-start request body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FieldSet {
    pub groq_api_key: String,
    pub linkedin_email: String,
    pub linkedin_password: String,
    pub cv_path: String,
    pub salary_expectation: Salary,
    pub location: String,
    pub commuting: String,
    pub veteran_status: VeteranStatus,
    pub disability: DisabilityStatus,
    pub ethnicity: String,
    pub gender: Gender,
    pub address: String,
    pub zip_code: String,
    pub middle_name: String,
    pub phone: String,
}

/// Read-side view of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Salary(Salary),
    Choice(&'static str),
}

impl FieldValue<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Salary(salary) => salary.is_empty(),
            FieldValue::Choice(_) => false,
        }
    }

    pub fn is_choice(&self, option: &str) -> bool {
        matches!(self, FieldValue::Choice(current) if *current == option)
    }
}

impl FieldSet {
    /// Apply one edit. Text is stored verbatim, the salary goes through
    /// [`parse_salary`], and a choice outside its option list is ignored.
    pub fn set_field(&mut self, name: FieldName, raw: &str) {
        match name {
            FieldName::SalaryExpectation => self.salary_expectation = parse_salary(raw),
            FieldName::Gender => match Gender::from_option(raw) {
                Some(gender) => self.gender = gender,
                None => ignore_unlisted_choice(name, raw),
            },
            FieldName::VeteranStatus => match VeteranStatus::from_option(raw) {
                Some(status) => self.veteran_status = status,
                None => ignore_unlisted_choice(name, raw),
            },
            FieldName::Disability => match DisabilityStatus::from_option(raw) {
                Some(status) => self.disability = status,
                None => ignore_unlisted_choice(name, raw),
            },
            _ => {
                if let Some(slot) = self.text_mut(name) {
                    *slot = raw.to_string();
                }
            }
        }
    }

    pub fn with_field(mut self, name: FieldName, raw: &str) -> Self {
        self.set_field(name, raw);
        self
    }

    pub fn get(&self, name: FieldName) -> FieldValue<'_> {
        match name {
            FieldName::GroqApiKey => FieldValue::Text(&self.groq_api_key),
            FieldName::LinkedinEmail => FieldValue::Text(&self.linkedin_email),
            FieldName::LinkedinPassword => FieldValue::Text(&self.linkedin_password),
            FieldName::CvPath => FieldValue::Text(&self.cv_path),
            FieldName::SalaryExpectation => FieldValue::Salary(self.salary_expectation),
            FieldName::Location => FieldValue::Text(&self.location),
            FieldName::Commuting => FieldValue::Text(&self.commuting),
            FieldName::VeteranStatus => FieldValue::Choice(self.veteran_status.as_str()),
            FieldName::Disability => FieldValue::Choice(self.disability.as_str()),
            FieldName::Ethnicity => FieldValue::Text(&self.ethnicity),
            FieldName::Gender => FieldValue::Choice(self.gender.as_str()),
            FieldName::Address => FieldValue::Text(&self.address),
            FieldName::ZipCode => FieldValue::Text(&self.zip_code),
            FieldName::MiddleName => FieldValue::Text(&self.middle_name),
            FieldName::Phone => FieldValue::Text(&self.phone),
        }
    }

    fn text_mut(&mut self, name: FieldName) -> Option<&mut String> {
        let slot = match name {
            FieldName::GroqApiKey => &mut self.groq_api_key,
            FieldName::LinkedinEmail => &mut self.linkedin_email,
            FieldName::LinkedinPassword => &mut self.linkedin_password,
            FieldName::CvPath => &mut self.cv_path,
            FieldName::Location => &mut self.location,
            FieldName::Commuting => &mut self.commuting,
            FieldName::Ethnicity => &mut self.ethnicity,
            FieldName::Address => &mut self.address,
            FieldName::ZipCode => &mut self.zip_code,
            FieldName::MiddleName => &mut self.middle_name,
            FieldName::Phone => &mut self.phone,
            FieldName::SalaryExpectation
            | FieldName::VeteranStatus
            | FieldName::Disability
            | FieldName::Gender => return None,
        };
        Some(slot)
    }
}

fn ignore_unlisted_choice(name: FieldName, raw: &str) {
    warn!(field = %name, value = raw, "ignoring value outside the selection options");
}
