use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Every input the intake form carries, in request-body order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    GroqApiKey,
    LinkedinEmail,
    LinkedinPassword,
    CvPath,
    SalaryExpectation,
    Location,
    Commuting,
    VeteranStatus,
    Disability,
    Ethnicity,
    Gender,
    Address,
    ZipCode,
    MiddleName,
    Phone,
}

impl FieldName {
    pub const ALL: [FieldName; 15] = [
        FieldName::GroqApiKey,
        FieldName::LinkedinEmail,
        FieldName::LinkedinPassword,
        FieldName::CvPath,
        FieldName::SalaryExpectation,
        FieldName::Location,
        FieldName::Commuting,
        FieldName::VeteranStatus,
        FieldName::Disability,
        FieldName::Ethnicity,
        FieldName::Gender,
        FieldName::Address,
        FieldName::ZipCode,
        FieldName::MiddleName,
        FieldName::Phone,
    ];

    /// Wire name used as the JSON key.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::GroqApiKey => "groq_api_key",
            FieldName::LinkedinEmail => "linkedin_email",
            FieldName::LinkedinPassword => "linkedin_password",
            FieldName::CvPath => "cv_path",
            FieldName::SalaryExpectation => "salary_expectation",
            FieldName::Location => "location",
            FieldName::Commuting => "commuting",
            FieldName::VeteranStatus => "veteran_status",
            FieldName::Disability => "disability",
            FieldName::Ethnicity => "ethnicity",
            FieldName::Gender => "gender",
            FieldName::Address => "address",
            FieldName::ZipCode => "zip_code",
            FieldName::MiddleName => "middle_name",
            FieldName::Phone => "phone",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldName::GroqApiKey => "Groq API Key",
            FieldName::LinkedinEmail => "LinkedIn Email",
            FieldName::LinkedinPassword => "LinkedIn Password",
            FieldName::CvPath => "CV / Resume Path",
            FieldName::SalaryExpectation => "Salary Expectation (USD)",
            FieldName::Location => "Location",
            FieldName::Commuting => "Commuting To",
            FieldName::VeteranStatus => "Veteran Status",
            FieldName::Disability => "Disability Status",
            FieldName::Ethnicity => "Ethnicity",
            FieldName::Gender => "Gender",
            FieldName::Address => "Full Address",
            FieldName::ZipCode => "Zip Code",
            FieldName::MiddleName => "Middle Name",
            FieldName::Phone => "Phone",
        }
    }

    /// Optional inputs may be submitted blank.
    pub fn is_required(self) -> bool {
        !matches!(self, FieldName::MiddleName | FieldName::Ethnicity)
    }

    /// Options for the closed selection controls, `None` for free-form inputs.
    pub fn options(self) -> Option<&'static [&'static str]> {
        match self {
            FieldName::Gender => Some(&Gender::OPTIONS),
            FieldName::VeteranStatus => Some(&VeteranStatus::OPTIONS),
            FieldName::Disability => Some(&DisabilityStatus::OPTIONS),
            _ => None,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown intake field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|name| name.as_str() == value)
            .ok_or_else(|| UnknownField(value.to_string()))
    }
}

/// Gender disclosed on application forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    #[serde(rename = "Non-binary")]
    NonBinary,
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

impl Gender {
    /// Options in the order the selection control lists them.
    pub const OPTIONS: [&'static str; 4] = ["Male", "Female", "Non-binary", "Prefer not to say"];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::NonBinary => "Non-binary",
            Gender::PreferNotToSay => "Prefer not to say",
        }
    }

    pub fn from_option(value: &str) -> Option<Self> {
        match value {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            "Non-binary" => Some(Gender::NonBinary),
            "Prefer not to say" => Some(Gender::PreferNotToSay),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum VeteranStatus {
    #[default]
    No,
    Yes,
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

impl VeteranStatus {
    pub const OPTIONS: [&'static str; 3] = ["No", "Yes", "Prefer not to say"];

    pub fn as_str(self) -> &'static str {
        match self {
            VeteranStatus::No => "No",
            VeteranStatus::Yes => "Yes",
            VeteranStatus::PreferNotToSay => "Prefer not to say",
        }
    }

    pub fn from_option(value: &str) -> Option<Self> {
        match value {
            "No" => Some(VeteranStatus::No),
            "Yes" => Some(VeteranStatus::Yes),
            "Prefer not to say" => Some(VeteranStatus::PreferNotToSay),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DisabilityStatus {
    #[default]
    No,
    Yes,
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

impl DisabilityStatus {
    pub const OPTIONS: [&'static str; 3] = ["No", "Yes", "Prefer not to say"];

    pub fn as_str(self) -> &'static str {
        match self {
            DisabilityStatus::No => "No",
            DisabilityStatus::Yes => "Yes",
            DisabilityStatus::PreferNotToSay => "Prefer not to say",
        }
    }

    pub fn from_option(value: &str) -> Option<Self> {
        match value {
            "No" => Some(DisabilityStatus::No),
            "Yes" => Some(DisabilityStatus::Yes),
            "Prefer not to say" => Some(DisabilityStatus::PreferNotToSay),
            _ => None,
        }
    }
}

/// Salary expectation in whole dollars; empty until the input holds an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Salary(pub Option<u64>);

impl Salary {
    pub const EMPTY: Salary = Salary(None);

    pub fn value(self) -> Option<u64> {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(amount) => write!(f, "{amount}"),
            None => Ok(()),
        }
    }
}

/// The automation service reads an integer, or `""` when nothing parsed.
impl Serialize for Salary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(amount) => serializer.serialize_u64(amount),
            None => serializer.serialize_str(""),
        }
    }
}

/// The only coercion the form performs: the whole input must be a
/// non-negative integer, anything else clears the value.
pub fn parse_salary(raw: &str) -> Salary {
    Salary(raw.parse::<u64>().ok())
}
