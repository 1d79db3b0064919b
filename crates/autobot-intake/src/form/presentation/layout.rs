use crate::form::fields::FieldName;

/// How an input is presented and edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Password,
    Email,
    Text,
    Tel,
    Number,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: FieldName,
    pub input: InputKind,
    pub placeholder: &'static str,
}

impl FieldSpec {
    const fn new(name: FieldName, input: InputKind, placeholder: &'static str) -> Self {
        Self {
            name,
            input,
            placeholder,
        }
    }

    pub fn label(&self) -> &'static str {
        self.name.label()
    }

    pub fn is_required(&self) -> bool {
        self.name.is_required()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

pub static SECTIONS: [Section; 3] = [
    Section {
        title: "Credentials",
        fields: &[
            FieldSpec::new(FieldName::GroqApiKey, InputKind::Password, "gsk_..."),
            FieldSpec::new(
                FieldName::LinkedinEmail,
                InputKind::Email,
                "you@example.com",
            ),
            FieldSpec::new(FieldName::LinkedinPassword, InputKind::Password, "••••••••"),
            FieldSpec::new(
                FieldName::CvPath,
                InputKind::Text,
                "C:\\Users\\Name\\Documents\\Resume.pdf",
            ),
        ],
    },
    Section {
        title: "Profile",
        fields: &[
            FieldSpec::new(FieldName::Phone, InputKind::Tel, "e.g. 5551234567"),
            FieldSpec::new(FieldName::MiddleName, InputKind::Text, "e.g. A"),
            FieldSpec::new(
                FieldName::Address,
                InputKind::Text,
                "123 Main St, City, State, US",
            ),
            FieldSpec::new(FieldName::Location, InputKind::Text, "City, State"),
            FieldSpec::new(FieldName::ZipCode, InputKind::Text, "e.g. 10001"),
        ],
    },
    Section {
        title: "Preferences",
        fields: &[
            FieldSpec::new(FieldName::SalaryExpectation, InputKind::Number, "e.g. 75000"),
            FieldSpec::new(FieldName::Commuting, InputKind::Text, "e.g. New York City"),
            FieldSpec::new(FieldName::Gender, InputKind::Select, ""),
            FieldSpec::new(FieldName::VeteranStatus, InputKind::Select, ""),
            FieldSpec::new(FieldName::Disability, InputKind::Select, ""),
            FieldSpec::new(
                FieldName::Ethnicity,
                InputKind::Text,
                "e.g. Hispanic or Latino",
            ),
        ],
    },
];

pub fn field_specs() -> impl Iterator<Item = &'static FieldSpec> {
    SECTIONS.iter().flat_map(|section| section.fields.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_field_appears_exactly_once() {
        let names: Vec<_> = field_specs().map(|spec| spec.name).collect();
        let unique: HashSet<_> = names.iter().copied().collect();
        assert_eq!(names.len(), FieldName::ALL.len());
        assert_eq!(unique.len(), FieldName::ALL.len());
    }

    #[test]
    fn select_inputs_are_the_choice_fields() {
        for spec in field_specs() {
            assert_eq!(
                spec.input == InputKind::Select,
                spec.name.options().is_some(),
                "{} input kind",
                spec.name
            );
        }
    }
}
