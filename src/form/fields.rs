use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Suffix that distinguishes a priority field from the credit field of the
/// same subject. The field name is the join key used by every downstream
/// step, so this suffix is the only naming convention the pipeline relies on.
pub const PRIORITY_SUFFIX: &str = "-priority";

/// Which per-subject inputs a deployed page collects. Fixed by configuration,
/// never switched at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormVariant {
    CreditsOnly,
    PrioritiesOnly,
    CreditsAndPriorities,
}

impl FormVariant {
    pub fn collects_credits(&self) -> bool {
        matches!(self, FormVariant::CreditsOnly | FormVariant::CreditsAndPriorities)
    }

    pub fn collects_priorities(&self) -> bool {
        matches!(self, FormVariant::PrioritiesOnly | FormVariant::CreditsAndPriorities)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Credit,
    Priority,
}

/// One labeled input field. `name` is the subject name, with the priority
/// suffix appended for priority fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub min: u32,
    pub max: Option<u32>,
}

impl FieldSpec {
    /// The subject this field belongs to (strips the priority suffix).
    pub fn subject(&self) -> &str {
        match self.kind {
            FieldKind::Credit => &self.name,
            FieldKind::Priority => self.name.strip_suffix(PRIORITY_SUFFIX).unwrap_or(&self.name),
        }
    }
}

/// The dynamic input region. Rebuilt wholesale from a fresh subject list on
/// every selection change; never patched incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRegion {
    pub heading: Option<String>,
    pub fields: Vec<FieldSpec>,
    pub hint: Option<String>,
}

impl InputRegion {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Raw text the user has entered, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct FieldValues {
    values: HashMap<String, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Missing fields read as empty text, the same as an untouched input.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Regenerates the input region for a fresh subject list. An empty catalog
/// produces an empty region: no fields, no heading, no hint.
pub fn build_input_region(variant: FormVariant, subjects: &[String]) -> InputRegion {
    if subjects.is_empty() {
        return InputRegion::default();
    }

    let total = subjects.len() as u32;
    let mut fields = Vec::new();

    for subject in subjects {
        if variant.collects_credits() {
            fields.push(FieldSpec {
                name: subject.clone(),
                label: format!("{} (credits)", subject),
                kind: FieldKind::Credit,
                min: 1,
                max: None,
            });
        }
        if variant.collects_priorities() {
            fields.push(FieldSpec {
                name: format!("{}{}", subject, PRIORITY_SUFFIX),
                label: format!("{} (priority)", subject),
                kind: FieldKind::Priority,
                min: 1,
                max: Some(total),
            });
        }
    }

    let heading = match variant {
        FormVariant::CreditsOnly => "Enter Credits for Each Subject",
        FormVariant::PrioritiesOnly => "Enter Priority for Each Subject",
        FormVariant::CreditsAndPriorities => "Enter Credits and Priority for Each Subject",
    };

    let hint = variant.collects_priorities().then(|| {
        format!(
            "Priorities must be unique and range from 1 (Highest) to {} (Lowest).",
            total
        )
    });

    InputRegion {
        heading: Some(heading.to_string()),
        fields,
        hint,
    }
}
