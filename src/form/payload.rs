use serde::Serialize;

use crate::form::validate::{CreditAssignment, PriorityAssignment};

/// JSON body of the save-priorities call.
#[derive(Debug, Clone, Serialize)]
pub struct SavePrioritiesRequest {
    pub class_name: String,
    pub semester: String,
    pub priorities: PriorityAssignment,
}

/// One outgoing form payload: the ambient fields of the page followed by the
/// JSON-encoded credits and/or priorities maps. Built fresh per submission
/// attempt and never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    fields: Vec<(String, String)>,
}

impl SubmissionPayload {
    /// The payload as ordered (name, value) form fields.
    pub fn form_fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Assembles the payload for a generate request. Credits and priorities stay
/// logically separate: each present map is serialized on its own and attached
/// under its own field name. A map the active variant does not collect is
/// never included.
pub fn assemble(
    class_name: &str,
    semester: &str,
    extras: &[(String, String)],
    credits: Option<&CreditAssignment>,
    priorities: Option<&PriorityAssignment>,
) -> Result<SubmissionPayload, serde_json::Error> {
    let mut fields = vec![
        ("class_name".to_string(), class_name.to_string()),
        ("semester".to_string(), semester.to_string()),
    ];
    fields.extend(extras.iter().cloned());

    if let Some(credits) = credits {
        fields.push(("credits".to_string(), serde_json::to_string(credits)?));
    }
    if let Some(priorities) = priorities {
        fields.push(("priorities".to_string(), serde_json::to_string(priorities)?));
    }

    Ok(SubmissionPayload { fields })
}
