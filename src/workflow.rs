use tracing::{debug, info};

use crate::error::{ServiceError, ValidationError, WorkflowError};
use crate::form::fields::{build_input_region, FieldValues, FormVariant, InputRegion};
use crate::form::payload::{self, SavePrioritiesRequest};
use crate::form::validate::collect_assignments;
use crate::render::{ErrorPolicy, ScheduleView};
use crate::service::ScheduleService;

/// Follow-on page after a successful save-priorities submission.
pub const CREDITS_PAGE: &str = "/credits";

/// The class/semester pair the user has picked. Identifiers are trimmed on
/// construction; the pair is complete once both are non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub class_name: String,
    pub semester: String,
}

impl Selection {
    pub fn new(class_name: impl Into<String>, semester: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into().trim().to_string(),
            semester: semester.into().trim().to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.class_name.is_empty() && !self.semester.is_empty()
    }
}

/// Where a submission goes: straight to timetable generation, or to the
/// save-priorities step that precedes the credits page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Generate,
    SavePriorities,
}

/// Deployment configuration for one page flavor. The original frontend
/// shipped five near-identical scripts; each maps onto one of these configs.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowConfig {
    pub variant: FormVariant,
    pub target: SubmitTarget,
    pub on_server_error: ErrorPolicy,
}

impl WorkflowConfig {
    /// Credits per subject, submitted directly for generation.
    pub fn credits_page() -> Self {
        Self {
            variant: FormVariant::CreditsOnly,
            target: SubmitTarget::Generate,
            on_server_error: ErrorPolicy::PreserveTable,
        }
    }

    /// Priority ranking per subject, submitted directly for generation.
    pub fn priorities_page() -> Self {
        Self {
            variant: FormVariant::PrioritiesOnly,
            target: SubmitTarget::Generate,
            on_server_error: ErrorPolicy::PreserveTable,
        }
    }

    /// Credits and priority ranking together, submitted for generation.
    pub fn combined_page() -> Self {
        Self {
            variant: FormVariant::CreditsAndPriorities,
            target: SubmitTarget::Generate,
            on_server_error: ErrorPolicy::PreserveTable,
        }
    }

    /// Priority ranking saved as its own step; the user continues on the
    /// credits page afterwards.
    pub fn priorities_first_page() -> Self {
        Self {
            variant: FormVariant::PrioritiesOnly,
            target: SubmitTarget::SavePriorities,
            on_server_error: ErrorPolicy::PreserveTable,
        }
    }
}

/// Resting states between events. Fetching, validating, and submitting are
/// transient within a single handler call and never observable between
/// events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FieldsReady,
    Rendered,
}

/// Token for one catalog fetch. A ticket handed out before the request is
/// checked again when the response arrives; a newer selection invalidates it,
/// so a stale response can only ever be discarded, never applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// One or both identifiers were blank; no request was made.
    Idle,
    /// A newer selection superseded this fetch; its result was discarded.
    Superseded,
    /// The input region was rebuilt from the fetched catalog.
    FieldsRebuilt { subjects: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The generated schedule was rendered into the view.
    Rendered,
    /// Priorities were saved; the user continues at `next_page`.
    PrioritiesSaved { next_page: &'static str },
}

/// Wires the pipeline together and owns all mutable page state: the current
/// selection, the input region, and the rendered table. Handlers receive
/// state through this controller; nothing is looked up ambiently.
pub struct WorkflowController<S> {
    service: S,
    config: WorkflowConfig,
    phase: Phase,
    selection: Selection,
    region: InputRegion,
    view: ScheduleView,
    fetch_epoch: u64,
}

impl<S> WorkflowController<S> {
    pub fn new(service: S, config: WorkflowConfig) -> Self {
        Self {
            service,
            config,
            phase: Phase::Idle,
            selection: Selection::default(),
            region: InputRegion::default(),
            view: ScheduleView::new(config.on_server_error),
            fetch_epoch: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn region(&self) -> &InputRegion {
        &self.region
    }

    pub fn view(&self) -> &ScheduleView {
        &self.view
    }

    /// Records a selection change and reserves a fetch ticket. Any in-flight
    /// fetch is superseded from this point on. Returns `None` when the
    /// selection is incomplete (idle, no request).
    pub fn begin_selection(&mut self, selection: Selection) -> Option<FetchTicket> {
        self.fetch_epoch += 1;
        self.selection = selection;
        if !self.selection.is_complete() {
            debug!("selection incomplete, staying idle");
            return None;
        }
        Some(FetchTicket(self.fetch_epoch))
    }

    /// Applies a finished catalog fetch. Stale tickets are discarded so a
    /// superseded response never overwrites newer fields; a failed fetch
    /// leaves the prior field state untouched.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<String>, ServiceError>,
    ) -> Result<FetchOutcome, WorkflowError> {
        if ticket.0 != self.fetch_epoch {
            debug!("discarding superseded catalog fetch");
            return Ok(FetchOutcome::Superseded);
        }

        match result {
            Ok(subjects) => {
                info!(
                    "rebuilding {} fields for {} ({})",
                    subjects.len(),
                    self.selection.class_name,
                    self.selection.semester
                );
                self.region = build_input_region(self.config.variant, &subjects);
                self.phase = Phase::FieldsReady;
                Ok(FetchOutcome::FieldsRebuilt { subjects: subjects.len() })
            }
            Err(source) => Err(WorkflowError::CatalogUnavailable {
                class_name: self.selection.class_name.clone(),
                semester: self.selection.semester.clone(),
                source,
            }),
        }
    }
}

impl<S: ScheduleService> WorkflowController<S> {
    /// Selection-changed event flow: fetch the catalog and rebuild the input
    /// region wholesale.
    pub async fn selection_changed(
        &mut self,
        selection: Selection,
    ) -> Result<FetchOutcome, WorkflowError> {
        let Some(ticket) = self.begin_selection(selection) else {
            return Ok(FetchOutcome::Idle);
        };
        let class_name = self.selection.class_name.clone();
        let semester = self.selection.semester.clone();
        let result = self.service.fetch_subjects(&class_name, &semester).await;
        self.apply_fetch(ticket, result)
    }

    /// Submit event flow: validate, assemble, submit, and render or hand off.
    /// A validation failure aborts locally; no request is issued.
    pub async fn submit(
        &mut self,
        values: &FieldValues,
        extras: &[(String, String)],
    ) -> Result<SubmitOutcome, WorkflowError> {
        let (credits, priorities) =
            collect_assignments(self.config.variant, &self.region.fields, values)?;

        match self.config.target {
            SubmitTarget::SavePriorities => {
                // Config constructors pair this target with a priority-collecting
                // variant, so the map is always present here.
                let Some(priorities) = priorities else {
                    return Err(ValidationError::EmptyCatalog.into());
                };
                let request = SavePrioritiesRequest {
                    class_name: self.selection.class_name.clone(),
                    semester: self.selection.semester.clone(),
                    priorities,
                };
                let saved = self
                    .service
                    .save_priorities(&request)
                    .await
                    .map_err(WorkflowError::SubmitFailed)?;
                if saved {
                    info!("priorities saved, continuing at {}", CREDITS_PAGE);
                    Ok(SubmitOutcome::PrioritiesSaved { next_page: CREDITS_PAGE })
                } else {
                    Err(WorkflowError::SaveRejected)
                }
            }
            SubmitTarget::Generate => {
                let payload = payload::assemble(
                    &self.selection.class_name,
                    &self.selection.semester,
                    extras,
                    credits.as_ref(),
                    priorities.as_ref(),
                )?;
                let response = self
                    .service
                    .generate(&payload)
                    .await
                    .map_err(WorkflowError::SubmitFailed)?;
                self.view.apply(&response)?;
                self.phase = Phase::Rendered;
                Ok(SubmitOutcome::Rendered)
            }
        }
    }
}
