use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::{json, Value};
use timetable_client::{
    FetchOutcome, FieldValues, GenerateResponse, SavePrioritiesRequest, ScheduleService,
    Selection, ServiceError, SubmissionPayload, SubmitOutcome, WorkflowConfig,
    WorkflowController, CREDITS_PAGE,
};

/// In-process stand-in for the timetable server, scripted per scenario.
struct ScriptedServer {
    subjects: Vec<String>,
    generate_body: Value,
    save_success: bool,
    generate_calls: AtomicUsize,
    last_payload: Mutex<Option<SubmissionPayload>>,
    last_save: Mutex<Option<SavePrioritiesRequest>>,
}

impl ScriptedServer {
    fn new(subjects: &[&str], generate_body: Value) -> Self {
        Self {
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            generate_body,
            save_success: true,
            generate_calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
            last_save: Mutex::new(None),
        }
    }
}

impl ScheduleService for &ScriptedServer {
    async fn fetch_subjects(
        &self,
        _class_name: &str,
        _semester: &str,
    ) -> Result<Vec<String>, ServiceError> {
        Ok(self.subjects.clone())
    }

    async fn generate(&self, payload: &SubmissionPayload) -> Result<GenerateResponse, ServiceError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().unwrap() = Some(payload.clone());
        Ok(serde_json::from_value(self.generate_body.clone())?)
    }

    async fn save_priorities(&self, request: &SavePrioritiesRequest) -> Result<bool, ServiceError> {
        *self.last_save.lock().unwrap() = Some(request.clone());
        Ok(self.save_success)
    }
}

fn set_priorities(values: &mut FieldValues, pairs: &[(&str, &str)]) {
    for (subject, value) in pairs {
        values.set(format!("{}-priority", subject), *value);
    }
}

#[tokio::test]
async fn combined_page_submits_both_maps_and_renders_the_grid() {
    let server = ScriptedServer::new(
        &["Math", "Physics", "Chemistry"],
        json!([
            {"Timeslot": "9-10", "Monday": "Math", "Tuesday": "Physics", "Wednesday": "Chemistry",
             "Thursday": "Math", "Friday": "Physics", "Saturday": "Chemistry"},
            {"Timeslot": "10-11", "Monday": "Physics"}
        ]),
    );
    let mut controller = WorkflowController::new(&server, WorkflowConfig::combined_page());

    let outcome = controller
        .selection_changed(Selection::new("10A", "Fall"))
        .await
        .expect("catalog fetch");
    assert_eq!(outcome, FetchOutcome::FieldsRebuilt { subjects: 3 });
    assert_eq!(controller.region().fields.len(), 6);

    let mut values = FieldValues::new();
    values.set("Math", "4");
    values.set("Physics", "3");
    values.set("Chemistry", "2");
    set_priorities(&mut values, &[("Math", "1"), ("Physics", "2"), ("Chemistry", "3")]);

    let outcome = controller.submit(&values, &[]).await.expect("submit");
    assert_eq!(outcome, SubmitOutcome::Rendered);

    let payload = server.last_payload.lock().unwrap().clone().expect("payload captured");
    assert_eq!(payload.field("class_name"), Some("10A"));
    assert_eq!(payload.field("semester"), Some("Fall"));
    let credits: Value = serde_json::from_str(payload.field("credits").unwrap()).unwrap();
    let priorities: Value = serde_json::from_str(payload.field("priorities").unwrap()).unwrap();
    assert_eq!(credits, json!({"Math": 4, "Physics": 3, "Chemistry": 2}));
    assert_eq!(priorities, json!({"Math": 1, "Physics": 2, "Chemistry": 3}));

    let grid = controller.view().grid().expect("rendered grid");
    assert_eq!(grid.rows.len(), 2);
    assert_eq!(
        grid.rows[0],
        vec!["9-10", "Math", "Physics", "Chemistry", "Math", "Physics", "Chemistry"]
    );
    assert_eq!(grid.rows[1], vec!["10-11", "Physics", "-", "-", "-", "-", "-"]);
}

#[tokio::test]
async fn duplicated_priority_never_reaches_the_server() {
    let server = ScriptedServer::new(&["Math", "Physics", "Chemistry"], json!([]));
    let mut controller = WorkflowController::new(&server, WorkflowConfig::priorities_page());
    controller
        .selection_changed(Selection::new("10A", "Fall"))
        .await
        .expect("catalog fetch");

    let mut values = FieldValues::new();
    set_priorities(&mut values, &[("Math", "1"), ("Physics", "1"), ("Chemistry", "2")]);

    let err = controller.submit(&values, &[]).await.unwrap_err();
    assert!(err.to_string().contains("Priority 1 is already assigned"));
    assert_eq!(server.generate_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn infeasible_timetable_is_reported_without_panicking() {
    let server = ScriptedServer::new(&["Math"], json!({"error": "infeasible"}));
    let mut controller = WorkflowController::new(&server, WorkflowConfig::priorities_page());
    controller
        .selection_changed(Selection::new("10A", "Fall"))
        .await
        .expect("catalog fetch");

    let mut values = FieldValues::new();
    set_priorities(&mut values, &[("Math", "1")]);

    let err = controller.submit(&values, &[]).await.unwrap_err();
    assert_eq!(err.to_string(), "infeasible");
    assert!(controller.view().grid().is_none());
}

#[tokio::test]
async fn priorities_first_page_saves_and_hands_off() {
    let server = ScriptedServer::new(&["Math", "Physics"], json!([]));
    let mut controller =
        WorkflowController::new(&server, WorkflowConfig::priorities_first_page());
    controller
        .selection_changed(Selection::new("10A", "Fall"))
        .await
        .expect("catalog fetch");

    let mut values = FieldValues::new();
    set_priorities(&mut values, &[("Math", "2"), ("Physics", "1")]);

    let outcome = controller.submit(&values, &[]).await.expect("submit");
    assert_eq!(outcome, SubmitOutcome::PrioritiesSaved { next_page: CREDITS_PAGE });

    let saved = server.last_save.lock().unwrap().clone().expect("save captured");
    assert_eq!(saved.class_name, "10A");
    assert_eq!(saved.semester, "Fall");
    assert_eq!(saved.priorities.get("Math"), Some(&2));
    assert_eq!(saved.priorities.get("Physics"), Some(&1));
    assert_eq!(server.generate_calls.load(Ordering::SeqCst), 0);
}
