use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Result};
use tracing_subscriber::EnvFilter;

use timetable_client::{
    display, FetchOutcome, HttpScheduleService, FieldValues, Selection, SubmitOutcome,
    WorkflowConfig, WorkflowController,
};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let flavor = args.get(1).map(String::as_str).unwrap_or("both");
    let config = match flavor {
        "credits" => WorkflowConfig::credits_page(),
        "priorities" => WorkflowConfig::priorities_page(),
        "both" => WorkflowConfig::combined_page(),
        "priorities-first" => WorkflowConfig::priorities_first_page(),
        other => bail!(
            "unknown page flavor '{}'; expected credits, priorities, both, or priorities-first",
            other
        ),
    };

    let base_url = args
        .get(2)
        .filter(|a| !a.starts_with("--"))
        .cloned()
        .or_else(|| std::env::var("TIMETABLE_URL").ok())
        .unwrap_or_else(|| "http://localhost:5000".to_string());
    let csv_out = args
        .iter()
        .position(|a| a == "--out")
        .and_then(|i| args.get(i + 1))
        .cloned();

    println!("Timetable client ({} page) -> {}", flavor, base_url);

    let service = HttpScheduleService::new(&base_url)?;
    let mut controller = WorkflowController::new(service, config);

    let class_name = prompt("Class name")?;
    let semester = prompt("Semester")?;

    match controller
        .selection_changed(Selection::new(class_name, semester))
        .await
    {
        Ok(FetchOutcome::FieldsRebuilt { subjects }) if subjects > 0 => {}
        Ok(FetchOutcome::FieldsRebuilt { .. }) => {
            println!("No subjects found for this class and semester.");
            return Ok(());
        }
        Ok(_) => {
            println!("Both a class name and a semester are required.");
            return Ok(());
        }
        Err(err) => {
            println!("⚠️  {}", err);
            return Ok(());
        }
    }

    if let Some(heading) = &controller.region().heading {
        println!("\n{}", heading);
    }
    if let Some(hint) = &controller.region().hint {
        println!("{}", hint);
    }

    let mut values = FieldValues::new();
    let fields = controller.region().fields.clone();
    for field in &fields {
        values.set(field.name.clone(), prompt(&field.label)?);
    }

    match controller.submit(&values, &[]).await {
        Ok(SubmitOutcome::Rendered) => {
            if let Some(grid) = controller.view().grid() {
                println!();
                display::print_grid(grid);
                if let Some(path) = csv_out {
                    display::write_grid_to_csv(grid, Path::new(&path))?;
                    println!("Saved timetable to {}", path);
                }
            }
        }
        Ok(SubmitOutcome::PrioritiesSaved { next_page }) => {
            println!("Priorities saved. Continue at {}{}", base_url, next_page);
        }
        Err(err) => println!("⚠️  {}", err),
    }

    Ok(())
}
