use std::path::Path;

use csv::WriterBuilder;

use crate::render::{grid_header, RenderedGrid};

/// Prints the rendered timetable in a readable fixed-width layout.
pub fn print_grid(grid: &RenderedGrid) {
    let header: Vec<String> = grid_header().iter().map(|h| h.to_string()).collect();

    // Column widths from the widest cell in each column.
    let mut widths: Vec<usize> = header.iter().map(String::len).collect();
    for row in &grid.rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    print_row(&header, &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    print_row(&separator, &widths);
    for row in &grid.rows {
        print_row(row, &widths);
    }
}

fn print_row(cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    println!("| {} |", line.join(" | "));
}

/// Writes the rendered timetable to a CSV file, header row first, one record
/// per grid row.
pub fn write_grid_to_csv(grid: &RenderedGrid, path: &Path) -> Result<(), csv::Error> {
    let mut writer = WriterBuilder::new().from_path(path)?;

    writer.write_record(grid_header())?;
    for row in &grid.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
