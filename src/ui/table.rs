use std::fmt::Write as _;

use comfy_table::{Cell, CellAlignment, Row, Table, presets::ASCII_MARKDOWN};

use crate::data::model::{GradeScale, Student};
use crate::data::stats::Statistics;

// ---------------------------------------------------------------------------
// Cell formatting
// ---------------------------------------------------------------------------

/// `[12, 14, 16.5]` – integral grades print without a fraction.
pub fn format_notes(notes: &[f64]) -> String {
    let joined = notes
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}

/// `14.00/20` – the only place averages get rounded.
pub fn format_average(average: f64, scale: &GradeScale) -> String {
    format!("{average:.2}/{}", scale.max)
}

// ---------------------------------------------------------------------------
// Student table
// ---------------------------------------------------------------------------

/// Render a result set. Columns: # | Name | Address | Notes | Average
pub fn render_students(students: &[&Student], scale: &GradeScale) -> String {
    let mut t = Table::new();
    t.load_preset(ASCII_MARKDOWN);
    t.set_header(vec!["#", "Name", "Address", "Notes", "Average"]);

    for (i, student) in students.iter().enumerate() {
        let mut row = Row::new();
        row.add_cell(Cell::new(i + 1).set_alignment(CellAlignment::Right));
        row.add_cell(Cell::new(&student.name));
        row.add_cell(Cell::new(&student.address));
        row.add_cell(Cell::new(format_notes(&student.notes)));
        row.add_cell(
            Cell::new(format_average(student.average(), scale)).set_alignment(CellAlignment::Right),
        );
        t.add_row(row);
    }

    t.to_string()
}

// ---------------------------------------------------------------------------
// Statistics block
// ---------------------------------------------------------------------------

pub fn render_statistics(stats: &Statistics<'_>, scale: &GradeScale) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Students:        {}", stats.count);
    let _ = writeln!(out, "Overall average: {}", format_average(stats.mean, scale));
    let _ = writeln!(out, "Best average:    {}", format_average(stats.max, scale));
    let _ = writeln!(out, "Lowest average:  {}", format_average(stats.min, scale));

    let _ = writeln!(out, "\nBest students:");
    for student in &stats.best {
        let _ = writeln!(out, "  {} - {}", student.name, format_average(student.average(), scale));
    }

    let _ = writeln!(out, "\nLowest students:");
    for student in &stats.worst {
        let _ = writeln!(out, "  {} - {}", student.name, format_average(student.average(), scale));
    }
    out
}
