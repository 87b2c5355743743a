//! Human-readable views of a schedule.
//!
//! Slots map back to a (day, hour) grid through the catalog's
//! [`WeekLayout`](crate::models::WeekLayout): one column per day, one row
//! per hour, starting at 8 o'clock.

use std::fmt::Write;

use crate::error::SchedulerError;
use crate::models::{Catalog, Schedule};

/// Day column headers, Monday first.
pub const DAY_LABELS: [&str; 7] = ["M", "T", "W", "Th", "F", "Sa", "Su"];

/// Hour the first slot of a day starts at.
pub const FIRST_HOUR: usize = 8;

/// 12-hour label of a slot row, e.g. `"8-9"` or `"12-1"`.
pub fn hour_label(hour: usize) -> String {
    let clock = |h: usize| (h + 11) % 12 + 1;
    let start = FIRST_HOUR + hour;
    format!("{}-{}", clock(start), clock(start + 1))
}

fn day_label(day: usize) -> &'static str {
    DAY_LABELS.get(day).copied().unwrap_or("?")
}

/// Session labels arranged as `grid[hour][day]`.
type Grid = Vec<Vec<Option<String>>>;

fn grid(schedule: &Schedule, catalog: &Catalog) -> Result<Grid, SchedulerError> {
    schedule.check_length(catalog)?;
    let layout = catalog.layout();
    let mut rows = vec![vec![None; layout.days_per_week]; layout.hours_per_day];
    for (slot, session) in schedule.sessions().iter().enumerate() {
        let (day, hour) = (layout.day_of(slot), layout.hour_of(slot));
        if let Some(cell) = rows.get_mut(hour).and_then(|row| row.get_mut(day)) {
            *cell = session.label(catalog)?;
        }
    }
    Ok(rows)
}

/// Renders an aligned plain-text table.
pub fn text_table(schedule: &Schedule, catalog: &Catalog) -> Result<String, SchedulerError> {
    let rows = grid(schedule, catalog)?;
    let days = catalog.layout().days_per_week;
    let hours: Vec<String> = (0..rows.len()).map(hour_label).collect();

    let hour_width = hours.iter().map(String::len).max().unwrap_or(0);
    let cell_width = rows
        .iter()
        .flatten()
        .flatten()
        .map(String::len)
        .chain((0..days).map(|d| day_label(d).len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = write!(out, "{:hour_width$}", "");
    for day in 0..days {
        let _ = write!(out, " | {:cell_width$}", day_label(day));
    }
    out.push('\n');

    for (label, row) in hours.iter().zip(&rows) {
        let _ = write!(out, "{label:hour_width$}");
        for cell in row {
            let _ = write!(out, " | {:cell_width$}", cell.as_deref().unwrap_or(""));
        }
        out.push('\n');
    }
    Ok(out)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a standalone HTML document with one table.
pub fn html_document(schedule: &Schedule, catalog: &Catalog) -> Result<String, SchedulerError> {
    let rows = grid(schedule, catalog)?;
    let days = catalog.layout().days_per_week;

    let mut html = String::from("<html><head><link rel=\"stylesheet\" href=\"style.css\">");
    html.push_str("<title>Tutor Schedule</title></head><body>");
    html.push_str("<table><thead><tr><th></th>");
    for day in 0..days {
        let _ = write!(html, "<th>{}</th>", day_label(day));
    }
    html.push_str("</tr></thead><tbody>");

    for (hour, row) in rows.iter().enumerate() {
        let _ = write!(html, "<tr><td class='times'>{}</td>", hour_label(hour));
        for cell in row {
            match cell {
                Some(label) => {
                    let _ = write!(html, "<td>{}</td>", escape_html(label));
                }
                None => html.push_str("<td></td>"),
            }
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table></body></html>");
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResourceId, Session, WeekLayout};

    fn catalog() -> Catalog {
        Catalog::builder(WeekLayout::new(3, 2, 36))
            .with_room("Lab", 0..6)
            .with_tutor("Ana", 5, 0..6)
            .with_supervisor("Sam<1>", 5, 0..6)
            .build()
            .unwrap()
    }

    fn schedule() -> Schedule {
        let mut s = Schedule::empty(6);
        let m = Session::meeting(ResourceId(0), ResourceId(0), ResourceId(0));
        s.set_session(1, m).unwrap(); // Monday, second hour
        s.set_session(3, m).unwrap(); // Tuesday, first hour
        s
    }

    #[test]
    fn test_hour_labels() {
        assert_eq!(hour_label(0), "8-9");
        assert_eq!(hour_label(3), "11-12");
        assert_eq!(hour_label(4), "12-1");
        assert_eq!(hour_label(9), "5-6");
    }

    #[test]
    fn test_text_table_layout() {
        let table = text_table(&schedule(), &catalog()).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("| M") && lines[0].contains("| T"));
        assert!(lines[1].starts_with("8-9"));
        assert!(lines[1].contains("Lab Ana Sam<1>"));
        assert!(lines[2].starts_with("9-10"));
        assert_eq!(lines[2].matches("Lab Ana Sam<1>").count(), 1);
        assert!(!lines[3].contains("Lab"));
    }

    #[test]
    fn test_html_document() {
        let html = html_document(&schedule(), &catalog()).unwrap();
        assert!(html.starts_with("<html>"));
        assert!(html.ends_with("</body></html>"));
        assert_eq!(html.matches("<tr>").count(), 4);
        assert_eq!(html.matches("Lab Ana Sam&lt;1&gt;").count(), 2);
        assert!(html.contains("<th>T</th>"));
        assert!(html.contains("<td class='times'>10-11</td>"));
    }

    #[test]
    fn test_length_mismatch_fails() {
        let m = Session::meeting(ResourceId(0), ResourceId(0), ResourceId(0));
        let long = Schedule::from_sessions(vec![m; 8]);
        assert!(matches!(
            text_table(&long, &catalog()),
            Err(SchedulerError::ScheduleLength { expected: 6, actual: 8 })
        ));
        assert!(html_document(&Schedule::empty(4), &catalog()).is_err());
    }

    #[test]
    fn test_stale_reference_fails() {
        let mut s = Schedule::empty(6);
        s.set_session(0, Session::meeting(ResourceId(5), ResourceId(0), ResourceId(0)))
            .unwrap();
        assert!(text_table(&s, &catalog()).is_err());
    }
}
