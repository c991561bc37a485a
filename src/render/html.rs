use crate::domain::model::{Cell, Event, Grid};
use crate::render::format::LabelFormat;
use crate::render::style::StyleSheet;
use std::fmt::Write;

const HEADER: &str = "<!DOCTYPE HTML>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n    <style>\n";
const HEADER_END: &str = "    </style>\n</head>\n<body>\n    <table>\n";
const FOOTER: &str = "    </table>\n</body>\n</html>";

pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Turns a [`Grid`] into a standalone HTML table.
///
/// Event starts become `<td rowspan>` cells, suppressed positions emit
/// nothing and empty positions emit `<td></td>`. Each hour gets a leading
/// `<th rowspan>` time label.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    styles: StyleSheet,
    labels: LabelFormat,
}

impl HtmlRenderer {
    pub fn new(styles: StyleSheet, labels: LabelFormat) -> Self {
        Self { styles, labels }
    }

    pub fn render(&self, grid: &Grid) -> String {
        let mut html = String::new();
        html.push_str(HEADER);
        html.push_str(&self.styles.to_css());
        html.push_str(HEADER_END);

        html.push_str("<thead>\n<tr>\n<th></th>\n");
        for day in &grid.days {
            let _ = writeln!(html, "<th>{}</th>", html_escape(&self.labels.day(*day)));
        }
        html.push_str("</tr>\n</thead>\n<tbody>\n");

        for row in &grid.rows {
            html.push_str("<tr>\n");
            if let Some(label) = row.time_label {
                let _ = writeln!(
                    html,
                    "<th rowspan=\"{}\">{}</th>",
                    label.row_span,
                    html_escape(&self.labels.slot(label.slot, grid.quantum_minutes))
                );
            }
            for cell in &row.cells {
                match cell {
                    Cell::EventStart { row_span, event } => {
                        let _ = writeln!(
                            html,
                            "<td rowspan=\"{}\">{}</td>",
                            row_span,
                            self.event_content(event)
                        );
                    }
                    Cell::Suppressed => {}
                    Cell::Empty => html.push_str("<td></td>"),
                }
            }
            html.push_str("</tr>\n");
        }

        html.push_str("</tbody>");
        html.push_str(FOOTER);
        html
    }

    fn event_content(&self, event: &Event) -> String {
        format!(
            "{} - {}<br />{}",
            html_escape(&self.labels.time(event.actual_start)),
            html_escape(&self.labels.time(event.actual_end)),
            html_escape(&event.label)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::GridBuilder;
    use crate::domain::model::RawEvent;
    use chrono::{Duration, NaiveDate};

    fn standup_grid(label: &str) -> Grid {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let start = day.and_hms_opt(9, 0, 0).unwrap();
        let events = vec![RawEvent {
            start,
            end: start + Duration::minutes(90),
            label: label.to_string(),
        }];
        GridBuilder::default().build(&[day], &events).unwrap()
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_renders_event_cell_with_rowspan() {
        let html = HtmlRenderer::default().render(&standup_grid("Standup"));

        assert!(html.starts_with("<!DOCTYPE HTML>"));
        assert!(html.contains("<th>Monday 1/1</th>"));
        assert!(html.contains("<td rowspan=\"6\">09:00 - 10:30<br />Standup</td>"));
        assert!(html.contains("<th rowspan=\"4\">09:00</th>"));
        assert!(html.contains("<th rowspan=\"4\">10:00</th>"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn test_suppressed_rows_emit_no_cells() {
        let html = HtmlRenderer::default().render(&standup_grid("Standup"));

        // 9 rows: 1 event start, 5 suppressed, 3 empty
        assert_eq!(html.matches("<tr>\n").count(), 10);
        assert_eq!(html.matches("<td></td>").count(), 3);
        assert_eq!(html.matches("<td rowspan=").count(), 1);
    }

    #[test]
    fn test_labels_are_escaped() {
        let html = HtmlRenderer::default().render(&standup_grid("<b>Launch</b>"));
        assert!(html.contains("&lt;b&gt;Launch&lt;/b&gt;"));
        assert!(!html.contains("<b>Launch"));
    }

    #[test]
    fn test_empty_grid_still_has_header() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let grid = GridBuilder::default().build(&[day], &[]).unwrap();
        let html = HtmlRenderer::default().render(&grid);

        assert!(html.contains("<th>Tuesday 2/1</th>"));
        assert!(html.contains("<tbody>\n</tbody>"));
    }
}
