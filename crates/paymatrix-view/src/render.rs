//! Grid projections: HTML for embedding, plain text for terminals

use paymatrix_model::{NumberFormat, RenderedMatrix};
use std::fmt::Write;

/// Placeholder shown when a matrix has no levels
pub const NO_DATA: &str = "No data found.";

/// Render as an HTML table
///
/// Each row's first cell carries `data-level-name` so a click can be bound
/// back to its level. Labels and ids are escaped. Class names follow the
/// `pm-*` stylesheet: `pm-table-wrapper` around the table, `pm-grade` and
/// `pm-scale` headers, `pm-row` grade cells and `pm-cell` amounts.
#[must_use]
pub fn render_html(matrix: &RenderedMatrix, format: &NumberFormat) -> String {
    let Some(grid) = matrix.grid() else {
        return format!("<p>{NO_DATA}</p>");
    };

    let mut html = String::from(
        "<div class=\"pm-table-wrapper\">\n<table class=\"pay-matrix-grid\">\n<thead>\n\
         <tr><th class=\"pm-header pm-grade\">Grade</th>",
    );
    for scale in &grid.columns {
        let _ = write!(html, "<th class=\"pm-header pm-scale\">{scale}</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in &grid.rows {
        let _ = write!(
            html,
            "<tr><td class=\"pm-header pm-row\" data-level-name=\"{}\">{}</td>",
            html_escape::encode_double_quoted_attribute(row.level.as_str()),
            html_escape::encode_text(row.grade.as_str()),
        );
        for cell in row.formatted(format) {
            let _ = write!(html, "<td class=\"pm-cell\">{}</td>", html_escape::encode_text(&cell));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</div>");
    html
}

/// Render as an aligned plain-text table
///
/// Amounts are right-aligned; absent cells are blank.
#[must_use]
pub fn render_text(matrix: &RenderedMatrix, format: &NumberFormat) -> String {
    let Some(grid) = matrix.grid() else {
        return NO_DATA.to_string();
    };

    let mut table: Vec<Vec<String>> = Vec::with_capacity(grid.rows.len() + 1);
    let mut header = vec!["Grade".to_string()];
    header.extend(grid.columns.iter().map(ToString::to_string));
    table.push(header);
    for row in &grid.rows {
        let mut line = vec![row.grade.to_string()];
        line.extend(row.formatted(format));
        table.push(line);
    }

    let columns = table[0].len();
    let widths: Vec<usize> = (0..columns)
        .map(|c| table.iter().map(|r| r[c].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for (i, line) in table.iter().enumerate() {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(c, (cell, &width))| {
                if c == 0 {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
        if i == 0 {
            let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
            out.push_str(&rule.join("  "));
            out.push('\n');
        }
    }
    out
}
