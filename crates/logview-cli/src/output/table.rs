use super::column_label;
use is_terminal::IsTerminal;
use logview_types::{Table, ViewConfig};
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

const MIN_COLUMN_WIDTH: usize = 6;
const COLUMN_GAP: usize = 2;

/// Print the visible columns as an aligned text table, headers first.
/// Column widths shrink to fit the terminal when one is attached.
pub fn print_table(table: &Table, view: &ViewConfig) {
    if table.visible_columns.is_empty() {
        println!("(no visible columns)");
        return;
    }

    let labels: Vec<&str> = table
        .visible_columns
        .iter()
        .map(|column| column_label(view, column))
        .collect();

    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            table
                .visible_columns
                .iter()
                .map(|column| match row.get(column) {
                    Some(value) if !value.is_null() => value.to_string(),
                    _ => String::new(),
                })
                .collect()
        })
        .collect();

    let widths = column_widths(&labels, &cells);
    let use_color = std::io::stdout().is_terminal();

    let header = render_line(&labels, &widths);
    if use_color {
        println!("{}", header.bold());
    } else {
        println!("{}", header);
    }

    for row in &cells {
        let fields: Vec<&str> = row.iter().map(String::as_str).collect();
        println!("{}", render_line(&fields, &widths));
    }

    println!();
    println!(
        "{} row(s), {} column(s) shown",
        table.rows.len(),
        table.visible_columns.len()
    );
}

fn column_widths(labels: &[&str], cells: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = labels.iter().map(|l| l.chars().count()).collect();
    for row in cells {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    if let Some((Width(term_width), _)) = terminal_size() {
        shrink_to_fit(&mut widths, term_width as usize);
    }

    widths
}

/// Repeatedly narrow the widest column until the table fits (or nothing is
/// left above the minimum width).
fn shrink_to_fit(widths: &mut [usize], available: usize) {
    let gaps = COLUMN_GAP * widths.len().saturating_sub(1);
    loop {
        let total: usize = widths.iter().sum::<usize>() + gaps;
        if total <= available {
            return;
        }
        let Some((widest, _)) = widths
            .iter()
            .enumerate()
            .filter(|(_, w)| **w > MIN_COLUMN_WIDTH)
            .max_by_key(|(_, w)| **w)
        else {
            return;
        };
        widths[widest] -= 1;
    }
}

fn render_line(fields: &[&str], widths: &[usize]) -> String {
    let mut line = String::new();
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            line.push_str(&" ".repeat(COLUMN_GAP));
        }
        let width = widths[index];
        let truncated = truncate(field, width);
        if index + 1 < fields.len() {
            line.push_str(&format!("{:<width$}", truncated));
        } else {
            line.push_str(&truncated);
        }
    }
    line
}

fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    if max_len <= 3 {
        return text.chars().take(max_len).collect();
    }
    let kept: String = text.chars().take(max_len - 3).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-10", 10), "exactly-10");
        assert_eq!(truncate("a-much-longer-value", 10), "a-much-...");
        assert_eq!(truncate("abc", 2), "ab");
    }

    #[test]
    fn test_shrink_to_fit() {
        let mut widths = vec![30, 10, 8];
        shrink_to_fit(&mut widths, 40);
        let total: usize = widths.iter().sum::<usize>() + COLUMN_GAP * 2;
        assert!(total <= 40);
        // Narrow columns are never squeezed below the minimum
        assert!(widths.iter().all(|w| *w >= MIN_COLUMN_WIDTH));
    }

    #[test]
    fn test_render_line_pads_between_columns() {
        let widths = vec![6, 4];
        let line = render_line(&["path", "loss"], &widths);
        assert_eq!(line, "path    loss");
    }
}
