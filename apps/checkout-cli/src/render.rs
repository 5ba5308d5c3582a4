//! # Text Rendering
//!
//! Prints a [`CheckoutView`] as the checkout table.
//!
//! ```text
//! Electro World
//!
//! ID  Name        Available  Price     Qty  Total
//! 1   Headphones  5          200.00$   5    1000.00$  [-]
//! 2   USB-C Cable 12         9.99$     0    0.00$     [+]
//!
//! Discount: 100.00$
//! Total: 900.00$
//! ```
//!
//! `[+]` is shown only while more units are available, `[-]` only while
//! something is ordered. The discount line is omitted when no discount
//! applies; the total line is always printed.

use checkout_core::display::{CheckoutView, ProductRow, SummaryView};

const HEADERS: [&str; 6] = ["ID", "Name", "Available", "Price", "Qty", "Total"];
const GAP: &str = "  ";

/// Renders the store heading, the product table and the summary lines.
pub fn render_table(store_name: &str, view: &CheckoutView, symbol: &str) -> String {
    let mut lines = vec![store_name.to_string(), String::new()];

    if view.rows.is_empty() {
        lines.push("No products available.".to_string());
    } else {
        let cells: Vec<[String; 6]> = view.rows.iter().map(|row| row_cells(row, symbol)).collect();

        let mut widths = HEADERS.map(str::len);
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        lines.push(join_padded(&HEADERS.map(String::from), &widths).trim_end().to_string());
        for (row, cell) in view.rows.iter().zip(&cells) {
            let line = format!("{}{GAP}{}", join_padded(cell, &widths), controls(row));
            lines.push(line.trim_end().to_string());
        }
    }

    lines.push(String::new());
    lines.extend(summary_lines(&view.summary, symbol));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// The lines under the table.
pub fn summary_lines(summary: &SummaryView, symbol: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);
    if let Some(discount) = &summary.discount_line {
        lines.push(format!("Discount: {discount}{symbol}"));
    }
    lines.push(format!("Total: {}{symbol}", summary.total_line));
    lines
}

fn row_cells(row: &ProductRow, symbol: &str) -> [String; 6] {
    [
        row.id.clone(),
        row.name.clone(),
        row.available_count.to_string(),
        format!("{}{symbol}", row.price),
        row.ordered_quantity.to_string(),
        format!("{}{symbol}", row.total),
    ]
}

fn controls(row: &ProductRow) -> String {
    let plus = if row.can_increase { "[+]" } else { "   " };
    let minus = if row.can_decrease { "[-]" } else { "" };
    format!("{plus} {minus}")
}

fn join_padded(cells: &[String; 6], widths: &[usize; 6]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(GAP)
}
