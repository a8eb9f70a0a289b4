//! Fixed-width text rendering of an extracted receipt.

use crate::models::receipt::{Receipt, UNKNOWN};
use crate::money::group_thousands;

/// Total column width of the rendered report.
const WIDTH: usize = 45;

/// Width of the metadata label column (`"Address:    "` and friends).
const LABEL_WIDTH: usize = 12;

/// Render a receipt as a 45-column monospace report.
///
/// Pure function with no I/O; the CLI and any embedding UI reuse the
/// output verbatim.
pub fn render(data: &Receipt) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("=".repeat(WIDTH));
    lines.push(center(" EXTRACTED RECEIPT DATA ", WIDTH));
    lines.push("=".repeat(WIDTH));

    lines.push(format!("MERCHANT:   {}", data.merchant_name));

    let addr = data.merchant_address.as_deref().unwrap_or(UNKNOWN);
    let wrapped = wrap(addr, WIDTH - LABEL_WIDTH);
    if let Some((first, rest)) = wrapped.split_first() {
        lines.push(format!("Address:    {first}"));
        for line in rest {
            lines.push(format!("{}{line}", " ".repeat(LABEL_WIDTH)));
        }
    } else {
        lines.push(format!("Address:    {addr}"));
    }

    lines.push(format!(
        "Invoice ID: {}",
        data.invoice_id.as_deref().unwrap_or("N/A")
    ));
    lines.push(format!("Date:       {}", data.date));
    lines.push(format!("Category:   {}", data.category));

    lines.push("-".repeat(WIDTH));
    lines.push(format!(
        "{:<4} {:<20} {:<10} {:<10}",
        "Qty", "Description", "Unit Price", "Total"
    ));
    lines.push("-".repeat(WIDTH));

    for item in &data.items {
        let qty = item.quantity.to_string();
        let name = truncate_name(&item.name);
        let unit = item
            .unit_price
            .map(group_thousands)
            .unwrap_or_else(|| "0".to_string());
        let total = group_thousands(item.total_price);
        lines.push(format!("{qty:<4} {name:<20} {unit:<10} {total:<10}"));
    }

    lines.push("-".repeat(WIDTH));

    let sub = data
        .subtotal
        .map(group_thousands)
        .unwrap_or_else(|| "0".to_string());
    let tax = data
        .tax_amount
        .map(group_thousands)
        .unwrap_or_else(|| "0".to_string());
    let total = group_thousands(data.total_amount);

    lines.push(format!("Subtotal:   {sub:>32}"));
    lines.push(format!("Tax:        {tax:>32}"));
    lines.push(format!("TOTAL:      {total:>28} {}", data.currency));
    lines.push("=".repeat(WIDTH));

    lines.join("\n")
}

/// Item names longer than 19 characters are cut to 17 plus `".."`.
fn truncate_name(name: &str) -> String {
    if name.chars().count() > 19 {
        let head: String = name.chars().take(17).collect();
        format!("{head}..")
    } else {
        name.to_string()
    }
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Greedy word wrap; words longer than the width are broken apart.
/// Whitespace-only input yields no lines.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if current.is_empty() && word_len <= width {
            current.push_str(word);
        } else if !current.is_empty() && current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut rest: Vec<char> = word.chars().collect();
            while rest.len() > width {
                lines.push(rest.drain(..width).collect());
            }
            current = rest.into_iter().collect();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::receipt::ReceiptItem;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn sample() -> Receipt {
        Receipt {
            merchant_name: "Acme Store".to_string(),
            merchant_address: Some("12 Main St".to_string()),
            invoice_id: Some("A-1009".to_string()),
            date: "2024-06-02".to_string(),
            subtotal: Some(Decimal::from(12000)),
            tax_amount: Some(Decimal::from(1500)),
            total_amount: Decimal::from(13500),
            currency: "VND".to_string(),
            items: vec![ReceiptItem {
                name: "Iced Coffee".to_string(),
                quantity: Decimal::TWO,
                unit_price: Some(Decimal::from(6000)),
                total_price: Decimal::from(12000),
            }],
            category: "Food".to_string(),
        }
    }

    #[test]
    fn banners_and_dividers_span_the_full_width() {
        let text = render(&sample());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=".repeat(45));
        assert_eq!(lines[2], "=".repeat(45));
        assert_eq!(lines.last().unwrap(), &"=".repeat(45).as_str());
        assert_eq!(lines[1].chars().count(), 45);
        assert!(lines[1].contains("EXTRACTED RECEIPT DATA"));
        assert_eq!(lines.iter().filter(|l| **l == "-".repeat(45)).count(), 3);
    }

    #[test]
    fn metadata_block_lines_up_under_twelve_column_labels() {
        let text = render(&sample());

        assert!(text.contains("MERCHANT:   Acme Store"));
        assert!(text.contains("Address:    12 Main St"));
        assert!(text.contains("Invoice ID: A-1009"));
        assert!(text.contains("Date:       2024-06-02"));
        assert!(text.contains("Category:   Food"));
    }

    #[test]
    fn long_address_wraps_with_continuation_indent() {
        let mut data = sample();
        data.merchant_address =
            Some("Unit 7, 123 Nguyen Van Linh Boulevard, District 7, Ho Chi Minh City".to_string());
        let text = render(&data);
        let lines: Vec<&str> = text.lines().collect();

        let first = lines.iter().position(|l| l.starts_with("Address:    ")).unwrap();
        // First wrapped segment fits in 33 columns after the label.
        assert!(lines[first].chars().count() <= 45);
        // Continuation lines are indented to align under the first.
        assert!(lines[first + 1].starts_with(&" ".repeat(12)));
        assert!(!lines[first + 1].trim().is_empty());
    }

    #[test]
    fn missing_metadata_falls_back_to_sentinels() {
        let mut data = sample();
        data.merchant_address = None;
        data.invoice_id = None;
        let text = render(&data);

        assert!(text.contains("Address:    Unknown"));
        assert!(text.contains("Invoice ID: N/A"));
    }

    #[test]
    fn item_rows_follow_the_column_header() {
        let text = render(&sample());

        assert!(text.contains("Qty  Description          Unit Price Total"));
        assert!(text.contains("2    Iced Coffee          6,000      12,000"));
    }

    #[test]
    fn truncates_names_longer_than_nineteen_characters() {
        let mut data = sample();
        data.items[0].name = "12345678901234567890".to_string(); // 20 chars
        let text = render(&data);
        assert!(text.contains("12345678901234567.."));
        assert!(!text.contains("12345678901234567890"));

        // Exactly 19 characters is left alone.
        data.items[0].name = "1234567890123456789".to_string();
        let text = render(&data);
        assert!(text.contains("1234567890123456789 "));
    }

    #[test]
    fn missing_unit_price_renders_as_zero() {
        let mut data = sample();
        data.items[0].unit_price = None;
        let text = render(&data);
        assert!(text.contains("2    Iced Coffee          0          12,000"));
    }

    #[test]
    fn totals_block_is_right_justified() {
        let text = render(&sample());
        let lines: Vec<&str> = text.lines().collect();

        let sub = lines.iter().find(|l| l.starts_with("Subtotal:")).unwrap();
        assert_eq!(sub.chars().count(), 44);
        assert!(sub.ends_with("12,000"));

        let tax = lines.iter().find(|l| l.starts_with("Tax:")).unwrap();
        assert_eq!(tax.chars().count(), 44);
        assert!(tax.ends_with("1,500"));

        let total = lines.iter().find(|l| l.starts_with("TOTAL:")).unwrap();
        assert!(total.ends_with("13,500 VND"));
        assert_eq!(total.chars().count(), 44);
    }

    #[test]
    fn missing_totals_default_to_zero() {
        let mut data = sample();
        data.subtotal = None;
        data.tax_amount = None;
        let text = render(&data);

        assert!(text.contains(&format!("Subtotal:   {:>32}", "0")));
        assert!(text.contains(&format!("Tax:        {:>32}", "0")));
    }

    #[test]
    fn wrap_splits_on_word_boundaries() {
        assert_eq!(wrap("a bb ccc", 5), vec!["a bb", "ccc"]);
        assert_eq!(wrap("", 10), Vec::<String>::new());
        assert_eq!(wrap("   ", 10), Vec::<String>::new());
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }
}
