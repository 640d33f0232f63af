//! Terminal rendering of selections, variant lists and cart totals.
//!
//! In `--json` mode every human-facing printer is silent and commands emit a
//! single report through [`Output::json`] instead.

use std::fmt::Display;

use atelier_commerce::cart::LineItem;
use atelier_commerce::money::Money;
use atelier_commerce::selection::Availability;
use console::style;

const LABEL_WIDTH: usize = 22;

#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn human(&self) -> bool {
        !self.json
    }

    pub fn note(&self, msg: &str) {
        if self.human() {
            println!("{} {}", style("·").cyan(), msg);
        }
    }

    pub fn success(&self, msg: &str) {
        if self.human() {
            println!("{} {}", style("✓").green(), msg);
        }
    }

    pub fn warn(&self, msg: &str) {
        if self.human() {
            eprintln!("{} {}", style("!").yellow().bold(), msg);
        }
    }

    /// Errors are the one thing still printed in JSON mode, as `{"error": ..}`.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Trace of selection and edit steps, shown with `--verbose`.
    pub fn step(&self, msg: &str) {
        if self.verbose && self.human() {
            eprintln!("  {}", style(msg).dim());
        }
    }

    pub fn title(&self, msg: &str) {
        if self.human() {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    /// A `[section]` heading inside a listing, preceded by a blank line.
    pub fn section(&self, name: &str) {
        if self.human() {
            println!("\n{}", style(format!("[{}]", name)).cyan());
        }
    }

    pub fn blank(&self) {
        if self.human() {
            println!();
        }
    }

    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    pub fn field(&self, label: &str, value: impl Display) {
        if self.human() {
            println!("  {}", labelled(label, &value.to_string()));
        }
    }

    /// A money amount, right-aligned so columns of prices line up.
    pub fn price(&self, label: &str, amount: Money) {
        if self.human() {
            println!("  {}", labelled(label, &format!("{:>14}", amount.display())));
        }
    }

    /// The grand total, set apart from the breakdown above it.
    pub fn total(&self, label: &str, amount: Money) {
        if self.human() {
            println!("  {}", style("-".repeat(LABEL_WIDTH + 16)).dim());
            let value = style(format!("{:>14}", amount.display())).bold().to_string();
            println!("  {}", labelled(label, &value));
        }
    }

    pub fn stock(&self, label: &str, inventory: u32) {
        if self.human() {
            println!("  {}", labelled(label, &stock_level(inventory)));
        }
    }

    pub fn availability(&self, availability: Availability) {
        if self.human() {
            println!("  {}", labelled("status", &availability_badge(availability)));
        }
    }

    /// A pickable size or color.
    pub fn option(&self, name: &str, id: impl Display) {
        if self.human() {
            println!("  {} {} {}", style("•").dim(), name, style(format!("#{}", id)).dim());
        }
    }

    pub fn cart_line(&self, item: &LineItem, line_total: Money) {
        if self.human() {
            println!("  {}", line_summary(item, line_total));
        }
    }

    pub fn columns(&self, cols: &[&str], widths: &[usize]) {
        if self.human() {
            let cells: Vec<String> = cols
                .iter()
                .zip(widths)
                .map(|(col, width)| format!("{:width$}", col, width = width))
                .collect();
            println!("  {}", cells.join("  ").trim_end());
        }
    }
}

fn labelled(label: &str, value: &str) -> String {
    format!("{} {}", style(format!("{:<width$}", label, width = LABEL_WIDTH)).dim(), value)
}

/// Stock count, red when sold out.
pub fn stock_level(inventory: u32) -> String {
    match inventory {
        0 => style("sold out").red().to_string(),
        1 => style("1 unit").yellow().to_string(),
        n => format!("{} units", n),
    }
}

/// Colored badge for a resolved selection.
pub fn availability_badge(availability: Availability) -> String {
    match availability {
        Availability::InStock => style("in stock").green().to_string(),
        Availability::ProductDefault => style("product default").green().to_string(),
        Availability::OutOfStock => style("out of stock").red().to_string(),
        Availability::NoSuchCombination => style("no such combination").red().to_string(),
        Availability::Incomplete => style("incomplete selection").yellow().to_string(),
    }
}

/// `2 x Tee (S - Blue) @ $19.900 = $39.800`, with a stock hint when the line
/// sits at the stock it was resolved against.
pub fn line_summary(item: &LineItem, line_total: Money) -> String {
    let name = match item.variant_label {
        Some(ref label) => format!("{} ({})", item.product_name, label),
        None => item.product_name.clone(),
    };
    let mut summary = format!(
        "{} x {} @ {} = {}",
        item.quantity,
        name,
        item.unit_price.display(),
        line_total.display()
    );
    if item.available == Some(item.quantity) {
        summary.push_str(&format!(" {}", style("(all remaining stock)").dim()));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_commerce::ids::{ProductId, VariantId};
    use atelier_commerce::money::Currency;

    fn plain() {
        console::set_colors_enabled(false);
    }

    fn line(quantity: u32) -> LineItem {
        let mut item = LineItem::new(
            ProductId::new(1),
            Some(VariantId::new(102)),
            "Tee",
            quantity,
            Money::new(19_900, Currency::COP),
        );
        item.variant_label = Some("S - Blue".to_string());
        item
    }

    #[test]
    fn test_stock_level() {
        plain();
        assert_eq!(stock_level(0), "sold out");
        assert_eq!(stock_level(1), "1 unit");
        assert_eq!(stock_level(12), "12 units");
    }

    #[test]
    fn test_line_summary_flags_lines_at_stock() {
        plain();
        let item = line(2);
        let total = item.line_total().unwrap();
        let summary = line_summary(&item, total);
        assert!(summary.starts_with("2 x Tee (S - Blue) @ "));
        assert!(!summary.contains("remaining"));

        let item = line(5).with_available(5);
        let total = item.line_total().unwrap();
        assert!(line_summary(&item, total).ends_with("(all remaining stock)"));
    }
}
