//! # View
//!
//! Turns a [`BundleSnapshot`] into what the user sees.
//!
//! ## Screen Layout (text mode)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog                                                                │
//! │    [x] #1 Tie-Dye Lounge Set       $150.00   Added to Bundle            │
//! │    [ ] #2 Sunburst Tracksuit       $150.00   Add to Bundle              │
//! │                                                                         │
//! │  Your Bundle  [######----]  2 / 3                                       │
//! │    #1 Tie-Dye Lounge Set   $150.00 each   [−] 1 [+]   $150.00           │
//! │                                                                         │
//! │  Subtotal                 $300.00                                       │
//! │  Total                    $300.00                                       │
//! │  [ Add 1 Items to Proceed ]                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `--json` the snapshot is printed as one JSON object per render.

use std::fmt::Write as _;

use bundle_core::{BundleSnapshot, Catalog, CheckoutSummary, Money};

use crate::error::AppResult;

const PROGRESS_WIDTH: usize = 10;

pub const CHECKOUT_MESSAGE: &str = "Proceeding to checkout with your bundle!";

/// Output format chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Renders snapshots for one catalog and currency symbol.
#[derive(Debug, Clone)]
pub struct View {
    catalog: Catalog,
    currency_symbol: String,
    format: OutputFormat,
}

impl View {
    pub fn new(catalog: Catalog, currency_symbol: impl Into<String>, format: OutputFormat) -> Self {
        View {
            catalog,
            currency_symbol: currency_symbol.into(),
            format,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Formats an amount with the configured symbol, e.g. `$135.00`.
    pub fn format_money(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }

    /// Full re-render after a change.
    pub fn render(&self, snapshot: &BundleSnapshot) -> AppResult<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string(snapshot)?),
            OutputFormat::Text => Ok(self.render_text(snapshot)),
        }
    }

    /// Checkout button outcome.
    pub fn render_checkout(
        &self,
        summary: Option<&CheckoutSummary>,
        snapshot: &BundleSnapshot,
    ) -> AppResult<String> {
        match (self.format, summary) {
            (OutputFormat::Json, Some(summary)) => Ok(serde_json::to_string(summary)?),
            (OutputFormat::Json, None) => Ok(serde_json::json!({
                "checkoutEligible": false,
                "remainingForCheckout": snapshot.remaining_for_checkout,
            })
            .to_string()),
            (OutputFormat::Text, Some(_)) => Ok(CHECKOUT_MESSAGE.to_string()),
            (OutputFormat::Text, None) => Ok(button_label(snapshot)),
        }
    }

    fn render_text(&self, snapshot: &BundleSnapshot) -> String {
        let mut out = String::new();

        // Catalog cards
        let _ = writeln!(out, "Catalog");
        for product in &self.catalog {
            let selected = snapshot.is_selected(product.id);
            let _ = writeln!(
                out,
                "  [{}] {} {:<24} {:>10}   {}",
                if selected { "x" } else { " " },
                product.id,
                product.name,
                self.format_money(product.price()),
                if selected { "Added to Bundle" } else { "Add to Bundle" }
            );
        }
        out.push('\n');

        // Progress + selected items
        let _ = writeln!(
            out,
            "Your Bundle  {}  {} / {}",
            progress_bar(snapshot.progress_percent),
            snapshot.total_items,
            snapshot.minimum_items
        );
        if snapshot.is_empty() {
            let _ = writeln!(out, "  Your bundle is empty");
        }
        for line in &snapshot.lines {
            // Decrease is disabled at quantity 1; use remove instead
            let decrease = if line.quantity <= 1 { " " } else { "−" };
            let _ = writeln!(
                out,
                "  {} {:<24} {} each   [{}] {} [+]   {}",
                line.product_id,
                line.name,
                self.format_money(line.unit_price),
                decrease,
                line.quantity,
                self.format_money(line.line_total)
            );
        }
        out.push('\n');

        // Summary
        let _ = writeln!(out, "Subtotal{:>20}", self.format_money(snapshot.subtotal));
        if snapshot.discount_applied {
            let _ = writeln!(
                out,
                "Discount ({}%){:>14}",
                snapshot.discount_rate.percent(),
                format!("-{}", self.format_money(snapshot.discount))
            );
        }
        let _ = writeln!(out, "Total{:>23}", self.format_money(snapshot.total));
        let _ = write!(out, "[ {} ]", button_label(snapshot));

        out
    }
}

/// Checkout button label.
pub fn button_label(snapshot: &BundleSnapshot) -> String {
    if snapshot.checkout_eligible {
        "Proceed to Checkout".to_string()
    } else {
        format!("Add {} Items to Proceed", snapshot.remaining_for_checkout)
    }
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * PROGRESS_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(PROGRESS_WIDTH - filled))
}
