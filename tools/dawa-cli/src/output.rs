//! Output formatting for the CLI.

use console::{pad_str, style, truncate_str, Alignment, Term};
use dawa_catalog::prelude::*;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stderr(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a plain line.
    pub fn line(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", msg);
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| pad(col, *width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Whether stderr is an interactive terminal.
    pub fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Left-align `text` in `width` visible columns, ignoring ANSI styling.
fn pad(text: &str, width: usize) -> String {
    pad_str(text, width, Alignment::Left, None).into_owned()
}

/// Shorten `text` to at most `max` visible columns, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    truncate_str(text, max, "…").into_owned()
}

/// Effective price, followed by the struck-through original when on offer.
pub fn format_price(product: &Product, locale: Locale) -> String {
    let current = product.effective_price().display(locale);
    match product.original_price() {
        Some(original) => format!(
            "{} {}",
            current,
            style(original.display_amount()).dim().strikethrough()
        ),
        None => current,
    }
}

/// Colored badge labels.
pub fn format_badges(product: &Product, locale: Locale) -> String {
    product
        .badges
        .iter()
        .map(|badge| {
            let label = badge.label(locale);
            match badge {
                ProductBadge::New => style(label).cyan().to_string(),
                ProductBadge::Offer => style(label).green().to_string(),
                ProductBadge::PrescriptionRequired => style(label).red().to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pager line such as `1 … 4 5 [6] 7 8 … 12`.
pub fn format_page_links(links: &[PageLink]) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Page {
                number,
                current: true,
            } => style(format!("[{}]", number)).bold().to_string(),
            PageLink::Page { number, .. } => number.to_string(),
            PageLink::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::measure_text_width;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Vitamin C", 20), "Vitamin C");
        assert_eq!(truncate("Vitamin C 1000mg", 8), "Vitamin…");
        assert_eq!(truncate("فيتامين سي", 5), "فيتا…");
    }

    #[test]
    fn test_pad_counts_chars() {
        assert_eq!(pad("زنك", 5).chars().count(), 5);
        assert_eq!(pad("too long", 3), "too long");
    }

    #[test]
    fn test_pad_ignores_ansi_styling() {
        let price = "OMR 6.800 \u{1b}[2m\u{1b}[9m8.500\u{1b}[0m";
        assert_eq!(measure_text_width(price), 15);

        let padded = pad(price, 24);
        assert_eq!(measure_text_width(&padded), 24);
        assert!(padded.starts_with(price));
    }

    #[test]
    fn test_truncate_keeps_styled_width() {
        let styled = "\u{1b}[32mOffer price today\u{1b}[0m";
        assert_eq!(measure_text_width(&truncate(styled, 6)), 6);
    }

    #[test]
    fn test_page_links_line() {
        console::set_colors_enabled(false);
        let links = Pagination::new(6, 10, 120).page_links(2);
        assert_eq!(format_page_links(&links), "1 … 4 5 [6] 7 8 … 12");
    }
}
