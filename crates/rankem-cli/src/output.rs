//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use rankem_domain::{Comparison, Item, Preference, Rank};
use rankem_store::records::ItemRecord;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a list of ranks.
    pub fn format_ranks(&self, ranks: &[Rank]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = ranks
                    .iter()
                    .map(|r| {
                        serde_json::json!({
                            "id": r.id.to_string(),
                            "name": r.name,
                            "items": r.items.len(),
                            "sorted": r.sorted,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                if ranks.is_empty() {
                    return Ok(self.colorize("No ranks found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Items", "Sorted"]);
                for rank in ranks {
                    builder.push_record([
                        short_id(&rank.id.to_string()),
                        rank.name.clone(),
                        rank.items.len().to_string(),
                        if rank.sorted { "yes" } else { "no" }.to_string(),
                    ]);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(ranks
                .iter()
                .map(|r| r.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the items of a rank in presentation order.
    ///
    /// Positions and scores are only shown once the rank is sorted.
    pub fn format_rank(&self, rank: &Rank) -> Result<String> {
        let items = rank.display_order();
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "id": rank.id.to_string(),
                    "name": rank.name,
                    "sorted": rank.sorted,
                    "items": items.iter().map(|item| ItemRecord::from(*item)).collect::<Vec<_>>(),
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let title = if rank.sorted {
                    self.colorize(&rank.name, "green")
                } else {
                    format!("{} {}", rank.name, self.colorize("(unsorted)", "yellow"))
                };
                if items.is_empty() {
                    return Ok(format!("{}\n{}", title, self.colorize("No items yet.", "yellow")));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "ID", "Name", "Score", "Wins", "Losses"]);
                for (index, item) in items.iter().enumerate() {
                    let (position, score) = if rank.sorted {
                        ((index + 1).to_string(), format!("{:.1}", item.score))
                    } else {
                        ("-".to_string(), "-".to_string())
                    };
                    builder.push_record([
                        position,
                        short_id(&item.id.to_string()),
                        item.name.clone(),
                        score,
                        item.better_than.len().to_string(),
                        item.worse_than.len().to_string(),
                    ]);
                }
                Ok(format!("{}\n{}", title, self.render(builder)))
            }
            OutputFormat::Quiet => Ok(items
                .iter()
                .map(|item| item.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format an item together with how it compares to the rest of its rank.
    pub fn format_item(&self, rank: &Rank, item: &Item, comparisons: &[Comparison]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "rank": rank.id.to_string(),
                    "item": ItemRecord::from(item),
                    "comparisons": comparisons
                        .iter()
                        .map(|c| serde_json::json!({
                            "id": c.item.id.to_string(),
                            "name": c.item.name,
                            "preference": c.preference.as_str(),
                        }))
                        .collect::<Vec<_>>(),
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let mut title = format!("{} / {}", rank.name, item.name);
                if rank.sorted {
                    title.push_str(&format!(" (score {:.1})", item.score));
                }
                if comparisons.is_empty() {
                    return Ok(format!(
                        "{}\n{}",
                        title,
                        self.colorize("Nothing to compare against yet.", "yellow")
                    ));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Preference"]);
                for comparison in comparisons {
                    builder.push_record([
                        short_id(&comparison.item.id.to_string()),
                        comparison.item.name.clone(),
                        self.preference(comparison.preference),
                    ]);
                }
                Ok(format!("{}\n{}", title, self.render(builder)))
            }
            OutputFormat::Quiet => Ok(item.id.to_string()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn preference(&self, preference: Preference) -> String {
        match preference {
            Preference::Better => self.colorize("▲ better", "green"),
            Preference::Worse => self.colorize("▼ worse", "red"),
            Preference::None => "-".to_string(),
        }
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// First block of a hyphenated id, enough to type back as a prefix.
fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankem_domain::{RankId, RatingEngine};

    fn fruits() -> Rank {
        let mut rank = Rank::new(RankId::new(), "Fruits");
        let apple = rank.push_item("Apple");
        let banana = rank.push_item("Banana");
        rank.push_item("Cherry");
        if let Some(item) = rank.item_mut(apple.id) {
            item.add_better_than(banana.id);
        }
        rank
    }

    #[test]
    fn test_rank_list_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_ranks(&[fruits()]).unwrap();
        assert!(output.contains("Fruits"));
        assert!(output.contains("Sorted"));
    }

    #[test]
    fn test_empty_rank_list() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_ranks(&[]).unwrap();
        assert!(output.contains("No ranks found"));
    }

    #[test]
    fn test_rank_list_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let rank = fruits();
        let output = formatter.format_ranks(&[rank.clone()]).unwrap();
        assert_eq!(output, rank.id.to_string());
    }

    #[test]
    fn test_unsorted_rank_hides_scores() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_rank(&fruits()).unwrap();
        assert!(output.contains("(unsorted)"));
        assert!(!output.contains("1000.0"));
    }

    #[test]
    fn test_sorted_rank_shows_scores_in_order() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut rank = fruits();
        rank.calculate_scores(&RatingEngine::default());

        let output = formatter.format_rank(&rank).unwrap();

        assert!(output.contains("1016.0"));
        let apple = output.find("Apple").unwrap();
        let cherry = output.find("Cherry").unwrap();
        let banana = output.find("Banana").unwrap();
        assert!(apple < cherry && cherry < banana);
    }

    #[test]
    fn test_rank_json_uses_display_order() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let mut rank = fruits();
        rank.calculate_scores(&RatingEngine::default());

        let output = formatter.format_rank(&rank).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["sorted"], true);
        assert_eq!(json["items"][0]["name"], "Apple");
        assert_eq!(json["items"][2]["name"], "Banana");
        assert_eq!(json["items"][0]["betterThan"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_item_comparisons() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let rank = fruits();
        let apple = rank.items[0].clone();
        let comparisons = rank.comparisons(apple.id).unwrap();

        let output = formatter.format_item(&rank, &apple, &comparisons).unwrap();

        assert!(output.contains("Fruits / Apple"));
        assert!(output.contains("▲ better"));
        assert!(output.contains("Cherry"));
    }

    #[test]
    fn test_item_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let rank = fruits();
        let banana = rank.items[1].clone();
        let comparisons = rank.comparisons(banana.id).unwrap();

        let output = formatter.format_item(&rank, &banana, &comparisons).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        // Banana only appears in Apple's set, so it has no judgment of its own
        assert_eq!(json["comparisons"][0]["preference"], "none");
        assert_eq!(json["item"]["name"], "Banana");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("test"), "⚠ test");
    }
}
