use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Table};
use serde::Serialize;

use scimfilter::search::{OperatorAliasTable, OperatorCode};

use crate::context::ConfigContext;
use crate::examples::ExampleGroup;
use crate::output::{OutputManager, TableDisplay};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Alias Table",
        commands: &[
            "scimfilter aliases                 # phrases recognized with the current config",
            "scimfilter aliases --defaults      # ignore [aliases] from config",
        ],
    },
];

#[derive(Args)]
pub struct AliasesArgs {
    /// Show only the built-in phrases
    #[arg(long)]
    pub defaults: bool,
}

#[derive(Debug, Serialize)]
pub struct AliasRow {
    pub code: OperatorCode,
    pub label: &'static str,
    pub phrases: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AliasReport {
    pub aliases: Vec<AliasRow>,
}

impl AliasReport {
    fn from_table(table: &OperatorAliasTable) -> Self {
        let aliases = table
            .iter()
            .map(|(code, phrases)| AliasRow {
                code,
                label: code.label(),
                phrases: phrases.to_vec(),
            })
            .collect();
        Self { aliases }
    }
}

impl TableDisplay for AliasReport {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table(&["Code", "Label", "Phrases"]);
        for row in &self.aliases {
            table.add_row(vec![
                Cell::new(output.operator(row.code.as_str())),
                Cell::new(row.label),
                Cell::new(row.phrases.join(", ")),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.aliases
            .iter()
            .map(|row| format!("{}: {}", row.code, row.phrases.join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn handle_aliases(args: AliasesArgs, ctx: &ConfigContext, output: &OutputManager) -> Result<()> {
    let normalizer = if args.defaults {
        Default::default()
    } else {
        ctx.config.normalizer().context("Invalid alias configuration")?
    };

    output.heading("Operator Aliases");
    output.key_value("Source", &if args.defaults { "built-in".to_string() } else { ctx.source() });
    output.display(&AliasReport::from_table(normalizer.aliases()))?;
    output.info("Phrases match whole words exactly; the first word of a query is the attribute.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scimfilter::search::DEFAULT_ALIASES;

    #[test]
    fn test_report_lists_codes_in_dropdown_order() {
        let report = AliasReport::from_table(&DEFAULT_ALIASES);
        let codes: Vec<&str> = report.aliases.iter().map(|row| row.code.as_str()).collect();
        assert_eq!(codes, ["sw", "ew", "co", "eq"]);
        assert_eq!(
            report.to_compact().lines().next(),
            Some("sw: start with, starts with")
        );
    }
}
