use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Table};
use serde::Serialize;

use scimfilter::search::{OperatorCode, SearchStrategy};

use super::parse_operator;
use crate::context::ConfigContext;
use crate::examples::ExampleGroup;
use crate::output::{OutputManager, TableDisplay};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Default Search Strategy",
        commands: &[
            "scimfilter strategy john                       # name co john with default config",
            "scimfilter strategy john --attribute userName --operator sw",
            "scimfilter strategy jo --template \"emails co %search-value%\"",
        ],
    },
];

#[derive(Args)]
pub struct StrategyArgs {
    /// Search term typed by the user
    pub term: String,

    /// Attribute to search (overrides search.default_attribute)
    #[arg(short, long)]
    pub attribute: Option<String>,

    /// Operator to apply (overrides search.default_operator)
    #[arg(short, long, value_parser = parse_operator)]
    pub operator: Option<OperatorCode>,

    /// Full template containing %search-value%
    #[arg(long, conflicts_with_all = ["attribute", "operator"])]
    pub template: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AppliedStrategy {
    pub template: String,
    pub term: String,
    pub filter: String,
}

impl TableDisplay for AppliedStrategy {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table(&["Template", "Term", "Filter"]);
        table.add_row(vec![Cell::new(&self.template), Cell::new(&self.term), Cell::new(&self.filter)]);
        table
    }

    fn to_compact(&self) -> String {
        self.filter.clone()
    }
}

pub fn handle_strategy(args: StrategyArgs, ctx: &ConfigContext, output: &OutputManager) -> Result<()> {
    let settings = &ctx.config.search;
    let strategy = match args.template {
        Some(template) => SearchStrategy::from_template(template).context("Invalid search strategy template")?,
        None => SearchStrategy::new(
            args.attribute.as_deref().unwrap_or(&settings.default_attribute).trim(),
            args.operator.unwrap_or(settings.default_operator),
        ),
    };
    output.verbose(&format!("Using strategy '{}'", strategy.template()));

    output.display(&AppliedStrategy {
        filter: strategy.apply(&args.term),
        template: strategy.template().to_string(),
        term: args.term,
    })
}
