use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Table};
use serde::Serialize;

use scimfilter::search::FilterExpression;

use super::join_words;
use crate::context::ConfigContext;
use crate::examples::ExampleGroup;
use crate::output::{OutputManager, TableDisplay};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Strict Parsing",
        commands: &[
            "scimfilter parse name sw john doe              # attribute / operator / value",
            "scimfilter parse --normalize name starts with jo # normalize before parsing",
        ],
    },
];

#[derive(Args)]
pub struct ParseArgs {
    /// Canonical filter, e.g. `name sw john`
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    pub query: Vec<String>,

    /// Normalize human phrases before parsing
    #[arg(long)]
    pub normalize: bool,
}

#[derive(Debug, Serialize)]
pub struct ParsedFilter {
    #[serde(flatten)]
    pub expression: FilterExpression,
    pub canonical: String,
}

impl TableDisplay for ParsedFilter {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table(&["Part", "Value"]);
        table.add_row(vec![Cell::new("attribute"), Cell::new(&self.expression.attribute)]);
        table.add_row(vec![
            Cell::new("operator"),
            Cell::new(output.operator(self.expression.operator.as_str())),
        ]);
        table.add_row(vec![Cell::new("value"), Cell::new(&self.expression.value)]);
        table
    }

    fn to_compact(&self) -> String {
        self.canonical.clone()
    }
}

pub fn handle_parse(args: ParseArgs, ctx: &ConfigContext, output: &OutputManager) -> Result<()> {
    let raw = join_words(&args.query);

    let expression = if args.normalize {
        let normalizer = ctx.config.normalizer().context("Invalid alias configuration")?;
        FilterExpression::from_raw(&normalizer, &raw)
    } else {
        raw.parse::<FilterExpression>()
    }
    .with_context(|| format!("Could not parse filter '{raw}'"))?;

    let canonical = expression.to_string();
    output.display(&ParsedFilter { expression, canonical })
}
