use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Table};
use serde::Serialize;

use scimfilter::search::QueryMode;

use super::join_words;
use crate::context::ConfigContext;
use crate::examples::ExampleGroup;
use crate::output::{OutputManager, TableDisplay};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Search Box Submission",
        commands: &[
            "scimfilter search john                    # bare term, expanded with the default strategy",
            "scimfilter search name starts with john   # filter, normalized to name sw john",
            "scimfilter search --verbatim name contains jo",
        ],
    },
];

#[derive(Args)]
pub struct SearchArgs {
    /// What the user typed into the search box
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    pub input: Vec<String>,

    /// Forward filters untouched, as when query processing is disabled
    #[arg(long)]
    pub verbatim: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchOutcome {
    pub input: String,
    pub mode: QueryMode,
    pub filter: String,
}

impl TableDisplay for SearchOutcome {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table(&["Input", "Mode", "Filter"]);
        table.add_row(vec![
            Cell::new(&self.input),
            Cell::new(format!("{:?}", self.mode).to_lowercase()),
            Cell::new(&self.filter),
        ]);
        table
    }

    fn to_compact(&self) -> String {
        self.filter.clone()
    }
}

pub fn handle_search(args: SearchArgs, ctx: &ConfigContext, output: &OutputManager) -> Result<()> {
    let mut submission = ctx.config.submission().context("Invalid search configuration")?;
    if args.verbatim {
        submission.mode = QueryMode::Verbatim;
    }

    let input = join_words(&args.input);
    let filter = submission.resolve(&input);
    if filter.is_empty() {
        output.warning("Nothing to search for");
        return Ok(());
    }

    output.display(&SearchOutcome {
        input,
        mode: submission.mode,
        filter,
    })
}
