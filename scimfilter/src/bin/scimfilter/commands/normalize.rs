use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Table};
use serde::Serialize;

use scimfilter::search::{Normalization, OperatorCode, QueryMode};

use crate::context::ConfigContext;
use crate::examples::ExampleGroup;
use crate::output::{OutputManager, TableDisplay};
use crate::theme::ICONS;

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Normalize Queries",
        commands: &[
            "scimfilter normalize \"name starts with john doe\"     # name sw john doe",
            "scimfilter normalize \"age equals 30\" \"name eq jo\"     # several at once",
            "scimfilter normalize --explain \"emails contains wso2\" # show the matched phrase",
        ],
    },
    ExampleGroup {
        title: "Pipelines",
        commands: &[
            "cat queries.txt | scimfilter --output compact normalize",
            "scimfilter --output json normalize \"name ends with son\"",
        ],
    },
];

#[derive(Args)]
pub struct NormalizeArgs {
    /// Queries to normalize (one per argument); stdin lines are read when omitted
    pub queries: Vec<String>,

    /// Show the operator and phrase that were recognized
    #[arg(long)]
    pub explain: bool,

    /// Forward queries untouched, as when query processing is disabled
    #[arg(long)]
    pub verbatim: bool,
}

#[derive(Debug, Serialize)]
pub struct NormalizedRow {
    pub input: String,
    pub filter: String,
    pub rewritten: bool,
    pub operator: Option<OperatorCode>,
    pub phrase: Option<String>,
}

impl NormalizedRow {
    fn from_analysis(analysis: &Normalization<'_>) -> Self {
        Self {
            input: analysis.raw().to_string(),
            filter: analysis.render().into_owned(),
            rewritten: analysis.is_rewritten(),
            operator: analysis.code(),
            phrase: analysis.phrase(),
        }
    }

    fn verbatim(input: &str) -> Self {
        Self {
            input: input.to_string(),
            filter: input.to_string(),
            rewritten: false,
            operator: None,
            phrase: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NormalizeReport {
    #[serde(skip)]
    explain: bool,
    pub items: Vec<NormalizedRow>,
}

impl TableDisplay for NormalizeReport {
    fn to_table(&self, output: &OutputManager) -> Table {
        let headers: &[&str] = if self.explain {
            &["", "Input", "Filter", "Operator", "Phrase"]
        } else {
            &["", "Input", "Filter"]
        };
        let mut table = output.create_table(headers);

        for row in &self.items {
            let marker = if row.rewritten { ICONS.arrow } else { ICONS.unchanged };
            let mut cells = vec![Cell::new(marker), Cell::new(&row.input), Cell::new(&row.filter)];
            if self.explain {
                let operator = row.operator.map(|code| output.operator(code.as_str())).unwrap_or_default();
                cells.push(Cell::new(operator));
                cells.push(Cell::new(row.phrase.as_deref().unwrap_or("-")));
            }
            table.add_row(cells);
        }

        table
    }

    fn to_compact(&self) -> String {
        self.items
            .iter()
            .map(|row| row.filter.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn handle_normalize(args: NormalizeArgs, ctx: &ConfigContext, output: &OutputManager) -> Result<()> {
    let normalizer = ctx.config.normalizer().context("Invalid alias configuration")?;
    let mode = if args.verbatim {
        QueryMode::Verbatim
    } else {
        ctx.config.query_mode()
    };
    output.verbose(&format!("Query mode: {mode:?}"));

    let queries = if args.queries.is_empty() {
        read_stdin_queries()?
    } else {
        args.queries
    };

    if queries.is_empty() {
        output.warning("No queries given");
        return Ok(());
    }

    let items = queries
        .iter()
        .map(|query| match mode {
            QueryMode::Process => NormalizedRow::from_analysis(&normalizer.analyze(query)),
            QueryMode::Verbatim => NormalizedRow::verbatim(query),
        })
        .collect();

    output.display(&NormalizeReport {
        explain: args.explain,
        items,
    })
}

fn read_stdin_queries() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let mut queries = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read query from stdin")?;
        let line = line.trim_end_matches('\r');
        if !line.trim().is_empty() {
            queries.push(line.to_string());
        }
    }
    Ok(queries)
}
