use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Table};
use serde::Serialize;

use scimfilter::errors::FilterError;
use scimfilter::filters::BasicFilter;
use scimfilter::search::OperatorCode;

use super::parse_operator;
use crate::examples::ExampleGroup;
use crate::output::{OutputManager, TableDisplay};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Basic Filter Form",
        commands: &[
            "scimfilter build --attribute emails --condition co --value wso2.com",
            "scimfilter build -a name -c sw --value \"john doe\"",
        ],
    },
];

#[derive(Args)]
pub struct BuildArgs {
    /// Attribute to filter on
    #[arg(short, long)]
    pub attribute: String,

    /// Condition code: sw, ew, co or eq
    #[arg(short, long, value_parser = parse_operator)]
    pub condition: OperatorCode,

    /// Value to compare against
    #[arg(long)]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct BuiltFilter {
    #[serde(flatten)]
    pub form: BasicFilter,
    pub filter: String,
}

impl TableDisplay for BuiltFilter {
    fn to_table(&self, output: &OutputManager) -> Table {
        let mut table = output.create_table(&["Attribute", "Condition", "Value", "Filter"]);
        table.add_row(vec![
            Cell::new(&self.form.attribute),
            Cell::new(format!(
                "{} ({})",
                output.operator(self.form.condition.as_str()),
                self.form.condition.label()
            )),
            Cell::new(&self.form.value),
            Cell::new(&self.filter),
        ]);
        table
    }

    fn to_compact(&self) -> String {
        self.filter.clone()
    }
}

pub fn handle_build(args: BuildArgs, output: &OutputManager) -> Result<()> {
    let form = BasicFilter::new(args.attribute, args.condition, args.value);

    let expression = match form.to_expression() {
        Ok(expression) => expression,
        Err(FilterError::Validation(err)) => {
            output.error("The filter form is incomplete:");
            output.issues(&err.issues);
            anyhow::bail!("Invalid filter form");
        }
        Err(err) => return Err(err.into()),
    };

    output.display(&BuiltFilter {
        filter: expression.to_string(),
        form,
    })
}
