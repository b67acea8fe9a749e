use crate::commands::{aliases, build, normalize, parse, search, strategy};

#[derive(Clone, Copy)]
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

#[derive(Clone, Copy)]
pub struct CommandExample {
    pub name: &'static str,
    pub groups: &'static [ExampleGroup],
}

pub fn command_examples() -> &'static [CommandExample] {
    &[
        CommandExample {
            name: "normalize",
            groups: normalize::EXAMPLES,
        },
        CommandExample {
            name: "parse",
            groups: parse::EXAMPLES,
        },
        CommandExample {
            name: "build",
            groups: build::EXAMPLES,
        },
        CommandExample {
            name: "strategy",
            groups: strategy::EXAMPLES,
        },
        CommandExample {
            name: "search",
            groups: search::EXAMPLES,
        },
        CommandExample {
            name: "aliases",
            groups: aliases::EXAMPLES,
        },
    ]
}
