mod commands;
mod context;
mod examples;
mod output;
mod theme;

use std::fmt::Write;
use std::io::{self, Write as IoWrite};
use std::path::PathBuf;

use anyhow::Result;
use clap::{
    ColorChoice, Command, CommandFactory, FromArgMatches, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Style},
    },
    error::ErrorKind,
};
use colored::{Color as ThemeColor, Colorize, control::ShouldColorize};

use commands::{
    aliases::{AliasesArgs, handle_aliases},
    build::{BuildArgs, handle_build},
    normalize::{NormalizeArgs, handle_normalize},
    parse::{ParseArgs, handle_parse},
    search::{SearchArgs, handle_search},
    strategy::{StrategyArgs, handle_strategy},
};
use context::ConfigContext;
use examples::{ExampleGroup, command_examples};
use output::{GlobalOptions, OutputFormat, OutputManager};
use theme::{ICONS, THEME};

const ENVIRONMENT_VARIABLES: &[(&str, &str)] = &[
    ("SCIMFILTER_CONFIG", "Path to a config.toml (same as --config)"),
    ("RUST_LOG", "Log filter, e.g. scimfilter=debug to trace normalization"),
];

#[derive(Parser)]
#[command(name = "scimfilter")]
#[command(version)]
#[command(
    about = "Turn human search phrases into SCIM-style filters",
    long_about = r#"Rewrites what people type into an identity console search box into the
`attribute operator value` filters an identity server understands:

  name starts with john doe   →  name sw john doe
  age equals 30               →  age eq 30
  name eq john                →  name eq john (already canonical)

Commands:
  normalize  Rewrite free-text queries
  parse      Strictly parse a canonical filter
  build      Build a filter from attribute, condition and value
  strategy   Apply the default search strategy to a bare term
  search     Resolve search box input the way the console does
  aliases    List recognized operator phrases
"#
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (defaults to .scimfilter/config.toml in this or a parent directory)
    #[arg(long, env = "SCIMFILTER_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn parse_with_styles() -> Self {
        let command = build_cli_command();
        let matches = match command.styles(help_styles()).try_get_matches() {
            Ok(matches) => matches,
            Err(err) => exit_with_clap_error(err),
        };
        match Cli::from_arg_matches(&matches) {
            Ok(cli) => cli,
            Err(err) => exit_with_clap_error(err),
        }
    }
}

fn exit_with_clap_error(err: clap::error::Error) -> ! {
    let to_stdout = matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion);
    let _ = if to_stdout { print_blank_line_stdout() } else { print_blank_line_stderr() };
    if let Err(print_err) = err.print()
        && print_err.kind() != io::ErrorKind::BrokenPipe
    {
        eprintln!("Failed to display help: {print_err}");
    }
    let _ = if to_stdout { print_blank_line_stdout() } else { print_blank_line_stderr() };
    std::process::exit(err.exit_code());
}

fn build_cli_command() -> Command {
    let use_color = detect_color_support();
    let appendix = render_top_level_appendix(use_color);
    let mut command = Cli::command().after_long_help(appendix);
    command = command.color(if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    });
    attach_command_examples(&mut command, use_color);
    command
}

fn attach_command_examples(command: &mut Command, use_color: bool) {
    for example in command_examples() {
        if let Some(subcommand) = command.find_subcommand_mut(example.name) {
            let help_text = render_examples(example.groups, use_color);
            *subcommand = subcommand.clone().after_long_help(help_text);
        }
    }
}

fn render_examples(groups: &[ExampleGroup], use_color: bool) -> String {
    let theme = &THEME;
    let mut buffer = String::new();

    let heading = stylize("Examples:", theme.highlight, true, use_color);
    let _ = writeln!(buffer, "{heading}");

    for (index, group) in groups.iter().enumerate() {
        let title = stylize(group.title, theme.primary, true, use_color);
        let _ = writeln!(buffer, "  {title}");

        for command in group.commands {
            let arrow = stylize(ICONS.arrow, theme.secondary, false, use_color);
            let command_text = stylize(command, theme.secondary, false, use_color);
            let _ = writeln!(buffer, "    {arrow} {command_text}");
        }

        if index + 1 < groups.len() {
            buffer.push('\n');
        }
    }

    buffer
}

fn render_top_level_appendix(use_color: bool) -> String {
    let theme = &THEME;
    let mut buffer = String::new();

    let env_heading = stylize("Environment Variables:", theme.highlight, true, use_color);
    let _ = writeln!(buffer, "{env_heading}");
    for (key, description) in ENVIRONMENT_VARIABLES {
        let key_text = stylize(key, theme.key, true, use_color);
        let value_text = stylize(description, theme.value, false, use_color);
        let _ = writeln!(buffer, "  {key_text}  {value_text}");
    }

    buffer.push('\n');

    let tip_heading = stylize("Tip:", theme.highlight, true, use_color);
    let tip_text = stylize(
        "Use 'scimfilter <command> --help' to view examples for each command.",
        theme.secondary,
        false,
        use_color,
    );
    let _ = writeln!(buffer, "{tip_heading} {tip_text}");

    buffer
}

fn print_blank_line_stdout() -> io::Result<()> {
    let mut stdout = io::stdout();
    IoWrite::write_all(&mut stdout, b"\n")?;
    IoWrite::flush(&mut stdout)
}

fn print_blank_line_stderr() -> io::Result<()> {
    let mut stderr = io::stderr();
    IoWrite::write_all(&mut stderr, b"\n")?;
    IoWrite::flush(&mut stderr)
}

fn stylize(text: &str, color: ThemeColor, bold: bool, use_color: bool) -> String {
    match (use_color, bold) {
        (false, _) => text.to_string(),
        (true, true) => text.color(color).bold().to_string(),
        (true, false) => text.color(color).to_string(),
    }
}

fn detect_color_support() -> bool {
    ShouldColorize::from_env().should_colorize()
}

fn help_styles() -> Styles {
    let plain = |color: AnsiColor| Style::new().fg_color(Some(color.into()));
    Styles::styled()
        .usage(plain(AnsiColor::BrightBlue).bold())
        .header(plain(AnsiColor::Cyan).bold())
        .literal(plain(AnsiColor::Magenta))
        .placeholder(plain(AnsiColor::BrightBlack))
        .valid(plain(AnsiColor::Green))
        .invalid(plain(AnsiColor::Yellow))
        .error(plain(AnsiColor::Red).bold())
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite free-text search queries into canonical filters
    Normalize(NormalizeArgs),

    /// Strictly parse a canonical `attribute operator value` filter
    Parse(ParseArgs),

    /// Build a filter from the basic filter form fields
    Build(BuildArgs),

    /// Apply the default search strategy to a bare search term
    Strategy(StrategyArgs),

    /// Resolve search box input into the filter that would be sent
    Search(SearchArgs),

    /// List the operator phrases that are recognized
    Aliases(AliasesArgs),
}

fn main() {
    env_logger::init();

    let cli = Cli::parse_with_styles();

    if let Err(err) = execute(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    let global_options = GlobalOptions {
        output_format: cli.output,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color || !detect_color_support(),
    };
    if global_options.no_color {
        colored::control::set_override(false);
    }

    let output = OutputManager::new(global_options);
    let ctx = ConfigContext::resolve(cli.config.as_deref())?;
    output.verbose(&format!("Configuration: {}", ctx.source()));

    match cli.command {
        Commands::Normalize(args) => handle_normalize(args, &ctx, &output),
        Commands::Parse(args) => handle_parse(args, &ctx, &output),
        Commands::Build(args) => handle_build(args, &output),
        Commands::Strategy(args) => handle_strategy(args, &ctx, &output),
        Commands::Search(args) => handle_search(args, &ctx, &output),
        Commands::Aliases(args) => handle_aliases(args, &ctx, &output),
    }
}
