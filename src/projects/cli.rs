//! Command-line entrypoint for lowering fixtures.
//!
//! Parses the command and flags, loads the config file that sits next to the fixture,
//! and prints either a readable summary or a JSON report.

use crate::omp_frontend::Flag;
use crate::omp_frontend::compiler_errors::CompilerError;
use crate::omp_frontend::display_messages::{
    print_compiler_messages, print_formatted_error, print_formatted_warning,
};
use crate::omp_frontend::string_interning::StringTable;
use crate::projects::fixture::{ClauseResult, FixtureReport, lower_fixture};
use crate::projects::settings::{CONFIG_FILE_NAME, FIXTURE_FILE_EXTENSION, LoweringConfig};
use saying::say;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Lower(PathBuf), // Lowers every directive of a fixture file
    Help,
}

pub fn start_cli() {
    let compiler_args: Vec<String> = env::args().collect();

    if compiler_args.len() < 2 {
        print_help(true);
        return;
    }

    let command = match get_command(&compiler_args[1..]) {
        Ok(command) => command,
        Err(e) => {
            say!(Red e);
            print_help(true);
            return;
        }
    };

    let flags = get_flags(&compiler_args);

    match command {
        Command::Help => print_help(false),
        Command::Lower(path) => run_lower(&path, &flags),
    }
}

pub(crate) fn get_command(args: &[String]) -> Result<Command, String> {
    let command = args.first().map(String::as_str);

    match command {
        Some("help") => Ok(Command::Help),

        Some("lower") => {
            let Some(path) = args.get(1).filter(|arg| !arg.starts_with("--")) else {
                return Err(String::from("Missing fixture path (try 'omplower lower fixture.toml')"));
            };

            for arg in &args[2..] {
                if parse_flag(arg).is_none() {
                    return Err(format!("Unknown lower flag: '{arg}'"));
                }
            }

            let path = PathBuf::from(path);
            if path.extension().and_then(|ext| ext.to_str()) != Some(FIXTURE_FILE_EXTENSION) {
                return Err(format!(
                    "Fixtures are .{FIXTURE_FILE_EXTENSION} files, got '{}'",
                    path.display()
                ));
            }

            Ok(Command::Lower(path))
        }

        Some(other) => Err(format!("Invalid command: '{other}'")),
        None => Err(String::from("Missing command")),
    }
}

fn parse_flag(arg: &str) -> Option<Flag> {
    match arg {
        "--hide-warnings" => Some(Flag::DisableWarnings),
        "--skip-missing" => Some(Flag::SkipMissingObjects),
        "--index-as-element" => Some(Flag::IndexAsElement),
        "--json" => Some(Flag::JsonOutput),
        _ => None,
    }
}

pub(crate) fn get_flags(args: &[String]) -> Vec<Flag> {
    args.iter().filter_map(|arg| parse_flag(arg)).collect()
}

fn run_lower(path: &Path, flags: &[Flag]) {
    let mut string_table = StringTable::new();

    let config_path = path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(CONFIG_FILE_NAME);

    let config = match LoweringConfig::load(&config_path) {
        Ok(config) => config.with_flags(flags),
        Err(e) => {
            print_formatted_error(e, &string_table);
            return;
        }
    };

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            let error = CompilerError::file_error(path, format!("Could not read fixture: {e}"));
            print_formatted_error(error, &string_table);
            return;
        }
    };

    let file = string_table.intern(&path.to_string_lossy());
    let show_warnings = !flags.contains(&Flag::DisableWarnings);

    match lower_fixture(&source, Some(file), &config, &mut string_table) {
        Ok(report) => {
            if flags.contains(&Flag::JsonOutput) {
                print_json_report(&report);
            } else {
                print_report(&report);
            }

            if show_warnings {
                for warning in report.warnings {
                    print_formatted_warning(warning, &string_table);
                }
            }
        }
        Err(mut messages) => {
            if !show_warnings {
                messages.warnings.clear();
            }
            print_compiler_messages(messages, &string_table);
        }
    }
}

pub(crate) fn render_clause_result(result: &ClauseResult) -> String {
    match result {
        ClauseResult::Operands(operands) => {
            let operands: Vec<String> = operands
                .iter()
                .map(|operand| format!("%{}", operand.0))
                .collect();
            format!("[{}]", operands.join(", "))
        }
        ClauseResult::Captures(captures) => {
            let captures: Vec<String> = captures
                .iter()
                .map(|capture| format!("({}, {})", capture.clause.as_str(), capture.symbol))
                .collect();
            format!("[{}]", captures.join(", "))
        }
    }
}

fn print_report(report: &FixtureReport) {
    for directive in &report.directives {
        say!(Green directive.name);
        for clause in &directive.clauses {
            let rendered = render_clause_result(&clause.result);
            say!("  ", Dark Magenta clause.name, ": ", rendered);
        }
    }
}

fn print_json_report(report: &FixtureReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            say!(Red "Could not serialize the report: ", e);
        }
    }
}

fn print_help(commands_only: bool) {
    say!(Green "omplower - OpenMP object list lowering");

    if !commands_only {
        say!("Lowers the clause object lists of every directive in a fixture file.");
        say!("Settings are read from ", Yellow CONFIG_FILE_NAME, " next to the fixture.");
    }

    say!(Yellow "\nCommands:");
    say!("  lower <fixture.toml>   Lower every directive in the fixture");
    say!("  help                   Show this message");

    say!(Yellow "\nFlags:");
    say!("  --skip-missing         Leave out clause items that can't be lowered (with a warning)");
    say!("  --index-as-element     Don't treat a(N) as the section a(N:N)");
    say!("  --hide-warnings        Don't print warnings");
    say!("  --json                 Print the report as JSON");
}
