//! Command-line definition

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

/// Build the `paymatrix` command
#[must_use]
pub fn command() -> Command {
    Command::new("paymatrix")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pay matrix grade x scale tables over a JSON snapshot store")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("store")
                .long("store")
                .global(true)
                .default_value("paymatrix.json")
                .value_parser(value_parser!(PathBuf))
                .help("Snapshot file holding matrices, grades and levels"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML view configuration"),
        )
        .arg(
            Arg::new("matrix")
                .long("matrix")
                .short('m')
                .global(true)
                .default_value("Standard")
                .help("Matrix to operate on"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("info")
                .help("Log filter used when RUST_LOG is unset"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .default_value("text")
                .value_parser(["text", "json"])
                .help("Log output format"),
        )
        .arg(
            Arg::new("no-grade-links")
                .long("no-grade-links")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Accept levels whose grade is not in the grade catalog"),
        )
        .subcommand(
            Command::new("show")
                .about("Render the matrix")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("text")
                        .value_parser(["text", "html", "json"])
                        .help("Output format"),
                ),
        )
        .subcommand(Command::new("levels").about("List level ids and grades"))
        .subcommand(
            Command::new("add")
                .about("Create a level")
                .arg(grade_arg().required(true))
                .arg(pair_arg()),
        )
        .subcommand(
            Command::new("edit")
                .about("Replace a level's grade and pairs")
                .arg(level_arg())
                .arg(grade_arg())
                .arg(pair_arg().help(
                    "Replacement SCALE=AMOUNT pair, repeatable; omit to keep the current pairs",
                )),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a level and its pairs")
                .arg(level_arg())
                .arg(yes_arg()),
        )
        .subcommand(
            Command::new("grades")
                .about("List or add employee grades")
                .arg(
                    Arg::new("add")
                        .long("add")
                        .num_args(1..)
                        .action(ArgAction::Append)
                        .help("Grade labels to add to the catalog"),
                ),
        )
        .subcommand(
            Command::new("seed")
                .about("Create or recreate the Standard matrix and seed file matrices")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON or YAML seed file"),
                )
                .arg(
                    Arg::new("ensure")
                        .long("ensure")
                        .action(ArgAction::SetTrue)
                        .requires("file")
                        .help("Only seed the file's named matrices, and only if any is missing"),
                ),
        )
        .subcommand(
            Command::new("reset")
                .about("Delete every matrix and level")
                .arg(yes_arg()),
        )
}

fn grade_arg() -> Arg {
    Arg::new("grade")
        .long("grade")
        .short('g')
        .help("Grade label")
}

fn pair_arg() -> Arg {
    Arg::new("pair")
        .long("pair")
        .short('p')
        .action(ArgAction::Append)
        .help("SCALE=AMOUNT pair, repeatable")
}

fn level_arg() -> Arg {
    Arg::new("level").required(true).help("Level id")
}

fn yes_arg() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Confirm the deletion")
}
