use anyhow::Result;
use clap::{crate_name, CommandFactory, Parser};
use std::{env, process::ExitCode};

/// Defines the commandline-interface and the context of the application.
mod cli;
use cli::{Cli, Command};

/// Runs each command against the loaded rule set or character-class table.
mod check;

/// Contains iterator types that read in candidate names from various sources.
mod scanner;

/// Contains the terminal context. The rest of the application accesses handlers to standard output
/// and standard error via the [TtyContext]. Also concerned with output colorization and writing to
/// standard output.
mod tty;
use tty::TtyContext;

fn main() -> ExitCode {
    if env::var("RUST_LOG").is_ok() {
        env_logger::init();
    }
    let mut tty = TtyContext::new();

    match run(&mut tty) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            log::debug!("exiting with failure after {failures} invalid results");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{e:?}");
            let _ = tty.write_err(&format!("{e:?}"));
            ExitCode::FAILURE
        }
    }
}

/// Returns the number of names, samples or templates that failed their check.
fn run(tty: &mut TtyContext) -> Result<usize> {
    let ctx = Cli::parse();
    let line_buffered = ctx.line_buffered;

    match &ctx.command {
        Command::Completions(args) => {
            clap_complete::generate(args.shell, &mut Cli::command(), crate_name!(), &mut tty.stdout);
            Ok(0)
        }
        Command::Template(args) => check::describe_template(tty, &args.template),
        Command::Chars(args) => {
            let name_rules = check::load_name_rules(ctx.char_table.as_deref())?;
            check::check_names(tty, line_buffered, args, |name, kind| {
                (!name_rules.is_valid_name(name, kind))
                    .then(|| format!("breaks the length or character rules for {kind}"))
            })
        }
        Command::Check(args) => {
            let name_rules = check::load_name_rules(ctx.char_table.as_deref())?;
            let validator = check::load_validator(ctx.rules.as_deref(), &name_rules)?;
            check::check_names(tty, line_buffered, args, |name, kind| {
                validator.rejection(name, kind).map(|r| r.to_string())
            })
        }
        Command::Samples(args) => {
            let name_rules = check::load_name_rules(ctx.char_table.as_deref())?;
            let validator = check::load_validator(ctx.rules.as_deref(), &name_rules)?;
            check::list_samples(tty, line_buffered, &validator, args)
        }
        Command::SelfTest => {
            let name_rules = check::load_name_rules(ctx.char_table.as_deref())?;
            let validator = check::load_validator(ctx.rules.as_deref(), &name_rules)?;
            check::self_test(tty, line_buffered, &validator)
        }
    }
}
