use std::fs;

use codespan_reporting::files::SimpleFiles;
use console::Term;
use log::info;

use pasm_backend::alloc::{Colorer, Greedy, Simplify};
use pasm_common::{Constraints, Driver};
use pasm_frontend::parse;

use crate::args::{Arguments, Strategy};
use crate::console_driver::ConsoleDriver;
use crate::input::read_file;
use crate::report::report;

/// Run the whole pipeline on the input file. Returns `false` if any error was
/// reported or the program could not be allocated.
pub fn compile(args: &Arguments) -> anyhow::Result<bool> {
    let opts = args.options();
    let src = read_file(&opts.path)?;

    let mut files = SimpleFiles::new();
    let file = files.add(opts.path.display().to_string(), src.clone());
    let mut driver = ConsoleDriver::new(files, opts.quiet);

    let program = match parse(&src, file) {
        Ok(program) => program,
        Err(messages) => {
            driver.report(messages);
            return Ok(false);
        }
    };

    let constraints = match opts.max_attempts {
        Some(max) => Constraints::new().with_max_spill_iterations(max),
        None => Constraints::new(),
    };

    let colorer: Box<dyn Colorer> = match opts.strategy {
        Strategy::Greedy => Box::new(Greedy),
        Strategy::Simplify => Box::new(Simplify::new(constraints.budget())),
    };

    let compiled =
        match pasm_backend::compile(&mut driver, &constraints, colorer.as_ref(), &program) {
            Ok(compiled) => compiled,
            Err(messages) => {
                driver.report(messages);
                return Ok(false);
            }
        };

    if !opts.quiet {
        let mut term = Term::stderr();
        report(&mut term, &constraints, colorer.name(), &program, &compiled)?;
    }

    let Some(code) = compiled.outcome.code() else {
        return Ok(false);
    };

    if args.command.write() {
        fs::write(&opts.output, code)?;
        info!("wrote {}", opts.output.display());
    }

    if opts.print {
        print!("{code}");
    }

    Ok(true)
}
