use std::io::{self, Write};

use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{
    Color, ColorChoice, ColorSpec, StandardStream, WriteColor,
};
use codespan_reporting::term::{self, Config, DisplayStyle};
use log::error;

use pasm_common::message::Messages;
use pasm_common::register::Name;
use pasm_common::Driver;

pub struct ConsoleDriver {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: Config,
    quiet: bool,
}

impl ConsoleDriver {
    pub fn new(files: SimpleFiles<String, String>, quiet: bool) -> Self {
        Self {
            files,
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: Config {
                display_style: DisplayStyle::Rich,
                ..Default::default()
            },
            quiet,
        }
    }
}

impl Driver for ConsoleDriver {
    fn report(&mut self, messages: Messages) {
        for msg in messages.msgs {
            if let Err(err) = term::emit(&mut self.writer, &self.config, &self.files, &msg) {
                error!("unable to print diagnostic: {err}");
            }
        }
    }

    fn report_spill(&mut self, name: &Name, conflicts: usize) {
        if self.quiet {
            return;
        }

        let note = format!("spilling {name} ({conflicts} conflicts)");
        if let Err(err) = write_note(&mut self.writer, note) {
            error!("unable to print note: {err}");
        }
    }

    fn done_spilling(&mut self, spilled: usize, colors: usize) {
        if self.quiet || spilled == 0 {
            return;
        }

        let note = format!("spilled {spilled} register(s), {colors} colors left");
        if let Err(err) = write_note(&mut self.writer, note) {
            error!("unable to print note: {err}");
        }
    }
}

fn write_note(stream: &mut StandardStream, note: String) -> io::Result<()> {
    stream.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(stream, "note")?;

    stream.reset()?;
    writeln!(stream, ": {note}")?;

    Ok(())
}
