use std::io::{self, BufRead, Write};
use std::time::SystemTime;

use log::debug;

use crate::archive::Archive;
use crate::backup::Backup;
use crate::configuration::archive_format::ArchiveFormat;
use crate::configuration::Configuration;
use crate::error::KeeperError;
use crate::formatter::Formatter;
use crate::host::{Archiver, FileSystem};
use crate::inspect::Inspect;
use crate::recent::Recent;

/// Everything a command needs to run.
pub struct Context<'a> {
    pub configuration: &'a Configuration,
    pub file_system: &'a dyn FileSystem,
    pub archiver: &'a dyn Archiver,
}

#[derive(Debug, PartialEq)]
pub struct BackupParams {
    pub source: String,
    pub destination: String,
}

#[derive(Debug, PartialEq)]
pub struct ArchiveParams {
    pub directory: String,
    /// Checked by the archive operation, not here.
    pub archive_type: String,
    pub base_name: String,
}

#[derive(Debug, PartialEq)]
pub struct InspectParams {
    pub zip_path: String,
    pub threshold_kb: u64,
}

#[derive(Debug, PartialEq)]
pub struct RecentParams {
    pub directory: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Backup(BackupParams),
    Archive(ArchiveParams),
    Inspect(InspectParams),
    Recent(RecentParams),
    Exit,
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// A confirmation line still to be printed.
    Message(String),
    /// The command printed its own output.
    Printed,
    Exit,
}

/// Line oriented question and answer over any reader and writer.
pub struct Prompter<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl<'a> Prompter<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Prompter<'a> {
        Prompter { input, output }
    }

    /// Prints `prompt` and reads one line without its line ending.
    /// End of input is reported as `UnexpectedEof`.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "end of input",
            ));
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    pub fn output(&mut self) -> &mut dyn Write {
        &mut *self.output
    }
}

type Reader = fn(&mut Prompter<'_>) -> io::Result<Result<Command, KeeperError>>;

pub struct MenuEntry {
    pub key: &'static str,
    pub label: &'static str,
    read: Reader,
}

pub static MENU: [MenuEntry; 5] = [
    MenuEntry {
        key: "1",
        label: "Backup Directory",
        read: Menu::read_backup,
    },
    MenuEntry {
        key: "2",
        label: "Archive Directory",
        read: Menu::read_archive,
    },
    MenuEntry {
        key: "3",
        label: "Get Large Files in Archive",
        read: Menu::read_inspect,
    },
    MenuEntry {
        key: "4",
        label: "Display Recent Files",
        read: Menu::read_recent,
    },
    MenuEntry {
        key: "5",
        label: "Exit",
        read: Menu::read_exit,
    },
];

pub struct Menu {}

impl Menu {
    /// Shows the menu until the user picks Exit or input ends.
    pub fn run(
        context: &Context<'_>,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> io::Result<()> {
        let mut prompter = Prompter::new(input, output);

        loop {
            Self::print_menu(prompter.output())?;

            let command = match Self::read_command(&mut prompter) {
                Ok(Some(Ok(command))) => command,
                Ok(Some(Err(why))) => {
                    writeln!(prompter.output(), "Error: {}", why)?;
                    continue;
                }
                Ok(None) => {
                    writeln!(prompter.output(), "Invalid choice. Please try again.")?;
                    continue;
                }
                Err(why) if why.kind() == io::ErrorKind::UnexpectedEof => {
                    debug!("input closed, leaving menu");
                    writeln!(prompter.output())?;
                    Command::Exit
                }
                Err(why) => return Err(why),
            };

            let out = prompter.output();
            match Self::dispatch(command, context, out) {
                Ok(Outcome::Message(message)) => writeln!(out, "{}", message)?,
                Ok(Outcome::Printed) => {}
                Ok(Outcome::Exit) => {
                    writeln!(out, "Exiting...")?;
                    return Ok(());
                }
                Err(why) => {
                    debug!("{:?} failure: {}", why.kind(), why);
                    writeln!(out, "Error: {}", why)?;
                }
            }
        }
    }

    fn print_menu(out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Menu:")?;
        for entry in MENU.iter() {
            writeln!(out, "{}. {}", entry.key, entry.label)?;
        }
        Ok(())
    }

    /// Reads a choice and its parameters. `None` for an unknown choice.
    fn read_command(
        prompter: &mut Prompter<'_>,
    ) -> io::Result<Option<Result<Command, KeeperError>>> {
        let choice = prompter.ask("Enter your choice: ")?;
        match MENU.iter().find(|entry| entry.key == choice) {
            Some(entry) => (entry.read)(prompter).map(Some),
            None => Ok(None),
        }
    }

    fn read_backup(prompter: &mut Prompter<'_>) -> io::Result<Result<Command, KeeperError>> {
        let source = prompter.ask("Enter the source directory: ")?;
        let destination = prompter.ask("Enter the destination directory: ")?;
        Ok(Ok(Command::Backup(BackupParams {
            source,
            destination,
        })))
    }

    fn read_archive(prompter: &mut Prompter<'_>) -> io::Result<Result<Command, KeeperError>> {
        let directory = prompter.ask("Enter the directory to archive: ")?;
        let archive_type = prompter.ask(&format!(
            "Enter the archive type ({}): ",
            ArchiveFormat::NAMES.join(", ")
        ))?;
        let base_name = prompter.ask("Enter the base name for the archive: ")?;
        Ok(Ok(Command::Archive(ArchiveParams {
            directory,
            archive_type,
            base_name,
        })))
    }

    fn read_inspect(prompter: &mut Prompter<'_>) -> io::Result<Result<Command, KeeperError>> {
        let zip_path = prompter.ask("Enter the zip file path: ")?;
        let threshold = prompter.ask("Enter the size threshold in KB: ")?;
        Ok(Self::parse_threshold(&threshold).map(|threshold_kb| {
            Command::Inspect(InspectParams {
                zip_path,
                threshold_kb,
            })
        }))
    }

    fn read_recent(prompter: &mut Prompter<'_>) -> io::Result<Result<Command, KeeperError>> {
        let directory = prompter.ask("Enter the directory (leave blank for current): ")?;
        let directory = directory.trim();
        Ok(Ok(Command::Recent(RecentParams {
            directory: if directory.is_empty() {
                None
            } else {
                Some(directory.to_string())
            },
        })))
    }

    fn read_exit(_prompter: &mut Prompter<'_>) -> io::Result<Result<Command, KeeperError>> {
        Ok(Ok(Command::Exit))
    }

    pub fn parse_threshold(value: &str) -> Result<u64, KeeperError> {
        value
            .trim()
            .parse::<u64>()
            .map_err(|_| KeeperError::InvalidThreshold(value.to_string()))
    }

    pub fn dispatch(
        command: Command,
        context: &Context<'_>,
        out: &mut dyn Write,
    ) -> Result<Outcome, KeeperError> {
        match command {
            Command::Backup(params) => {
                Backup::start(context.file_system, &params.source, &params.destination).map(
                    |report| {
                        debug!("copied {}", Formatter::format_size(report.bytes_copied, 2));
                        Outcome::Message(report.to_string())
                    },
                )
            }
            Command::Archive(params) => Archive::start(
                context.file_system,
                context.archiver,
                context.configuration.archive_directory.as_deref(),
                context.configuration.archive_name_placeholders,
                &params.directory,
                &params.archive_type,
                &params.base_name,
            )
            .map(|report| Outcome::Message(report.to_string())),
            Command::Inspect(params) => Inspect::start(
                context.file_system,
                context.archiver,
                &params.zip_path,
                params.threshold_kb,
                out,
            )
            .map(|report| {
                debug!(
                    "{} of {} entries above {} KB",
                    report.listed, report.entries, params.threshold_kb
                );
                Outcome::Printed
            }),
            Command::Recent(params) => Recent::start(
                context.file_system,
                params.directory.as_deref(),
                context.configuration.recent_window,
                SystemTime::now(),
                out,
            )
            .map(|report| {
                debug!(
                    "{} recently modified files below '{}'",
                    report.listed,
                    report.directory.display()
                );
                Outcome::Printed
            }),
            Command::Exit => Ok(Outcome::Exit),
        }
    }
}
