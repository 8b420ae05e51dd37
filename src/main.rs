#[macro_use]
extern crate clap;
#[macro_use]
extern crate lazy_static;

use std::io;
use std::process;

use clap::{Arg, Command};
use log::{error, LevelFilter};
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    filter::threshold::ThresholdFilter,
};

mod archive;
mod backup;
mod configuration;
mod error;
mod formatter;
mod host;
mod inspect;
mod menu;
mod recent;

use configuration::Configuration;
use error::KeeperError;
use host::{HostFileSystem, NativeArchiver};
use menu::{Context, Menu};

struct Arguments {
    config_file: Option<String>,
}

fn main() {
    let arguments = get_arguments();
    let configuration = load_configuration(&arguments);

    let level = match &configuration {
        Ok(configuration) => configuration.log_level,
        Err(_) => LevelFilter::Error,
    };
    init_logging(level);

    let configuration = match configuration {
        Ok(configuration) => configuration,
        Err(why) => {
            error!("Error: {}", why);
            process::exit(1);
        }
    };

    let file_system = HostFileSystem::new();
    let archiver = NativeArchiver::new();
    let context = Context {
        configuration: &configuration,
        file_system: &file_system,
        archiver: &archiver,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    if let Err(why) = Menu::run(&context, &mut input, &mut output) {
        error!("{}", why);
        process::exit(1);
    }
}

fn init_logging(level: LevelFilter) {
    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("stderr", Box::new(stderr)),
        )
        .build(Root::builder().appender("stderr").build(level));
    match config {
        Ok(config) => {
            if let Err(why) = log4rs::init_config(config) {
                eprintln!("unable to initialize logging: {}", why);
            }
        }
        Err(why) => eprintln!("invalid logging configuration: {}", why),
    }
}

fn load_configuration(arguments: &Arguments) -> Result<Configuration, KeeperError> {
    match Configuration::locate(arguments.config_file.as_deref())? {
        Some(file) => Configuration::load(&file),
        None => Ok(Configuration::new()),
    }
}

fn get_arguments() -> Arguments {
    let matches = Command::new("rusty-keeper")
        .version(crate_version!())
        .author(crate_authors!())
        .about("Interactive helper to back up, archive and inspect directories.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Specify a config file from where to read settings"),
        )
        .get_matches();

    Arguments {
        config_file: matches.get_one::<String>("config").cloned(),
    }
}
