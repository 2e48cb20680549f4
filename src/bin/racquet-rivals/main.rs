// This file is part of racquet-rivals.
//
// racquet-rivals is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// racquet-rivals is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

#![deny(clippy::expect_used)]
#![deny(clippy::indexing_slicing)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]

mod command;
mod command_line;

use std::{
    fmt,
    io::{self, BufRead},
    process::exit,
    sync::{Arc, mpsc},
    thread,
};

use clap::Parser;
use log::{error, info};
use racquet_rivals::{
    app::App,
    filter::Filter,
    notify::{LogMailer, Mailer, QueuedMailer},
    round::ROUND_OF_SIXTEEN_SLOTS,
    settings::Settings,
    smtp::SmtpMailer,
    store::{MemoryStore, Store},
    utils::{self, create_data_folder, data_file},
};

use crate::{command::Command, command_line::Args};

const DATA_FILE: &str = "racquet-rivals.ron";
const SETTINGS_FILE: &str = "settings.ron";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    utils::init_logger("racquet_rivals", args.debug, args.systemd);

    if args.man {
        return Args::generate_man_page();
    }

    create_data_folder()?;
    let settings = Settings::load(&data_file(SETTINGS_FILE))?;

    let store = if args.skip_the_data_file {
        MemoryStore::default()
    } else {
        MemoryStore::load(&data_file(DATA_FILE))?
    };
    let store = Arc::new(store);

    let queue = if args.skip_emails {
        None
    } else {
        Some(Arc::new(QueuedMailer::new(SmtpMailer::new(&settings.smtp)?)))
    };
    let mailer: Arc<dyn Mailer> = match &queue {
        Some(queue) => queue.clone(),
        None => Arc::new(LogMailer),
    };

    let (tx, rx) = mpsc::channel();

    let tx_ctrlc = tx.clone();
    let systemd = args.systemd;
    ctrlc::set_handler(move || {
        if !systemd {
            println!();
        }
        handle_error(tx_ctrlc.send("quit".to_string()));
    })?;

    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        return;
                    }
                }
                Err(error) => {
                    error!("stdin: {error}");
                    break;
                }
            }
        }

        let _ok = tx.send("quit".to_string());
    });

    let host = Host {
        app: App::new(store.clone(), mailer, &settings)?,
        store,
        skip_the_data_file: args.skip_the_data_file,
    };

    info!("reading commands from stdin ...");
    for line in rx {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(error) => {
                println!("? {error}");
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        println!("{}", host.reply(&command));
    }

    if let Err(error) = host.save() {
        error!("save: {error}");
    }
    drop(host);

    if let Some(queue) = queue.and_then(Arc::into_inner) {
        queue.shutdown();
    }

    Ok(())
}

fn handle_error<T, E: fmt::Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            error!("{error}");
            exit(1)
        }
    }
}

struct Host {
    app: App,
    store: Arc<MemoryStore>,
    skip_the_data_file: bool,
}

impl Host {
    /// `= <command> <reply>` on success, `? <command> <error>` on failure.
    fn reply(&self, command: &Command) -> String {
        match self.run(command) {
            Ok(reply) => format!("= {command} {reply}"),
            Err(error) => {
                error!("{command}: {error}");
                format!("? {command} {error}")
            }
        }
    }

    fn run(&self, command: &Command) -> anyhow::Result<String> {
        match command {
            Command::Slot { id, name } => Ok(self.app.name_slot(id, name)?.to_string()),
            Command::Seed { id, seed } => Ok(self.app.seed_slot(id, seed)?.to_string()),
            Command::Draw(id) => {
                let draw = self.store.draw(id)?;
                let Some(round_of_sixteen) = draw.round_of_sixteen() else {
                    return Ok(draw.to_string());
                };

                let filter = Filter::default()
                    .equal("draw_id", &draw.id)
                    .equal("round", round_of_sixteen)
                    .not_equal("name", "");
                let filled = self.store.draw_slots(&filter.into())?.len();

                Ok(format!("{draw} {filled}/{ROUND_OF_SIXTEEN_SLOTS}"))
            }
            Command::Points(id) => Ok(self.store.prediction(id)?.to_string()),
            Command::Save => {
                self.save()?;
                Ok(String::new())
            }
            Command::Quit => Ok(String::new()),
        }
    }

    fn save(&self) -> anyhow::Result<()> {
        if !self.skip_the_data_file {
            self.store.save(&data_file(DATA_FILE))?;
            info!("saved {DATA_FILE}");
        }

        Ok(())
    }
}
