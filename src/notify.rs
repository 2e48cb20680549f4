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

use std::{
    sync::mpsc::{self, Sender},
    thread::{self, JoinHandle},
};

use log::{error, info};
use thiserror::Error;

use crate::{draw::Draw, email::Email};

pub const PICKS_OPEN_SUBJECT: &str = "Time to make your picks!";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    pub from: Email,
    pub to: Email,
    pub subject: String,
    pub html: String,
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    Address(String),
    #[error("could not build email: {0}")]
    Build(String),
    #[error("could not send email to {to}: {reason}")]
    Transport { to: String, reason: String },
    #[error("the mail queue is closed")]
    Closed,
}

/// Delivers one message to one recipient.
pub trait Mailer: Send + Sync {
    /// # Errors
    ///
    /// If the message can't be built or delivered.
    fn send(&self, message: &Message) -> Result<(), MailError>;
}

/// The announcement that the round of 16 is set and picks are open.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PicksOpen {
    pub title: String,
    pub url: String,
    pub hours: i64,
}

impl PicksOpen {
    #[must_use]
    pub fn new(draw: &Draw, site_url: &str, hours: i64) -> Self {
        Self {
            title: draw.title(),
            url: format!("{}/draw/{}", site_url.trim_end_matches('/'), draw.slug()),
            hours,
        }
    }

    #[must_use]
    pub fn html(&self) -> String {
        format!(
            "The Round of 16 is ready to go for: <b>{title}</b>. You have {hours} hours to make your picks for ALL of the remaining matches, good luck!<br><br><a href=\"{url}\">Racquet Rivals - {title}</a>",
            title = self.title,
            hours = self.hours,
            url = self.url,
        )
    }

    #[must_use]
    pub fn message(&self, from: &Email, to: Email) -> Message {
        Message {
            from: from.clone(),
            to,
            subject: PICKS_OPEN_SUBJECT.to_string(),
            html: self.html(),
        }
    }
}

/// Logs messages instead of sending them.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, message: &Message) -> Result<(), MailError> {
        info!(
            "skipping email to {}: {}: {}",
            message.to, message.subject, message.html
        );
        Ok(())
    }
}

/// Hands messages to a worker thread so delivery is off the caller's path.
///
/// The worker logs delivery failures. Dropping the queue lets the worker
/// finish what is queued and exit; [`QueuedMailer::shutdown`] also waits for
/// it.
#[derive(Debug)]
pub struct QueuedMailer {
    tx: Sender<Message>,
    worker: JoinHandle<()>,
}

impl QueuedMailer {
    #[must_use]
    pub fn new<M: Mailer + 'static>(mailer: M) -> Self {
        let (tx, rx) = mpsc::channel::<Message>();

        let worker = thread::spawn(move || {
            for message in rx {
                match mailer.send(&message) {
                    Ok(()) => info!("email sent to {} successfully!", message.to.address),
                    Err(error) => error!("{error}"),
                }
            }
        });

        Self { tx, worker }
    }

    /// Sends everything still queued, then stops the worker.
    pub fn shutdown(self) {
        let Self { tx, worker } = self;
        drop(tx);

        if worker.join().is_err() {
            error!("the mail worker panicked");
        }
    }
}

impl Mailer for QueuedMailer {
    fn send(&self, message: &Message) -> Result<(), MailError> {
        self.tx.send(message.clone()).map_err(|_| MailError::Closed)
    }
}
