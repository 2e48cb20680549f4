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

use std::fmt;

use lettre::{
    SmtpTransport, Transport, message::header::ContentType,
    transport::smtp::authentication::Credentials,
};
use serde::{Deserialize, Serialize};

use crate::notify::{MailError, Mailer, Message};

#[derive(Clone, Default, Deserialize, Serialize)]
pub struct Smtp {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for Smtp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Smtp")
            .field("service", &self.service)
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Sends HTML email through an SMTP relay.
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    /// # Errors
    ///
    /// If the relay can't be set up for `smtp.service`.
    pub fn new(smtp: &Smtp) -> Result<Self, MailError> {
        let credentials = Credentials::new(smtp.username.clone(), smtp.password.clone());

        let transport = SmtpTransport::relay(&smtp.service)
            .map_err(|error| MailError::Build(format!("{}: {error}", smtp.service)))?
            .credentials(credentials)
            .build();

        Ok(Self { transport })
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, message: &Message) -> Result<(), MailError> {
        let from = message
            .from
            .to_mailbox()
            .ok_or_else(|| MailError::Address(message.from.to_string()))?;
        let to = message
            .to
            .to_mailbox()
            .ok_or_else(|| MailError::Address(message.to.to_string()))?;

        let email = lettre::Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(message.html.clone())
            .map_err(|error| MailError::Build(error.to_string()))?;

        self.transport
            .send(&email)
            .map_err(|error| MailError::Transport {
                to: message.to.address.clone(),
                reason: error.to_string(),
            })?;

        Ok(())
    }
}
