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

use std::{fs, io::ErrorKind, path::Path};

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::{email::Email, error::Error};
#[cfg(feature = "server")]
use crate::smtp::Smtp;

fn default_sender_name() -> String {
    "Racquet Rivals".to_string()
}

fn default_sender_address() -> String {
    "no-reply@racquetrivals.com".to_string()
}

fn default_site_url() -> String {
    "https://racquetrivals.com".to_string()
}

fn default_prediction_window_hours() -> i64 {
    12
}

/// The longest prediction window, one year.
pub const MAX_PREDICTION_WINDOW_HOURS: i64 = 24 * 366;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
    #[serde(default = "default_sender_address")]
    pub sender_address: String,
    #[serde(default = "default_site_url")]
    pub site_url: String,
    /// How long users have to make their picks once the round of 16 is set.
    #[serde(default = "default_prediction_window_hours")]
    pub prediction_window_hours: i64,
    #[cfg(feature = "server")]
    #[serde(default)]
    pub smtp: Smtp,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sender_name: default_sender_name(),
            sender_address: default_sender_address(),
            site_url: default_site_url(),
            prediction_window_hours: default_prediction_window_hours(),
            #[cfg(feature = "server")]
            smtp: Smtp::default(),
        }
    }
}

impl Settings {
    /// Reads the settings from a RON file. A missing file gives the defaults.
    ///
    /// # Errors
    ///
    /// If the file can't be read, isn't valid RON, or the prediction window
    /// is out of range.
    pub fn load(path: &Path) -> Result<Self, Error> {
        match fs::read_to_string(path) {
            Ok(string) => {
                let settings: Self = ron::from_str(&string)
                    .map_err(|error| Error::Store(format!("RON: {}: {error}", path.display())))?;
                settings.prediction_window()?;

                Ok(settings)
            }
            Err(error) => match error.kind() {
                ErrorKind::NotFound => Ok(Self::default()),
                _ => Err(error.into()),
            },
        }
    }

    #[must_use]
    pub fn sender(&self) -> Email {
        Email {
            address: self.sender_address.clone(),
            name: Some(self.sender_name.clone()),
        }
    }

    /// # Errors
    ///
    /// If `prediction_window_hours` is not in `1..=MAX_PREDICTION_WINDOW_HOURS`.
    pub fn prediction_window(&self) -> Result<TimeDelta, Error> {
        let hours = self.prediction_window_hours;
        if !(1..=MAX_PREDICTION_WINDOW_HOURS).contains(&hours) {
            return Err(Error::Settings(format!(
                "prediction_window_hours must be from 1 to {MAX_PREDICTION_WINDOW_HOURS}, not {hours}"
            )));
        }

        TimeDelta::try_hours(hours).ok_or_else(|| {
            Error::Settings(format!("prediction_window_hours {hours} is out of range"))
        })
    }
}
