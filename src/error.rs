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

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Collection {
    Draw,
    DrawSlot,
    Prediction,
    User,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draw => write!(f, "draw"),
            Self::DrawSlot => write!(f, "draw_slot"),
            Self::Prediction => write!(f, "prediction"),
            Self::User => write!(f, "user"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{collection} {id} not found")]
    NotFound { collection: Collection, id: String },
    #[error("failed to save {collection} {id}: {reason}")]
    Save {
        collection: Collection,
        id: String,
        reason: String,
    },
    #[error("invalid filter '{input}': {reason}")]
    Filter { input: String, reason: String },
    #[error("store: {0}")]
    Store(String),
    #[error("settings: {0}")]
    Settings(String),
}

impl Error {
    #[must_use]
    pub fn not_found(collection: Collection, id: &str) -> Self {
        Self::NotFound {
            collection,
            id: id.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Store(error.to_string())
    }
}
