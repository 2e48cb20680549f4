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

use crate::{
    Id,
    error::Collection,
    filter::{Record, Value},
};

/// One bracket cell. The name stays empty until the competitor is decided.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DrawSlot {
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub draw_id: Id,
    #[serde(default)]
    pub round: u32,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub seed: String,
}

impl DrawSlot {
    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

impl fmt::Display for DrawSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            "_"
        } else {
            self.name.as_str()
        };

        write!(
            f,
            "{} {} {} {} {name}",
            self.id, self.draw_id, self.round, self.position
        )
    }
}

impl Record for DrawSlot {
    const COLLECTION: Collection = Collection::DrawSlot;

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "draw_id" => self.draw_id.as_str().into(),
            "round" => self.round.into(),
            "position" => self.position.into(),
            "name" => self.name.as_str().into(),
            "seed" => self.seed.as_str().into(),
            _ => return None,
        })
    }
}
