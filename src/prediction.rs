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

/// A user's pick that a competitor reaches `round`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Prediction {
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub name: String,
    /// The slot whose result decides this pick.
    #[serde(default)]
    pub draw_slot_id: Id,
    /// The size of the slot's draw.
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub round: u32,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub user_id: Id,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.id, self.draw_slot_id, self.round, self.points, self.name
        )
    }
}

impl Record for Prediction {
    const COLLECTION: Collection = Collection::Prediction;

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Value> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "name" => self.name.as_str().into(),
            "draw_slot_id" => self.draw_slot_id.as_str().into(),
            "size" => self.size.into(),
            "round" => self.round.into(),
            "points" => self.points.into(),
            "user_id" => self.user_id.as_str().into(),
            _ => return None,
        })
    }
}
