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
    collections::BTreeMap,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::Path,
    sync::{Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    Id,
    accounts::User,
    draw::Draw,
    draw_slot::DrawSlot,
    error::{Collection, Error},
    filter::{Query, Record},
    prediction::Prediction,
};

/// The point of record for draws, slots, predictions and users.
///
/// Every call is atomic on its own; nothing spans calls.
pub trait Store: Send + Sync {
    /// # Errors
    ///
    /// [`Error::NotFound`] if there is no such draw.
    fn draw(&self, id: &str) -> Result<Draw, Error>;

    /// # Errors
    ///
    /// [`Error::NotFound`] if there is no such slot.
    fn draw_slot(&self, id: &str) -> Result<DrawSlot, Error>;

    /// # Errors
    ///
    /// [`Error::NotFound`] if there is no such prediction.
    fn prediction(&self, id: &str) -> Result<Prediction, Error>;

    /// # Errors
    ///
    /// If the query names a field slots do not have.
    fn draw_slots(&self, query: &Query) -> Result<Vec<DrawSlot>, Error>;

    /// # Errors
    ///
    /// If the query names a field predictions do not have.
    fn predictions(&self, query: &Query) -> Result<Vec<Prediction>, Error>;

    /// # Errors
    ///
    /// If the query names a field users do not have.
    fn users(&self, query: &Query) -> Result<Vec<User>, Error>;

    /// # Errors
    ///
    /// If the draw can't be written.
    fn save_draw(&self, draw: &Draw) -> Result<(), Error>;

    /// # Errors
    ///
    /// If the slot can't be written.
    fn save_draw_slot(&self, slot: &DrawSlot) -> Result<(), Error>;

    /// # Errors
    ///
    /// If the prediction can't be written.
    fn save_prediction(&self, prediction: &Prediction) -> Result<(), Error>;

    /// Sets `prediction_close` only if it is still unset.
    ///
    /// Returns the updated draw, or `None` if the draw was already closed.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if there is no such draw, or if it can't be written.
    fn close_predictions(&self, draw_id: &str, close: DateTime<Utc>)
    -> Result<Option<Draw>, Error>;
}

/// The on disk form of a [`MemoryStore`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Tables {
    #[serde(default)]
    pub draws: Vec<Draw>,
    #[serde(default)]
    pub draw_slots: Vec<DrawSlot>,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Default)]
struct Collections {
    draws: BTreeMap<Id, Draw>,
    draw_slots: BTreeMap<Id, DrawSlot>,
    predictions: BTreeMap<Id, Prediction>,
    users: BTreeMap<Id, User>,
}

fn by_id<R: Record>(records: Vec<R>) -> BTreeMap<Id, R> {
    records
        .into_iter()
        .map(|record| (record.id().to_string(), record))
        .collect()
}

fn get<R: Record>(records: &BTreeMap<Id, R>, id: &str) -> Result<R, Error> {
    records
        .get(id)
        .cloned()
        .ok_or_else(|| Error::not_found(R::COLLECTION, id))
}

fn upsert<R: Record>(records: &mut BTreeMap<Id, R>, record: &R) -> Result<(), Error> {
    if record.id().is_empty() {
        return Err(Error::Save {
            collection: R::COLLECTION,
            id: String::new(),
            reason: "the id is empty".to_string(),
        });
    }

    records.insert(record.id().to_string(), record.clone());
    Ok(())
}

/// Keeps every record in memory, optionally backed by a RON file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(tables: Tables) -> Self {
        Self {
            collections: Mutex::new(Collections {
                draws: by_id(tables.draws),
                draw_slots: by_id(tables.draw_slots),
                predictions: by_id(tables.predictions),
                users: by_id(tables.users),
            }),
        }
    }

    /// Loads the store from a RON file. A missing file gives an empty store.
    ///
    /// # Errors
    ///
    /// If the file can't be read or isn't valid RON.
    pub fn load(path: &Path) -> Result<Self, Error> {
        match fs::read_to_string(path) {
            Ok(string) => match ron::from_str::<Tables>(&string) {
                Ok(tables) => Ok(Self::new(tables)),
                Err(error) => Err(Error::Store(format!("RON: {}: {error}", path.display()))),
            },
            Err(error) => match error.kind() {
                ErrorKind::NotFound => {
                    debug!("{} does not exist, starting empty", path.display());
                    Ok(Self::default())
                }
                _ => Err(error.into()),
            },
        }
    }

    /// # Errors
    ///
    /// If the file can't be written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let tables = self.tables()?;
        let string = ron::ser::to_string_pretty(&tables, ron::ser::PrettyConfig::default())
            .map_err(|error| Error::Store(format!("RON: {error}")))?;

        let mut file = File::create(path)?;
        file.write_all(string.as_bytes())?;

        Ok(())
    }

    /// A copy of every record, ordered by id.
    ///
    /// # Errors
    ///
    /// If the lock is poisoned.
    pub fn tables(&self) -> Result<Tables, Error> {
        let collections = self.lock()?;

        Ok(Tables {
            draws: collections.draws.values().cloned().collect(),
            draw_slots: collections.draw_slots.values().cloned().collect(),
            predictions: collections.predictions.values().cloned().collect(),
            users: collections.users.values().cloned().collect(),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, Error> {
        self.collections
            .lock()
            .map_err(|error| Error::Store(error.to_string()))
    }
}

impl Store for MemoryStore {
    fn draw(&self, id: &str) -> Result<Draw, Error> {
        get(&self.lock()?.draws, id)
    }

    fn draw_slot(&self, id: &str) -> Result<DrawSlot, Error> {
        get(&self.lock()?.draw_slots, id)
    }

    fn prediction(&self, id: &str) -> Result<Prediction, Error> {
        get(&self.lock()?.predictions, id)
    }

    fn draw_slots(&self, query: &Query) -> Result<Vec<DrawSlot>, Error> {
        query.run(self.lock()?.draw_slots.values())
    }

    fn predictions(&self, query: &Query) -> Result<Vec<Prediction>, Error> {
        query.run(self.lock()?.predictions.values())
    }

    fn users(&self, query: &Query) -> Result<Vec<User>, Error> {
        query.run(self.lock()?.users.values())
    }

    fn save_draw(&self, draw: &Draw) -> Result<(), Error> {
        upsert(&mut self.lock()?.draws, draw)
    }

    fn save_draw_slot(&self, slot: &DrawSlot) -> Result<(), Error> {
        upsert(&mut self.lock()?.draw_slots, slot)
    }

    fn save_prediction(&self, prediction: &Prediction) -> Result<(), Error> {
        upsert(&mut self.lock()?.predictions, prediction)
    }

    fn close_predictions(
        &self,
        draw_id: &str,
        close: DateTime<Utc>,
    ) -> Result<Option<Draw>, Error> {
        let mut collections = self.lock()?;
        let Some(draw) = collections.draws.get_mut(draw_id) else {
            return Err(Error::not_found(Collection::Draw, draw_id));
        };

        if draw.prediction_close.is_some() {
            return Ok(None);
        }

        draw.prediction_close = Some(close);
        Ok(Some(draw.clone()))
    }
}


#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::env;

    use super::{testing::*, *};
    use crate::filter::Filter;

    #[test]
    fn get_missing_is_not_found() {
        let store = MemoryStore::new(draw_64());

        assert!(matches!(
            store.draw("nope"),
            Err(Error::NotFound {
                collection: Collection::Draw,
                ..
            })
        ));
        assert!(matches!(
            store.prediction("nope"),
            Err(Error::NotFound {
                collection: Collection::Prediction,
                ..
            })
        ));
    }

    #[test]
    fn filled_round_of_sixteen() {
        let store = MemoryStore::new(draw_64());
        let filter: Filter = format!(r#"draw_id="{DRAW_ID}"&&round="3"&&name!="""#)
            .parse()
            .unwrap();

        assert_eq!(store.draw_slots(&filter.into()).unwrap().len(), 14);
    }

    #[test]
    fn save_upserts() {
        let store = MemoryStore::new(draw_64());
        let mut slot = store.draw_slot(&slot_id(3, 15)).unwrap();
        slot.name = "Mertens".to_string();
        store.save_draw_slot(&slot).unwrap();

        assert_eq!(store.draw_slot(&slot_id(3, 15)).unwrap().name, "Mertens");
        assert!(store.save_draw_slot(&DrawSlot::default()).is_err());
    }

    #[test]
    fn save_draw_upserts() {
        let store = MemoryStore::new(draw_64());

        let mut draw = store.draw(DRAW_ID).unwrap();
        draw.event = "Gentlemen's Singles".to_string();
        store.save_draw(&draw).unwrap();
        assert_eq!(store.draw(DRAW_ID).unwrap(), draw);

        let new = Draw {
            id: "us-open-2024".to_string(),
            name: "US Open".to_string(),
            event: "Women's Singles".to_string(),
            year: 2024,
            size: 128,
            prediction_close: None,
        };
        store.save_draw(&new).unwrap();
        assert_eq!(store.draw("us-open-2024").unwrap(), new);
        assert_eq!(store.tables().unwrap().draws.len(), 2);

        assert!(matches!(
            store.save_draw(&Draw::default()),
            Err(Error::Save {
                collection: Collection::Draw,
                ..
            })
        ));
    }

    #[test]
    fn close_predictions_only_once() {
        let store = MemoryStore::new(draw_64());
        let first = Utc::now();

        let closed = store.close_predictions(DRAW_ID, first).unwrap();
        assert_eq!(closed.unwrap().prediction_close, Some(first));

        let later = first + chrono::Duration::hours(1);
        assert_eq!(store.close_predictions(DRAW_ID, later).unwrap(), None);
        assert_eq!(store.draw(DRAW_ID).unwrap().prediction_close, Some(first));

        assert!(store.close_predictions("nope", later).is_err());
    }

    #[test]
    fn save_and_load() {
        let path = env::temp_dir().join(format!("racquet-rivals-{}.ron", std::process::id()));
        let store = MemoryStore::new(draw_64());
        store.save(&path).unwrap();

        let loaded = MemoryStore::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded.tables().unwrap(), store.tables().unwrap());
    }

    #[test]
    fn load_missing_file_is_empty() {
        let path = env::temp_dir().join("racquet-rivals-does-not-exist.ron");
        let store = MemoryStore::load(&path).unwrap();

        assert_eq!(store.tables().unwrap(), Tables::default());
    }
}
