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

use std::sync::Arc;

use log::{debug, info};

use crate::{
    draw_slot::DrawSlot,
    error::Error,
    gate::PredictionGate,
    hooks::{Hooks, SlotUpdated},
    notify::Mailer,
    scoring::ScoringEngine,
    settings::Settings,
    store::Store,
};

/// Commits slot updates and runs the gate, then the scoring engine.
pub struct App {
    store: Arc<dyn Store>,
    hooks: Hooks,
}

impl App {
    /// # Errors
    ///
    /// If the settings are invalid.
    pub fn new(
        store: Arc<dyn Store>,
        mailer: Arc<dyn Mailer>,
        settings: &Settings,
    ) -> Result<Self, Error> {
        let mut hooks = Hooks::default();
        hooks.add(PredictionGate::new(store.clone(), mailer, settings)?);
        hooks.add(ScoringEngine::new(store.clone()));
        debug!("slot hooks: {}", hooks.names().join(", "));

        Ok(Self { store, hooks })
    }

    /// Saves an existing slot, then fires the hooks with what was saved.
    ///
    /// # Errors
    ///
    /// If the slot doesn't exist, can't be saved, or a hook fails.
    pub fn update_slot(&self, slot: DrawSlot) -> Result<(), Error> {
        self.store.draw_slot(&slot.id)?;
        self.store.save_draw_slot(&slot)?;
        info!("draw_slot {slot}");

        self.hooks.trigger(&SlotUpdated { slot })
    }

    /// Sets the competitor in a slot. An empty name clears it.
    ///
    /// # Errors
    ///
    /// See [`App::update_slot`].
    pub fn name_slot(&self, slot_id: &str, name: &str) -> Result<DrawSlot, Error> {
        let mut slot = self.store.draw_slot(slot_id)?;
        slot.name = name.to_string();
        self.update_slot(slot.clone())?;

        Ok(slot)
    }

    /// # Errors
    ///
    /// See [`App::update_slot`].
    pub fn seed_slot(&self, slot_id: &str, seed: &str) -> Result<DrawSlot, Error> {
        let mut slot = self.store.draw_slot(slot_id)?;
        slot.seed = seed.to_string();
        self.update_slot(slot.clone())?;

        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::{
        error::Collection,
        store::{MemoryStore, testing::*},
    };

    #[test]
    fn unknown_slots_are_not_created() {
        let store = Arc::new(MemoryStore::new(draw_64()));
        let app = App::new(
            store.clone(),
            Arc::new(RecordingMailer::default()),
            &Settings::default(),
        )
        .unwrap();

        let slot = DrawSlot {
            id: "new".to_string(),
            draw_id: DRAW_ID.to_string(),
            ..DrawSlot::default()
        };

        assert!(matches!(
            app.update_slot(slot),
            Err(Error::NotFound {
                collection: Collection::DrawSlot,
                ..
            })
        ));
        assert!(store.draw_slot("new").is_err());
    }

    #[test]
    fn update_runs_both_handlers() {
        let store = Arc::new(MemoryStore::new(draw_64()));
        let mailer = Arc::new(RecordingMailer::default());
        let app = App::new(store.clone(), mailer.clone(), &Settings::default()).unwrap();

        app.name_slot(&slot_id(3, 15), "Mertens").unwrap();
        app.name_slot(&slot_id(3, 16), "Rybakina").unwrap();
        app.name_slot(QUARTERFINAL_SLOT_ID, "Sabalenka").unwrap();

        assert!(store.draw(DRAW_ID).unwrap().prediction_close.is_some());
        assert_eq!(mailer.recipients().len(), 2);
        assert_eq!(store.prediction("qf-win").unwrap().points, 1);
        assert_eq!(store.prediction("qf-lose").unwrap().points, 0);
    }

    #[test]
    fn seeding_keeps_the_name() {
        let store = Arc::new(MemoryStore::new(draw_64()));
        let app = App::new(
            store.clone(),
            Arc::new(RecordingMailer::default()),
            &Settings::default(),
        )
        .unwrap();

        let slot = app.seed_slot(&slot_id(3, 1), "(1)").unwrap();

        assert_eq!(slot.seed, "(1)");
        assert_eq!(store.draw_slot(&slot_id(3, 1)).unwrap().name, "Player 3-1");
    }
}
