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

use log::trace;

use crate::{draw_slot::DrawSlot, error::Error};

/// A slot update that has been committed to the store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotUpdated {
    pub slot: DrawSlot,
}

pub trait SlotHandler: Send + Sync {
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// If the handler could not finish its work for this update.
    fn on_slot_updated(&self, event: &SlotUpdated) -> Result<(), Error>;
}

/// Handlers run one after another in the order they were added.
#[derive(Default)]
pub struct Hooks {
    handlers: Vec<Box<dyn SlotHandler>>,
}

impl Hooks {
    pub fn add<H: SlotHandler + 'static>(&mut self, handler: H) {
        self.handlers.push(Box::new(handler));
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|handler| handler.name()).collect()
    }

    /// # Errors
    ///
    /// The first handler error; the handlers after it don't run.
    pub fn trigger(&self, event: &SlotUpdated) -> Result<(), Error> {
        for handler in &self.handlers {
            trace!("{} {}", handler.name(), event.slot);
            handler.on_slot_updated(event)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    struct Push {
        name: &'static str,
        fail: bool,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl SlotHandler for Push {
        fn name(&self) -> &'static str {
            self.name
        }

        fn on_slot_updated(&self, _event: &SlotUpdated) -> Result<(), Error> {
            if let Ok(mut log) = self.log.lock() {
                log.push(self.name);
            }

            if self.fail {
                Err(Error::Store("boom".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn hooks(fail_first: bool, log: &Arc<Mutex<Vec<&'static str>>>) -> Hooks {
        let mut hooks = Hooks::default();
        hooks.add(Push {
            name: "first",
            fail: fail_first,
            log: log.clone(),
        });
        hooks.add(Push {
            name: "second",
            fail: false,
            log: log.clone(),
        });
        hooks
    }

    #[test]
    fn runs_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let hooks = hooks(false, &log);
        let event = SlotUpdated {
            slot: DrawSlot::default(),
        };

        assert!(hooks.trigger(&event).is_ok());
        assert_eq!(hooks.names(), ["first", "second"]);
        assert_eq!(*log.lock().unwrap_or_else(|e| e.into_inner()), ["first", "second"]);
    }

    #[test]
    fn stops_at_the_first_error() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let hooks = hooks(true, &log);
        let event = SlotUpdated {
            slot: DrawSlot::default(),
        };

        assert!(hooks.trigger(&event).is_err());
        assert_eq!(*log.lock().unwrap_or_else(|e| e.into_inner()), ["first"]);
    }
}
