#![allow(clippy::unwrap_used)]

// The draw in draw.ron has size 64 and 14/16 slots named in the round of 16.

use std::sync::{Arc, Mutex};

use chrono::{TimeDelta, Utc};
use racquet_rivals::{
    app::App,
    filter::Filter,
    hooks::SlotUpdated,
    notify::{MailError, Mailer, Message},
    settings::Settings,
    store::{MemoryStore, Store, Tables},
};

const DRAW_ID: &str = "2l1hqqi8puodmjq";

const R16_SLOT_15_ID: &str = "4pbsipqoncnd14h";
const R16_SLOT_16_ID: &str = "7wg2gmjqutu1bky";

const QUARTERFINAL_SLOT_ID: &str = "y6aj4a1vxfibcfv";
const SEMIFINAL_SLOT_ID: &str = "43objik3hkdl34k";
const FINAL_SLOT_ID: &str = "alsia0d829o6qox";
const WINNER_SLOT_ID: &str = "t1arj8fwjbcfltm";

const QUARTERFINAL_WINNING_PREDICTION: &str = "ahsplh4qx7zkwkt";
const SEMIFINAL_WINNING_PREDICTION: &str = "w0gko3g832lihmm";
const FINAL_WINNING_PREDICTION: &str = "r9nhh355zrokdhi";
const WINNER_WINNING_PREDICTION: &str = "3x4hc8ikjugec9a";

const QUARTERFINAL_LOSING_PREDICTION: &str = "tagsi9hyse5i8rz";
const SEMIFINAL_LOSING_PREDICTION: &str = "yfzbezk7pvkofn6";
const FINAL_LOSING_PREDICTION: &str = "ohobwbtobq156mu";
const WINNER_LOSING_PREDICTION: &str = "edbd19e25ersljg";

#[derive(Default)]
struct Outbox(Mutex<Vec<Message>>);

impl Outbox {
    fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl Mailer for Outbox {
    fn send(&self, message: &Message) -> Result<(), MailError> {
        self.0.lock().unwrap().push(message.clone());
        Ok(())
    }
}

fn setup() -> (App, Arc<MemoryStore>, Arc<Outbox>) {
    let tables: Tables = ron::from_str(include_str!("draw.ron")).unwrap();
    let store = Arc::new(MemoryStore::new(tables));
    let outbox = Arc::new(Outbox::default());
    let app = App::new(store.clone(), outbox.clone(), &Settings::default()).unwrap();

    (app, store, outbox)
}

fn filled_round_of_sixteen(store: &MemoryStore) -> usize {
    let filter: Filter = format!(r#"draw_id="{DRAW_ID}"&&round="3"&&name!="""#)
        .parse()
        .unwrap();

    store.draw_slots(&filter.into()).unwrap().len()
}

#[test]
fn prediction_close_update() {
    let (app, store, outbox) = setup();
    assert_eq!(filled_round_of_sixteen(&store), 14);
    assert!(store.draw(DRAW_ID).unwrap().prediction_close.is_none());

    app.name_slot(R16_SLOT_15_ID, "Mertens").unwrap();
    assert_eq!(filled_round_of_sixteen(&store), 15);
    assert!(store.draw(DRAW_ID).unwrap().prediction_close.is_none());
    assert_eq!(outbox.len(), 0);

    let before = Utc::now();
    app.name_slot(R16_SLOT_16_ID, "Rybakina").unwrap();
    assert_eq!(filled_round_of_sixteen(&store), 16);

    let close = store.draw(DRAW_ID).unwrap().prediction_close.unwrap();
    assert!(close >= before);
    assert!(close <= Utc::now() + TimeDelta::hours(12));
    assert_eq!(outbox.len(), 2);

    app.name_slot(QUARTERFINAL_SLOT_ID, "Sabalenka").unwrap();
    assert_eq!(store.draw(DRAW_ID).unwrap().prediction_close, Some(close));
    assert_eq!(outbox.len(), 2);

    let winning = store.prediction(QUARTERFINAL_WINNING_PREDICTION).unwrap();
    let losing = store.prediction(QUARTERFINAL_LOSING_PREDICTION).unwrap();
    assert_eq!(winning.points, 1);
    assert_eq!(losing.points, 0);
}

#[test]
fn redelivered_sixteenth_slot_notifies_once() {
    let (app, store, outbox) = setup();

    app.name_slot(R16_SLOT_15_ID, "Mertens").unwrap();
    let slot = app.name_slot(R16_SLOT_16_ID, "Rybakina").unwrap();
    assert_eq!(outbox.len(), 2);

    let mut hooks = racquet_rivals::hooks::Hooks::default();
    hooks.add(
        racquet_rivals::gate::PredictionGate::new(
            store.clone(),
            outbox.clone(),
            &Settings::default(),
        )
        .unwrap(),
    );
    hooks.trigger(&SlotUpdated { slot }).unwrap();

    assert_eq!(outbox.len(), 2);
}

#[test]
fn point_update() {
    for (slot_id, name, winning, losing, expected) in [
        (
            QUARTERFINAL_SLOT_ID,
            "Sabalenka",
            QUARTERFINAL_WINNING_PREDICTION,
            QUARTERFINAL_LOSING_PREDICTION,
            1,
        ),
        (
            SEMIFINAL_SLOT_ID,
            "Sabalenka",
            SEMIFINAL_WINNING_PREDICTION,
            SEMIFINAL_LOSING_PREDICTION,
            2,
        ),
        (
            FINAL_SLOT_ID,
            "Sabalenka",
            FINAL_WINNING_PREDICTION,
            FINAL_LOSING_PREDICTION,
            4,
        ),
        (
            WINNER_SLOT_ID,
            "Rybakina",
            WINNER_WINNING_PREDICTION,
            WINNER_LOSING_PREDICTION,
            8,
        ),
    ] {
        let (app, store, _outbox) = setup();
        assert_eq!(store.prediction(winning).unwrap().points, 0);
        assert_eq!(store.prediction(losing).unwrap().points, 0);

        app.name_slot(slot_id, name).unwrap();

        assert_eq!(store.prediction(winning).unwrap().points, expected, "{slot_id}");
        assert_eq!(store.prediction(losing).unwrap().points, 0, "{slot_id}");
    }
}

#[test]
fn overturned_result_is_rescored() {
    let (app, store, _outbox) = setup();

    app.name_slot(QUARTERFINAL_SLOT_ID, "Sabalenka").unwrap();
    assert_eq!(
        store.prediction(QUARTERFINAL_WINNING_PREDICTION).unwrap().points,
        1
    );

    app.name_slot(QUARTERFINAL_SLOT_ID, "Andreeva").unwrap();
    assert_eq!(
        store.prediction(QUARTERFINAL_WINNING_PREDICTION).unwrap().points,
        0
    );
    assert_eq!(
        store.prediction(QUARTERFINAL_LOSING_PREDICTION).unwrap().points,
        1
    );
}
