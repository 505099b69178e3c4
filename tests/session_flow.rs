use std::path::Path;
use std::sync::Arc;

use apocalipsis_granada::data::messages::{MessageLibrary, MessageRecord, SoundKey};
use apocalipsis_granada::prefs::{PrefsDb, PrefsRepository};
use apocalipsis_granada::simulation::calendar::MILLIS_PER_DAY;
use apocalipsis_granada::simulation::cursor::DayCursor;
use apocalipsis_granada::simulation::effects::Effect;
use apocalipsis_granada::simulation::flashlight::NoTorch;
use apocalipsis_granada::simulation::notifications::NotificationKey;
use apocalipsis_granada::systems::SimEvent;
use apocalipsis_granada::{App, Clock};

const START_MS: i64 = 1_760_400_000_000;

fn library() -> MessageLibrary {
    MessageLibrary::from_records(
        vec![
            MessageRecord::new(1, "Apagón general", "alarm_short"),
            MessageRecord::new(2, "Ruidos en el alcantarillado", "sonido_raro"),
            MessageRecord::new(4, "Criaturas en el agua", "siren_warning"),
        ],
        vec![
            MessageRecord::new(1, "Llene la bañera", "false"),
            MessageRecord::new(1, "Tenga linternas", "false"),
            MessageRecord::new(4, "Evite las fuentes", "false"),
        ],
    )
}

fn open_app(path: &Path) -> App {
    let prefs: Box<dyn PrefsRepository> = Box::new(PrefsDb::open(path).unwrap());
    App::new(library(), prefs, Arc::new(NoTorch)).unwrap()
}

#[test]
fn state_survives_restart_without_renotifying() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.db");

    {
        let mut app = open_app(&path);
        app.login("lucía", "gremlins", Clock::at(START_MS, 9)).unwrap();
        let report = app.start_session(Clock::at(START_MS, 9));
        assert_eq!(report.effects.len(), 2);
    }

    let mut app = open_app(&path);
    assert_eq!(app.state().username, "lucía");
    assert_eq!(app.state().start_timestamp_ms, START_MS);
    assert!(app.state().notified.contains(NotificationKey::new(1, 0)));

    let report = app.start_session(Clock::at(START_MS + 1000, 9));
    assert!(report.events.is_empty());
    assert!(report.effects.is_empty());
}

#[test]
fn wall_clock_catch_up_reveals_the_reached_day() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.db");

    {
        let mut app = open_app(&path);
        app.login("ana", "gremlins", Clock::at(START_MS, 9)).unwrap();
        app.start_session(Clock::at(START_MS, 9));
    }

    let mut app = open_app(&path);
    let later = Clock::at(START_MS + 3 * MILLIS_PER_DAY + 60_000, 9);
    let report = app.start_session(later);
    assert_eq!(
        report.events,
        vec![SimEvent::CaughtUp {
            cursor: DayCursor::new(4, 0)
        }]
    );
    assert_eq!(report.effects[0], Effect::PlaySound(SoundKey::SirenWarning));

    let feed: Vec<String> = app.feed().into_iter().map(|m| m.text).collect();
    assert_eq!(feed[0], "Evite las fuentes");
    assert_eq!(feed[1], "Criaturas en el agua");
    assert!(feed.contains(&"Ruidos en el alcantarillado".to_string()));
}

#[test]
fn logout_wipes_user_and_notified_flags_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.db");

    {
        let mut app = open_app(&path);
        app.login("ana", "gremlins", Clock::at(START_MS, 9)).unwrap();
        app.start_session(Clock::at(START_MS, 9));
        app.logout(Clock::at(START_MS + 5, 9));
    }

    let db = PrefsDb::open(&path).unwrap();
    let keys = db.keys().unwrap();
    assert!(!keys.iter().any(|key| key.starts_with("notificado_dia_")));
    let state = db.load_state().unwrap().unwrap();
    assert!(!state.is_logged_in());
    assert!(state.first_launch);
}

#[test]
fn shipped_assets_cover_two_weeks() {
    let assets = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    let library = MessageLibrary::load(&assets);
    assert!(!library.alerts.is_empty());
    assert!(!library.guides.is_empty());
    assert_eq!(library.last_day(), 14);
    assert!(library.alerts.iter().all(|record| record.day >= 1));
}

#[test]
fn hourly_sessions_notify_every_alert_of_each_reached_day() {
    let assets = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    let library = MessageLibrary::load(&assets);
    let prefs: Box<dyn PrefsRepository> = Box::new(PrefsDb::open_in_memory().unwrap());
    let mut app = App::new(library.clone(), prefs, Arc::new(NoTorch)).unwrap();

    app.login("ana", "gremlins", Clock::at(START_MS, 9)).unwrap();
    for hour in 0..72 {
        app.start_session(Clock::at(START_MS + hour * 3_600_000, 9));
    }
    assert_eq!(app.state().cursor.day, 3);

    for day in 1..=3 {
        let alerts = library.alerts.iter().filter(|a| a.day == day).count();
        for index in 0..alerts as u32 {
            assert!(
                app.state().notified.contains(NotificationKey::new(day, index)),
                "alert ({}, {}) never notified",
                day,
                index
            );
        }
    }
}
