use std::fs;
use std::path::Path;

use bevy_ecs::prelude::*;
use serde::Deserialize;

pub const ALERTS_FILE: &str = "alertas.json";
pub const GUIDES_FILE: &str = "guias.json";

/// One entry of `alertas.json` / `guias.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageRecord {
    #[serde(rename = "dia")]
    pub day: u32,
    #[serde(rename = "mensaje")]
    pub text: String,
    #[serde(rename = "sonido", default = "default_sound")]
    pub sound: String,
}

fn default_sound() -> String {
    "false".to_string()
}

impl MessageRecord {
    pub fn new(day: u32, text: impl Into<String>, sound: impl Into<String>) -> Self {
        Self {
            day,
            text: text.into(),
            sound: sound.into(),
        }
    }

    pub fn sound_key(&self) -> SoundKey {
        SoundKey::from_asset(&self.sound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Alert,
    Guide,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Alert => "alerta",
            MessageKind::Guide => "guia",
        }
    }

    /// Only alerts reach the notification tray.
    pub fn raises_notification(self) -> bool {
        self == MessageKind::Alert
    }
}

/// Sound cue attached to a message. Anything the assets name that is not a
/// known cue (including the literal `"false"`) is silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKey {
    AlarmShort,
    Alert,
    GremlinLaugh,
    AlienLaugh,
    WeirdNoise,
    SirenWarning,
    Silent,
}

impl SoundKey {
    pub fn from_asset(value: &str) -> Self {
        match value.trim() {
            "alarm_short" => SoundKey::AlarmShort,
            "alert" => SoundKey::Alert,
            "gremlin_risa" => SoundKey::GremlinLaugh,
            "alien_risa" => SoundKey::AlienLaugh,
            "sonido_raro" => SoundKey::WeirdNoise,
            "siren_warning" => SoundKey::SirenWarning,
            _ => SoundKey::Silent,
        }
    }

    pub fn asset_name(self) -> &'static str {
        match self {
            SoundKey::AlarmShort => "alarm_short",
            SoundKey::Alert => "alert",
            SoundKey::GremlinLaugh => "gremlin_risa",
            SoundKey::AlienLaugh => "alien_risa",
            SoundKey::WeirdNoise => "sonido_raro",
            SoundKey::SirenWarning => "siren_warning",
            SoundKey::Silent => "false",
        }
    }

    pub fn is_audible(self) -> bool {
        self != SoundKey::Silent
    }
}

/// A message ready for display, with its simulated date attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub day: u32,
    pub simulated_date: String,
    pub text: String,
    pub sound: SoundKey,
    pub kind: MessageKind,
}

impl Message {
    pub fn from_record(record: &MessageRecord, kind: MessageKind, simulated_date: String) -> Self {
        Self {
            day: record.day,
            simulated_date,
            text: record.text.clone(),
            sound: record.sound_key(),
            kind,
        }
    }
}

#[derive(Debug)]
pub enum MessageDataError {
    Io { path: String, source: std::io::Error },
    Json { path: String, source: serde_json::Error },
    Validation(String),
}

impl std::fmt::Display for MessageDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageDataError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path, source)
            }
            MessageDataError::Json { path, source } => {
                write!(f, "failed to parse {}: {}", path, source)
            }
            MessageDataError::Validation(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for MessageDataError {}

pub fn load_message_catalog(
    path: impl AsRef<Path>,
    kind: MessageKind,
) -> Result<Vec<MessageRecord>, MessageDataError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| MessageDataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let records: Vec<MessageRecord> =
        serde_json::from_str(&raw).map_err(|source| MessageDataError::Json {
            path: path.display().to_string(),
            source,
        })?;
    Ok(retain_valid(records, kind))
}

pub fn validate_record(
    record: &MessageRecord,
    idx: usize,
    kind: MessageKind,
) -> Result<(), MessageDataError> {
    if record.day == 0 {
        return Err(MessageDataError::Validation(format!(
            "{} #{} has day 0; days start at 1",
            kind.as_str(),
            idx
        )));
    }
    if record.text.trim().is_empty() {
        return Err(MessageDataError::Validation(format!(
            "{} #{} (day {}) has no text",
            kind.as_str(),
            idx,
            record.day
        )));
    }
    Ok(())
}

/// Drops records that fail validation, logging each one; the rest of the
/// file is kept.
pub fn retain_valid(records: Vec<MessageRecord>, kind: MessageKind) -> Vec<MessageRecord> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(idx, record)| match validate_record(&record, idx, kind) {
            Ok(()) => Some(record),
            Err(err) => {
                tracing::warn!("Skipping message: {}", err);
                None
            }
        })
        .collect()
}

/// Both asset lists, kept in source order.
#[derive(Resource, Debug, Clone, Default)]
pub struct MessageLibrary {
    pub alerts: Vec<MessageRecord>,
    pub guides: Vec<MessageRecord>,
}

impl MessageLibrary {
    pub fn from_records(alerts: Vec<MessageRecord>, guides: Vec<MessageRecord>) -> Self {
        Self { alerts, guides }
    }

    /// Loads both files from `assets_dir`. A file that fails to load is logged
    /// and leaves its list empty.
    pub fn load(assets_dir: impl AsRef<Path>) -> Self {
        let dir = assets_dir.as_ref();
        Self {
            alerts: load_or_empty(&dir.join(ALERTS_FILE), MessageKind::Alert),
            guides: load_or_empty(&dir.join(GUIDES_FILE), MessageKind::Guide),
        }
    }

    pub fn last_day(&self) -> u32 {
        self.alerts
            .iter()
            .chain(self.guides.iter())
            .map(|record| record.day)
            .max()
            .unwrap_or(0)
    }
}

fn load_or_empty(path: &Path, kind: MessageKind) -> Vec<MessageRecord> {
    match load_message_catalog(path, kind) {
        Ok(records) => {
            tracing::debug!(path = %path.display(), count = records.len(), "loaded messages");
            records
        }
        Err(err) => {
            tracing::warn!("Failed to load {} messages: {}", kind.as_str(), err);
            Vec::new()
        }
    }
}
