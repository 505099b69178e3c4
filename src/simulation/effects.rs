use crate::data::messages::{MessageKind, MessageLibrary, SoundKey};
use crate::simulation::cursor::DayCursor;
use crate::simulation::notifications::{NotificationKey, NotificationLedger};
use crate::simulation::pairing::pairs_for_day;

pub const NOTIFICATION_TITLE: &str = "⚠️ Alerta del Gobierno de España";
pub const SOS_DAY: u32 = 14;
pub const SOS_HOUR: u32 = 23;

/// Side effect requested by the simulation; the front end decides how to
/// play it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PlaySound(SoundKey),
    Notify { day: u32, title: String, text: String },
    SosSignal,
}

/// Effects for the pair the cursor just revealed. The alert of that pair
/// sounds and notifies only the first time its key is claimed; guides never
/// do either.
pub fn reveal_effects(
    library: &MessageLibrary,
    ledger: &mut NotificationLedger,
    cursor: DayCursor,
) -> Vec<Effect> {
    let pairs = pairs_for_day(library, cursor.day);
    let Some(pair) = pairs.get(cursor.index as usize) else {
        return Vec::new();
    };
    let notifying = [
        (pair.alert, MessageKind::Alert),
        (pair.guide, MessageKind::Guide),
    ]
    .into_iter()
    .find_map(|(record, kind)| record.filter(|_| kind.raises_notification()));
    let Some(alert) = notifying else {
        return Vec::new();
    };
    if !ledger.claim(NotificationKey::from(cursor)) {
        return Vec::new();
    }

    let mut effects = Vec::with_capacity(2);
    let sound = alert.sound_key();
    if sound.is_audible() {
        effects.push(Effect::PlaySound(sound));
    }
    effects.push(Effect::Notify {
        day: cursor.day,
        title: NOTIFICATION_TITLE.to_string(),
        text: alert.text.clone(),
    });
    effects
}

pub fn should_signal_sos(day: u32, local_hour: u32) -> bool {
    day == SOS_DAY && local_hour == SOS_HOUR
}
