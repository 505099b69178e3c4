use crate::data::messages::{Message, MessageKind, MessageLibrary, MessageRecord, SoundKey};
use crate::simulation::calendar::SimCalendar;
use crate::simulation::cursor::DayCursor;
use crate::simulation::pairing::{pairs_for_day, MessagePair};

pub const WELCOME_ALERT: &str = "Sistema de Alertas del Gobierno de España — Modo activo";
pub const WELCOME_GUIDE: &str =
    "Consejo inicial: Mantén la calma y sigue las instrucciones del Gobierno.";

fn fixed_message(text: &str, kind: MessageKind, calendar: &SimCalendar) -> Message {
    Message {
        day: 0,
        simulated_date: calendar.date_for_day(0),
        text: text.to_string(),
        sound: SoundKey::Silent,
        kind,
    }
}

fn dated(record: &MessageRecord, kind: MessageKind, calendar: &SimCalendar) -> Message {
    Message::from_record(record, kind, calendar.date_for_day(record.day))
}

/// Pairs visible at `cursor`, oldest first: every pair of earlier days, then
/// pairs `0..=index` of the current day.
fn revealed_pairs(library: &MessageLibrary, cursor: DayCursor) -> Vec<MessagePair<'_>> {
    let mut revealed = Vec::new();
    for day in 1..cursor.day {
        revealed.extend(pairs_for_day(library, day));
    }
    revealed.extend(
        pairs_for_day(library, cursor.day)
            .into_iter()
            .take(cursor.index as usize + 1),
    );
    revealed
}

/// Principal screen: welcome alert plus every revealed pair, newest first.
pub fn principal_feed(
    library: &MessageLibrary,
    cursor: DayCursor,
    calendar: &SimCalendar,
) -> Vec<Message> {
    let mut shown = vec![fixed_message(WELCOME_ALERT, MessageKind::Alert, calendar)];
    for pair in revealed_pairs(library, cursor) {
        if let Some(alert) = pair.alert {
            shown.push(dated(alert, MessageKind::Alert, calendar));
        }
        if let Some(guide) = pair.guide {
            shown.push(dated(guide, MessageKind::Guide, calendar));
        }
    }
    shown.reverse();
    shown
}

/// Guide screen: every guide up to the current day regardless of the
/// in-day index, newest first.
pub fn guide_list(
    library: &MessageLibrary,
    cursor: DayCursor,
    calendar: &SimCalendar,
) -> Vec<Message> {
    let mut shown = vec![fixed_message(WELCOME_GUIDE, MessageKind::Guide, calendar)];
    shown.extend(
        library
            .guides
            .iter()
            .filter(|guide| guide.day <= cursor.day)
            .map(|guide| dated(guide, MessageKind::Guide, calendar)),
    );
    shown.reverse();
    shown
}

/// History screen: alerts revealed so far, newest first.
pub fn alert_history(
    library: &MessageLibrary,
    cursor: DayCursor,
    calendar: &SimCalendar,
) -> Vec<Message> {
    let mut shown: Vec<Message> = revealed_pairs(library, cursor)
        .into_iter()
        .filter_map(|pair| pair.alert)
        .map(|alert| dated(alert, MessageKind::Alert, calendar))
        .collect();
    shown.reverse();
    shown
}
