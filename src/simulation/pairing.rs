use crate::data::messages::{MessageLibrary, MessageRecord};

/// The i-th alert and the i-th guide of a day. Either side may be missing
/// when a day has more of one kind than the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessagePair<'a> {
    pub alert: Option<&'a MessageRecord>,
    pub guide: Option<&'a MessageRecord>,
}

pub fn pairs_for_day(library: &MessageLibrary, day: u32) -> Vec<MessagePair<'_>> {
    let alerts: Vec<&MessageRecord> = library.alerts.iter().filter(|m| m.day == day).collect();
    let guides: Vec<&MessageRecord> = library.guides.iter().filter(|m| m.day == day).collect();

    let total = alerts.len().max(guides.len());
    (0..total)
        .map(|i| MessagePair {
            alert: alerts.get(i).copied(),
            guide: guides.get(i).copied(),
        })
        .collect()
}

pub fn pair_count(library: &MessageLibrary, day: u32) -> usize {
    let alerts = library.alerts.iter().filter(|m| m.day == day).count();
    let guides = library.guides.iter().filter(|m| m.day == day).count();
    alerts.max(guides)
}
