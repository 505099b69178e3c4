use std::collections::HashSet;

use crate::simulation::cursor::DayCursor;

pub const NOTIFIED_PREFIX: &str = "notificado_dia_";

/// Identifies one logical notification: the alert of pair `index` on `day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationKey {
    pub day: u32,
    pub index: u32,
}

impl NotificationKey {
    pub fn new(day: u32, index: u32) -> Self {
        Self { day, index }
    }

    pub fn pref_key(&self) -> String {
        format!("{}{}_{}", NOTIFIED_PREFIX, self.day, self.index)
    }

    pub fn from_pref_key(key: &str) -> Option<Self> {
        let rest = key.strip_prefix(NOTIFIED_PREFIX)?;
        let (day, index) = rest.split_once('_')?;
        Some(Self {
            day: day.parse().ok()?,
            index: index.parse().ok()?,
        })
    }
}

impl From<DayCursor> for NotificationKey {
    fn from(cursor: DayCursor) -> Self {
        Self::new(cursor.day, cursor.index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationLedger {
    notified: HashSet<NotificationKey>,
}

impl NotificationLedger {
    /// Returns true the first time a key is seen; every later call for the
    /// same key returns false.
    pub fn claim(&mut self, key: NotificationKey) -> bool {
        self.notified.insert(key)
    }

    pub fn contains(&self, key: NotificationKey) -> bool {
        self.notified.contains(&key)
    }

    pub fn clear(&mut self) {
        self.notified.clear();
    }

    pub fn len(&self) -> usize {
        self.notified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notified.is_empty()
    }

    /// Keys in (day, index) order.
    pub fn keys(&self) -> Vec<NotificationKey> {
        let mut keys: Vec<NotificationKey> = self.notified.iter().copied().collect();
        keys.sort();
        keys
    }
}
