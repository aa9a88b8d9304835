//! Pending user selections made on the moderation picker.
//!
//! The target picker on the welcome message stores the chosen users here;
//! the kick/mute/unmute buttons consume them. Entries are keyed by
//! (message, acting user) so two users operating the same picker do not
//! clobber each other, evicted on consumption, and bounded by a TTL so the
//! map cannot grow without limit across the process lifetime.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serenity::all::{MessageId, UserId};

/// How long an unconsumed selection stays valid.
const SELECTION_TTL: Duration = Duration::from_secs(15 * 60);

struct Selection {
    users: Vec<UserId>,
    stored_at: Instant,
}

/// Bounded store of pending picker selections.
#[derive(Default)]
pub struct SelectionStore {
    entries: Mutex<HashMap<(MessageId, UserId), Selection>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the users selected on a picker message, replacing any earlier
    /// selection by the same user on the same message.
    pub fn insert(&self, message_id: MessageId, user_id: UserId, users: Vec<UserId>) {
        self.insert_at(message_id, user_id, users, Instant::now());
    }

    /// Removes and returns the pending selection, if one exists and has not
    /// expired.
    pub fn take(&self, message_id: MessageId, user_id: UserId) -> Option<Vec<UserId>> {
        self.take_at(message_id, user_id, Instant::now())
    }

    fn insert_at(&self, message_id: MessageId, user_id: UserId, users: Vec<UserId>, now: Instant) {
        let mut entries = self.entries.lock().expect("selection store poisoned");
        entries.retain(|_, selection| now.duration_since(selection.stored_at) < SELECTION_TTL);
        entries.insert(
            (message_id, user_id),
            Selection {
                users,
                stored_at: now,
            },
        );
    }

    fn take_at(
        &self,
        message_id: MessageId,
        user_id: UserId,
        now: Instant,
    ) -> Option<Vec<UserId>> {
        let mut entries = self.entries.lock().expect("selection store poisoned");
        let selection = entries.remove(&(message_id, user_id))?;
        if now.duration_since(selection.stored_at) >= SELECTION_TTL {
            return None;
        }
        Some(selection.users)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().expect("selection store poisoned").len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ids() -> (MessageId, UserId) {
        (MessageId::new(10), UserId::new(20))
    }

    #[test]
    fn take_consumes_the_selection() {
        let store = SelectionStore::new();
        let (message_id, user_id) = ids();
        store.insert(message_id, user_id, vec![UserId::new(1), UserId::new(2)]);

        assert_eq!(
            store.take(message_id, user_id),
            Some(vec![UserId::new(1), UserId::new(2)])
        );
        assert_eq!(store.take(message_id, user_id), None);
    }

    #[test]
    fn selections_are_scoped_per_user() {
        let store = SelectionStore::new();
        let message_id = MessageId::new(10);
        store.insert(message_id, UserId::new(20), vec![UserId::new(1)]);
        store.insert(message_id, UserId::new(21), vec![UserId::new(2)]);

        assert_eq!(
            store.take(message_id, UserId::new(20)),
            Some(vec![UserId::new(1)])
        );
        assert_eq!(
            store.take(message_id, UserId::new(21)),
            Some(vec![UserId::new(2)])
        );
    }

    #[test]
    fn expired_selection_is_not_returned() {
        let store = SelectionStore::new();
        let (message_id, user_id) = ids();
        let stored = Instant::now();
        store.insert_at(message_id, user_id, vec![UserId::new(1)], stored);

        let later = stored + SELECTION_TTL;
        assert_eq!(store.take_at(message_id, user_id, later), None);
    }

    #[test]
    fn insert_evicts_expired_entries() {
        let store = SelectionStore::new();
        let stored = Instant::now();
        store.insert_at(MessageId::new(1), UserId::new(1), vec![UserId::new(9)], stored);

        let later = stored + SELECTION_TTL + Duration::from_secs(1);
        store.insert_at(MessageId::new(2), UserId::new(2), vec![UserId::new(9)], later);

        assert_eq!(store.len(), 1);
    }
}
