//! The turn-token waiting list.
//!
//! Every operation returns a new [`Queue`], the receiver is never changed. The first entry holds
//! the token, the rest are waiting in line order.
use serde_derive::{Deserialize, Serialize};

/// One claim on the token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Entry {
    #[serde(alias = "ID")]
    pub id: String,
    #[serde(alias = "Reason")]
    pub reason: String,
}

impl Entry {
    pub fn new(id: &str, reason: &str) -> Self {
        Entry {
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Queue(Vec<Entry>);

impl Queue {
    pub fn new() -> Self {
        Queue(vec![])
    }

    /// The token holder, or an entry with empty id and reason if nobody holds the token.
    pub fn active(&self) -> Entry {
        self.0.first().cloned().unwrap_or_default()
    }

    pub fn waiting(&self) -> &[Entry] {
        self.0.get(1..).unwrap_or_default()
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        self.0.contains(entry)
    }

    /// Append the entry unless the very same entry is already in the queue.
    pub fn add(&self, entry: Entry) -> Queue {
        if self.contains(&entry) {
            return self.clone();
        }

        let mut entries = self.0.clone();
        entries.push(entry);

        Queue(entries)
    }

    /// Remove the first occurrence of the entry.
    pub fn remove(&self, entry: &Entry) -> Queue {
        let mut entries = self.0.clone();

        if let Some(pos) = entries.iter().position(|e| e == entry) {
            entries.remove(pos);
        }

        Queue(entries)
    }

    /// Swap the token holder with the next in line.
    pub fn yield_token(&self) -> Queue {
        let mut entries = self.0.clone();

        if entries.len() >= 2 {
            entries.swap(0, 1);
        }

        Queue(entries)
    }

    /// Put the entry right behind the token holder, moving it if it is already waiting.
    pub fn barge(&self, entry: Entry) -> Queue {
        if self.0.first() == Some(&entry) {
            return self.clone();
        }

        if self.0.len() < 2 {
            return self.add(entry);
        }

        let mut entries = self.remove(&entry).0;
        entries.insert(1, entry);

        Queue(entries)
    }

    /// Replace the first occurrence of `old` with `new`, keeping its place.
    pub fn delegate(&self, old: &Entry, new: Entry) -> Queue {
        let mut entries = self.0.clone();

        if let Some(slot) = entries.iter_mut().find(|e| &**e == old) {
            *slot = new;
        }

        Queue(entries)
    }

    /// Entry at the zero based index.
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.0.iter()
    }
}

impl From<Vec<Entry>> for Queue {
    fn from(entries: Vec<Entry>) -> Self {
        Queue(entries)
    }
}

impl FromIterator<Entry> for Queue {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Queue(iter.into_iter().collect())
    }
}
