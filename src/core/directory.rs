use crate::domain::model::{ContactFields, Criterion, Entry, EntryId};
use crate::utils::error::{PhonebookError, Result};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// Shared by every directory in the process, so an id never names entries in two directories.
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Ordered, in-memory contact list.
///
/// Positions shift on every structural change, ids do not. Out-of-range indices
/// never fail: inserts clamp to the tail and deletes/modifications are no-ops.
/// Callers that want an error use the `try_` variants.
#[derive(Debug, Default)]
pub struct Directory {
    entries: Vec<Entry>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id() == id)
    }

    pub fn get_at(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    fn position_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == id)
    }

    fn new_entry(&self, fields: ContactFields) -> Entry {
        let id = EntryId(NEXT_ID.fetch_add(1, Ordering::Relaxed));
        Entry::new(id, fields)
    }

    pub fn insert_front(&mut self, fields: ContactFields) -> EntryId {
        let entry = self.new_entry(fields);
        let id = entry.id();
        self.entries.insert(0, entry);
        tracing::debug!(%id, "inserted contact at front");
        id
    }

    pub fn insert_end(&mut self, fields: ContactFields) -> EntryId {
        let entry = self.new_entry(fields);
        let id = entry.id();
        self.entries.push(entry);
        tracing::debug!(%id, index = self.entries.len() - 1, "inserted contact at end");
        id
    }

    /// Inserts so the new entry ends up at `index`. An index past the end
    /// appends at the tail instead of failing.
    pub fn insert_at(&mut self, index: usize, fields: ContactFields) -> EntryId {
        if index == 0 {
            return self.insert_front(fields);
        }
        let entry = self.new_entry(fields);
        let id = entry.id();
        let position = index.min(self.entries.len());
        if position < index {
            tracing::debug!(%id, requested = index, position, "insert index clamped to tail");
        }
        self.entries.insert(position, entry);
        tracing::debug!(%id, index = position, "inserted contact");
        id
    }

    /// Removes the entry at `index`. Empty directory or out-of-range index is a no-op.
    pub fn delete_at(&mut self, index: usize) -> Option<Entry> {
        if index >= self.entries.len() {
            tracing::debug!(index, len = self.entries.len(), "delete index out of range, ignored");
            return None;
        }
        let removed = self.entries.remove(index);
        tracing::debug!(id = %removed.id(), index, "deleted contact");
        Some(removed)
    }

    pub fn try_delete_at(&mut self, index: usize) -> Result<Entry> {
        let len = self.entries.len();
        self.delete_at(index)
            .ok_or(PhonebookError::IndexOutOfRange { index, len })
    }

    /// Removes the entry with this identity. Returns `false` if it is not held here.
    pub fn delete_by_reference(&mut self, id: EntryId) -> bool {
        match self.position_of(id) {
            Some(index) => {
                self.entries.remove(index);
                tracing::debug!(%id, index, "deleted contact by reference");
                true
            }
            None => {
                tracing::debug!(%id, "contact to delete not found");
                false
            }
        }
    }

    /// Overwrites all five fields of the entry at `index`. Returns `false` when out of range.
    pub fn modify_at(&mut self, index: usize, fields: ContactFields) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.set_fields(fields);
                tracing::debug!(id = %entry.id(), index, "modified contact");
                true
            }
            None => {
                tracing::debug!(index, len = self.entries.len(), "modify index out of range, ignored");
                false
            }
        }
    }

    pub fn try_modify_at(&mut self, index: usize, fields: ContactFields) -> Result<()> {
        let len = self.entries.len();
        if self.modify_at(index, fields) {
            Ok(())
        } else {
            Err(PhonebookError::IndexOutOfRange { index, len })
        }
    }

    /// Keyword-based search. An unrecognized criterion yields no matches.
    pub fn search_by_criteria(&self, criterion: &str, value: &str) -> Vec<&Entry> {
        match criterion.parse::<Criterion>() {
            Ok(criterion) => self.search(criterion, value),
            Err(e) => {
                tracing::debug!("{}", e);
                Vec::new()
            }
        }
    }

    /// All matching entries in directory order, each at most once.
    pub fn search(&self, criterion: Criterion, value: &str) -> Vec<&Entry> {
        let matches: Vec<&Entry> = match criterion {
            Criterion::Name => {
                let tokens: Vec<&str> = value.split_whitespace().collect();
                let full_name = value.trim();
                self.entries
                    .iter()
                    .filter(|e| matches_name(e, &tokens, full_name))
                    .collect()
            }
            Criterion::Address => self
                .entries
                .iter()
                .filter(|e| eq_ignore_case(e.address(), value))
                .collect(),
            Criterion::PhoneNumber => self
                .entries
                .iter()
                .filter(|e| eq_ignore_case(e.phone_number(), value))
                .collect(),
        };
        tracing::debug!(%criterion, value, found = matches.len(), "search finished");
        matches
    }

    pub fn render_all(&self) -> String {
        self.to_string()
    }
}

// Token tier: any word equals the first or last name.
// Full-name tier: only for multi-word input, "first last" equals the trimmed input.
fn matches_name(entry: &Entry, tokens: &[&str], full_name: &str) -> bool {
    let token_match = tokens
        .iter()
        .any(|t| eq_ignore_case(entry.first_name(), t) || eq_ignore_case(entry.last_name(), t));
    if token_match {
        return true;
    }
    tokens.len() > 1
        && eq_ignore_case(
            &format!("{} {}", entry.first_name(), entry.last_name()),
            full_name,
        )
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            write!(f, "\nContact {}:\n\n{}\n", i + 1, entry)?;
        }
        Ok(())
    }
}
