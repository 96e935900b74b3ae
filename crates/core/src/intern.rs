//! String interning service
//!
//! [`StringInterner`] maps strings to 8-byte [`UniqueId`] tokens and back.
//! Equal strings always get the same token, so hot-path code compares and
//! hashes symbols as integers. The interner is an ordinary value: create one,
//! wrap it in an `Arc` and hand it to whatever needs it.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::fmt::{self, Display};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Interned string token.
///
/// Only meaningful to the [`StringInterner`] that issued it; another interner
/// may map the same number to different text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UniqueId(u64);

impl UniqueId {
    /// Token of the empty string in every interner
    pub const EMPTY: UniqueId = UniqueId(0);

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Concurrent bidirectional string/token cache
#[derive(Debug)]
pub struct StringInterner {
    to_id: DashMap<Arc<str>, UniqueId>,
    to_text: DashMap<UniqueId, Arc<str>>,
    next_id: AtomicU64,
}

impl StringInterner {
    /// New interner with `""` pre-registered as [`UniqueId::EMPTY`]
    pub fn new() -> Self {
        let interner = Self {
            to_id: DashMap::new(),
            to_text: DashMap::new(),
            next_id: AtomicU64::new(0),
        };
        interner.intern("");
        interner
    }

    /// Token for `text`, registering it on first sight
    pub fn intern(&self, text: &str) -> UniqueId {
        if let Some(id) = self.to_id.get(text) {
            return *id;
        }

        match self.to_id.entry(Arc::from(text)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let id = UniqueId(self.next_id.fetch_add(1, Ordering::Relaxed));
                self.to_text.insert(id, Arc::clone(entry.key()));
                entry.insert(id);
                trace!("Interned {:?} as {}", text, id);
                id
            }
        }
    }

    /// Text behind `id`, if this interner issued it
    pub fn resolve(&self, id: UniqueId) -> Option<Arc<str>> {
        self.to_text.get(&id).map(|text| Arc::clone(text.value()))
    }

    /// Number of distinct strings interned, including `""`
    pub fn count(&self) -> usize {
        self.to_id.len()
    }

    /// Intern the text of `id` followed by `suffix`
    pub fn concat(&self, id: UniqueId, suffix: &str) -> Option<UniqueId> {
        let base = self.resolve(id)?;
        let mut text = String::with_capacity(base.len() + suffix.len());
        text.push_str(&base);
        text.push_str(suffix);
        Some(self.intern(&text))
    }

    /// Intern the concatenation of `parts`
    pub fn merged<I, S>(&self, parts: I) -> UniqueId
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text: String = parts.into_iter().map(|p| p.as_ref().to_owned()).collect();
        self.intern(&text)
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
