//! Tokenizer events - the output of the streaming tokenizer.
//!
//! This is a SAX-style event model: events are emitted synchronously as
//! markup is recognized, with no tree accumulation. Structure is carried by
//! Open/Close pairs; character data arrives as Text.
//!
//! A tag `<a href="x" flag>` emits:
//! ```text
//! Open { name: "a", attrs: {href: "x", flag: ""} }
//! ```
//! A self-closing `<br/>` emits an Open immediately followed by a Close.
//! Raw-text containers (`script`, `style`, comments) emit their body as one
//! Text event between the Open and the Close.

/// A structural event emitted by the tokenizer.
///
/// Events own their data: the tokenizer compacts its pending buffer between
/// chunks, so slices borrowed from it could not outlive a single `feed`
/// call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Element open: `<name ...>`. Comments open under the name `!--`.
    Open { name: String, attrs: AttrMap },

    /// Element close: `</name>`, the close half of a self-closing tag, or
    /// the end of a raw-text body. Carries no attributes.
    Close { name: String },

    /// Character data, whitespace-collapsed unless the tokenizer was built
    /// with `preserve_whitespace`. Never empty.
    Text { content: String },
}

impl Event {
    /// Tag name for Open/Close events, None for Text.
    pub fn name(&self) -> Option<&str> {
        match self {
            Event::Open { name, .. } | Event::Close { name } => Some(name),
            Event::Text { .. } => None,
        }
    }

    /// Check if this is a Text event.
    pub fn is_text(&self) -> bool {
        matches!(self, Event::Text { .. })
    }
}

/// Insertion-ordered attribute map.
///
/// Keys keep the order they first appeared in the tag; writing an existing
/// key overwrites its value in place. Uniqueness is therefore not a parse
/// error - the last write wins, matching map-assignment semantics.
///
/// Backed by a plain `Vec`: tags carry a handful of attributes at most, so
/// linear probing beats hashing and keeps iteration in source order for
/// free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrMap {
    entries: Vec<(String, String)>,
}

impl AttrMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. A repeated key keeps its original position.
    pub fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttrMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AttrMap::new();
        for (k, v) in iter {
            map.insert(k.into(), v.into());
        }
        map
    }
}

/// Consumer of tokenizer events.
///
/// Called synchronously, zero or more times, from within
/// [`Tokenizer::feed`](crate::Tokenizer::feed) and
/// [`Tokenizer::finish`](crate::Tokenizer::finish), in exact source order.
/// The blanket impl lets a plain closure serve as a sink:
///
/// ```
/// use tagstream_core::{Event, Tokenizer};
///
/// let mut events = Vec::new();
/// let mut tokenizer = Tokenizer::new();
/// tokenizer.feed("<b>hi</b>", &mut |e: Event| events.push(e));
/// tokenizer.finish(&mut |e: Event| events.push(e));
/// assert_eq!(events.len(), 3);
/// ```
pub trait EventSink {
    fn accept(&mut self, event: Event);
}

impl<F: FnMut(Event)> EventSink for F {
    fn accept(&mut self, event: Event) {
        self(event)
    }
}
