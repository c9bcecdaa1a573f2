//! Incremental tokenizer state machine.
//!
//! The tokenizer is fed chunks of arbitrary size and pushes events to a
//! sink as markup completes. All state lives in the instance - the lexical
//! state, the pending (not yet consumed) input suffix, the terminator
//! matchers, and the transient fields of the tag being built - so feeding
//! a document as one chunk or one character at a time yields the identical
//! event sequence.
//!
//! # Buffer discipline
//!
//! `feed` appends the chunk to the pending buffer and scans from the saved
//! cursor to the end. Two indices bound the interesting region: `v`, the
//! flush boundary (everything before it has been emitted or discarded),
//! and the scan position `i`. On return the buffer is compacted to the
//! suffix starting at `v`; content already delivered to the sink is never
//! retained.
//!
//! Raw-text bodies (script, style, comments) stay buffered until their
//! terminator literal arrives, so a pathological unterminated `<script>`
//! holds its body in memory until `finish`.

use memchr::memchr;

use crate::event::{AttrMap, Event, EventSink};
use crate::matcher::SeqMatcher;

/// Whitespace per the tokenizer's collapsing rules: space, tab, LF, VT,
/// FF, CR.
#[inline]
fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t'..=b'\r')
}

/// Lexical state. Exactly one is current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Character data; `<` starts a tag.
    Text,
    /// Inside `<...>`, between name/keys/values.
    TagOpen,
    /// Scanning the tag name.
    TagName,
    /// Scanning an attribute key.
    AttrKey,
    /// Scanning an attribute value (quoted or bare).
    AttrValue,
    /// Raw body of a `<script>` element; only `</script>` ends it.
    RawScript,
    /// Raw body of a `<style>` element; only `</style>` ends it.
    RawStyle,
    /// Comment body; only `-->` ends it.
    RawComment,
}

/// Tokenizer configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Emit Text content verbatim instead of collapsing each whitespace
    /// run to a single space.
    pub preserve_whitespace: bool,
}

/// Streaming markup tokenizer.
///
/// One instance per logical stream: call [`feed`](Self::feed) once per
/// arriving chunk, in order, then [`finish`](Self::finish) exactly once at
/// end of stream. `finish` resets the instance, so it can be reused for a
/// new stream afterwards.
///
/// The tokenizer is permissive: it raises no errors, and malformed markup
/// is absorbed by the transition rules rather than rejected. An incomplete
/// tag at end of stream emits nothing.
#[derive(Debug)]
pub struct Tokenizer {
    opts: Options,

    end_script: SeqMatcher,
    end_style: SeqMatcher,
    begin_comment: SeqMatcher,
    end_comment: SeqMatcher,

    /// Pending input: the suffix of everything received that has not yet
    /// been consumed into an emitted event.
    cache: String,
    state: State,

    /// Non-whitespace runs accumulated in Text state while collapsing;
    /// joined with single spaces at flush time.
    fragments: Vec<String>,

    // Transient per-tag fields. `name`/`key` empty means unset.
    name: String,
    key: String,
    attrs: AttrMap,
    is_close: bool,
    is_self_close: bool,
    has_equal: bool,
    /// Quote byte terminating the current attribute value; None while the
    /// value is unquoted.
    quote: Option<u8>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(opts: Options) -> Self {
        Self {
            opts,
            end_script: SeqMatcher::new("</script>"),
            end_style: SeqMatcher::new("</style>"),
            begin_comment: SeqMatcher::new("!--"),
            end_comment: SeqMatcher::new("-->"),
            cache: String::new(),
            state: State::Text,
            fragments: Vec::new(),
            name: String::new(),
            key: String::new(),
            attrs: AttrMap::new(),
            is_close: false,
            is_self_close: false,
            has_equal: false,
            quote: None,
        }
    }

    /// Reinitialize to the just-constructed state, ready for a new stream.
    pub fn reset(&mut self) {
        self.end_script.reset();
        self.end_style.reset();
        self.begin_comment.reset();
        self.end_comment.reset();
        self.cache.clear();
        self.state = State::Text;
        self.fragments.clear();
        self.name.clear();
        self.key.clear();
        self.attrs.clear();
        self.is_close = false;
        self.is_self_close = false;
        self.has_equal = false;
        self.quote = None;
    }

    /// Consume one chunk, emitting events for every construct that
    /// completes within the input received so far.
    ///
    /// Every byte with lexical significance is ASCII, so the scan works on
    /// bytes; slice boundaries always land next to an ASCII delimiter and
    /// therefore on `char` boundaries.
    pub fn feed<S: EventSink>(&mut self, chunk: &str, sink: &mut S) {
        let mut cache = std::mem::take(&mut self.cache);
        let start = cache.len();
        cache.push_str(chunk);

        let bytes = cache.as_bytes();
        let len = bytes.len();

        let mut i = start;
        let mut v = 0usize;
        let mut state = self.state;

        while i < len {
            let b = bytes[i];
            match state {
                State::Text => {
                    if self.opts.preserve_whitespace {
                        // nothing but '<' is significant; skip straight to it
                        let Some(rel) = memchr(b'<', &bytes[i..]) else {
                            i = len;
                            break;
                        };
                        i += rel;
                        self.flush_text(&cache, v, i, sink);
                        state = State::TagOpen;
                        v = i + 1;
                    } else if is_ws(b) {
                        if v < i {
                            self.fragments.push(cache[v..i].to_string());
                        }
                        v = i + 1;
                    } else if b == b'<' {
                        self.flush_text(&cache, v, i, sink);
                        state = State::TagOpen;
                        v = i + 1;
                    }
                }

                State::TagOpen => {
                    if b == b'>' {
                        if !self.key.is_empty() {
                            self.flush_pending_key();
                        }
                        state = self.flush_tag(sink);
                        v = i + 1;
                    } else if b == b'/' && !self.has_equal {
                        // before a name this is a closing tag, after one a
                        // self-close
                        self.is_self_close = !self.name.is_empty();
                        self.is_close = !self.is_self_close;
                    } else if !is_ws(b) {
                        if self.name.is_empty() {
                            // name starts here; the first byte may already
                            // begin the "!--" comment opener
                            self.begin_comment.feed(b);
                            v = i;
                            state = State::TagName;
                        } else if self.key.is_empty() {
                            v = i;
                            state = State::AttrKey;
                        } else if b == b'=' {
                            self.has_equal = true;
                        } else if !self.has_equal {
                            // a second key before any '=': the first one is
                            // a zero-value attribute
                            self.flush_pending_key();
                            v = i;
                            state = State::AttrKey;
                        } else if b == b'"' || b == b'\'' {
                            self.quote = Some(b);
                            v = i + 1;
                            state = State::AttrValue;
                        } else {
                            v = i;
                            state = State::AttrValue;
                        }
                    }
                }

                State::TagName => {
                    if self.begin_comment.feed(b) {
                        self.name = cache[v..=i].to_string();
                        state = self.flush_tag(sink);
                        v = i + 1;
                    } else if is_ws(b) {
                        self.name = cache[v..i].to_string();
                        state = State::TagOpen;
                        v = i + 1;
                    } else if b == b'/' {
                        self.is_self_close = true;
                        self.name = cache[v..i].to_string();
                        state = State::TagOpen;
                        v = i + 1;
                    } else if b == b'>' {
                        self.name = cache[v..i].to_string();
                        state = self.flush_tag(sink);
                        v = i + 1;
                    }
                }

                State::AttrKey => {
                    if is_ws(b) {
                        self.key = cache[v..i].to_string();
                        state = State::TagOpen;
                        v = i + 1;
                    } else if b == b'=' {
                        self.has_equal = true;
                        self.key = cache[v..i].to_string();
                        state = State::TagOpen;
                        v = i + 1;
                    } else if b == b'/' {
                        self.is_self_close = true;
                        self.key = cache[v..i].to_string();
                        state = State::TagOpen;
                        v = i + 1;
                    } else if b == b'>' {
                        self.attrs.insert(cache[v..i].to_string(), String::new());
                        state = self.flush_tag(sink);
                        v = i + 1;
                    }
                }

                State::AttrValue => {
                    if let Some(q) = self.quote {
                        if b == q {
                            self.flush_value(&cache, v, i);
                            state = State::TagOpen;
                            v = i + 1;
                        }
                    } else if is_ws(b) {
                        self.flush_value(&cache, v, i);
                        state = State::TagOpen;
                        v = i + 1;
                    } else if b == b'>' {
                        self.flush_value(&cache, v, i);
                        state = self.flush_tag(sink);
                        v = i + 1;
                    }
                }

                State::RawComment => {
                    if self.end_comment.at_start() && b != b'-' {
                        let Some(rel) = memchr(b'-', &bytes[i..]) else {
                            i = len;
                            break;
                        };
                        i += rel;
                    }
                    if self.end_comment.feed(bytes[i]) {
                        self.flush_raw(&cache, v, i - 2, "!--", sink);
                        state = State::Text;
                        v = i + 1;
                    }
                }

                State::RawScript => {
                    if self.end_script.at_start() && b != b'<' {
                        let Some(rel) = memchr(b'<', &bytes[i..]) else {
                            i = len;
                            break;
                        };
                        i += rel;
                    }
                    if self.end_script.feed(bytes[i]) {
                        self.flush_raw(&cache, v, i - 8, "script", sink);
                        state = State::Text;
                        v = i + 1;
                    }
                }

                State::RawStyle => {
                    if self.end_style.at_start() && b != b'<' {
                        let Some(rel) = memchr(b'<', &bytes[i..]) else {
                            i = len;
                            break;
                        };
                        i += rel;
                    }
                    if self.end_style.feed(bytes[i]) {
                        self.flush_raw(&cache, v, i - 7, "style", sink);
                        state = State::Text;
                        v = i + 1;
                    }
                }
            }
            i += 1;
        }

        self.state = state;
        // compact to the unconsumed suffix; v always sits next to an ASCII
        // delimiter, hence on a char boundary
        cache.drain(..v);
        self.cache = cache;
    }

    /// Flush trailing buffered text, then reset for a new stream.
    ///
    /// Only pending *text* is recoverable here (including an unterminated
    /// raw body). A tag still in progress - input ending mid-name,
    /// mid-attribute, or inside a quoted value - is silently dropped.
    pub fn finish<S: EventSink>(&mut self, sink: &mut S) {
        match self.state {
            State::Text | State::RawScript | State::RawStyle | State::RawComment => {
                let cache = std::mem::take(&mut self.cache);
                self.flush_text(&cache, 0, cache.len(), sink);
            }
            State::TagOpen | State::TagName | State::AttrKey | State::AttrValue => {}
        }
        self.reset();
    }

    /// Emit accumulated text, if any. While collapsing, queued fragments
    /// join with single spaces; `cache[v..i]` is the final fragment.
    fn flush_text<S: EventSink>(&mut self, cache: &str, v: usize, i: usize, sink: &mut S) {
        if v < i {
            self.fragments.push(cache[v..i].to_string());
        } else if self.fragments.is_empty() {
            return;
        }
        sink.accept(Event::Text {
            content: self.fragments.join(" "),
        });
        self.fragments.clear();
    }

    /// A key with no value becomes a zero-value attribute.
    fn flush_pending_key(&mut self) {
        let key = std::mem::take(&mut self.key);
        self.attrs.insert(key, String::new());
    }

    fn flush_value(&mut self, cache: &str, v: usize, i: usize) {
        let key = std::mem::take(&mut self.key);
        self.attrs.insert(key, cache[v..i].to_string());
        self.quote = None;
        self.has_equal = false;
    }

    /// Finalize the tag being built: emit Open and/or Close, pick the next
    /// lexical state from the finalized name, and clear the per-tag fields.
    ///
    /// `has_equal` deliberately survives finalize, so a dangling `=` from a
    /// `<a k=>`-style tag carries into the next one; see the
    /// malformed-markup integration tests.
    fn flush_tag<S: EventSink>(&mut self, sink: &mut S) -> State {
        let name = std::mem::take(&mut self.name);
        let attrs = std::mem::take(&mut self.attrs);

        // next state follows the name unconditionally, so a stray </script>
        // in plain text still switches to the raw body state
        let next = match name.as_str() {
            "script" => State::RawScript,
            "style" => State::RawStyle,
            "!--" => State::RawComment,
            _ => State::Text,
        };

        match (!self.is_close, self.is_self_close || self.is_close) {
            (true, true) => {
                sink.accept(Event::Open {
                    name: name.clone(),
                    attrs,
                });
                sink.accept(Event::Close { name });
            }
            (true, false) => sink.accept(Event::Open { name, attrs }),
            (false, _) => sink.accept(Event::Close { name }),
        }

        self.is_close = false;
        self.is_self_close = false;
        next
    }

    /// End of a raw-text body: emit the buffered body (if non-empty)
    /// verbatim, then the Close for the containing element. `end` excludes
    /// the terminator literal.
    fn flush_raw<S: EventSink>(
        &mut self,
        cache: &str,
        v: usize,
        end: usize,
        name: &str,
        sink: &mut S,
    ) {
        if v < end {
            sink.accept(Event::Text {
                content: cache[v..end].to_string(),
            });
        }
        sink.accept(Event::Close {
            name: name.to_string(),
        });
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
