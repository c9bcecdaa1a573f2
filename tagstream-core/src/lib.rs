//! tagstream core tokenizer
//!
//! Incremental, chunk-oblivious tokenizer for markup text. Converts a
//! stream of chunks - of any size, down to single characters - into
//! structural events (element open with attributes, element close, text)
//! without holding the full document in memory, and produces the identical
//! event sequence regardless of how the input was split.
//!
//! # Architecture
//!
//! - **tokenizer.rs** - the lexical state machine, pending buffer, and
//!   flush logic
//! - **matcher.rs** - boundary-spanning literal matcher for raw-text
//!   terminators (`-->`, `</script>`, `</style>`)
//! - **event.rs** - Event enum, insertion-ordered AttrMap, EventSink trait
//!
//! # Example
//!
//! ```
//! use tagstream_core::{Event, Tokenizer};
//!
//! let mut events = Vec::new();
//! let mut sink = |e: Event| events.push(e);
//! let mut tokenizer = Tokenizer::new();
//!
//! // chunk boundaries can fall anywhere, even inside a terminator
//! tokenizer.feed("<script>let x = a <", &mut sink);
//! tokenizer.feed(" b;</scri", &mut sink);
//! tokenizer.feed("pt>", &mut sink);
//! tokenizer.finish(&mut sink);
//!
//! assert_eq!(
//!     events,
//!     vec![
//!         Event::Open { name: "script".into(), attrs: Default::default() },
//!         Event::Text { content: "let x = a < b;".into() },
//!         Event::Close { name: "script".into() },
//!     ],
//! );
//! ```

pub mod event;
mod matcher;
pub mod tokenizer;

pub use event::{AttrMap, Event, EventSink};
pub use tokenizer::{Options, Tokenizer};
