//! Markstream Core
//!
//! Streaming tokenization engine for markup-style document parsers.
//! Grammars plug boundary predicates and node kinds into it; the engine
//! reads characters, cuts entries and delivers start/end events.
//!
//! # Architecture
//!
//! - **source.rs** - Raw character inputs, line-ending normalization, positions
//! - **entry.rs** - Entry under construction, boundary predicates
//! - **tokenizer.rs** - Entry extraction loop
//! - **event.rs** - Event records, handlers, emitter
//! - **nesting.rs** - Opt-in start/end pairing check
//! - **tag.rs** - Tag hierarchies for grammar collaborators
//! - **error.rs** - ParseError with positional context
//!
//! # Example
//!
//! ```
//! use markstream_core::{EventEmitter, EventLog, Tokenizer};
//!
//! let mut tokenizer = Tokenizer::from_text("# greeting\r\nhello\n");
//! let mut emitter = EventEmitter::new("lines", EventLog::new());
//!
//! tokenizer
//!     .for_each_entry(markstream_core::EndOfLine, |_, line| {
//!         match line.strip_prefix("# ") {
//!             Some(comment) => emitter.comment(comment),
//!             None => emitter.text(line),
//!         }
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! assert_eq!(emitter.handler().lines()[0], "START_NODE COMMENT greeting");
//! assert_eq!(tokenizer.line_count(), 2);
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod event;
pub mod nesting;
pub mod source;
pub mod tag;
pub mod tokenizer;

pub use config::TokenizerConfig;
pub use entry::{Boundary, EndOfLine, Entry};
pub use error::{BoundaryError, ErrorKind, ParseError};
pub use event::{EventEmitter, EventLog, Handler, MarkupNode, ParsingData, ParsingEvent};
pub use nesting::{Nesting, NestingError};
pub use source::{CharRead, CharSource, Position, StrChars, Utf8Chars, LINE_FEED};
pub use tag::{Tag, TagId, TagTable};
pub use tokenizer::Tokenizer;
