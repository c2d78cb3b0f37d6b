//! HTML Document Cursor
//!
//! Navigate a parsed HTML tree with a handful of method calls instead of
//! hand-written recursive descent: find the `<body>`, walk every `<meta>`,
//! step to the next element, climb to a parent.
//!
//! ## Core Design
//!
//! ```text
//! HTML bytes → html5ever → DomArena (owned) → Arc<DomArena> ← Cursor, Cursor, ...
//!                              ↓
//!                        NodeId (u32) links
//! ```
//!
//! Nodes live in an arena and refer to each other by index, so every move
//! is a single lookup and there are no ownership cycles. Cursors share the
//! tree read-only; each one carries only its own position.
//!
//! ```
//! use html_cursor::Cursor;
//!
//! let mut cursor = Cursor::parse("<meta name=a><meta name=b>").unwrap();
//! let mut names = Vec::new();
//! if cursor.first_meta().is_ok() {
//!     loop {
//!         names.extend(cursor.node().attr("name").map(String::from));
//!         if cursor.next_meta().is_err() {
//!             break;
//!         }
//!     }
//! }
//! assert_eq!(names, ["a", "b"]);
//! ```

pub mod arena;
pub mod cursor;
pub mod error;
pub mod parser;
pub mod types;
pub mod utils;

pub use arena::DomArena;
pub use cursor::{Cursor, Position};
pub use error::{DomError, Result};
pub use parser::{DomParser, ParseConfig};
pub use types::*;

/// Tag identifiers: interned local names, `local_name!("body")`
pub use html5ever::{local_name, LocalName};
