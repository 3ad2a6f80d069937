//! `reify_core` is the core library for the [reify](https://github.com/periodicaidan/reify) template compiler. It compiles a small slot-based templating language into a regular expression (for an input template) and a replacement string (for an output template), so that markup matching one shape can be rewritten into another while carrying the captured content across.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Input template
//!   → Slot scanner (splits literal text from `{{...}}` slots)
//!   → Input slot compiler (classifies slots, numbers capture groups)
//!   → Dialect renderer (escapes literals, optionally compresses whitespace)
//!   → Pattern
//!
//! Output template
//!   → Slot scanner
//!   → Output slot compiler (binds slots to the input's capture groups)
//!   → Dialect renderer
//!   → Replacement
//! ```
//!
//! ## Slot Syntax
//!
//! Input templates:
//!
//! - `{{}}`: captures anything; referenced by its position.
//! - `{{title}}`: captures anything under the label `title`. Labels starting
//!   with a digit or `-` are stored with a `_` prefix, so `{{1}}` is `_1`.
//! - `{{:}}`: matches anything without capturing or being numbered.
//! - `{{:x}}`: matches zero or more `x` without capturing.
//!
//! Output templates:
//!
//! - `{{2}}`, `{{title}}`: the content of one slot.
//! - `{{1 2 3}}`, `{{1..3}}`, `{{author title}}`: several slots joined with no
//!   separator.
//!
//! ## Quick Start
//!
//! ```rust
//! use reify_core::compile;
//!
//! let compiler = compile(
//!   "<title>{{title}}</title><link>{{link}}</link>",
//!   Some(r#"<a href="{{link}}">{{title}}</a>"#),
//!   true,
//! )
//! .unwrap();
//!
//! let document = "<title>Home</title><link>/</link>";
//! assert_eq!(compiler.substitute(document).unwrap(), r#"<a href="/">Home</a>"#);
//! ```

pub use compiler::*;
pub use config::*;
pub use error::*;
pub use input::*;
pub use matcher::*;
pub use output::*;
pub use scanner::*;

mod compiler;
pub mod config;
pub mod dialect;
#[allow(unused_assignments)]
mod error;
pub mod escape;
mod input;
mod matcher;
mod output;
mod scanner;

#[cfg(test)]
mod __fixtures;
