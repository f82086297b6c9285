//! # emx-paste
//!
//! Merge corresponding or subsequent lines of text streams, `paste` style.
//!
//! ## Modes
//!
//! - **Parallel** (default): the n-th lines of all inputs become one output
//!   line, separated by delimiters. Inputs that run out early contribute
//!   empty fields so columns stay aligned.
//! - **Sequential** (`-s`): all lines of one input become one output line;
//!   each input yields its own line.
//!
//! ```text
//! $ printf 'a\nb\n' > x; printf '1\n2\n3\n' > y
//! $ emx-paste x y          $ emx-paste -s -d , x y
//! a	1                    a,b
//! b	2                    1,2,3
//! 	3
//! ```
//!
//! ## Delimiters
//!
//! The delimiter list is used cyclically: field (or line) `i` is followed by
//! delimiter `i mod len`. Backslash escapes `\\ \a \b \f \n \r \t \v` are
//! resolved first; any other escape is an error.
//!
//! All text is processed as UTF-8 runes, not bytes.

pub mod delimiter;
pub mod error;
pub mod escape;
pub mod parallel;
pub mod paste;
pub mod rune;
pub mod sequential;
pub mod stream;

pub use delimiter::Delimiters;
pub use error::{EscapeError, PasteError, Result};
pub use paste::{MergeMode, PasteConfig, Paster, DEFAULT_DELIMITERS};
pub use rune::{RuneReader, RuneWriter};
pub use stream::{Source, Stream, STDIN_OPERAND};
