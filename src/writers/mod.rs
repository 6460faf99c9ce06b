//! A [Writer] is where the scanner sends its output.
//!
//! While [crate::PageScanProcessor] walks through a page, it hands every slice of markup back to
//! the writer unchanged, and asks it to emit a [Fragment] at the header and footer insertion
//! points. What a fragment expands to is entirely up to the writer.
//!
//! The following writers are available:
//!
//! * [string::StringWriter], if you want the rewritten page as a `String`.
//! * [io::IoWriter], to stream the rewritten page into any `std::io::Write`.
//! * [callback::CallbackWriter], to observe every event through a closure.
//! * Implementing your own [Writer], for example to emit into a template compiler's node tree.
pub mod callback;
pub mod io;
pub mod string;

mod writer;

pub use writer::{Fragment, Writer};
