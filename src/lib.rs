#![deny(missing_docs)]
// Pages are rendered from user templates and can contain anything.
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod machine;
mod pattern;
mod processor;
mod render;
mod snippets;
mod state;
mod utils;
pub mod writers;

#[doc(hidden)]
pub mod testutils;

pub use processor::{Injections, PageScanProcessor};
pub use render::{inject, PageRender};
pub use snippets::Snippets;
pub use state::TagState;
pub use writers::callback::{CallbackWriter, WriterEvent};
pub use writers::io::IoWriter;
pub use writers::string::StringWriter;
pub use writers::{Fragment, Writer};
