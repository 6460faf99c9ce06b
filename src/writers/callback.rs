//! Consume the scanner's output as a series of events through a callback.
//!
//! The [crate::StringWriter] is the easy way to get a rewritten page. This writer is for drivers
//! that need to route output somewhere else, such as into the nodes of a template compiler.
//! Text is borrowed straight from the chunk being scanned.
//!
//! ```
//! use std::convert::Infallible;
//!
//! use pageinject::{CallbackWriter, Fragment, PageScanProcessor, WriterEvent};
//!
//! let mut fragments = Vec::new();
//! let mut writer = CallbackWriter::new(|event: WriterEvent<'_>| -> Result<(), Infallible> {
//!     if let WriterEvent::GeneratedCode(fragment) = event {
//!         fragments.push(fragment);
//!     }
//!     Ok(())
//! });
//!
//! let processor = PageScanProcessor::new("index.jsp");
//! processor.process(&mut writer, "<head></head><body></body>").unwrap();
//! drop(writer);
//!
//! assert_eq!(fragments, vec![Fragment::Header, Fragment::Footer]);
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::{Fragment, Writer};

/// Events passed to the closure of a [CallbackWriter].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriterEvent<'a> {
    /// A slice of the page's literal markup, to be emitted unchanged.
    Text(&'a str),
    /// The insertion point of a generated code fragment.
    GeneratedCode(Fragment),
}

/// A writer that forwards every [WriterEvent] to a closure.
///
/// The closure's error type becomes the writer's error type, so a failing sink can abort the
/// scan of the current chunk.
pub struct CallbackWriter<F, E> {
    callback: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> CallbackWriter<F, E>
where
    F: FnMut(WriterEvent<'_>) -> Result<(), E>,
    E: std::error::Error,
{
    /// Create a new writer calling `callback` for every event.
    pub fn new(callback: F) -> Self {
        CallbackWriter {
            callback,
            _error: PhantomData,
        }
    }
}

impl<F, E> fmt::Debug for CallbackWriter<F, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackWriter").finish_non_exhaustive()
    }
}

impl<F, E> Writer for CallbackWriter<F, E>
where
    F: FnMut(WriterEvent<'_>) -> Result<(), E>,
    E: std::error::Error,
{
    type Error = E;

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        (self.callback)(WriterEvent::Text(text))
    }

    fn write_generated_code(&mut self, fragment: Fragment) -> Result<(), Self::Error> {
        (self.callback)(WriterEvent::GeneratedCode(fragment))
    }
}
