//! Stream the rewritten page into anything implementing `std::io::Write`.
use std::io::{self, Write};

use crate::{Fragment, Snippets, Writer};

/// A [`IoWriter`] streams the rewritten page into any type that implements `std::io::Write`.
///
/// No buffering is done here; wrap the sink in a `std::io::BufWriter` if every chunk should not
/// turn into its own `write` calls.
///
/// Example:
///
/// ```rust
/// use pageinject::{IoWriter, PageScanProcessor, Snippets};
///
/// let mut writer = IoWriter::new(Vec::new(), Snippets::new("[h]", "[f]"));
/// let processor = PageScanProcessor::new("page.html");
/// processor.process(&mut writer, "<head></head><body></body>")?;
/// processor.finish(&mut writer)?;
///
/// assert_eq!(writer.into_inner(), b"<head>[h]</head><body>[f]</body>");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct IoWriter<W: Write> {
    inner: W,
    snippets: Snippets,
}

impl<W: Write> IoWriter<W> {
    /// Construct a new `IoWriter` around `inner`, expanding fragments with `snippets`.
    pub fn new(inner: W, snippets: Snippets) -> Self {
        IoWriter { inner, snippets }
    }

    /// Gets a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwraps this `IoWriter`, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Writer for IoWriter<W> {
    type Error = io::Error;

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        self.inner.write_all(text.as_bytes())
    }

    fn write_generated_code(&mut self, fragment: Fragment) -> Result<(), Self::Error> {
        self.inner.write_all(self.snippets.get(fragment).as_bytes())
    }
}
