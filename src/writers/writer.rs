use std::fmt;

/// One of the two generated code fragments spliced into a page.
///
/// The scanner never looks at the fragment's source text. It only decides where each one goes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Fragment {
    /// Goes right inside `<head>`, before any content that is not a `<meta>`, `<title>` or
    /// comment.
    Header,
    /// Goes right before `</body>`, or before `</html>` if the page has no `</body>`.
    Footer,
}

impl Fragment {
    /// A short lowercase name for the fragment, `"header"` or `"footer"`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match *self {
            Fragment::Header => "header",
            Fragment::Footer => "footer",
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

/// An object receiving the scanner's output.
///
/// The scanner calls [`Writer::write_text`] with every byte of its input exactly once and in
/// order, and [`Writer::write_generated_code`] at most once per [`Fragment`]. Concatenating
/// all text passed to `write_text` therefore reproduces the input page.
///
/// Errors returned from either method are passed back to the caller of
/// [`crate::PageScanProcessor::process`] unchanged. A driver that sees one is expected to give up
/// on injecting into that page.
pub trait Writer {
    /// The error returned by this writer.
    type Error: std::error::Error;

    /// Emit a slice of literal markup exactly as given. Never called with an empty slice.
    fn write_text(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Emit the generated code for `fragment`.
    fn write_generated_code(&mut self, fragment: Fragment) -> Result<(), Self::Error>;
}

impl<W: Writer + ?Sized> Writer for &mut W {
    type Error = W::Error;

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        (**self).write_text(text)
    }

    fn write_generated_code(&mut self, fragment: Fragment) -> Result<(), Self::Error> {
        (**self).write_generated_code(fragment)
    }
}
