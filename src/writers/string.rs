//! The string writer is what powers the simple API that you see in the README.
use std::convert::Infallible;

use crate::{Fragment, Snippets, Writer};

/// A writer that collects the rewritten page into a `String`.
///
/// Fragments are expanded using the configured [`Snippets`].
#[derive(Clone, Debug, Default)]
pub struct StringWriter {
    snippets: Snippets,
    output: String,
}

impl StringWriter {
    /// Create an empty writer expanding fragments with `snippets`.
    pub fn new(snippets: Snippets) -> Self {
        StringWriter {
            snippets,
            output: String::new(),
        }
    }

    /// Everything written so far.
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Take everything written so far, leaving the writer empty.
    ///
    /// Useful when each chunk of output has to be handed on separately, such as one template
    /// node per chunk.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Consume the writer and return everything written.
    pub fn into_string(self) -> String {
        self.output
    }
}

impl Writer for StringWriter {
    type Error = Infallible;

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        self.output.push_str(text);
        Ok(())
    }

    fn write_generated_code(&mut self, fragment: Fragment) -> Result<(), Self::Error> {
        self.output.push_str(self.snippets.get(fragment));
        Ok(())
    }
}

#[test]
fn test_take() {
    let mut writer = StringWriter::new(Snippets::new("H", "F"));
    writer.write_text("<head>").unwrap();
    writer.write_generated_code(Fragment::Header).unwrap();
    assert_eq!(writer.take(), "<head>H");
    writer.write_generated_code(Fragment::Footer).unwrap();
    assert_eq!(writer.into_string(), "F");
}
