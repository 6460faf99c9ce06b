//! Rendering helpers shared by the integration tests.
use std::convert::Infallible;

use pageinject::{Fragment, PageScanProcessor, Writer};
use pretty_assertions::assert_eq;

/// A writer that renders fragments as `{HEADER}` and `{FOOTER}` markers and also keeps the plain
/// text on the side.
#[derive(Debug, Default)]
pub struct MarkerWriter {
    pub output: String,
    pub text: String,
    pub fragments: Vec<Fragment>,
}

impl Writer for MarkerWriter {
    type Error = Infallible;

    fn write_text(&mut self, text: &str) -> Result<(), Infallible> {
        self.output.push_str(text);
        self.text.push_str(text);
        Ok(())
    }

    fn write_generated_code(&mut self, fragment: Fragment) -> Result<(), Infallible> {
        self.output.push_str(match fragment {
            Fragment::Header => "{HEADER}",
            Fragment::Footer => "{FOOTER}",
        });
        self.fragments.push(fragment);
        Ok(())
    }
}

/// Run `chunks` through a fresh processor and check the invariants every page render has to
/// uphold.
pub fn render<S: AsRef<str>>(chunks: &[S]) -> MarkerWriter {
    let processor = PageScanProcessor::new("test.jsp");
    let mut writer = MarkerWriter::default();

    for chunk in chunks {
        processor.process(&mut writer, chunk.as_ref()).unwrap();
    }
    let injections = processor.finish(&mut writer).unwrap();

    let input: String = chunks.iter().map(AsRef::as_ref).collect();
    assert_eq!(writer.text, input, "text was not passed through unchanged");

    let headers = writer.fragments.iter().filter(|f| **f == Fragment::Header).count();
    let footers = writer.fragments.iter().filter(|f| **f == Fragment::Footer).count();
    assert!(headers <= 1, "{} headers written", headers);
    assert!(footers <= 1, "{} footers written", footers);
    assert_eq!(injections.header, headers == 1);
    assert_eq!(injections.footer, footers == 1);
    if headers == 1 && footers == 1 {
        assert_eq!(writer.fragments, vec![Fragment::Header, Fragment::Footer]);
    }

    writer
}
