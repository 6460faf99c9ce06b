use std::borrow::Cow;
use std::cell::Cell;
use std::fmt;

use crate::pattern::{find_comment, split_incomplete_tag};
use crate::utils::trace_log;
use crate::{Fragment, TagState, Writer};

/// Which generated-code fragments a page received.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Injections {
    /// The header was written before the end of the head section.
    pub header: bool,
    /// The footer was written before the end of the body.
    pub footer: bool,
}

impl Injections {
    /// Whether both fragments were written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.header && self.footer
    }
}

/// Drives a [`TagState`] across all output chunks of one page render.
///
/// Create one per page render and pass every chunk of the page's markup through
/// [`PageScanProcessor::process`], in order, followed by one call to
/// [`PageScanProcessor::finish`]. The header and footer are each written at most once.
///
/// All methods take `&self`, so a writer can keep a shared handle to the processor that feeds
/// it. If such a writer calls back into the processor while a chunk is being scanned, that
/// nested call does nothing.
///
/// ```rust
/// use pageinject::{PageScanProcessor, Snippets, StringWriter, TagState};
///
/// let processor = PageScanProcessor::new("/index.jsp");
/// let mut writer = StringWriter::new(Snippets::new("<h/>", "<f/>"));
///
/// processor.process(&mut writer, "<html><head></he").unwrap();
/// assert_eq!(processor.state(), TagState::PreMeta);
/// processor.process(&mut writer, "ad><body>x</body></html>").unwrap();
/// let injections = processor.finish(&mut writer).unwrap();
///
/// assert!(injections.is_complete());
/// assert_eq!(writer.as_str(), "<html><head><h/></head><body>x<f/></body></html>");
/// ```
pub struct PageScanProcessor {
    page: String,
    current: Cell<TagState>,
    busy: Cell<bool>,
    /// Incomplete tag at the end of the previous chunk.
    pending: Cell<String>,
    injections: Cell<Injections>,
}

impl PageScanProcessor {
    /// Create a processor in [`TagState::Head`] for the page identified by `page`.
    ///
    /// The identifier only shows up in log output. Every processor must end with a call to
    /// [`PageScanProcessor::finish`], or the tail of a tag cut off by the last chunk is never
    /// written.
    pub fn new(page: impl Into<String>) -> Self {
        let page = page.into();
        log::debug!("{}: scanning for generated code insertion points", page);

        PageScanProcessor {
            page,
            current: Cell::new(TagState::Head),
            busy: Cell::new(false),
            pending: Cell::new(String::new()),
            injections: Cell::new(Injections::default()),
        }
    }

    /// The page this processor was created for.
    pub fn page(&self) -> &str {
        &self.page
    }

    /// The state the next chunk will be scanned in.
    pub fn state(&self) -> TagState {
        self.current.get()
    }

    /// The fragments written so far.
    pub fn injections(&self) -> Injections {
        self.injections.get()
    }

    /// Scan one chunk of the page and write it to `writer`, with fragments spliced in.
    ///
    /// Complete `<!-- ... -->` comments are written verbatim without being scanned. A tag cut
    /// short by the end of `text` is held back and scanned together with the next chunk, or
    /// written by [`PageScanProcessor::finish`].
    ///
    /// Text held back here is lost unless [`PageScanProcessor::finish`] is called after the last
    /// chunk.
    ///
    /// Errors from `writer` are returned as they are. The chunk may have been written only in
    /// part. The processor stays usable afterwards and resumes from the state the failing write
    /// happened in, so a fragment that was already written is never written again.
    pub fn process<W: Writer + ?Sized>(&self, writer: &mut W, text: &str) -> Result<(), W::Error> {
        if self.busy.replace(true) {
            log::trace!("{}: ignoring chunk written while scanning", self.page);
            return Ok(());
        }
        let _busy = BusyGuard(&self.busy);

        let mut held = self.pending.take();
        let text = if held.is_empty() {
            Cow::Borrowed(text)
        } else {
            held.push_str(text);
            Cow::Owned(held)
        };

        let (ready, held) = if self.current.get().is_terminal() {
            (&*text, "")
        } else {
            split_incomplete_tag(&text)
        };
        if !held.is_empty() {
            trace_log!("holding back {}", crate::utils::preview(held));
        }
        self.pending.set(held.to_owned());

        let mut writer = Tracking {
            inner: writer,
            injections: &self.injections,
        };

        let mut rest = ready;
        while let Some(comment) = find_comment(rest) {
            self.feed(&mut writer, &rest[..comment.start])?;
            trace_log!(
                "passing through comment {}",
                crate::utils::preview(&rest[comment.start..comment.end])
            );
            writer.write_text(&rest[comment.start..comment.end])?;
            rest = &rest[comment.end..];
        }
        self.feed(&mut writer, rest)
    }

    fn feed<W: Writer + ?Sized>(&self, writer: &mut W, text: &str) -> Result<(), W::Error> {
        if text.is_empty() {
            return Ok(());
        }

        // keep the progress made before a failing write, fragments already out stay out
        let mut state = self.current.get();
        let result = state.advance(writer, text);
        self.current.set(state);
        result
    }

    /// Write any held-back text and return which fragments the page received.
    ///
    /// Call this once after the last chunk. Held-back text is written unchanged since no more
    /// markup can complete it.
    pub fn finish<W: Writer + ?Sized>(&self, writer: &mut W) -> Result<Injections, W::Error> {
        if self.busy.get() {
            log::trace!("{}: ignoring finish while scanning", self.page);
            return Ok(self.injections.get());
        }

        let held = self.pending.take();
        if !held.is_empty() {
            writer.write_text(&held)?;
        }

        let injections = self.injections.get();
        log::debug!(
            "{}: finished in state {} with {:?}",
            self.page,
            self.current.get(),
            injections
        );
        if !injections.header {
            log::debug!("{}: no place for the header was found", self.page);
        }
        if !injections.footer {
            log::debug!("{}: no place for the footer was found", self.page);
        }

        Ok(injections)
    }
}

impl fmt::Debug for PageScanProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageScanProcessor")
            .field("page", &self.page)
            .field("current", &self.current.get())
            .field("busy", &self.busy.get())
            .field("injections", &self.injections.get())
            .finish_non_exhaustive()
    }
}

impl Drop for PageScanProcessor {
    fn drop(&mut self) {
        let held = self.pending.get_mut();
        if !held.is_empty() {
            log::warn!(
                "{}: dropped without finish, {} bytes of markup were never written",
                self.page,
                held.len()
            );
        }
    }
}

struct BusyGuard<'a>(&'a Cell<bool>);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Records fragments on their way to the real writer.
struct Tracking<'a, W: ?Sized> {
    inner: &'a mut W,
    injections: &'a Cell<Injections>,
}

impl<W: Writer + ?Sized> Writer for Tracking<'_, W> {
    type Error = W::Error;

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        self.inner.write_text(text)
    }

    fn write_generated_code(&mut self, fragment: Fragment) -> Result<(), Self::Error> {
        let mut seen = self.injections.get();
        match fragment {
            Fragment::Header => {
                debug_assert!(!seen.header, "header written twice");
                debug_assert!(!seen.footer, "header written after footer");
                seen.header = true;
            }
            Fragment::Footer => {
                debug_assert!(!seen.footer, "footer written twice");
                seen.footer = true;
            }
        }

        self.inner.write_generated_code(fragment)?;
        self.injections.set(seen);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;
    use crate::{Snippets, StringWriter};

    fn writer() -> StringWriter {
        StringWriter::new(Snippets::new("{H}", "{F}"))
    }

    #[test]
    fn test_initial_state() {
        let processor = PageScanProcessor::new("a.jsp");
        assert_eq!(processor.page(), "a.jsp");
        assert_eq!(processor.state(), TagState::Head);
        assert_eq!(processor.injections(), Injections::default());
    }

    #[test]
    fn test_holds_incomplete_tag() {
        let processor = PageScanProcessor::new("a.jsp");
        let mut writer = writer();

        processor.process(&mut writer, "<html><hea").unwrap();
        assert_eq!(writer.as_str(), "<html>");
        assert_eq!(processor.state(), TagState::Head);

        processor.process(&mut writer, "d>").unwrap();
        assert_eq!(writer.as_str(), "<html><head>");
        assert_eq!(processor.state(), TagState::PreMeta);
    }

    #[test]
    fn test_finish_writes_held_text() {
        let processor = PageScanProcessor::new("a.jsp");
        let mut writer = writer();

        processor.process(&mut writer, "<p>a</p></bo").unwrap();
        assert_eq!(writer.as_str(), "<p>a</p>");

        let injections = processor.finish(&mut writer).unwrap();
        assert_eq!(writer.as_str(), "<p>a</p></bo");
        assert_eq!(injections, Injections::default());
    }

    #[test]
    fn test_does_not_hold_in_done() {
        let processor = PageScanProcessor::new("a.jsp");
        let mut writer = writer();

        processor.process(&mut writer, "</head></body>").unwrap();
        assert_eq!(processor.state(), TagState::Done);
        processor.process(&mut writer, "</ht").unwrap();
        assert_eq!(writer.as_str(), "{H}</head>{F}</body></ht");
    }

    #[test]
    fn test_comments_are_not_scanned() {
        let processor = PageScanProcessor::new("a.jsp");
        let mut writer = writer();

        processor
            .process(&mut writer, "<!-- <head></head> --><head><!-- <script> --></head>")
            .unwrap();
        assert_eq!(
            writer.as_str(),
            "<!-- <head></head> --><head><!-- <script> -->{H}</head>"
        );
        assert_eq!(processor.state(), TagState::Body);
    }

    #[derive(Debug)]
    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("broken pipe")
        }
    }

    impl std::error::Error for Broken {}

    struct FailOnFragment;

    impl Writer for FailOnFragment {
        type Error = Broken;

        fn write_text(&mut self, _text: &str) -> Result<(), Broken> {
            Ok(())
        }

        fn write_generated_code(&mut self, _fragment: Fragment) -> Result<(), Broken> {
            Err(Broken)
        }
    }

    #[test]
    fn test_writer_error_releases_processor() {
        let processor = PageScanProcessor::new("a.jsp");

        assert!(processor
            .process(&mut FailOnFragment, "<head></head>")
            .is_err());
        assert!(!processor.busy.get());
        assert_eq!(processor.injections(), Injections::default());

        let mut writer = writer();
        processor.process(&mut writer, "<body></body>").unwrap();
        assert_eq!(writer.as_str(), "<body>{F}</body>");
    }

    #[test]
    fn test_finish_while_busy() {
        let processor = PageScanProcessor::new("a.jsp");
        let mut writer = writer();
        processor.process(&mut writer, "<head").unwrap();

        processor.busy.set(true);
        assert_eq!(processor.finish(&mut writer).unwrap(), Injections::default());
        assert_eq!(writer.as_str(), "");
        processor.busy.set(false);

        processor.finish(&mut writer).unwrap();
        assert_eq!(writer.as_str(), "<head");
    }
}
