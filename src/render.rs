use crate::{Injections, PageScanProcessor, Snippets, StringWriter, Writer};

/// One page render: a [`PageScanProcessor`] together with the writer it feeds.
///
/// A driver that cannot hold both values next to each other can keep a `PageRender` per
/// request instead and feed it chunks as the page is produced. End every render with
/// [`PageRender::finish`]: a render that is dropped early loses the tail of a tag cut off by the
/// last chunk.
///
/// ```rust
/// use pageinject::{PageRender, Snippets, StringWriter};
///
/// let mut render = PageRender::new("/home", StringWriter::new(Snippets::new("H", "F")));
/// for chunk in ["<head>", "</head><bo", "dy></body>"] {
///     render.feed(chunk).unwrap();
/// }
///
/// let (writer, injections) = render.finish().unwrap();
/// assert!(injections.is_complete());
/// assert_eq!(writer.into_string(), "<head>H</head><body>F</body>");
/// ```
#[derive(Debug)]
#[must_use = "a render has to be finished to write out held-back markup"]
pub struct PageRender<W> {
    processor: PageScanProcessor,
    writer: W,
}

impl<W: Writer> PageRender<W> {
    /// Start rendering the page identified by `page` into `writer`.
    pub fn new(page: impl Into<String>, writer: W) -> Self {
        PageRender {
            processor: PageScanProcessor::new(page),
            writer,
        }
    }

    /// Scan the next chunk of the page.
    pub fn feed(&mut self, chunk: &str) -> Result<(), W::Error> {
        self.processor.process(&mut self.writer, chunk)
    }

    /// The processor driving this render.
    pub fn processor(&self) -> &PageScanProcessor {
        &self.processor
    }

    /// The writer receiving the output.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// The writer receiving the output, for draining what was written so far.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// End the render and hand back the writer.
    pub fn finish(mut self) -> Result<(W, Injections), W::Error> {
        let injections = self.processor.finish(&mut self.writer)?;
        Ok((self.writer, injections))
    }
}

/// Rewrite a whole page given as a sequence of chunks.
///
/// ```rust
/// use pageinject::{inject, Snippets};
///
/// let snippets = Snippets::new("<script src=h.js></script>", "<script src=f.js></script>");
/// assert_eq!(
///     inject(["<title>t</title></head>", "<p>x</p></body>"], &snippets),
///     "<title>t</title><script src=h.js></script></head><p>x</p><script src=f.js></script></body>"
/// );
/// ```
pub fn inject<'a, I>(chunks: I, snippets: &Snippets) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let processor = PageScanProcessor::new("<inline>");
    let mut writer = StringWriter::new(snippets.clone());

    for chunk in chunks {
        if let Err(e) = processor.process(&mut writer, chunk) {
            match e {}
        }
    }
    if let Err(e) = processor.finish(&mut writer) {
        match e {}
    }

    writer.into_string()
}
