use std::convert::Infallible;

use pageinject::{Fragment, PageScanProcessor, Writer};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Recorder {
    text: String,
    fragments: Vec<Fragment>,
}

impl Writer for Recorder {
    type Error = Infallible;

    fn write_text(&mut self, text: &str) -> Result<(), Infallible> {
        assert!(!text.is_empty(), "empty text written");
        self.text.push_str(text);
        Ok(())
    }

    fn write_generated_code(&mut self, fragment: Fragment) -> Result<(), Infallible> {
        self.fragments.push(fragment);
        Ok(())
    }
}

/// Cut `s` into chunks whose lengths are picked by the input itself.
///
/// Every byte below 0x20 ends a chunk right after it. That keeps the lengths under the
/// fuzzer's control while the rest of the input stays readable markup.
pub fn split_chunks(s: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if (c as u32) < 0x20 {
            chunks.push(&s[start..i + 1]);
            start = i + 1;
        }
    }
    if start < s.len() {
        chunks.push(&s[start..]);
    }

    chunks
}

/// Validates the guarantees every page render has, whatever the markup.
///
/// This checks that:
/// 1. Scanning never panics.
/// 2. Every byte of text is written once and in order.
/// 3. Each fragment is written at most once, the header before the footer.
/// 4. The reported injections match what the writer saw.
pub fn check_invariants(chunks: &[&str]) {
    let processor = PageScanProcessor::new("fuzz");
    let mut recorder = Recorder::default();

    for chunk in chunks {
        processor.process(&mut recorder, chunk).unwrap();
    }
    let injections = processor.finish(&mut recorder).unwrap();

    assert_eq!(recorder.text, chunks.concat());

    match recorder.fragments.as_slice() {
        [] | [Fragment::Header] | [Fragment::Footer] | [Fragment::Header, Fragment::Footer] => {}
        other => panic!("unexpected fragments {:?}", other),
    }

    assert_eq!(
        injections.header,
        recorder.fragments.contains(&Fragment::Header)
    );
    assert_eq!(
        injections.footer,
        recorder.fragments.contains(&Fragment::Footer)
    );
}
