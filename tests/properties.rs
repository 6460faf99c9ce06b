use std::convert::Infallible;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use pageinject::{
    inject, CallbackWriter, Fragment, IoWriter, PageRender, PageScanProcessor, Snippets,
    StringWriter, TagState, WriterEvent,
};
use pretty_assertions::assert_eq;

mod pages;

use pages::render;

/// Every way of cutting `input` in two must give `expected`.
fn assert_split_equivalent(input: &str, expected: &str) {
    assert_eq!(render(&[input]).output, expected);

    for (i, _) in input.char_indices().skip(1) {
        let (left, right) = input.split_at(i);
        assert_eq!(
            render(&[left, right]).output,
            expected,
            "split into {:?} and {:?}",
            left,
            right
        );
    }
}

#[test]
fn test_split_chunk_equivalence() {
    assert_split_equivalent(
        "<html><head>X</head><body>Y</body></html>",
        "<html><head>X{HEADER}</head><body>Y{FOOTER}</body></html>",
    );
}

#[test]
fn test_split_chunk_equivalence_uppercase() {
    assert_split_equivalent(
        "<HTML><HEAD><TITLE>t</TITLE></HEAD><BODY>b</BODY></HTML>",
        "<HTML><HEAD><TITLE>t</TITLE>{HEADER}</HEAD><BODY>b{FOOTER}</BODY></HTML>",
    );
}

#[test]
fn test_comment_opacity() {
    let writer = render(&["<head><!--<script>--></head>"]);
    assert_eq!(writer.output, "<head><!--<script>-->{HEADER}</head>");
    assert_eq!(writer.fragments, vec![Fragment::Header]);
}

#[test]
fn test_quote_immunity() {
    assert_eq!(
        render(&["<head><meta content=\"</head>\">Z</head>"]).output,
        "<head><meta content=\"</head>\">Z{HEADER}</head>"
    );
    assert_eq!(
        render(&["<head><meta content='</head>'>Z</head>"]).output,
        "<head><meta content='</head>'>Z{HEADER}</head>"
    );
}

#[test]
fn test_script_before_head() {
    assert_split_equivalent(
        "<script>foo</script><head>X</head>",
        "<script>foo</script><head>X{HEADER}</head>",
    );
}

#[test]
fn test_no_head_at_all() {
    let processor = PageScanProcessor::new("nohead.jsp");
    let mut writer = pages::MarkerWriter::default();
    processor.process(&mut writer, "<body>only body</body>").unwrap();

    assert_eq!(processor.state(), TagState::Done);
    assert_eq!(writer.fragments, vec![Fragment::Footer]);
    assert_eq!(writer.text, "<body>only body</body>");

    assert_split_equivalent("<body>only body</body>", "<body>only body{FOOTER}</body>");
}

#[test]
fn test_body_close_after_script_without_head() {
    // the closing body tag in the string literal is skipped, the real one gets the footer
    assert_eq!(
        render(&["<script>w('</body>')</script><p>x</p></body>"]).output,
        "<script>w('</body>')</script><p>x</p>{FOOTER}</body>"
    );
}

#[test]
fn test_script_in_body_is_skipped() {
    assert_eq!(
        render(&[
            "<head><title>T</title><link>",
            "</head><body><script>if(a</b)'</body>'</script></body>",
        ])
        .output,
        "<head><title>T</title>{HEADER}<link></head><body><script>if(a</b)'</body>'</script>{FOOTER}</body>"
    );
}

#[test]
fn test_reentrant_process_is_ignored() {
    let processor = Rc::new(PageScanProcessor::new("reentrant.jsp"));
    let inner = Rc::clone(&processor);
    let mut output = String::new();
    let mut nested_calls = 0;

    let mut writer = CallbackWriter::new(|event: WriterEvent<'_>| -> Result<(), Infallible> {
        match event {
            WriterEvent::Text(text) => output.push_str(text),
            WriterEvent::GeneratedCode(fragment) => {
                output.push_str(&format!("[{}]", fragment));

                // generated code is itself markup that a driver might try to scan
                let mut nested = StringWriter::default();
                inner
                    .process(&mut nested, "<head></head><body></body>")
                    .unwrap();
                assert_eq!(nested.as_str(), "");
                nested_calls += 1;
            }
        }
        Ok(())
    });

    processor
        .process(&mut writer, "<head></head><body></body>")
        .unwrap();
    processor.finish(&mut writer).unwrap();
    drop(writer);

    assert_eq!(nested_calls, 2);
    assert_eq!(
        output,
        format!(
            "<head>[{}]</head><body>[{}]</body>",
            Fragment::Header,
            Fragment::Footer
        )
    );
    assert!(processor.injections().is_complete());
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_io_error_is_propagated() {
    let processor = PageScanProcessor::new("broken.jsp");
    let mut writer = IoWriter::new(BrokenPipe, Snippets::default());

    let err = processor.process(&mut writer, "<head>").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert_eq!(processor.state(), TagState::Head);

    // the processor is not stuck in its busy state
    let mut writer = pages::MarkerWriter::default();
    processor.process(&mut writer, "</head>").unwrap();
    assert_eq!(writer.output, "{HEADER}</head>");
}

#[test]
fn test_no_second_header_after_failed_write() {
    let processor = PageScanProcessor::new("flaky.jsp");
    let mut output = String::new();
    let mut writes = 0;

    let mut writer = CallbackWriter::new(|event: WriterEvent<'_>| {
        writes += 1;
        if writes == 3 {
            return Err(fmt::Error);
        }
        match event {
            WriterEvent::Text(text) => output.push_str(text),
            WriterEvent::GeneratedCode(fragment) => output.push_str(&format!("[{}]", fragment)),
        }
        Ok(())
    });

    // the header goes out, then the text after it fails
    assert_eq!(
        processor.process(&mut writer, "<head></head><body>"),
        Err(fmt::Error)
    );
    assert_eq!(processor.state(), TagState::Body);
    assert!(processor.injections().header);

    processor.process(&mut writer, "<head></head>").unwrap();
    processor.finish(&mut writer).unwrap();
    drop(writer);

    assert_eq!(output, "<head>[header]<head></head>");
}

#[test]
fn test_callback_error_is_propagated() {
    let processor = PageScanProcessor::new("callback.jsp");
    let mut writer = CallbackWriter::new(|event: WriterEvent<'_>| match event {
        WriterEvent::Text(_) => Ok(()),
        WriterEvent::GeneratedCode(_) => Err(fmt::Error),
    });

    assert_eq!(processor.process(&mut writer, "<head>x"), Ok(()));
    assert_eq!(processor.process(&mut writer, "</head>"), Err(fmt::Error));
    assert!(!processor.injections().header);
}

#[test]
fn test_page_render_into_io() {
    let mut page = PageRender::new(
        "/io",
        IoWriter::new(Vec::new(), Snippets::new("<h/>", "<f/>")),
    );
    for chunk in ["<html><head", ">\n<meta charset=\"utf-8\">\n</he", "ad>", "<body>x</body>"] {
        page.feed(chunk).unwrap();
    }
    assert_eq!(page.processor().page(), "/io");
    assert_eq!(page.processor().state(), TagState::Done);

    let (writer, injections) = page.finish().unwrap();
    assert!(injections.is_complete());
    assert_eq!(
        String::from_utf8(writer.into_inner()).unwrap(),
        "<html><head>\n<meta charset=\"utf-8\">\n<h/></head><body>x<f/></body>"
    );
}

#[test]
fn test_inject_without_markers() {
    let snippets = Snippets::new("", "");
    let page = "<html><head></head><body></body></html>";
    assert_eq!(inject([page], &snippets), page);
}
