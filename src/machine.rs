use crate::pattern::{fast_find, find_byte, find_ci, find_open_tag, starts_with_ci};
use crate::utils::trace_log;
use crate::{Fragment, TagState, Writer};

/// What a state wants to happen after looking at a piece of text.
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum ControlToken<'a> {
    /// All text was written. Wait for the next chunk in the same state.
    Continue,
    /// Carry on with the remaining text in another state.
    SwitchTo(TagState, &'a str),
}

macro_rules! switch_to {
    ($state:ident, $text:expr) => {
        Ok(ControlToken::SwitchTo(TagState::$state, $text))
    };
}

/// Write all of `$text` and stay in the current state.
macro_rules! cont {
    ($writer:expr, $text:expr) => {{
        write_text($writer, $text)?;
        Ok(ControlToken::Continue)
    }};
}

impl TagState {
    /// Write `text` to `writer`, splicing in fragments where they belong, and return the state
    /// for the next chunk.
    ///
    /// Text that does not complete a pattern this state is waiting for is written unchanged and
    /// the state stays the same. This never fails on its own; errors come from `writer` only.
    ///
    /// ```rust
    /// use pageinject::{Snippets, StringWriter, TagState};
    ///
    /// let mut writer = StringWriter::new(Snippets::new("H", "F"));
    /// let state = TagState::Head.process(&mut writer, "<html><head><title>x</title>").unwrap();
    /// assert_eq!(state, TagState::PreMeta);
    ///
    /// let state = state.process(&mut writer, "</head><body></body>").unwrap();
    /// assert_eq!(state, TagState::Done);
    /// assert_eq!(writer.as_str(), "<html><head><title>x</title>H</head><body>F</body>");
    /// ```
    pub fn process<W: Writer + ?Sized>(
        self,
        writer: &mut W,
        text: &str,
    ) -> Result<TagState, W::Error> {
        let mut state = self;
        state.advance(writer, text)?;
        Ok(state)
    }

    /// Like [`TagState::process`], but updates `self` on every switch. When `writer` fails,
    /// `self` is the state the failing write happened in, so fragments written before the
    /// error are never written again.
    pub(crate) fn advance<W: Writer + ?Sized>(
        &mut self,
        writer: &mut W,
        text: &str,
    ) -> Result<(), W::Error> {
        let mut text = text;

        loop {
            match self.step(writer, text)? {
                ControlToken::Continue => return Ok(()),
                ControlToken::SwitchTo(next, rest) => {
                    trace_log!(
                        "switch_to: {} -> {} with {}",
                        self,
                        next,
                        crate::utils::preview(rest)
                    );
                    *self = next;
                    if rest.is_empty() {
                        return Ok(());
                    }
                    text = rest;
                }
            }
        }
    }

    fn step<'a, W: Writer + ?Sized>(
        self,
        writer: &mut W,
        text: &'a str,
    ) -> Result<ControlToken<'a>, W::Error> {
        match self {
            TagState::Head => states::head(writer, text),
            TagState::PreHeadScript => states::pre_head_script(writer, text),
            TagState::PreMeta => states::pre_meta(writer, text),
            TagState::Meta => states::meta(writer, text),
            TagState::Quote => states::quoted(writer, text, b'"'),
            TagState::SingleQuote => states::quoted(writer, text, b'\''),
            TagState::Comment => states::comment(writer, text),
            TagState::Title => states::title(writer, text),
            TagState::Body => states::body(writer, text),
            TagState::PostHeaderScript => states::post_header_script(writer, text),
            TagState::Done => states::done(writer, text),
        }
    }
}

/// Whether a `<script` whose match ends at `script_end` comes before another match ending at
/// `other_end`.
///
/// Without a script this is always false. A script with nothing to compare against wins.
pub(crate) fn earlier(script_end: Option<usize>, other_end: Option<usize>) -> bool {
    match (script_end, other_end) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(script_end), Some(other_end)) => other_end > script_end,
    }
}

#[inline]
fn write_text<W: Writer + ?Sized>(writer: &mut W, text: &str) -> Result<(), W::Error> {
    if text.is_empty() {
        Ok(())
    } else {
        writer.write_text(text)
    }
}

fn write_fragment<W: Writer + ?Sized>(writer: &mut W, fragment: Fragment) -> Result<(), W::Error> {
    trace_log!("write_generated_code: {}", fragment);
    writer.write_generated_code(fragment)
}

mod states {
    use super::*;

    pub(super) fn head<'a, W: Writer + ?Sized>(
        writer: &mut W,
        text: &'a str,
    ) -> Result<ControlToken<'a>, W::Error> {
        let script = find_ci(text, "<script");
        let script_end = script.map(|m| m.end);

        if let Some(head) = find_open_tag(text, "<head") {
            if earlier(script_end, Some(head.end)) {
                return switch_to!(PreHeadScript, text);
            }
            write_text(writer, &text[..head.end])?;
            return switch_to!(PreMeta, &text[head.end..]);
        }

        if let Some(close) = find_ci(text, "</head>") {
            return match script {
                Some(script) if earlier(script_end, Some(close.end)) => {
                    write_text(writer, &text[..script.start])?;
                    write_fragment(writer, Fragment::Header)?;
                    switch_to!(PostHeaderScript, &text[script.start..])
                }
                _ => {
                    write_text(writer, &text[..close.start])?;
                    write_fragment(writer, Fragment::Header)?;
                    switch_to!(Body, &text[close.start..])
                }
            };
        }

        // No head section at all. The header is not written on this path.
        if let Some(close) = find_ci(text, "</body>") {
            return if earlier(script_end, Some(close.end)) {
                switch_to!(PostHeaderScript, text)
            } else {
                switch_to!(Body, text)
            };
        }

        if script.is_some() {
            return match find_open_tag(text, "<body") {
                Some(body) if earlier(script_end, Some(body.end)) => {
                    switch_to!(PreHeadScript, text)
                }
                Some(_) => switch_to!(PostHeaderScript, text),
                // the head has not arrived yet
                None => switch_to!(PreHeadScript, text),
            };
        }

        cont!(writer, text)
    }

    pub(super) fn pre_head_script<'a, W: Writer + ?Sized>(
        writer: &mut W,
        text: &'a str,
    ) -> Result<ControlToken<'a>, W::Error> {
        match find_ci(text, "</script>") {
            Some(close) => {
                write_text(writer, &text[..close.end])?;
                switch_to!(Head, &text[close.end..])
            }
            None => cont!(writer, text),
        }
    }

    pub(super) fn pre_meta<'a, W: Writer + ?Sized>(
        writer: &mut W,
        text: &'a str,
    ) -> Result<ControlToken<'a>, W::Error> {
        let lt = match find_byte(b'<', text.as_bytes()) {
            Some(lt) => lt,
            None => return cont!(writer, text),
        };

        write_text(writer, &text[..lt])?;
        let tag = &text[lt..];

        if starts_with_ci(tag, "</head>") {
            write_fragment(writer, Fragment::Header)?;
            switch_to!(Body, tag)
        } else if starts_with_ci(tag, "<meta")
            && tag.as_bytes().get(5).map_or(false, u8::is_ascii_whitespace)
        {
            switch_to!(Meta, tag)
        } else if starts_with_ci(tag, "<title>") {
            switch_to!(Title, tag)
        } else if tag.starts_with("<!--") {
            switch_to!(Comment, tag)
        } else {
            // anything else is the start of the page's real content
            write_fragment(writer, Fragment::Header)?;
            switch_to!(Body, tag)
        }
    }

    pub(super) fn meta<'a, W: Writer + ?Sized>(
        writer: &mut W,
        text: &'a str,
    ) -> Result<ControlToken<'a>, W::Error> {
        match fast_find(b">\"'", text.as_bytes()) {
            Some(i) if text.as_bytes()[i] == b'"' => {
                write_text(writer, &text[..=i])?;
                switch_to!(Quote, &text[i + 1..])
            }
            Some(i) if text.as_bytes()[i] == b'\'' => {
                write_text(writer, &text[..=i])?;
                switch_to!(SingleQuote, &text[i + 1..])
            }
            // PreMeta sees the `>` again, quotes are consumed here
            Some(i) => {
                write_text(writer, &text[..i])?;
                switch_to!(PreMeta, &text[i..])
            }
            None => cont!(writer, text),
        }
    }

    pub(super) fn quoted<'a, W: Writer + ?Sized>(
        writer: &mut W,
        text: &'a str,
        quote: u8,
    ) -> Result<ControlToken<'a>, W::Error> {
        match find_byte(quote, text.as_bytes()) {
            Some(i) => {
                write_text(writer, &text[..=i])?;
                switch_to!(Meta, &text[i + 1..])
            }
            None => head_close_fallback(writer, text),
        }
    }

    pub(super) fn comment<'a, W: Writer + ?Sized>(
        writer: &mut W,
        text: &'a str,
    ) -> Result<ControlToken<'a>, W::Error> {
        match find_ci(text, "-->") {
            Some(close) => {
                write_text(writer, &text[..close.end])?;
                switch_to!(PreMeta, &text[close.end..])
            }
            None => cont!(writer, text),
        }
    }

    pub(super) fn title<'a, W: Writer + ?Sized>(
        writer: &mut W,
        text: &'a str,
    ) -> Result<ControlToken<'a>, W::Error> {
        match find_ci(text, "</title>") {
            Some(close) => {
                write_text(writer, &text[..close.end])?;
                switch_to!(PreMeta, &text[close.end..])
            }
            None => head_close_fallback(writer, text),
        }
    }

    /// An unterminated quote or title still gives way to `</head>`.
    fn head_close_fallback<'a, W: Writer + ?Sized>(
        writer: &mut W,
        text: &'a str,
    ) -> Result<ControlToken<'a>, W::Error> {
        match find_ci(text, "</head>") {
            Some(close) => {
                write_text(writer, &text[..close.start])?;
                write_fragment(writer, Fragment::Header)?;
                switch_to!(Body, &text[close.start..])
            }
            None => cont!(writer, text),
        }
    }

    pub(super) fn body<'a, W: Writer + ?Sized>(
        writer: &mut W,
        text: &'a str,
    ) -> Result<ControlToken<'a>, W::Error> {
        // only the text before an inline script may hold the insertion point
        let script = find_ci(text, "<script");
        let searched = script.map_or(text, |script| &text[..script.start]);

        // `</html>` covers pages that never close their body
        let close = find_ci(searched, "</body>").or_else(|| find_ci(searched, "</html>"));
        match (close, script) {
            (Some(close), _) => {
                write_text(writer, &text[..close.start])?;
                write_fragment(writer, Fragment::Footer)?;
                switch_to!(Done, &text[close.start..])
            }
            (None, Some(script)) => {
                write_text(writer, &text[..script.start])?;
                switch_to!(PostHeaderScript, &text[script.start..])
            }
            (None, None) => cont!(writer, text),
        }
    }

    pub(super) fn post_header_script<'a, W: Writer + ?Sized>(
        writer: &mut W,
        text: &'a str,
    ) -> Result<ControlToken<'a>, W::Error> {
        match find_ci(text, "</script>") {
            Some(close) => {
                write_text(writer, &text[..close.end])?;
                switch_to!(Body, &text[close.end..])
            }
            None => cont!(writer, text),
        }
    }

    pub(super) fn done<'a, W: Writer + ?Sized>(
        writer: &mut W,
        text: &'a str,
    ) -> Result<ControlToken<'a>, W::Error> {
        cont!(writer, text)
    }
}
