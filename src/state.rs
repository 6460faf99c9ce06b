use std::fmt;

/// Where the scanner is in the page, and what it is waiting for.
///
/// A `TagState` carries no data: each variant is an immutable value that can be shared freely
/// between page renders. Feed it text with [`TagState::process`] to get the state for the next
/// chunk.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum TagState {
    /// No head tag seen yet. The initial state.
    #[default]
    Head,
    /// Inside a `<script>` that started before any head tag was found.
    PreHeadScript,
    /// Just inside `<head>`, looking at what comes next.
    PreMeta,
    /// Inside a `<meta ...>` tag.
    Meta,
    /// Inside a double-quoted attribute value of a `<meta>` tag.
    Quote,
    /// Inside a single-quoted attribute value of a `<meta>` tag.
    SingleQuote,
    /// Inside a `<!-- ... -->` comment that follows `<head>`.
    Comment,
    /// Inside `<title>`.
    Title,
    /// The header has been written; looking for the footer's insertion point.
    Body,
    /// Inside a `<script>` after the header was written.
    PostHeaderScript,
    /// The footer has been written. Everything else passes through unchanged.
    Done,
}

impl TagState {
    /// Whether this is [`TagState::Done`], which is never left again.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        *self == TagState::Done
    }

    /// The variant's name, as used in trace output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match *self {
            TagState::Head => "Head",
            TagState::PreHeadScript => "PreHeadScript",
            TagState::PreMeta => "PreMeta",
            TagState::Meta => "Meta",
            TagState::Quote => "Quote",
            TagState::SingleQuote => "SingleQuote",
            TagState::Comment => "Comment",
            TagState::Title => "Title",
            TagState::Body => "Body",
            TagState::PostHeaderScript => "PostHeaderScript",
            TagState::Done => "Done",
        }
    }
}

impl fmt::Display for TagState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}
