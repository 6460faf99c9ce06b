use std::borrow::Cow;

use crate::Fragment;

/// The source text that the provided writers emit for each [`Fragment`].
///
/// For a template compiler this is typically a short scriptlet that renders the actual timing
/// script at request time. The scanner treats both strings as opaque.
///
/// ```rust
/// use pageinject::{Fragment, Snippets};
///
/// let snippets = Snippets::new("<%= timingHeader() %>", "<%= timingFooter() %>");
/// assert_eq!(snippets.get(Fragment::Footer), "<%= timingFooter() %>");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Snippets {
    header: Cow<'static, str>,
    footer: Cow<'static, str>,
}

impl Snippets {
    /// Configure the header and footer source text.
    pub fn new(
        header: impl Into<Cow<'static, str>>,
        footer: impl Into<Cow<'static, str>>,
    ) -> Self {
        Snippets {
            header: header.into(),
            footer: footer.into(),
        }
    }

    /// The source text for `fragment`.
    #[must_use]
    pub fn get(&self, fragment: Fragment) -> &str {
        match fragment {
            Fragment::Header => &self.header,
            Fragment::Footer => &self.footer,
        }
    }
}
