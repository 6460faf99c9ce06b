//! Literal tag matching on chunk text.
//!
//! Every needle in this module is ASCII, so all returned offsets fall on `char` boundaries and
//! can be used to slice the haystack directly.

/// The tag literals the state machine looks for. A chunk ending in a strict prefix of one of
/// these is an incomplete tag that has to wait for the next chunk.
const TAG_LITERALS: &[&str] = &[
    "<head>",
    "</head>",
    "<body>",
    "</body>",
    "</html>",
    "<script",
    "</script>",
    "<meta ",
    "<title>",
    "</title>",
    "<!--",
];

/// A byte range `start..end` of a matched literal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Match {
    pub start: usize,
    pub end: usize,
}

/// Find the first ASCII-case-insensitive occurrence of `needle`.
pub(crate) fn find_ci(haystack: &str, needle: &str) -> Option<Match> {
    let hay = haystack.as_bytes();
    let (&first, rest) = needle.as_bytes().split_first()?;
    let firsts = [first.to_ascii_lowercase(), first.to_ascii_uppercase()];

    let mut offset = 0;
    while let Some(i) = fast_find(&firsts, &hay[offset..]) {
        let start = offset + i;
        let end = start + needle.len();
        match hay.get(start + 1..end) {
            Some(candidate) if candidate.eq_ignore_ascii_case(rest) => {
                return Some(Match { start, end })
            }
            Some(_) => offset = start + 1,
            None => return None,
        }
    }

    None
}

/// Whether `haystack` begins with `prefix`, ignoring ASCII case.
pub(crate) fn starts_with_ci(haystack: &str, prefix: &str) -> bool {
    haystack
        .as_bytes()
        .get(..prefix.len())
        .map_or(false, |s| s.eq_ignore_ascii_case(prefix.as_bytes()))
}

/// Find an opening tag such as `<head>` or `<body class="x">`.
///
/// `open` is the tag name with its `<`. The name must be followed by `>`, `/` or whitespace, so
/// `<header>` is not a `<head`. The match ends after the tag's `>`; a tag whose `>` has not
/// arrived yet is not a match.
pub(crate) fn find_open_tag(haystack: &str, open: &str) -> Option<Match> {
    let hay = haystack.as_bytes();
    let mut offset = 0;

    while let Some(m) = find_ci(&haystack[offset..], open) {
        let start = offset + m.start;
        let name_end = offset + m.end;
        match hay.get(name_end) {
            Some(b'>') => {
                return Some(Match {
                    start,
                    end: name_end + 1,
                })
            }
            Some(&b) if b == b'/' || b.is_ascii_whitespace() => {
                let close = find_byte(b'>', &hay[name_end..])?;
                return Some(Match {
                    start,
                    end: name_end + close + 1,
                });
            }
            Some(_) => offset = start + 1,
            None => return None,
        }
    }

    None
}

/// Find the first complete `<!-- ... -->` span.
pub(crate) fn find_comment(haystack: &str) -> Option<Match> {
    let open = find_ci(haystack, "<!--")?;
    let body = open.end;
    let close = find_ci(&haystack[body..], "-->")?;
    Some(Match {
        start: open.start,
        end: body + close.end,
    })
}

/// Split off a trailing tag that is cut short by the end of the chunk.
///
/// Returns `(ready, held)`, where `held` is empty unless the text after the last `<` has no `>`
/// and is a strict prefix of one of the tag literals. `held` is never longer than the longest
/// literal.
pub(crate) fn split_incomplete_tag(text: &str) -> (&str, &str) {
    let lt = match rfind_byte(b'<', text.as_bytes()) {
        Some(lt) => lt,
        None => return (text, ""),
    };

    let tail = &text[lt..];
    let is_incomplete = TAG_LITERALS
        .iter()
        .any(|literal| tail.len() < literal.len() && starts_with_ci(literal, tail));

    if is_incomplete {
        text.split_at(lt)
    } else {
        (text, "")
    }
}

/// Find the first of the bytes in `needle`.
#[inline]
pub(crate) fn fast_find(needle: &[u8], haystack: &[u8]) -> Option<usize> {
    #[cfg(feature = "memchr")]
    {
        if needle.len() == 3 {
            return memchr::memchr3(needle[0], needle[1], needle[2], haystack);
        } else if needle.len() == 2 {
            return memchr::memchr2(needle[0], needle[1], haystack);
        } else if needle.len() == 1 {
            return memchr::memchr(needle[0], haystack);
        }
    }

    haystack.iter().position(|b| needle.contains(b))
}

#[inline]
pub(crate) fn find_byte(needle: u8, haystack: &[u8]) -> Option<usize> {
    fast_find(&[needle], haystack)
}

#[inline]
fn rfind_byte(needle: u8, haystack: &[u8]) -> Option<usize> {
    #[cfg(feature = "memchr")]
    return memchr::memrchr(needle, haystack);

    #[cfg(not(feature = "memchr"))]
    haystack.iter().rposition(|&b| b == needle)
}
