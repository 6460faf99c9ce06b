// having this be a macro is performance critical. rustc appears to be unable to optimize away code
// like this:
//
// ```rust
// fn noop(s: &str) {}
//
// noop(&format!("foo"));
// ```
//
// format!() + its string allocation still exists in resulting code
macro_rules! trace_log {
    ($($tt:tt)*) => {{
        #[cfg(debug_assertions)]
        crate::testutils::trace_log(&format!($($tt)*));
    }};
}

pub(crate) use trace_log;

/// Return `text` with a one-line, length-bounded preview suitable for trace output.
#[cfg(debug_assertions)]
pub(crate) fn preview(text: &str) -> String {
    const MAX: usize = 40;
    let mut end = text.len().min(MAX);
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    let mut rv = format!("{:?}", &text[..end]);
    if end < text.len() {
        rv.push_str("...");
    }
    rv
}
