use std::env;

mod invariants;

/// Run every enabled check against one fuzzer input.
///
/// Inputs that are not UTF-8 are skipped, a template compiler only ever produces text.
pub fn check_page(data: &[u8]) {
    let mut did_anything = false;

    let s = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    if env::var("FUZZ_BASIC").unwrap_or_default() != "0" {
        // we rely on running in debug mode so the processor's own assertions are active
        invariants::check_invariants(&[s]);
        did_anything = true;
    }

    if env::var("FUZZ_CHUNKED").unwrap_or_default() != "0" {
        let chunks = invariants::split_chunks(s);
        invariants::check_invariants(&chunks);
        did_anything = true;
    }

    if !did_anything {
        panic!("running empty testcase, enable either FUZZ_BASIC or FUZZ_CHUNKED");
    }
}
