#![no_main]
use libfuzzer_sys::fuzz_target;
use testcase::check_page;

fuzz_target!(|data: &[u8]| {
    check_page(data);
});
