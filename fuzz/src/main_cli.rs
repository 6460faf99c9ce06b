//! Replay fuzzer inputs outside of libfuzzer, from the files given as arguments or from stdin.
use std::io::Read;

use testcase::check_page;

fn main() {
    let paths: Vec<_> = std::env::args_os().skip(1).collect();

    if paths.is_empty() {
        let mut input = Vec::new();
        std::io::stdin().lock().read_to_end(&mut input).unwrap();
        check_page(&input);
    }

    for path in paths {
        eprintln!("replaying {}", path.to_string_lossy());
        check_page(&std::fs::read(&path).unwrap());
    }
}
