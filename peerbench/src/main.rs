//! Find transit agencies similar to a home agency and compare their performance over time.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use peerbench_lib::{Host, run};
use std::io::{Write, stderr, stdout};

/// Default host that writes to the real console.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() {
    run(&mut RealHost, std::env::args());
}
