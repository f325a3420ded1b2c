#![allow(dead_code)]
use outcome::{failure, success, Outcome};
use std::cell::Cell;

/// Installs the test logger once, so `RUST_LOG=trace cargo test` shows the scope machinery.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Blank,
    NotANumber(String),
}

/// Fallible parser used as the domain operation across tests.
pub fn to_int(s: &str) -> Outcome<i32, ParseError> {
    if s.trim().is_empty() {
        return failure(ParseError::Blank);
    }
    match s.trim().parse::<i32>() {
        Ok(value) => success(value),
        Err(_) => failure(ParseError::NotANumber(s.to_string())),
    }
}

/// Call counter for closures that must run a known number of times.
#[derive(Default)]
pub struct Calls {
    count: Cell<usize>,
}

impl Calls {
    pub fn hit(&self) {
        self.count.set(self.count.get() + 1);
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }
}
