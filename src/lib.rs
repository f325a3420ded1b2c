//! Single-error outcomes with scoped early exit.
//!
//! [`Outcome`] is a `Success(value)` / `Failure(cause)` sum type with combinators that
//! never touch the payload they do not transform. [`run_scoped`] lets a block of
//! ordinary statements pull values out of outcomes and stop at the first failure:
//!
//! ```rust
//! use outcome::{failure, run_scoped, success, traverse, Outcome};
//!
//! #[derive(Debug, PartialEq)]
//! enum ConfigError {
//!     NotANumber(String),
//!     Reserved(u16),
//! }
//!
//! fn parse(s: &str) -> Outcome<u16, ConfigError> {
//!     s.parse::<u16>()
//!         .map_err(|_| ConfigError::NotANumber(s.to_string()))
//!         .into()
//! }
//!
//! fn ports(input: &str) -> Outcome<Vec<u16>, ConfigError> {
//!     run_scoped(|raise| {
//!         let ports = raise.bind(traverse(input.split(','), parse));
//!         for port in &ports {
//!             raise.ensure(*port != 0, || ConfigError::Reserved(*port));
//!         }
//!         ports
//!     })
//! }
//!
//! assert_eq!(ports("80,443"), success(vec![80, 443]));
//! assert_eq!(ports("80,x"), failure(ConfigError::NotANumber("x".into())));
//! assert_eq!(ports("0"), failure(ConfigError::Reserved(0)));
//! ```
//!
//! The same function with the [`scoped`] attribute:
//!
//! ```rust
//! use outcome::{scoped, traverse, Outcome};
//!
//! fn parse(s: &str) -> Outcome<u16, String> {
//!     s.parse::<u16>().map_err(|e| e.to_string()).into()
//! }
//!
//! #[scoped]
//! fn ports(input: &str) -> Outcome<Vec<u16>, String> {
//!     let ports = raise.bind(traverse(input.split(','), parse));
//!     raise.ensure(!ports.contains(&0), || "port 0 is reserved".to_string());
//!     ports
//! }
//!
//! assert_eq!(ports("80,443").get_or_none(), Some(vec![80, 443]));
//! assert!(ports("0").is_failure());
//! ```
//!
//! The attribute rejects async functions:
//!
//! ```compile_fail
//! use outcome::{scoped, Outcome};
//!
//! #[scoped]
//! async fn length(input: &str) -> Outcome<usize, String> {
//!     input.len()
//! }
//! ```
//!
//! and functions without a return type:
//!
//! ```compile_fail
//! use outcome::scoped;
//!
//! #[scoped]
//! fn check(input: &str) {
//!     raise.ensure(!input.is_empty(), || "blank".to_string());
//! }
//! ```

pub mod collect;
pub mod outcome;
pub mod raise;
pub mod testing;

pub use crate::collect::{sequence, traverse, OutcomeIterExt};
pub use crate::outcome::{
    failure, success, IntoOutcome,
    Outcome::{self, Failure, Success},
};
pub use crate::raise::{run_scoped, Raise};
pub use outcome_macros::scoped;
