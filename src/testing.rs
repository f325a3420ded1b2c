//! Assertions for tests that check outcomes.

use std::fmt::Debug;

use crate::outcome::Outcome::{self, Failure, Success};

/// Returns the value of `Success`, panics on `Failure`.
#[track_caller]
pub fn assert_success<T, E: Debug>(outcome: Outcome<T, E>) -> T {
    match outcome {
        Success(value) => value,
        Failure(cause) => panic!(
            "expected the `Success` variant, but got the `Failure` variant ({:?})",
            cause
        ),
    }
}

/// Returns the cause of `Failure`, panics on `Success`.
#[track_caller]
pub fn assert_failure<T: Debug, E>(outcome: Outcome<T, E>) -> E {
    match outcome {
        Success(value) => panic!(
            "expected the `Failure` variant, but got the `Success` variant ({:?})",
            value
        ),
        Failure(cause) => cause,
    }
}

#[track_caller]
pub fn assert_success_eq<T, E>(outcome: Outcome<T, E>, expected: T)
where
    T: Debug + PartialEq,
    E: Debug,
{
    assert_eq!(assert_success(outcome), expected, "unexpected `Success` value");
}

#[track_caller]
pub fn assert_failure_eq<T, E>(outcome: Outcome<T, E>, expected: E)
where
    T: Debug,
    E: Debug + PartialEq,
{
    assert_eq!(assert_failure(outcome), expected, "unexpected `Failure` cause");
}

#[cfg(test)]
mod tests {
    use super::{assert_failure, assert_failure_eq, assert_success, assert_success_eq};
    use crate::outcome::{failure, success};

    #[test]
    fn test_matching_variants() {
        assert_eq!(assert_success(success::<i32, &str>(1)), 1);
        assert_eq!(assert_failure(failure::<i32, &str>("blank")), "blank");
        assert_success_eq(success::<i32, &str>(1), 1);
        assert_failure_eq(failure::<i32, &str>("blank"), "blank");
    }

    #[test]
    #[should_panic(expected = "expected the `Success` variant, but got the `Failure` variant (\"blank\")")]
    fn test_success_expected() {
        assert_success(failure::<i32, &str>("blank"));
    }

    #[test]
    #[should_panic(expected = "expected the `Failure` variant, but got the `Success` variant (1)")]
    fn test_failure_expected() {
        assert_failure(success::<i32, &str>(1));
    }

    #[test]
    #[should_panic(expected = "unexpected `Success` value")]
    fn test_success_value_differs() {
        assert_success_eq(success::<i32, &str>(1), 2);
    }
}
