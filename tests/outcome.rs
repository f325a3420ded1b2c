use outcome::testing::{assert_failure, assert_failure_eq, assert_success_eq};
use outcome::{
    failure, run_scoped, sequence, success, traverse, IntoOutcome, Outcome, OutcomeIterExt, Raise,
};
use std::ptr;
use tools::{init_logger, to_int, Calls, ParseError};

mod tools;

#[test]
fn test_map_scenarios() {
    init_logger();

    assert_success_eq(success::<i32, &str>(5).map(|x| x + 1), 6);

    let cause = Box::new("e".to_string());
    let address: *const String = &*cause;
    let mapped = failure::<i32, Box<String>>(cause).map(|x| x + 1);
    assert!(ptr::eq(&*assert_failure(mapped), address));
}

#[test]
fn test_scoped_scenarios() {
    init_logger();

    let blank: Outcome<i32, &str> = run_scoped(|raise| {
        raise.ensure(false, || "blank");
        1
    });
    assert_failure_eq(blank, "blank");

    let doubled: Outcome<i32, &str> = run_scoped(|raise| {
        let value = raise.bind(success(10));
        value * 2
    });
    assert_success_eq(doubled, 20);
}

#[test]
fn test_collection_scenarios() {
    init_logger();

    let items = [success::<i32, &str>(1), success(2)];
    assert_success_eq(items.into_iter().sequence(), vec![1, 2]);
    assert_failure_eq(sequence(vec![success(1), failure("x"), success(2)]), "x");

    let calls = Calls::default();
    let parsed = traverse(["1", "x"], |s| {
        calls.hit();
        to_int(s)
    });
    assert_failure_eq(parsed, ParseError::NotANumber("x".to_string()));
    assert_eq!(calls.count(), 2);
}

#[test]
fn test_nested_scopes() {
    init_logger();

    let outer: Outcome<Outcome<i32, ParseError>, ParseError> =
        run_scoped(|_| run_scoped(|inner| inner.bind(to_int(" "))));
    assert_success_eq(outer, failure(ParseError::Blank));

    let outer: Outcome<i32, ParseError> = run_scoped(|outer: &Raise<ParseError>| {
        let inner: Outcome<i32, ParseError> = run_scoped(|_| outer.bind(to_int("x")));
        inner.get_or_else(0)
    });
    assert_failure_eq(outer, ParseError::NotANumber("x".to_string()));
}

#[test]
fn test_checked_sum() {
    init_logger();

    fn sum(input: &str) -> Outcome<i32, ParseError> {
        run_scoped(|raise| {
            let mut total = 0;
            for part in input.split('+') {
                let value = to_int(part)
                    .filter_or_else(
                        |value| *value >= 0,
                        || ParseError::NotANumber(part.to_string()),
                    )
                    .bind(raise);
                total += value;
            }
            total
        })
    }

    assert_success_eq(sum("1 + 2 + 3"), 6);
    assert_failure_eq(sum("1 + -2"), ParseError::NotANumber(" -2".to_string()));
    assert_failure_eq(sum("1 +"), ParseError::Blank);
}

#[test]
fn test_boundary_conversion() -> anyhow::Result<()> {
    init_logger();

    let value = to_int("42")
        .map_failure(|cause| format!("{:?}", cause))
        .context("reading the answer")?;
    assert_eq!(value, 42);

    let error = to_int("x")
        .map_failure(|cause| format!("{:?}", cause))
        .into_anyhow()
        .expect_err("parsing must fail");
    assert_eq!(error.to_string(), "NotANumber(\"x\")");

    assert_eq!(to_int("7").into_result(), Ok(7));
    assert_eq!(ParseError::Blank.into_failure::<i32>(), to_int(""));
    Ok(())
}
