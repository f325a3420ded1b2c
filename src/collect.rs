use crate::outcome::Outcome::{self, Failure, Success};

/// Collects the values of all outcomes in order, or returns the first failure.
///
/// Iteration stops at the first `Failure`, nothing after it is pulled from `items`.
/// An empty input yields [`Outcome::EMPTY_LIST`].
pub fn sequence<T, E, I>(items: I) -> Outcome<Vec<T>, E>
where
    I: IntoIterator<Item = Outcome<T, E>>,
{
    traverse(items, |item| item)
}

/// Applies `transform` to every item in order and collects the values,
/// returning the first failure `transform` produces.
///
/// ```rust
/// use outcome::{failure, success, traverse, Outcome};
///
/// fn parse(s: &str) -> Outcome<i32, String> {
///     s.parse::<i32>().map_err(|_| format!("not a number: {}", s)).into()
/// }
///
/// assert_eq!(traverse(["1", "2"], parse), success(vec![1, 2]));
/// assert_eq!(traverse(["1", "x"], parse), failure("not a number: x".to_string()));
/// ```
pub fn traverse<A, T, E, I, F>(items: I, mut transform: F) -> Outcome<Vec<T>, E>
where
    I: IntoIterator<Item = A>,
    F: FnMut(A) -> Outcome<T, E>,
{
    let mut values = Vec::new();

    for item in items {
        match transform(item) {
            Success(value) => values.push(value),
            Failure(cause) => return Failure(cause),
        }
    }

    if values.is_empty() {
        Outcome::<Vec<T>, E>::EMPTY_LIST
    } else {
        Success(values)
    }
}

/// Method forms of [`sequence`] and [`traverse`] for iterators.
pub trait OutcomeIterExt: Iterator + Sized {
    fn sequence<T, E>(self) -> Outcome<Vec<T>, E>
    where
        Self: Iterator<Item = Outcome<T, E>>,
    {
        sequence(self)
    }

    fn traverse<T, E, F>(self, transform: F) -> Outcome<Vec<T>, E>
    where
        F: FnMut(Self::Item) -> Outcome<T, E>,
    {
        traverse(self, transform)
    }
}

impl<I: Iterator> OutcomeIterExt for I {}

/// Collecting outcomes short-circuits like [`sequence`], into any collection.
impl<A, V, E> FromIterator<Outcome<A, E>> for Outcome<V, E>
where
    V: FromIterator<A>,
{
    fn from_iter<I: IntoIterator<Item = Outcome<A, E>>>(items: I) -> Self {
        let mut failure = None;

        let values: V = items
            .into_iter()
            .map_while(|item| match item {
                Success(value) => Some(value),
                Failure(cause) => {
                    failure = Some(cause);
                    None
                }
            })
            .collect();

        match failure {
            Some(cause) => Failure(cause),
            None => Success(values),
        }
    }
}
