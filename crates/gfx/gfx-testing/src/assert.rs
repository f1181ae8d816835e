//! Assertion results
//!
//! Every check returns a [`TestResult`]. A failing check carries the message
//! and the source location of the call that failed; test bodies propagate it
//! with `?` so the first failure ends the test.
//!
//! Messages are only formatted on failure: helpers taking a closure call it
//! only when the condition does not hold.

use core::fmt;
use std::panic::Location;

/// A failed assertion: what went wrong and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    message: String,
    file: &'static str,
    line: u32,
}

/// Outcome of a check or of a whole test body.
pub type TestResult<T = ()> = Result<T, Failure>;

impl Failure {
    /// Failure located at the caller.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::at(message, Location::caller())
    }

    /// Failure at an explicit source location.
    pub fn at(message: impl Into<String>, location: &'static Location<'static>) -> Self {
        Self {
            message: message.into(),
            file: location.file(),
            line: location.line(),
        }
    }

    /// Failure that did not come from an assertion call, e.g. a panic.
    pub fn detached(message: impl Into<String>, file: &'static str) -> Self {
        Self {
            message: message.into(),
            file,
            line: 0,
        }
    }

    /// Diagnostic message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source file of the failing check
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Source line of the failing check; 0 when unknown
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}: {}", self.file, self.message)
        } else {
            write!(f, "{}:{}: {}", self.file, self.line, self.message)
        }
    }
}

impl std::error::Error for Failure {}

/// Fail with `Assertion failed: <what>` unless `cond` holds.
#[track_caller]
pub fn check(cond: bool, what: &str) -> TestResult {
    if cond {
        Ok(())
    } else {
        Err(Failure::new(format!("Assertion failed: {what}")))
    }
}

/// Fail with the message built by `message` unless `cond` holds.
#[track_caller]
pub fn check_with(cond: bool, message: impl FnOnce() -> String) -> TestResult {
    if cond {
        Ok(())
    } else {
        Err(Failure::new(message()))
    }
}

/// Fail unless `actual == expected`, showing both.
///
/// Works for scalars and for the geometry and color types, which all print
/// through `Display`.
#[track_caller]
pub fn check_eq<T>(actual: T, expected: T) -> TestResult
where
    T: PartialEq + fmt::Display,
{
    check_with(actual == expected, || {
        format!("Actual: {actual} \tExpected: {expected}")
    })
}

/// Fail if `actual == unexpected`.
#[track_caller]
pub fn check_ne<T>(actual: T, unexpected: T) -> TestResult
where
    T: PartialEq + fmt::Display,
{
    check_with(actual != unexpected, || {
        format!("Actual: {actual} \tExpected anything but: {unexpected}")
    })
}

/// Fail unless two byte slices are identical.
///
/// The message points at the first differing offset, or reports the lengths
/// when one slice is a prefix of the other.
#[track_caller]
pub fn check_mem(actual: &[u8], expected: &[u8]) -> TestResult {
    let first_diff = actual
        .iter()
        .zip(expected)
        .enumerate()
        .find(|(_, (a, e))| a != e);
    match first_diff {
        Some((offset, (a, e))) => Err(Failure::new(format!(
            "Offset {offset} \tActual: 0x{a:02x} \tExpected: 0x{e:02x}"
        ))),
        None if actual.len() != expected.len() => Err(Failure::new(format!(
            "Length mismatch \tActual: {} bytes \tExpected: {} bytes",
            actual.len(),
            expected.len()
        ))),
        None => Ok(()),
    }
}

/// Replace the message of a failed check.
pub trait WithMessage {
    /// On failure, swap the message for the one built by `message`. The
    /// source location is kept.
    fn with_message<F>(self, message: F) -> Self
    where
        F: FnOnce() -> String;
}

impl<T> WithMessage for TestResult<T> {
    fn with_message<F>(self, message: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.map_err(|failure| Failure {
            message: message(),
            ..failure
        })
    }
}

/// Return a [`Failure`] from the enclosing test unless the condition holds.
///
/// Without a message the condition's source text is reported.
///
/// ```
/// use gfx_testing::{ensure, TestResult};
///
/// fn body(width: u16) -> TestResult {
///     ensure!(width > 0);
///     ensure!(width < 1000, "width {} out of range", width);
///     Ok(())
/// }
/// assert!(body(10).is_ok());
/// assert_eq!(body(0).unwrap_err().message(), "Assertion failed: width > 0");
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr $(,)?) => {
        $crate::assert::check($cond, ::core::stringify!($cond))?
    };
    ($cond:expr, $($arg:tt)+) => {
        $crate::assert::check_with($cond, || ::std::format!($($arg)+))?
    };
}
