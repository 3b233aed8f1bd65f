//! Harness assertion macros.
//!
//! These are non-panicking cousins of `assert!`/`assert_eq!`: a failed
//! check returns an `eyre` error so the lifecycle recorder can log the
//! failure banner and re-raise it, instead of tearing down the runner
//! thread with a panic. Comparison output comes from `pretty_assertions`.

/// Check that a boolean expression holds; on failure, return an `eyre`
/// error carrying the stringified condition and optional context message.
#[macro_export]
macro_rules! check {
    ($cond:expr $(,)?) => {
        if !$cond {
            $crate::eyre::bail!("check failed: {}", stringify!($cond));
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::eyre::bail!(
                "check failed: {}: {}",
                stringify!($cond),
                format_args!($($arg)+)
            );
        }
    };
}

/// Check that two expressions are equal, with a `pretty_assertions` diff in
/// the error message on failure.
#[macro_export]
macro_rules! check_eq {
    ($left:expr, $right:expr $(,)?) => {
        $crate::check_eq!(@ $left, $right, "", "");
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        $crate::check_eq!(@ $left, $right, ": ", $($arg)+);
    };
    (@ $left:expr, $right:expr, $maybe_colon:expr, $($arg:tt)*) => {
        match (&($left), &($right)) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    $crate::eyre::bail!(
                        "check failed: `(left == right)`{}{}\n\n{}\n",
                        $maybe_colon,
                        format_args!($($arg)*),
                        $crate::pretty_assertions::Comparison::new(left_val, right_val)
                    );
                }
            }
        }
    };
}

/// Check that two expressions are not equal.
#[macro_export]
macro_rules! check_ne {
    ($left:expr, $right:expr $(,)?) => {
        $crate::check_ne!(@ $left, $right, "", "");
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        $crate::check_ne!(@ $left, $right, ": ", $($arg)+);
    };
    (@ $left:expr, $right:expr, $maybe_colon:expr, $($arg:tt)*) => {
        match (&($left), &($right)) {
            (left_val, right_val) => {
                if *left_val == *right_val {
                    $crate::eyre::bail!(
                        "check failed: `(left != right)`{}{}\n\nBoth sides:\n{:#?}\n",
                        $maybe_colon,
                        format_args!($($arg)*),
                        left_val
                    );
                }
            }
        }
    };
}
