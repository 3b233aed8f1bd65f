//! Test lifecycle banners. Every test name arrives as an explicit argument;
//! the harness never inspects the call stack to discover it.

use std::future::Future;

use crate::logger;

const SEPARATOR: &str = "-------------";

pub fn test_started(name: &str) {
    logger::log(format!("🏁 Starting test: {name}"));
}

pub fn test_passed(name: &str) {
    logger::log(format!("✅ Test passed: {name}"));
    logger::log(SEPARATOR);
}

pub fn test_failed(name: &str, message: &str) {
    logger::log(format!("❌ Test failed: {name} - {message}"));
    logger::log(SEPARATOR);
}

/// Run a test body with start/pass/fail banners around it. A failure is
/// logged and then re-raised, so the surrounding runner still marks the
/// case failed.
pub async fn run_test<F, Fut>(name: &str, f: F) -> eyre::Result<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = eyre::Result<()>>,
{
    test_started(name);
    match f().await {
        Ok(()) => {
            test_passed(name);
            Ok(())
        }
        Err(e) => {
            test_failed(name, &format!("{e:#}"));
            Err(e)
        }
    }
}
