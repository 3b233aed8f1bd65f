//! End-to-end suite for the bookstore WebAPI, driven through
//! `bookstore-harness`. The remote service is stood in by per-test
//! `mockito` servers so the suite runs hermetically; the harness still
//! issues real HTTP requests against them.
//!
//! Suite lifecycle: a constructor hook begins the console tee capture
//! before any test runs, and a destructor hook finalizes the report file
//! and restores the console sink when the test binary exits.

#[cfg(test)]
mod books;
