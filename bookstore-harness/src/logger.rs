//! Structured log formatting for domain entities and HTTP responses.
//!
//! Every function here writes through the shared output sink owned by
//! [`crate::capture`]; none of them open their own file handles, so lines
//! land in the report file whenever a capture session is active.

use crate::{
    http::Response,
    model::{Author, Book},
};

/// Maximum rendered length for entity string fields.
const FIELD_LIMIT: usize = 50;
/// Maximum rendered length for response body excerpts.
const BODY_LIMIT: usize = 100;

/// Write one line verbatim to the current output sink.
pub fn log(message: impl AsRef<str>) {
    crate::capture::write_line(message.as_ref());
}

pub fn log_book(book: &Book) {
    log(format_book(book));
}

pub fn log_author(author: &Author) {
    log(format_author(author));
}

pub fn log_response(response: &Response) {
    log(format_response(response));
}

fn format_book(book: &Book) -> String {
    format!(
        "📚 Book ID: {}\n   Title: {}\n   Pages: {}\n   Description: {}\n   Excerpt: {}\n   Publish Date: {}",
        book.id,
        truncate(book.title.as_deref(), FIELD_LIMIT),
        book.page_count,
        truncate(book.description.as_deref(), FIELD_LIMIT),
        truncate(book.excerpt.as_deref(), FIELD_LIMIT),
        truncate(book.publish_date.as_deref(), FIELD_LIMIT),
    )
}

fn format_author(author: &Author) -> String {
    format!(
        "👤 Author ID: {}\n   Book ID: {}\n   First Name: {}\n   Last Name: {}",
        author.id,
        author.book_id,
        truncate(author.first_name.as_deref(), FIELD_LIMIT),
        truncate(author.last_name.as_deref(), FIELD_LIMIT),
    )
}

fn format_response(response: &Response) -> String {
    format!(
        "📡 HTTP Response - Status: {}\n   Body: {}",
        response.status().as_u16(),
        truncate(Some(response.text()), BODY_LIMIT),
    )
}

/// Truncate `text` to at most `max_length` characters, marking the cut with
/// a trailing ellipsis. Absent fields render as the literal `null`.
pub fn truncate(text: Option<&str>, max_length: usize) -> String {
    let Some(text) = text else {
        return "null".to_string();
    };
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
    format!("{kept}...")
}
