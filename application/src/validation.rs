//! Guard checks run by the book services before any storage access.
//!
//! Every rejection is a [`KernelError::InvalidArgument`] whose text is the exact message
//! clients see in the error body.

use std::fmt::{Display, Formatter};

use error_stack::Report;

use kernel::prelude::entity::BookId;
use kernel::KernelError;

use crate::transfer::BookRequestDto;

pub const ID_NOT_POSITIVE: &str = "Book service: book id must be positive";
pub const REQUEST_IS_NULL: &str = "Book service: book request mustn't be null";
pub const TITLE_IS_BLANK: &str = "Book request: title is null or empty";
pub const AUTHOR_IS_BLANK: &str = "Book request: author is null or empty";
pub const PUBLICATION_YEAR_IS_NULL: &str = "Book request: publicationYear is null";
pub const TITLE_SIZE: &str = "Title size should be between 1 and 255 characters";
pub const AUTHOR_SIZE: &str = "Author size should be between 1 and 255 characters";

const MAX_TEXT_LENGTH: usize = 255;

/// A single failed rule, tagged with the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: &'static str,
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

pub fn validate_id(id: i64) -> error_stack::Result<BookId, KernelError> {
    if id <= 0 {
        return Err(
            Report::new(KernelError::InvalidArgument(ID_NOT_POSITIVE.to_string()))
                .attach_printable(format!("rejected id: {id}")),
        );
    }
    Ok(BookId::new(id))
}

pub fn validate_request(
    request: Option<BookRequestDto>,
) -> error_stack::Result<BookRequestDto, KernelError> {
    let Some(request) = request else {
        return Err(Report::new(KernelError::InvalidArgument(
            REQUEST_IS_NULL.to_string(),
        )));
    };
    let violations = violations(&request);
    if violations.is_empty() {
        return Ok(request);
    }
    let message = violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let fields = violations.iter().map(|v| v.field).collect::<Vec<_>>();
    Err(Report::new(KernelError::InvalidArgument(message))
        .attach_printable(format!("invalid fields: {fields:?}")))
}

pub fn violations(request: &BookRequestDto) -> Vec<Violation> {
    let mut found = Vec::new();
    check_text(
        &mut found,
        "title",
        &request.title,
        TITLE_IS_BLANK,
        TITLE_SIZE,
    );
    check_text(
        &mut found,
        "author",
        &request.author,
        AUTHOR_IS_BLANK,
        AUTHOR_SIZE,
    );
    if request.publication_year.is_none() {
        found.push(Violation {
            field: "publicationYear",
            message: PUBLICATION_YEAR_IS_NULL,
        });
    }
    found
}

fn check_text(
    found: &mut Vec<Violation>,
    field: &'static str,
    value: &str,
    blank: &'static str,
    size: &'static str,
) {
    if value.trim().is_empty() {
        found.push(Violation {
            field,
            message: blank,
        });
    } else if value.chars().count() > MAX_TEXT_LENGTH {
        found.push(Violation {
            field,
            message: size,
        });
    }
}
