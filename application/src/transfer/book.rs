use error_stack::Report;

use kernel::prelude::entity::{Book, BookAuthor, BookTitle, DestructBook, PublicationYear};
use kernel::KernelError;

/// Outbound view of a stored book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
}

impl TryFrom<Book> for BookDto {
    type Error = Report<KernelError>;
    fn try_from(value: Book) -> Result<Self, Self::Error> {
        let DestructBook {
            id,
            title,
            author,
            publication_year,
        } = value.into_destruct();
        let id = id.ok_or_else(|| {
            Report::new(KernelError::Internal).attach_printable("Book record has no id")
        })?;
        let publication_year = publication_year.ok_or_else(|| {
            Report::new(KernelError::Internal).attach_printable(format!(
                "Book record {} has no publication year",
                i64::from(id)
            ))
        })?;
        Ok(Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            publication_year: publication_year.into(),
        })
    }
}

/// Inbound create/update payload. An absent title or author arrives as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookRequestDto {
    pub title: String,
    pub author: String,
    pub publication_year: Option<i32>,
}

impl From<BookRequestDto> for Book {
    fn from(value: BookRequestDto) -> Self {
        Book::new(
            None,
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            value.publication_year.map(PublicationYear::new),
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetBookDto {
    pub id: i64,
}

#[derive(Debug, Clone)]
pub struct CreateBookDto {
    pub book: Option<BookRequestDto>,
}

#[derive(Debug, Clone)]
pub struct UpdateBookDto {
    pub id: i64,
    pub book: Option<BookRequestDto>,
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteBookDto {
    pub id: i64,
}
