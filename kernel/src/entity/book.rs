mod author;
mod id;
mod publication_year;
mod title;

pub use self::{author::*, id::*, publication_year::*, title::*};
use destructure::Destructure;
use vodca::References;

/// Storage-side shape of a book. `id` stays `None` until the store assigns one on insert.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: Option<BookId>,
    title: BookTitle,
    author: BookAuthor,
    publication_year: Option<PublicationYear>,
}

impl Book {
    pub fn new(
        id: Option<BookId>,
        title: BookTitle,
        author: BookAuthor,
        publication_year: Option<PublicationYear>,
    ) -> Self {
        Self {
            id,
            title,
            author,
            publication_year,
        }
    }

    /// Replaces the identifier, keeping every content field.
    pub fn with_id(self, id: BookId) -> Self {
        let DestructBook {
            title,
            author,
            publication_year,
            ..
        } = self.into_destruct();
        Self::new(Some(id), title, author, publication_year)
    }
}
