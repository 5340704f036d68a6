use crate::database::{Connection, DatabaseConnection, DependOnDatabaseConnection};
use crate::entity::{Book, BookId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookModifier: 'static + Sync + Send {
    type Connection: Connection;
    /// Inserts the content fields and returns the book carrying its generated id.
    async fn create(
        &self,
        con: &mut Self::Connection,
        book: Book,
    ) -> error_stack::Result<Book, KernelError>;
    /// Overwrites the row matching `book.id()`. `Ok(None)` when nothing matched.
    async fn update(
        &self,
        con: &mut Self::Connection,
        book: Book,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    /// Whether a row was removed. Negative ids never match.
    async fn delete(
        &self,
        con: &mut Self::Connection,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnBookModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookModifier: BookModifier<
        Connection = <Self::DatabaseConnection as DatabaseConnection>::Connection,
    >;
    fn book_modifier(&self) -> &Self::BookModifier;
}
