use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use kernel::interface::database::{Connection, DatabaseConnection};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookId};
use kernel::KernelError;

/// Process-local stand-in for the `books` table.
///
/// Mirrors the postgres gateway: ids come from a sequence starting at 1 and are never reused,
/// and the same identifier boundaries apply.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    table: Arc<Mutex<BookTable>>,
}

#[derive(Default)]
struct BookTable {
    sequence: i64,
    rows: BTreeMap<BookId, Book>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Connection = InMemoryConnection;
    async fn acquire(&self) -> error_stack::Result<Self::Connection, KernelError> {
        Ok(InMemoryConnection(Arc::clone(&self.table)))
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}

pub struct InMemoryConnection(Arc<Mutex<BookTable>>);

impl Connection for InMemoryConnection {}

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Connection = InMemoryConnection;
    async fn find_by_id(
        &self,
        con: &mut InMemoryConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        if i64::from(*id) <= 0 {
            return Ok(None);
        }
        let table = con.0.lock().await;
        Ok(table.rows.get(id).cloned())
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Connection = InMemoryConnection;

    async fn create(
        &self,
        con: &mut InMemoryConnection,
        book: Book,
    ) -> error_stack::Result<Book, KernelError> {
        let mut table = con.0.lock().await;
        table.sequence += 1;
        let id = BookId::new(table.sequence);
        let book = book.with_id(id);
        table.rows.insert(id, book.clone());
        Ok(book)
    }

    async fn update(
        &self,
        con: &mut InMemoryConnection,
        book: Book,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let Some(id) = *book.id() else {
            return Ok(None);
        };
        let mut table = con.0.lock().await;
        match table.rows.get_mut(&id) {
            None => Ok(None),
            Some(row) => {
                *row = book.clone();
                Ok(Some(book))
            }
        }
    }

    async fn delete(
        &self,
        con: &mut InMemoryConnection,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        if i64::from(*book_id) < 0 {
            return Ok(false);
        }
        let mut table = con.0.lock().await;
        Ok(table.rows.remove(book_id).is_some())
    }
}
