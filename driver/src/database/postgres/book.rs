use sqlx::PgConnection;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookAuthor, BookId, BookTitle, PublicationYear};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Connection = PostgresConnection;
    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Connection = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        book: Book,
    ) -> error_stack::Result<Book, KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        book: Book,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::update(con, book).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        PgBookInternal::delete(con, book_id).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    publication_year: Option<i32>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book::new(
            Some(BookId::new(row.id)),
            BookTitle::new(row.title),
            BookAuthor::new(row.author),
            row.publication_year.map(PublicationYear::new),
        )
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        if i64::from(*id) <= 0 {
            return Ok(None);
        }
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, publication_year
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        let found = row.map(Book::from);
        Ok(found)
    }

    async fn create(con: &mut PgConnection, book: Book) -> error_stack::Result<Book, KernelError> {
        let id = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            INSERT INTO books (title, author, publication_year)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.publication_year().map(i32::from))
        .fetch_one(con)
        .await
        .convert_error()?;
        tracing::debug!(id, "Inserted book row");
        Ok(book.with_id(BookId::new(id)))
    }

    async fn update(
        con: &mut PgConnection,
        book: Book,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let Some(id) = book.id() else {
            return Ok(None);
        };
        // language=postgresql
        let affected = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, author = $3, publication_year = $4
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.publication_year().map(i32::from))
        .execute(con)
        .await
        .convert_error()?
        .rows_affected();
        tracing::debug!(id = i64::from(*id), affected, "Updated book row");
        if affected == 0 {
            return Ok(None);
        }
        Ok(Some(book))
    }

    async fn delete(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        if i64::from(*book_id) < 0 {
            return Ok(false);
        }
        // language=postgresql
        let affected = sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .execute(con)
        .await
        .convert_error()?
        .rows_affected();
        tracing::debug!(id = i64::from(*book_id), affected, "Deleted book row");
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod test {
    use error_stack::ResultExt;
    use sqlx::PgConnection;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{Book, BookAuthor, BookId, BookTitle, PublicationYear};
    use kernel::KernelError;

    use crate::database::postgres::book::PostgresBookRepository;
    use crate::database::postgres::PostgresDatabase;

    async fn prepare() -> error_stack::Result<PostgresDatabase, KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.acquire().await?;
        // Tests run in parallel; a lost CREATE race still leaves the table in place.
        if let Err(error) = sqlx::query(include_str!("../../../schema/books.sql"))
            .execute(&mut *con)
            .await
        {
            tracing::debug!(%error, "books schema was created concurrently");
        }
        Ok(db)
    }

    fn book(title: &str, year: Option<i32>) -> Book {
        Book::new(
            None,
            BookTitle::new(format!("{title}-{}", rand::random::<u32>())),
            BookAuthor::new("Joshua Bloch"),
            year.map(PublicationYear::new),
        )
    }

    async fn count_matching(
        con: &mut PgConnection,
        id: &BookId,
        title: &BookTitle,
    ) -> error_stack::Result<i64, KernelError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books WHERE id = $1 OR title = $2")
            .bind(id.as_ref())
            .bind(title.as_ref())
            .fetch_one(con)
            .await
            .change_context_lazy(|| KernelError::Internal)
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn crud() -> error_stack::Result<(), KernelError> {
        let db = prepare().await?;
        let mut con = db.acquire().await?;

        let created = PostgresBookRepository
            .create(&mut con, book("Effective Java", Some(2018)))
            .await?;
        let id = created.id().expect("create must assign an id");
        assert!(i64::from(id) > 0);

        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(created.clone()));

        let changed = Book::new(
            Some(id),
            BookTitle::new("Java Concurrency in Practice"),
            BookAuthor::new("Brian Goetz"),
            Some(PublicationYear::new(2006)),
        );
        let updated = PostgresBookRepository
            .update(&mut con, changed.clone())
            .await?;
        assert_eq!(updated, Some(changed.clone()));

        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(changed));

        assert!(PostgresBookRepository.delete(&mut con, &id).await?);
        assert!(!PostgresBookRepository.delete(&mut con, &id).await?);
        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());

        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn missing_publication_year_is_stored_as_null() -> error_stack::Result<(), KernelError> {
        let db = prepare().await?;
        let mut con = db.acquire().await?;

        let created = PostgresBookRepository
            .create(&mut con, book("Untitled draft", None))
            .await?;
        let id = created.id().expect("create must assign an id");

        let (title, author, year) = sqlx::query_as::<_, (String, String, Option<i32>)>(
            "SELECT title, author, publication_year FROM books WHERE id = $1",
        )
        .bind(id.as_ref())
        .fetch_one(&mut *con)
        .await
        .change_context_lazy(|| KernelError::Internal)?;
        assert_eq!(title, String::from(created.title().clone()));
        assert_eq!(author, "Joshua Bloch");
        assert_eq!(year, None);

        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found.and_then(|b| *b.publication_year()), None);

        PostgresBookRepository.delete(&mut con, &id).await?;
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn update_of_unknown_id_changes_nothing() -> error_stack::Result<(), KernelError> {
        let db = prepare().await?;
        let mut con = db.acquire().await?;

        let kept = PostgresBookRepository
            .create(&mut con, book("Kept", Some(2001)))
            .await?;
        let kept_id = kept.id().expect("create must assign an id");

        let ghost = book("Ghost", Some(1999)).with_id(BookId::new(i64::MAX));
        let ghost_title = ghost.title().clone();
        let updated = PostgresBookRepository.update(&mut con, ghost).await?;
        assert!(updated.is_none());
        assert_eq!(
            count_matching(&mut con, &BookId::new(i64::MAX), &ghost_title).await?,
            0
        );
        let found = PostgresBookRepository.find_by_id(&mut con, &kept_id).await?;
        assert_eq!(found, Some(kept));

        let anonymous = book("Anonymous", Some(1999));
        assert!(PostgresBookRepository
            .update(&mut con, anonymous)
            .await?
            .is_none());

        PostgresBookRepository.delete(&mut con, &kept_id).await?;
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn identifier_boundaries() -> error_stack::Result<(), KernelError> {
        let db = prepare().await?;
        let mut con = db.acquire().await?;

        assert!(PostgresBookRepository
            .find_by_id(&mut con, &BookId::new(0))
            .await?
            .is_none());
        assert!(PostgresBookRepository
            .find_by_id(&mut con, &BookId::new(-1))
            .await?
            .is_none());

        // Zero reaches the table and matches nothing; negatives are refused up front.
        assert!(!PostgresBookRepository
            .delete(&mut con, &BookId::new(0))
            .await?);
        assert!(!PostgresBookRepository
            .delete(&mut con, &BookId::new(-1))
            .await?);

        Ok(())
    }
}
