use error_stack::Report;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::Book;
use kernel::KernelError;

use crate::transfer::{BookDto, CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};
use crate::validation::{validate_id, validate_request};

fn not_found(id: i64) -> Report<KernelError> {
    Report::new(KernelError::NotFound(format!(
        "Book not found for id: {id}"
    )))
}

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<BookDto, KernelError> {
        let id = validate_id(dto.id)?;
        tracing::debug!(id = dto.id, "Fetching book");

        let mut connection = self.database_connection().acquire().await?;
        let book = self.book_query().find_by_id(&mut connection, &id).await?;

        let book = book.ok_or_else(|| not_found(dto.id))?;
        BookDto::try_from(book)
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let request = validate_request(dto.book)?;
        let book = Book::from(request);

        let mut connection = self.database_connection().acquire().await?;
        let created = self.book_modifier().create(&mut connection, book).await?;

        let created = BookDto::try_from(created)?;
        tracing::info!(id = created.id, "Created book");
        Ok(created)
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let id = validate_id(dto.id)?;
        let request = validate_request(dto.book)?;
        let book = Book::from(request).with_id(id);

        let mut connection = self.database_connection().acquire().await?;
        let updated = self.book_modifier().update(&mut connection, book).await?;

        let updated = updated.ok_or_else(|| not_found(dto.id))?;
        tracing::info!(id = dto.id, "Updated book");
        BookDto::try_from(updated)
    }
}

impl<T> UpdateBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService: 'static + Sync + Send + DependOnBookModifier {
    /// `false` when there was nothing to delete; absence is not an error here.
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<bool, KernelError> {
        let id = validate_id(dto.id)?;

        let mut connection = self.database_connection().acquire().await?;
        let deleted = self.book_modifier().delete(&mut connection, &id).await?;

        tracing::info!(id = dto.id, deleted, "Deleted book");
        Ok(deleted)
    }
}

impl<T> DeleteBookService for T where T: DependOnBookModifier {}

#[cfg(test)]
mod test {
    use driver::database::InMemoryDatabase;
    use kernel::KernelError;

    use crate::service::{CreateBookService, DeleteBookService, GetBookService, UpdateBookService};
    use crate::transfer::{
        BookDto, BookRequestDto, CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto,
    };
    use crate::validation::{
        ID_NOT_POSITIVE, PUBLICATION_YEAR_IS_NULL, REQUEST_IS_NULL, TITLE_IS_BLANK,
    };

    fn request(title: &str, author: &str, year: i32) -> BookRequestDto {
        BookRequestDto {
            title: title.to_string(),
            author: author.to_string(),
            publication_year: Some(year),
        }
    }

    async fn create(
        db: &InMemoryDatabase,
        book: BookRequestDto,
    ) -> error_stack::Result<BookDto, KernelError> {
        db.create_book(CreateBookDto { book: Some(book) }).await
    }

    #[tokio::test]
    async fn create_then_get_returns_same_view() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let created = create(&db, request("Effective Java", "Joshua Bloch", 2018)).await?;
        assert!(created.id > 0);
        assert_eq!(created.title, "Effective Java");
        assert_eq!(created.author, "Joshua Bloch");
        assert_eq!(created.publication_year, 2018);

        let found = db.get_book(GetBookDto { id: created.id }).await?;
        assert_eq!(found, created);
        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let db = InMemoryDatabase::new();
        let error = db
            .get_book(GetBookDto { id: 999 })
            .await
            .expect_err("empty store");
        assert_eq!(
            error.current_context(),
            &KernelError::NotFound("Book not found for id: 999".to_string())
        );
    }

    #[tokio::test]
    async fn non_positive_ids_are_rejected_everywhere() {
        let db = InMemoryDatabase::new();
        let invalid = KernelError::InvalidArgument(ID_NOT_POSITIVE.to_string());
        for id in [0, -1] {
            let error = db.get_book(GetBookDto { id }).await.expect_err("get");
            assert_eq!(error.current_context(), &invalid);

            let error = db
                .update_book(UpdateBookDto {
                    id,
                    book: Some(request("Dune", "Frank Herbert", 1965)),
                })
                .await
                .expect_err("update");
            assert_eq!(error.current_context(), &invalid);

            let error = db.delete_book(DeleteBookDto { id }).await.expect_err("delete");
            assert_eq!(error.current_context(), &invalid);
        }
    }

    #[tokio::test]
    async fn invalid_payload_never_reaches_storage() {
        let db = InMemoryDatabase::new();

        let error = db
            .create_book(CreateBookDto { book: None })
            .await
            .expect_err("absent payload");
        assert_eq!(
            error.current_context(),
            &KernelError::InvalidArgument(REQUEST_IS_NULL.to_string())
        );

        let mut missing_year = request("Dune", "Frank Herbert", 1965);
        missing_year.publication_year = None;
        let error = db
            .create_book(CreateBookDto {
                book: Some(missing_year),
            })
            .await
            .expect_err("missing year");
        assert_eq!(
            error.current_context(),
            &KernelError::InvalidArgument(PUBLICATION_YEAR_IS_NULL.to_string())
        );

        assert!(db.is_empty().await);
    }

    #[tokio::test]
    async fn invalid_update_payload_keeps_stored_book() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let created = create(&db, request("Test Book", "Test Author", 2024)).await?;

        let error = db
            .update_book(UpdateBookDto {
                id: created.id,
                book: None,
            })
            .await
            .expect_err("absent payload");
        assert_eq!(
            error.current_context(),
            &KernelError::InvalidArgument(REQUEST_IS_NULL.to_string())
        );

        let mut blank = request("  ", "Updated Author", 2025);
        blank.publication_year = None;
        let error = db
            .update_book(UpdateBookDto {
                id: created.id,
                book: Some(blank),
            })
            .await
            .expect_err("blank title and missing year");
        assert_eq!(
            error.current_context(),
            &KernelError::InvalidArgument(format!(
                "{TITLE_IS_BLANK}, {PUBLICATION_YEAR_IS_NULL}"
            ))
        );

        assert_eq!(db.get_book(GetBookDto { id: created.id }).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn update_overwrites_all_content_fields() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let created = create(&db, request("Test Book", "Test Author", 2024)).await?;

        let updated = db
            .update_book(UpdateBookDto {
                id: created.id,
                book: Some(request("Updated Book", "Updated Author", 2025)),
            })
            .await?;
        assert_eq!(
            updated,
            BookDto {
                id: created.id,
                title: "Updated Book".to_string(),
                author: "Updated Author".to_string(),
                publication_year: 2025,
            }
        );
        assert_eq!(db.get_book(GetBookDto { id: created.id }).await?, updated);
        Ok(())
    }

    #[tokio::test]
    async fn update_of_unknown_id_leaves_store_unchanged() -> error_stack::Result<(), KernelError>
    {
        let db = InMemoryDatabase::new();
        create(&db, request("Test Book", "Test Author", 2024)).await?;

        let error = db
            .update_book(UpdateBookDto {
                id: 999_999,
                book: Some(request("Updated Book", "Updated Author", 2025)),
            })
            .await
            .expect_err("unknown id");
        assert_eq!(
            error.current_context(),
            &KernelError::NotFound("Book not found for id: 999999".to_string())
        );
        assert_eq!(db.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let created = create(&db, request("Test Book", "Test Author", 2024)).await?;

        assert!(db.delete_book(DeleteBookDto { id: created.id }).await?);
        assert!(!db.delete_book(DeleteBookDto { id: created.id }).await?);
        assert!(db.is_empty().await);
        Ok(())
    }
}
