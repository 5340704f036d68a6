use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, BookDatabase};
use crate::request::{
    BookTransformer, CreateBookRequest, DeleteBookRequest, GetBookRequest, PathId, Payload,
    UpdateBookRequest,
};
use crate::response::{
    BookPresenter, BookResponse, CreatedBookPresenter, CreatedBookResponse, DeletedBookPresenter,
    DeletedBookResponse,
};
use application::service::{
    CreateBookService, DeleteBookService, GetBookService, UpdateBookService,
};
use axum::extract::State;
use axum::routing::{delete, get, post, put};
use axum::Router;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<D: BookDatabase> BookRouter for Router<AppModule<D>> {
    fn route_book(self) -> Self {
        self.route("/book/new", post(create_book::<D>))
            .route("/book/:id", get(get_book::<D>))
            .route("/book/update/:id", put(update_book::<D>))
            .route("/book/delete/:id", delete(delete_book::<D>))
    }
}

async fn get_book<D: BookDatabase>(
    State(module): State<AppModule<D>>,
    id: PathId,
) -> Result<BookResponse, ErrorStatus> {
    Controller::new(BookTransformer, BookPresenter)
        .try_intake(GetBookRequest::new(id))?
        .handle(|dto| async move { module.database().get_book(dto).await })
        .await
        .map_err(ErrorStatus::from)
}

async fn create_book<D: BookDatabase>(
    State(module): State<AppModule<D>>,
    payload: Payload,
) -> Result<CreatedBookResponse, ErrorStatus> {
    Controller::new(BookTransformer, CreatedBookPresenter)
        .try_intake(CreateBookRequest::new(payload))?
        .handle(|dto| async move { module.database().create_book(dto).await })
        .await
        .map_err(ErrorStatus::from)
}

async fn update_book<D: BookDatabase>(
    State(module): State<AppModule<D>>,
    id: PathId,
    payload: Payload,
) -> Result<BookResponse, ErrorStatus> {
    Controller::new(BookTransformer, BookPresenter)
        .try_intake(UpdateBookRequest::new(id, payload))?
        .handle(|dto| async move { module.database().update_book(dto).await })
        .await
        .map_err(ErrorStatus::from)
}

async fn delete_book<D: BookDatabase>(
    State(module): State<AppModule<D>>,
    id: PathId,
) -> Result<DeletedBookResponse, ErrorStatus> {
    Controller::new(BookTransformer, DeletedBookPresenter)
        .try_intake(DeleteBookRequest::new(id))?
        .handle(|dto| async move { module.database().delete_book(dto).await })
        .await
        .map_err(ErrorStatus::from)
}
