use application::transfer::BookDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    id: i64,
    title: String,
    author: String,
    publication_year: i32,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            author: value.author,
            publication_year: value.publication_year,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug)]
pub struct CreatedBookResponse(BookResponse);

impl IntoResponse for CreatedBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// Deletion answers 204 whether or not a row was removed.
#[derive(Debug)]
pub struct DeletedBookResponse;

impl IntoResponse for DeletedBookResponse {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<BookDto> for BookPresenter {
    type To = BookResponse;
    fn emit(&self, output: BookDto) -> Self::To {
        BookResponse::from(output)
    }
}

pub struct CreatedBookPresenter;

impl Exhaust<BookDto> for CreatedBookPresenter {
    type To = CreatedBookResponse;
    fn emit(&self, output: BookDto) -> Self::To {
        CreatedBookResponse(BookResponse::from(output))
    }
}

pub struct DeletedBookPresenter;

impl Exhaust<bool> for DeletedBookPresenter {
    type To = DeletedBookResponse;
    fn emit(&self, _deleted: bool) -> Self::To {
        DeletedBookResponse
    }
}
