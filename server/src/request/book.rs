use application::transfer::{
    BookRequestDto, CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto,
};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;
use serde::Deserialize;

use crate::controller::TryIntake;
use crate::error::ErrorStatus;

pub type PathId = Result<Path<i64>, PathRejection>;
pub type Payload = Result<Json<Option<BookRequest>>, JsonRejection>;

/// Create/update body. Missing fields decode as `None` and are judged by the validator.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    title: Option<String>,
    author: Option<String>,
    publication_year: Option<i32>,
}

impl From<BookRequest> for BookRequestDto {
    fn from(value: BookRequest) -> Self {
        Self {
            title: value.title.unwrap_or_default(),
            author: value.author.unwrap_or_default(),
            publication_year: value.publication_year,
        }
    }
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: PathId,
}

impl GetBookRequest {
    pub fn new(id: PathId) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct CreateBookRequest {
    payload: Payload,
}

impl CreateBookRequest {
    pub fn new(payload: Payload) -> Self {
        Self { payload }
    }
}

#[derive(Debug)]
pub struct UpdateBookRequest {
    id: PathId,
    payload: Payload,
}

impl UpdateBookRequest {
    pub fn new(id: PathId, payload: Payload) -> Self {
        Self { id, payload }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: PathId,
}

impl DeleteBookRequest {
    pub fn new(id: PathId) -> Self {
        Self { id }
    }
}

fn path_id(id: PathId) -> Result<i64, ErrorStatus> {
    id.map(|Path(id)| id)
        .map_err(|rejection| ErrorStatus::invalid_argument(rejection.body_text()))
}

fn payload(payload: Payload) -> Result<Option<BookRequestDto>, ErrorStatus> {
    payload
        .map(|Json(body)| body.map(BookRequestDto::from))
        .map_err(|rejection| ErrorStatus::invalid_argument(rejection.body_text()))
}

pub struct BookTransformer;

impl TryIntake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    type Error = ErrorStatus;
    fn emit(&self, input: GetBookRequest) -> Result<Self::To, Self::Error> {
        Ok(GetBookDto {
            id: path_id(input.id)?,
        })
    }
}

impl TryIntake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    type Error = ErrorStatus;
    fn emit(&self, input: CreateBookRequest) -> Result<Self::To, Self::Error> {
        Ok(CreateBookDto {
            book: payload(input.payload)?,
        })
    }
}

impl TryIntake<UpdateBookRequest> for BookTransformer {
    type To = UpdateBookDto;
    type Error = ErrorStatus;
    fn emit(&self, input: UpdateBookRequest) -> Result<Self::To, Self::Error> {
        Ok(UpdateBookDto {
            id: path_id(input.id)?,
            book: payload(input.payload)?,
        })
    }
}

impl TryIntake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    type Error = ErrorStatus;
    fn emit(&self, input: DeleteBookRequest) -> Result<Self::To, Self::Error> {
        Ok(DeleteBookDto {
            id: path_id(input.id)?,
        })
    }
}
