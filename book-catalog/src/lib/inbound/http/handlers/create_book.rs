use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::Author;
use crate::domain::book::models::BookDescription;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::Category;
use crate::domain::book::models::NewBook;
use crate::domain::book::models::Rating;
use crate::domain::book::ports::BookServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_book(
    State(state): State<AppState>,
    Json(body): Json<CreateBookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    state
        .book_service
        .create_book(body.try_into_new_book()?)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::CREATED, book.into()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookRequest {
    title: String,
    author: String,
    description: String,
    category: String,
    publish_date: NaiveDate,
    rating: i64,
}

impl CreateBookRequest {
    fn try_into_new_book(self) -> Result<NewBook, BookError> {
        Ok(NewBook {
            title: BookTitle::new(self.title).map_err(BookError::InvalidTitle)?,
            author: Author::new(self.author).map_err(BookError::InvalidAuthor)?,
            description: BookDescription::new(self.description)
                .map_err(BookError::InvalidDescription)?,
            category: Category::new(self.category).map_err(BookError::InvalidCategory)?,
            publish_date: self.publish_date,
            rating: Rating::new(self.rating).map_err(BookError::InvalidRating)?,
        })
    }
}
