use axum::extract::Path;
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
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::Category;
use crate::domain::book::models::Rating;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::ports::BookServicePort;
use crate::inbound::http::router::AppState;

/// Partial book update; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub rating: Option<i64>,
}

impl UpdateBookRequest {
    fn try_into_command(self) -> Result<UpdateBookCommand, BookError> {
        Ok(UpdateBookCommand {
            title: self
                .title
                .map(BookTitle::new)
                .transpose()
                .map_err(BookError::InvalidTitle)?,
            author: self
                .author
                .map(Author::new)
                .transpose()
                .map_err(BookError::InvalidAuthor)?,
            description: self
                .description
                .map(BookDescription::new)
                .transpose()
                .map_err(BookError::InvalidDescription)?,
            category: self
                .category
                .map(Category::new)
                .transpose()
                .map_err(BookError::InvalidCategory)?,
            publish_date: self.publish_date,
            rating: self
                .rating
                .map(Rating::new)
                .transpose()
                .map_err(BookError::InvalidRating)?,
        })
    }
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let book_id = BookId::from_string(&id).map_err(BookError::from)?;
    let command = req.try_into_command()?;

    state
        .book_service
        .update_book(&book_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}
