use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::BookFilter;
use crate::domain::book::models::MinRating;
use crate::domain::book::ports::BookServicePort;
use crate::inbound::http::router::AppState;

/// Query string of `GET /books`. Dates use `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize)]
pub struct ListBooksQuery {
    pub category: Option<String>,
    pub author: Option<String>,
    pub min_rating: Option<i64>,
    pub earliest_publish_date: Option<NaiveDate>,
    pub latest_publish_date: Option<NaiveDate>,
}

impl ListBooksQuery {
    fn try_into_filter(self) -> Result<BookFilter, BookError> {
        Ok(BookFilter {
            category: self.category,
            author: self.author,
            min_rating: self
                .min_rating
                .map(MinRating::new)
                .transpose()
                .map_err(BookError::InvalidMinRating)?,
            published_after: self.earliest_publish_date,
            published_before: self.latest_publish_date,
        })
    }
}

pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Result<ApiSuccess<Vec<BookData>>, ApiError> {
    let filter = query.try_into_filter()?;

    state
        .book_service
        .list_books(&filter)
        .await
        .map_err(ApiError::from)
        .map(|books| ApiSuccess::new(StatusCode::OK, books.iter().map(BookData::from).collect()))
}
