use thiserror::Error;

use crate::domain::book::models::BookId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookIdError {
    #[error("Invalid book id format: {0}")]
    InvalidFormat(String),

    #[error("Book id must be positive, got {0}")]
    NotPositive(i64),
}

/// Length violation of a free-text book field
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TextFieldError {
    #[error("too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("must be between {min} and {max}, got {actual}")]
pub struct RatingError {
    pub min: i64,
    pub max: i64,
    pub actual: i64,
}

/// Top-level error for catalog operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("Invalid book ID: {0}")]
    InvalidBookId(#[from] BookIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(TextFieldError),

    #[error("Invalid author: {0}")]
    InvalidAuthor(TextFieldError),

    #[error("Invalid description: {0}")]
    InvalidDescription(TextFieldError),

    #[error("Invalid category: {0}")]
    InvalidCategory(TextFieldError),

    #[error("Invalid publish date: {0}")]
    InvalidPublishDate(String),

    #[error("Invalid rating: {0}")]
    InvalidRating(RatingError),

    #[error("Invalid minimum rating: {0}")]
    InvalidMinRating(RatingError),

    #[error("Book with id={0} not found")]
    NotFound(BookId),
}
