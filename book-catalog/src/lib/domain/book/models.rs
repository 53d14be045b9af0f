use std::fmt;

use chrono::NaiveDate;

use crate::domain::book::errors::BookIdError;
use crate::domain::book::errors::RatingError;
use crate::domain::book::errors::TextFieldError;

/// Catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: BookTitle,
    pub author: Author,
    pub description: BookDescription,
    pub category: Category,
    pub publish_date: NaiveDate,
    pub rating: Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(pub i64);

impl BookId {
    pub fn from_string(s: &str) -> Result<Self, BookIdError> {
        let id = s
            .parse::<i64>()
            .map_err(|e| BookIdError::InvalidFormat(e.to_string()))?;

        if id < 1 {
            return Err(BookIdError::NotPositive(id));
        }

        Ok(Self(id))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn bounded_text(value: String, min: usize, max: usize) -> Result<String, TextFieldError> {
    let length = value.chars().count();
    if length < min {
        Err(TextFieldError::TooShort {
            min,
            actual: length,
        })
    } else if length > max {
        Err(TextFieldError::TooLong {
            max,
            actual: length,
        })
    } else {
        Ok(value)
    }
}

/// Title, 3-200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn new(title: String) -> Result<Self, TextFieldError> {
        bounded_text(title, 3, 200).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author(String);

impl Author {
    pub fn new(author: String) -> Result<Self, TextFieldError> {
        bounded_text(author, 1, 100).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Description, 1-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDescription(String);

impl BookDescription {
    pub fn new(description: String) -> Result<Self, TextFieldError> {
        bounded_text(description, 1, 100).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category(String);

impl Category {
    pub fn new(category: String) -> Result<Self, TextFieldError> {
        bounded_text(category, 1, 50).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reader rating from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    const MIN: i64 = 1;
    const MAX: i64 = 5;

    pub fn new(rating: i64) -> Result<Self, RatingError> {
        checked_rating(rating, Self::MIN, Self::MAX).map(Self)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Lower bound for the rating filter. Zero admits every book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinRating(u8);

impl MinRating {
    pub fn new(rating: i64) -> Result<Self, RatingError> {
        checked_rating(rating, 0, Rating::MAX).map(Self)
    }

    pub fn admits(&self, rating: Rating) -> bool {
        rating.value() >= self.0
    }
}

fn checked_rating(rating: i64, min: i64, max: i64) -> Result<u8, RatingError> {
    if (min..=max).contains(&rating) {
        Ok(rating as u8)
    } else {
        Err(RatingError {
            min,
            max,
            actual: rating,
        })
    }
}

/// Listing criteria. Every field that is set must match.
///
/// Text criteria compare case-insensitively and ignore empty strings.
/// Date bounds are exclusive.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub category: Option<String>,
    pub author: Option<String>,
    pub min_rating: Option<MinRating>,
    pub published_after: Option<NaiveDate>,
    pub published_before: Option<NaiveDate>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        text_matches(self.category.as_deref(), book.category.as_str())
            && text_matches(self.author.as_deref(), book.author.as_str())
            && self.min_rating.map_or(true, |min| min.admits(book.rating))
            && self
                .published_after
                .map_or(true, |after| book.publish_date > after)
            && self
                .published_before
                .map_or(true, |before| book.publish_date < before)
    }
}

fn text_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        None | Some("") => true,
        Some(wanted) => wanted.to_lowercase() == actual.to_lowercase(),
    }
}

/// Validated fields of a book to add; the catalog assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: BookTitle,
    pub author: Author,
    pub description: BookDescription,
    pub category: Category,
    pub publish_date: NaiveDate,
    pub rating: Rating,
}

impl NewBook {
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            description: self.description,
            category: self.category,
            publish_date: self.publish_date,
            rating: self.rating,
        }
    }
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Default)]
pub struct UpdateBookCommand {
    pub title: Option<BookTitle>,
    pub author: Option<Author>,
    pub description: Option<BookDescription>,
    pub category: Option<Category>,
    pub publish_date: Option<NaiveDate>,
    pub rating: Option<Rating>,
}

impl UpdateBookCommand {
    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(description) = self.description {
            book.description = description;
        }
        if let Some(category) = self.category {
            book.category = category;
        }
        if let Some(publish_date) = self.publish_date {
            book.publish_date = publish_date;
        }
        if let Some(rating) = self.rating {
            book.rating = rating;
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_book(
    id: i64,
    author: &str,
    category: &str,
    published: &str,
    rating: i64,
) -> Book {
    Book {
        id: BookId(id),
        title: BookTitle::new(format!("Book {}", id)).unwrap(),
        author: Author::new(author.to_string()).unwrap(),
        description: BookDescription::new("A book".to_string()).unwrap(),
        category: Category::new(category.to_string()).unwrap(),
        publish_date: published.parse().unwrap(),
        rating: Rating::new(rating).unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_book_id_from_string() {
        assert_eq!(BookId::from_string("7"), Ok(BookId(7)));
        assert_eq!(BookId::from_string("0"), Err(BookIdError::NotPositive(0)));
        assert!(matches!(
            BookId::from_string("seven"),
            Err(BookIdError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_field_bounds() {
        assert_eq!(
            BookTitle::new("HP".to_string()),
            Err(TextFieldError::TooShort { min: 3, actual: 2 })
        );
        assert!(Author::new(String::new()).is_err());
        assert!(matches!(
            BookDescription::new("x".repeat(101)),
            Err(TextFieldError::TooLong { max: 100, .. })
        ));
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(5).map(|r| r.value()), Ok(5));
        assert!(MinRating::new(0).is_ok());
        assert!(MinRating::new(6).is_err());
    }

    #[test]
    fn test_filter_text_is_case_insensitive() {
        let book = sample_book(1, "Author Two", "Science", "2021-01-01", 4);

        let filter = BookFilter {
            category: Some("science".to_string()),
            author: Some("AUTHOR TWO".to_string()),
            ..BookFilter::default()
        };
        assert!(filter.matches(&book));

        let filter = BookFilter {
            author: Some("Author One".to_string()),
            ..BookFilter::default()
        };
        assert!(!filter.matches(&book));
    }

    #[test]
    fn test_filter_ignores_empty_text() {
        let book = sample_book(1, "Author Two", "science", "2021-01-01", 4);
        let filter = BookFilter {
            category: Some(String::new()),
            author: Some(String::new()),
            ..BookFilter::default()
        };
        assert!(filter.matches(&book));
    }

    #[test]
    fn test_filter_rating_and_date_bounds() {
        let book = sample_book(1, "Author", "math", "2021-10-14", 4);

        let at_least = |n| BookFilter {
            min_rating: Some(MinRating::new(n).unwrap()),
            ..BookFilter::default()
        };
        assert!(at_least(4).matches(&book));
        assert!(!at_least(5).matches(&book));

        let after = |d| BookFilter {
            published_after: Some(date(d)),
            ..BookFilter::default()
        };
        assert!(after("2021-10-13").matches(&book));
        assert!(!after("2021-10-14").matches(&book));

        let before = |d| BookFilter {
            published_before: Some(date(d)),
            ..BookFilter::default()
        };
        assert!(before("2021-10-15").matches(&book));
        assert!(!before("2021-10-14").matches(&book));
    }

    #[test]
    fn test_update_applies_only_given_fields() {
        let mut book = sample_book(1, "Author", "math", "2021-10-14", 4);
        let original = book.clone();

        UpdateBookCommand {
            rating: Some(Rating::new(2).unwrap()),
            ..UpdateBookCommand::default()
        }
        .apply(&mut book);

        assert_eq!(book.rating.value(), 2);
        assert_eq!(book.title, original.title);
        assert_eq!(book.publish_date, original.publish_date);
    }
}
