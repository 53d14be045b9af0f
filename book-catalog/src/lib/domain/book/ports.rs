use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookFilter;
use crate::domain::book::models::BookId;
use crate::domain::book::models::NewBook;
use crate::domain::book::models::UpdateBookCommand;

/// Port for catalog operations.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// Books matching every criterion of `filter`, in catalog order.
    async fn list_books(&self, filter: &BookFilter) -> Result<Vec<Book>, BookError>;

    /// # Errors
    /// * `NotFound` - No book with this id
    async fn get_book(&self, id: &BookId) -> Result<Book, BookError>;

    async fn create_book(&self, book: NewBook) -> Result<Book, BookError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - No book with this id
    async fn update_book(&self, id: &BookId, command: UpdateBookCommand)
        -> Result<Book, BookError>;

    /// Remove a book and return it.
    ///
    /// # Errors
    /// * `NotFound` - No book with this id
    async fn delete_book(&self, id: &BookId) -> Result<Book, BookError>;
}

/// Storage for catalog entries.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Book>, BookError>;

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError>;

    async fn create(&self, book: NewBook) -> Result<Book, BookError>;

    /// # Errors
    /// * `NotFound` - Book does not exist
    async fn update(&self, book: Book) -> Result<Book, BookError>;

    /// # Errors
    /// * `NotFound` - Book does not exist
    async fn delete(&self, id: &BookId) -> Result<Book, BookError>;
}
