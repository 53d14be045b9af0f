use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookFilter;
use crate::domain::book::models::BookId;
use crate::domain::book::models::NewBook;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::ports::BookServicePort;

/// Domain service for the book catalog.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    pub fn new(repository: Arc<BR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    async fn list_books(&self, filter: &BookFilter) -> Result<Vec<Book>, BookError> {
        let mut books = self.repository.list().await?;
        books.retain(|book| filter.matches(book));
        Ok(books)
    }

    async fn get_book(&self, id: &BookId) -> Result<Book, BookError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(*id))
    }

    async fn create_book(&self, book: NewBook) -> Result<Book, BookError> {
        let book = self.repository.create(book).await?;
        tracing::debug!(book_id = %book.id, title = book.title.as_str(), "Book created");
        Ok(book)
    }

    async fn update_book(
        &self,
        id: &BookId,
        command: UpdateBookCommand,
    ) -> Result<Book, BookError> {
        let mut book = self.get_book(id).await?;
        command.apply(&mut book);
        self.repository.update(book).await
    }

    async fn delete_book(&self, id: &BookId) -> Result<Book, BookError> {
        let book = self.repository.delete(id).await?;
        tracing::debug!(book_id = %id, "Book deleted");
        Ok(book)
    }
}
