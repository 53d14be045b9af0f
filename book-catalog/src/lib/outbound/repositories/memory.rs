use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Author;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDescription;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::Category;
use crate::domain::book::models::NewBook;
use crate::domain::book::models::Rating;
use crate::domain::book::ports::BookRepository;

/// Process-local catalog. Contents are lost on restart.
pub struct InMemoryBookRepository {
    shelf: RwLock<Shelf>,
}

struct Shelf {
    books: Vec<Book>,
    next_id: i64,
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self {
            shelf: RwLock::new(Shelf {
                books: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Catalog pre-filled with the starter collection.
    pub fn seeded() -> Result<Self, BookError> {
        let books = SEED
            .iter()
            .enumerate()
            .map(|(index, seed)| seed.to_book(BookId(index as i64 + 1)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            shelf: RwLock::new(Shelf {
                next_id: books.len() as i64 + 1,
                books,
            }),
        })
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list(&self) -> Result<Vec<Book>, BookError> {
        Ok(self.shelf.read().await.books.clone())
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        let shelf = self.shelf.read().await;
        Ok(shelf.books.iter().find(|book| book.id == *id).cloned())
    }

    async fn create(&self, book: NewBook) -> Result<Book, BookError> {
        let mut shelf = self.shelf.write().await;
        // Ids are never reused, even after the newest book is deleted.
        let book = book.with_id(BookId(shelf.next_id));
        shelf.next_id += 1;
        shelf.books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let mut shelf = self.shelf.write().await;
        let slot = shelf
            .books
            .iter_mut()
            .find(|stored| stored.id == book.id)
            .ok_or(BookError::NotFound(book.id))?;
        *slot = book.clone();
        Ok(book)
    }

    async fn delete(&self, id: &BookId) -> Result<Book, BookError> {
        let mut shelf = self.shelf.write().await;
        let index = shelf
            .books
            .iter()
            .position(|book| book.id == *id)
            .ok_or(BookError::NotFound(*id))?;
        Ok(shelf.books.remove(index))
    }
}

struct SeedBook {
    title: &'static str,
    author: &'static str,
    description: &'static str,
    category: &'static str,
    published: (i32, u32, u32),
    rating: i64,
}

impl SeedBook {
    fn to_book(&self, id: BookId) -> Result<Book, BookError> {
        let (year, month, day) = self.published;
        let publish_date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            BookError::InvalidPublishDate(format!("{}-{}-{}", year, month, day))
        })?;

        Ok(Book {
            id,
            title: BookTitle::new(self.title.to_string()).map_err(BookError::InvalidTitle)?,
            author: Author::new(self.author.to_string()).map_err(BookError::InvalidAuthor)?,
            description: BookDescription::new(self.description.to_string())
                .map_err(BookError::InvalidDescription)?,
            category: Category::new(self.category.to_string())
                .map_err(BookError::InvalidCategory)?,
            publish_date,
            rating: Rating::new(self.rating).map_err(BookError::InvalidRating)?,
        })
    }
}

const SEED: [SeedBook; 6] = [
    SeedBook {
        title: "Computer Science Pro",
        author: "codingwithroby",
        description: "A very nice book",
        category: "science",
        published: (2021, 1, 1),
        rating: 5,
    },
    SeedBook {
        title: "Be fast with FastAPI",
        author: "codingwithroby",
        description: "A great book!",
        category: "programming",
        published: (2021, 10, 14),
        rating: 5,
    },
    SeedBook {
        title: "Master Endpoints",
        author: "codingwithroby",
        description: "An awesome book",
        category: "programming",
        published: (2021, 10, 24),
        rating: 5,
    },
    SeedBook {
        title: "HP1",
        author: "Author 1",
        description: "Book description",
        category: "fantasy",
        published: (2022, 5, 24),
        rating: 4,
    },
    SeedBook {
        title: "HP2",
        author: "Author 2",
        description: "Book description",
        category: "fantasy",
        published: (1995, 2, 3),
        rating: 1,
    },
    SeedBook {
        title: "HP3",
        author: "Author 3",
        description: "Book description",
        category: "fantasy",
        published: (2005, 2, 3),
        rating: 1,
    },
];
