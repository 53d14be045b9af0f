pub mod memory;

pub use memory::InMemoryBookRepository;
