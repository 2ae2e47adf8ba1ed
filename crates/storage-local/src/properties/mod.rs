mod repository;

pub use repository::PropertyRepository;
