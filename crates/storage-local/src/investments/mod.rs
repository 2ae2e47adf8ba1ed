mod repository;

pub use repository::InvestmentRepository;
