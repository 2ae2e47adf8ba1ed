//! Transactions module - domain model and repository trait.

mod transactions_model;
mod transactions_traits;

pub use transactions_model::Transaction;
pub use transactions_traits::TransactionRepositoryTrait;
