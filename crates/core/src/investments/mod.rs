//! Investments module - domain model and repository trait.

mod investments_model;
mod investments_traits;

pub use investments_model::{most_recent, Investment};
pub use investments_traits::InvestmentRepositoryTrait;
