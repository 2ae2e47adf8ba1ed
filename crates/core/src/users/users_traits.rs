use super::users_model::User;
use crate::errors::Result;

/// Trait for user repository operations
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<Option<User>>;
}
