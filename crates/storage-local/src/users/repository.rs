use std::sync::Arc;

use certifolio_core::users::{User, UserRepositoryTrait};
use certifolio_core::Result;

use crate::dataset::DatasetStore;

pub struct UserRepository {
    store: Arc<DatasetStore>,
}

impl UserRepository {
    pub fn new(store: Arc<DatasetStore>) -> Self {
        UserRepository { store }
    }
}

impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self
            .store
            .read(|d| d.users.iter().find(|u| u.id == user_id).cloned())?)
    }
}
