use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Role, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

use super::InMemoryStore;

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        let taken = state
            .users
            .values()
            .any(|u| u.email == user.email || u.external_uid == user.external_uid);
        if taken {
            return Err(DomainError::conflict("User already exists"));
        }
        state.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    async fn find_by_external_uid(&self, uid: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|u| u.external_uid == uid)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.lock()?.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = self.lock()?.users.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update_role(&self, id: &UserId, role: Role) -> Result<Option<User>, DomainError> {
        let mut state = self.lock()?;
        Ok(state.users.get_mut(id).map(|user| {
            user.role = role;
            user.clone()
        }))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        Ok(self.lock()?.users.remove(id).is_some())
    }
}
