//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::users::{
        errors::UsersServiceError,
        models::{NewUser, User, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

fn check_new_user(user: &NewUser) -> Result<(), UsersServiceError> {
    if user.name.trim().is_empty() {
        return Err(UsersServiceError::Invalid("name is required"));
    }

    let email = user.email.trim();

    if email.is_empty() || !email.contains('@') {
        return Err(UsersServiceError::Invalid("a valid email is required"));
    }

    Ok(())
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn list_users(&self) -> Result<Vec<User>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .repository
            .find_user_by_email(&mut tx, email.trim())
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError> {
        check_new_user(&user)?;

        let user = NewUser {
            name: user.name.trim().to_string(),
            email: user.email.trim().to_string(),
            ..user
        };

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        info!(user = %created.uuid, role = %created.role, "created user");

        Ok(created)
    }

    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieves all users, newest first.
    async fn list_users(&self) -> Result<Vec<User>, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError>;

    /// Look a user up by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UsersServiceError>;

    /// Creates a new user. Emails are unique regardless of case.
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError>;

    /// Deletes a user that has never placed an order.
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError>;
}
