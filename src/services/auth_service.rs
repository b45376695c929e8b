//! Authentication service - registration, login and the admin bootstrap.

use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

use crate::config::{AdminSeed, MSG_BUSINESS_REQUIRED, MSG_DUPLICATE_ACCOUNT, MSG_DUPLICATE_TAX_ID};
use crate::domain::profile::parse_birth_date;
use crate::domain::{NewAuditEntry, NewUser, Password, Registration, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Result of `/crear_admin`.
#[derive(Debug, Clone)]
pub enum BootstrapOutcome {
    Created(User),
    AlreadyExists,
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a user, its role profile and the "Creación" audit entry in one
    /// transaction.
    async fn register(&self, registration: Registration) -> AppResult<User>;

    /// Match `identifier` against username or email and verify the password.
    async fn login(&self, identifier: &str, password: &str) -> AppResult<User>;

    /// Create the configured administrator unless that username exists.
    async fn bootstrap_admin(&self) -> AppResult<BootstrapOutcome>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    admin: AdminSeed,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, admin: AdminSeed) -> Self {
        Self { uow, admin }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, registration: Registration) -> AppResult<User> {
        let registration = registration.normalized();
        registration.validate()?;

        let role = registration.role();
        if role.is_admin() {
            return Err(AppError::validation(
                "No es posible registrarse como Administrador",
            ));
        }

        let password_hash = Password::new(&registration.password)?.into_string();

        let user = with_transaction!(self.uow, |ctx| {
            let users = ctx.users();
            if users
                .username_or_email_taken(&registration.username, &registration.email)
                .await?
            {
                return Err(AppError::conflict(MSG_DUPLICATE_ACCOUNT));
            }

            // Everything that can reject the form runs before the first insert
            let birth_date = parse_birth_date(&registration.birth_date)?;
            if role == UserRole::Entrepreneur {
                if registration.business_name.is_empty() || registration.tax_id.is_empty() {
                    return Err(AppError::validation(MSG_BUSINESS_REQUIRED));
                }
                if ctx.entrepreneurs().tax_id_taken(&registration.tax_id).await? {
                    return Err(AppError::conflict(MSG_DUPLICATE_TAX_ID));
                }
            }

            let user = users
                .create(NewUser {
                    username: registration.username.clone(),
                    email: registration.email.clone(),
                    password_hash,
                    role: role.clone(),
                })
                .await?;

            match role {
                UserRole::Explorer => {
                    ctx.explorers()
                        .create(user.id, &registration.explorer(birth_date))
                        .await?;
                }
                UserRole::Entrepreneur => {
                    ctx.entrepreneurs()
                        .create(user.id, &registration.entrepreneur(birth_date))
                        .await?;
                }
                _ => {}
            }

            ctx.audit()
                .append(NewAuditEntry::user_created(user.id, &user.username, &user.role))
                .await?;

            Ok(user)
        })?;

        tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "User registered");
        Ok(user)
    }

    async fn login(&self, identifier: &str, password: &str) -> AppResult<User> {
        let identifier = identifier.trim();
        let found = self.uow.users().find_by_identifier(identifier).await?;

        match found {
            Some(user) if Password::from_hash(user.password_hash.clone()).verify(password) => {
                tracing::info!(user_id = user.id, role = %user.role, "User logged in");
                Ok(user)
            }
            Some(user) => {
                tracing::debug!(user_id = user.id, "Rejected login: wrong password");
                Err(AppError::InvalidCredentials)
            }
            None => {
                // Same cost as a real verification
                Password::verify_dummy(password);
                Err(AppError::InvalidCredentials)
            }
        }
    }

    async fn bootstrap_admin(&self) -> AppResult<BootstrapOutcome> {
        let seed = self.admin.clone();
        if self
            .uow
            .users()
            .find_by_username(&seed.username)
            .await?
            .is_some()
        {
            return Ok(BootstrapOutcome::AlreadyExists);
        }

        let password_hash = Password::new(seed.password())?.into_string();

        let outcome = with_transaction!(self.uow, |ctx| {
            let users = ctx.users();
            if users.find_by_username(&seed.username).await?.is_some() {
                return Ok(BootstrapOutcome::AlreadyExists);
            }
            if users
                .username_or_email_taken(&seed.username, &seed.email)
                .await?
            {
                return Err(AppError::conflict(MSG_DUPLICATE_ACCOUNT));
            }

            let user = users
                .create(NewUser {
                    username: seed.username.clone(),
                    email: seed.email.clone(),
                    password_hash,
                    role: UserRole::Administrator,
                })
                .await?;
            Ok(BootstrapOutcome::Created(user))
        })?;

        if let BootstrapOutcome::Created(user) = &outcome {
            tracing::info!(user_id = user.id, username = %user.username, "Administrator created");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::infra::{
        AuditRepository, EntrepreneurRepository, ExplorerRepository, MockAuditRepository,
        MockEntrepreneurRepository, MockExplorerRepository, MockUserRepository, TransactionContext,
        UserRepository,
    };

    /// Unit of work over mocked read repositories; transactions always fail.
    struct TestUnitOfWork {
        users: Arc<MockUserRepository>,
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn explorers(&self) -> Arc<dyn ExplorerRepository> {
            Arc::new(MockExplorerRepository::new())
        }

        fn entrepreneurs(&self) -> Arc<dyn EntrepreneurRepository> {
            Arc::new(MockEntrepreneurRepository::new())
        }

        fn audit(&self) -> Arc<dyn AuditRepository> {
            Arc::new(MockAuditRepository::new())
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }
    }

    fn service(users: MockUserRepository) -> Authenticator<TestUnitOfWork> {
        Authenticator::new(
            Arc::new(TestUnitOfWork {
                users: Arc::new(users),
            }),
            AdminSeed::default(),
        )
    }

    fn stored_user(password: &str) -> User {
        User {
            id: 3,
            username: "ana".into(),
            email: "ana@x.com".into(),
            password_hash: Password::new(password).unwrap().into_string(),
            role: UserRole::Explorer,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repo = MockUserRepository::new();
        let user = stored_user("secreto");
        repo.expect_find_by_identifier()
            .with(eq("ana"))
            .returning(move |_| Ok(Some(user.clone())));

        let logged_in = service(repo).login(" ana ", "secreto").await.unwrap();
        assert_eq!(logged_in.id, 3);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repo = MockUserRepository::new();
        let user = stored_user("secreto");
        repo.expect_find_by_identifier()
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(repo).login("ana", "otra").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_identifier_is_indistinguishable() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_identifier().returning(|_| Ok(None));

        let err = service(repo).login("nadie", "x").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
        assert_eq!(err.to_string(), "Credenciales incorrectas");
    }

    #[tokio::test]
    async fn test_bootstrap_when_admin_exists() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .with(eq("admin"))
            .returning(|_| {
                Ok(Some(User {
                    id: 1,
                    username: "admin".into(),
                    email: "admin@myiana.com".into(),
                    password_hash: String::new(),
                    role: UserRole::Administrator,
                    created_at: Utc::now(),
                }))
            });

        let outcome = service(repo).bootstrap_admin().await.unwrap();
        assert!(matches!(outcome, BootstrapOutcome::AlreadyExists));
    }

    #[tokio::test]
    async fn test_register_rejects_blank_username_before_any_write() {
        let registration = Registration {
            username: "  ".into(),
            email: "a@b.c".into(),
            password: "x".into(),
            role: "Explorador".into(),
            ..Default::default()
        };

        let result = service(MockUserRepository::new())
            .register(registration)
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_as_administrator_refused() {
        let registration = Registration {
            username: "root".into(),
            email: "root@x.com".into(),
            password: "x".into(),
            role: "Administrador".into(),
            ..Default::default()
        };

        let result = service(MockUserRepository::new())
            .register(registration)
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
