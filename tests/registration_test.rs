//! Registration and login against a real database.

mod common;

use chia_directory::domain::{Profile, UserRole};
use chia_directory::errors::AppError;

use common::{entrepreneur_registration, explorer_registration, test_db};

#[tokio::test]
async fn test_same_username_never_registers_twice() {
    let db = test_db().await;
    let services = db.services();

    services
        .auth()
        .register(explorer_registration("ana", "ana@x.com", "Comida"))
        .await
        .unwrap();
    let duplicate = services
        .auth()
        .register(explorer_registration("ana", "otra@x.com", "Ocio"))
        .await;
    let same_email = services
        .auth()
        .register(explorer_registration("otra", "ana@x.com", "Ocio"))
        .await;

    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    assert!(matches!(same_email, Err(AppError::Conflict(_))));

    let dashboard = services.reports().admin_dashboard().await.unwrap();
    assert_eq!(dashboard.total_users, 1);
    assert_eq!(dashboard.explorers.len(), 1);
    assert_eq!(dashboard.actions.get("Creación"), Some(1));
}

#[tokio::test]
async fn test_registration_writes_profile_and_creation_entry() {
    let db = test_db().await;
    let services = db.services();

    let mut registration = explorer_registration("  ana  ", "ana@x.com", "Comida");
    registration.birth_date = "1990-05-17".into();
    let user = services.auth().register(registration).await.unwrap();
    assert_eq!(user.username, "ana");
    assert_eq!(user.role, UserRole::Explorer);

    let account = services.moderation().account(user.id).await.unwrap();
    match account.profile {
        Profile::Explorer(profile) => {
            assert_eq!(profile.user_id, user.id);
            assert_eq!(profile.preference, "Comida");
            assert_eq!(profile.birth_date.unwrap().to_string(), "1990-05-17");
        }
        other => panic!("unexpected profile {:?}", other),
    }

    let logs = services.reports().admin_dashboard().await.unwrap().logs;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "Creación");
    assert_eq!(logs[0].entity_id, Some(user.id));
    assert_eq!(logs[0].entity_type.as_deref(), Some("Usuario"));
    assert_eq!(
        logs[0].details,
        "Se creó el usuario 'ana' con rol 'Explorador'."
    );
}

#[tokio::test]
async fn test_invalid_birth_date_leaves_no_user_behind() {
    let db = test_db().await;
    let services = db.services();

    let mut registration = entrepreneur_registration("luis", "luis@x.com", "Arepas", "900");
    registration.birth_date = "17-05-1990".into();

    let result = services.auth().register(registration).await;
    match result {
        Err(AppError::Validation(message)) => {
            assert_eq!(message, "Formato de fecha inválido. Usa AAAA-MM-DD.")
        }
        other => panic!("unexpected result {:?}", other),
    }

    let dashboard = services.reports().admin_dashboard().await.unwrap();
    assert_eq!(dashboard.total_users, 0);
    assert!(dashboard.logs.is_empty());
}

#[tokio::test]
async fn test_entrepreneur_requires_business_name_and_unique_nit() {
    let db = test_db().await;
    let services = db.services();

    let missing = services
        .auth()
        .register(entrepreneur_registration("luis", "luis@x.com", "", "900"))
        .await;
    assert!(matches!(missing, Err(AppError::Validation(_))));

    services
        .auth()
        .register(entrepreneur_registration("luis", "luis@x.com", "Arepas", "900"))
        .await
        .unwrap();
    let same_nit = services
        .auth()
        .register(entrepreneur_registration("eva", "eva@x.com", "Panes", "900"))
        .await;
    assert!(matches!(same_nit, Err(AppError::Conflict(_))));

    let dashboard = services.reports().admin_dashboard().await.unwrap();
    assert_eq!(dashboard.total_entrepreneurs, 1);
    assert_eq!(dashboard.plans.get("Sin Plan"), Some(1));
}

#[tokio::test]
async fn test_unknown_role_is_stored_without_profile() {
    let db = test_db().await;
    let services = db.services();

    let mut registration = explorer_registration("vis", "vis@x.com", "Comida");
    registration.role = "Visitante".into();
    let user = services.auth().register(registration).await.unwrap();

    assert_eq!(user.role, UserRole::Other("Visitante".into()));
    let account = services.moderation().account(user.id).await.unwrap();
    assert!(matches!(account.profile, Profile::Unassigned));
    assert_eq!(user.role.dashboard_path(), "/explorador_dashboard");
}

#[tokio::test]
async fn test_login_matches_username_or_email() {
    let db = test_db().await;
    let services = db.services();
    let user = services
        .auth()
        .register(explorer_registration("ana", "ana@x.com", "Comida"))
        .await
        .unwrap();

    let by_name = services.auth().login("ana", "secreto").await.unwrap();
    let by_email = services.auth().login("ana@x.com", "secreto").await.unwrap();
    assert_eq!(by_name.id, user.id);
    assert_eq!(by_email.id, user.id);

    assert!(matches!(
        services.auth().login("ana", "Secreto").await,
        Err(AppError::InvalidCredentials)
    ));
    assert!(matches!(
        services.auth().login("ANA", "secreto").await,
        Err(AppError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_admin_bootstrap_runs_once() {
    use chia_directory::services::BootstrapOutcome;

    let db = test_db().await;
    let services = db.services();

    let first = services.auth().bootstrap_admin().await.unwrap();
    let second = services.auth().bootstrap_admin().await.unwrap();

    match first {
        BootstrapOutcome::Created(user) => assert!(user.is_admin()),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(matches!(second, BootstrapOutcome::AlreadyExists));
    assert!(services.auth().login("admin", "admin").await.is_ok());
}
