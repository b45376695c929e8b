//! Administrative edits and deletions with their audit trail.

mod common;

use chia_directory::domain::{EntrepreneurPatch, ExplorerPatch, User};
use chia_directory::errors::AppError;
use chia_directory::services::ServiceContainer;

use common::{entrepreneur_registration, explorer_registration, test_db};

async fn entrepreneur_id(services: &dyn ServiceContainer, owner: &User) -> i32 {
    services
        .reports()
        .admin_dashboard()
        .await
        .unwrap()
        .entrepreneurs
        .into_iter()
        .find(|e| e.user_id == owner.id)
        .map(|e| e.id)
        .unwrap()
}

async fn explorer_id(services: &dyn ServiceContainer, owner: &User) -> i32 {
    services
        .reports()
        .admin_dashboard()
        .await
        .unwrap()
        .explorers
        .into_iter()
        .find(|e| e.user_id == owner.id)
        .map(|e| e.id)
        .unwrap()
}

#[tokio::test]
async fn test_edit_without_changes_is_still_audited() {
    let db = test_db().await;
    let services = db.services();
    let owner = services
        .auth()
        .register(entrepreneur_registration("luis", "luis@x.com", "Arepas", "900"))
        .await
        .unwrap();
    let id = entrepreneur_id(services.as_ref(), &owner).await;

    services
        .moderation()
        .edit_entrepreneur(id, EntrepreneurPatch::default(), None)
        .await
        .unwrap();

    let logs = services.reports().admin_dashboard().await.unwrap().logs;
    let edit = logs
        .iter()
        .find(|entry| entry.action == "Edición de Emprendedor")
        .unwrap();
    assert_eq!(edit.entity_id, Some(id));
    assert_eq!(
        edit.details,
        "Se editaron los datos del emprendimiento 'Arepas'. Cambios: Sin cambios detectados"
    );
}

#[tokio::test]
async fn test_zone_change_produces_single_fragment() {
    let db = test_db().await;
    let services = db.services();
    let admin = match services.auth().bootstrap_admin().await.unwrap() {
        chia_directory::services::BootstrapOutcome::Created(user) => user,
        other => panic!("unexpected outcome {:?}", other),
    };
    let owner = services
        .auth()
        .register(entrepreneur_registration("luis", "luis@x.com", "Arepas", "900"))
        .await
        .unwrap();
    let id = entrepreneur_id(services.as_ref(), &owner).await;

    let patch = EntrepreneurPatch {
        zone: Some("Sur".into()),
        business_name: Some("Arepas".into()),
        ..Default::default()
    };
    let updated = services
        .moderation()
        .edit_entrepreneur(id, patch, Some(admin.id))
        .await
        .unwrap();
    assert_eq!(updated.zone, "Sur");
    assert_eq!(updated.location, "Calle 10");

    let logs = services.reports().admin_dashboard().await.unwrap().logs;
    let edit = &logs[0];
    assert_eq!(edit.actor_id, Some(admin.id));
    assert!(edit.details.ends_with("Cambios: zona: 'Norte' → 'Sur'"));
    assert_eq!(edit.details.matches(" → ").count(), 1);
}

#[tokio::test]
async fn test_empty_field_clears_value() {
    let db = test_db().await;
    let services = db.services();
    let owner = services
        .auth()
        .register(explorer_registration("ana", "ana@x.com", "Comida"))
        .await
        .unwrap();
    let id = explorer_id(services.as_ref(), &owner).await;

    let patch = ExplorerPatch {
        phone: Some(String::new()),
        birth_date: Some("2000-01-31".into()),
        ..Default::default()
    };
    let updated = services
        .moderation()
        .edit_explorer(id, patch, None)
        .await
        .unwrap();

    assert_eq!(updated.phone, "");
    assert_eq!(updated.first_name, "Ana");
    let logs = services.reports().admin_dashboard().await.unwrap().logs;
    assert!(logs[0].details.contains("telefono: '3001234567' → ''"));
    assert!(logs[0].details.contains("fecha_nacimiento: '' → '2000-01-31'"));
    assert!(logs[0].details.contains("explorador 'Ana Ruiz'"));
}

#[tokio::test]
async fn test_bad_date_aborts_edit_without_audit() {
    let db = test_db().await;
    let services = db.services();
    let owner = services
        .auth()
        .register(explorer_registration("ana", "ana@x.com", "Comida"))
        .await
        .unwrap();
    let id = explorer_id(services.as_ref(), &owner).await;

    let patch = ExplorerPatch {
        first_name: Some("Otra".into()),
        birth_date: Some("2000/01/31".into()),
        ..Default::default()
    };
    let result = services.moderation().edit_explorer(id, patch, None).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let stored = services.moderation().explorer(id).await.unwrap();
    assert_eq!(stored.first_name, "Ana");
    let dashboard = services.reports().admin_dashboard().await.unwrap();
    assert_eq!(dashboard.actions.get("Edición"), Some(0));
}

#[tokio::test]
async fn test_nit_collision_on_edit_is_rejected() {
    let db = test_db().await;
    let services = db.services();
    services
        .auth()
        .register(entrepreneur_registration("luis", "luis@x.com", "Arepas", "900"))
        .await
        .unwrap();
    let eva = services
        .auth()
        .register(entrepreneur_registration("eva", "eva@x.com", "Panes", "901"))
        .await
        .unwrap();
    let id = entrepreneur_id(services.as_ref(), &eva).await;

    let patch = EntrepreneurPatch {
        tax_id: Some("900".into()),
        ..Default::default()
    };
    let result = services.moderation().edit_entrepreneur(id, patch, None).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(services.moderation().entrepreneur(id).await.unwrap().tax_id, "901");
}

#[tokio::test]
async fn test_delete_entrepreneur_removes_profile_and_user() {
    let db = test_db().await;
    let services = db.services();
    let owner = services
        .auth()
        .register(entrepreneur_registration("luis", "luis@x.com", "Arepas", "900"))
        .await
        .unwrap();
    let id = entrepreneur_id(services.as_ref(), &owner).await;

    services
        .moderation()
        .delete_entrepreneur(id, None)
        .await
        .unwrap();

    assert!(matches!(
        services.moderation().entrepreneur(id).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        services.moderation().account(owner.id).await,
        Err(AppError::NotFound)
    ));

    let dashboard = services.reports().admin_dashboard().await.unwrap();
    assert_eq!(dashboard.total_users, 0);
    let deletion = &dashboard.logs[0];
    assert_eq!(deletion.action, "Eliminación");
    assert_eq!(deletion.entity_id, Some(owner.id));
    assert!(deletion.details.contains("\"luis\""));
    assert!(deletion.details.contains("\"Arepas\""));

    // A second delete finds nothing
    assert!(matches!(
        services.moderation().delete_entrepreneur(id, None).await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn test_delete_explorer_removes_profile_and_user() {
    let db = test_db().await;
    let services = db.services();
    let owner = services
        .auth()
        .register(explorer_registration("ana", "ana@x.com", "Comida"))
        .await
        .unwrap();
    let id = explorer_id(services.as_ref(), &owner).await;

    services.moderation().delete_explorer(id, None).await.unwrap();

    let dashboard = services.reports().admin_dashboard().await.unwrap();
    assert!(dashboard.explorers.is_empty());
    assert_eq!(dashboard.total_users, 0);
    assert_eq!(dashboard.actions.values, vec![1, 0, 1]);
    assert!(matches!(
        services.auth().login("ana", "secreto").await,
        Err(AppError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_failed_audit_append_rolls_back_the_edit() {
    let db = test_db().await;
    let services = db.services();
    let owner = services
        .auth()
        .register(entrepreneur_registration("luis", "luis@x.com", "Arepas", "900"))
        .await
        .unwrap();
    let id = entrepreneur_id(services.as_ref(), &owner).await;

    // The profile update succeeds; the audit row then violates the actor
    // foreign key.
    let patch = EntrepreneurPatch {
        zone: Some("Sur".into()),
        ..Default::default()
    };
    let result = services
        .moderation()
        .edit_entrepreneur(id, patch, Some(9_999))
        .await;
    assert!(matches!(result, Err(AppError::Database(_))));

    let stored = services.moderation().entrepreneur(id).await.unwrap();
    assert_eq!(stored.zone, "Norte");
    let dashboard = services.reports().admin_dashboard().await.unwrap();
    assert_eq!(dashboard.actions.get("Edición"), Some(0));
    assert_eq!(dashboard.logs.len(), 1);
}

#[tokio::test]
async fn test_failed_delete_keeps_account() {
    let db = test_db().await;
    let services = db.services();
    let owner = services
        .auth()
        .register(explorer_registration("ana", "ana@x.com", "Comida"))
        .await
        .unwrap();
    let id = explorer_id(services.as_ref(), &owner).await;

    let result = services.moderation().delete_explorer(id, Some(9_999)).await;
    assert!(matches!(result, Err(AppError::Database(_))));

    assert!(services.moderation().explorer(id).await.is_ok());
    assert!(services.auth().login("ana", "secreto").await.is_ok());
    let dashboard = services.reports().admin_dashboard().await.unwrap();
    assert_eq!(dashboard.actions.values, vec![1, 0, 0]);
}
