//! Reconciliation behavior against the in-memory repository

use std::collections::HashSet;
use std::sync::Arc;

use fedsync_acl::{AclError, AclManager, Permission, authorization_uri, vocab};
use fedsync_repo::{InMemoryRepository, Repository};

const BASE: &str = "http://repo.local/rest/acls";
const SUBMISSION: &str = "http://repo.local/rest/submissions/1";

const READER: &str = "http://repo.local/rest/roles/reader";
const WRITER: &str = "http://repo.local/rest/roles/writer";

async fn fixture() -> (Arc<InMemoryRepository>, AclManager) {
    let repo = Arc::new(InMemoryRepository::new());
    repo.put(BASE, "").await.unwrap();
    repo.put(SUBMISSION, "").await.unwrap();

    let manager = AclManager::new(repo.clone(), BASE);
    (repo, manager)
}

#[tokio::test]
async fn test_first_grant_creates_and_links_acl() {
    let (repo, manager) = fixture().await;

    let acl = manager
        .add_permissions(SUBMISSION)
        .grant_read([READER])
        .perform()
        .await
        .unwrap();

    assert!(acl.starts_with(BASE));
    let resource_body = repo.body_of(SUBMISSION).unwrap();
    assert!(resource_body.contains(vocab::ACCESS_CONTROL.as_str()));
    assert!(resource_body.contains(&acl));

    // A second reconciliation reuses the linked ACL
    let again = manager
        .add_permissions(SUBMISSION)
        .grant_read([READER])
        .perform()
        .await
        .unwrap();
    assert_eq!(acl, again);
}

#[tokio::test]
async fn test_write_implies_read_and_no_redundant_listing() {
    let (repo, manager) = fixture().await;

    let acl = manager
        .set_permissions(SUBMISSION)
        .grant_read([READER])
        .grant_write([WRITER])
        .perform()
        .await
        .unwrap();

    let write_body = repo.body_of(&authorization_uri(&acl, Permission::Write)).unwrap();
    assert!(write_body.contains(WRITER));
    assert!(write_body.contains(vocab::READ.as_str()));
    assert!(write_body.contains(vocab::WRITE.as_str()));

    let read_body = repo.body_of(&authorization_uri(&acl, Permission::Read)).unwrap();
    assert!(read_body.contains(READER));
    assert!(!read_body.contains(WRITER));
    assert!(!read_body.contains(vocab::WRITE.as_str()));

    let writer_permissions = manager.permissions(SUBMISSION, WRITER).await.unwrap();
    assert_eq!(
        writer_permissions,
        HashSet::from([Permission::Read, Permission::Write])
    );
    let reader_permissions = manager.permissions(SUBMISSION, READER).await.unwrap();
    assert_eq!(reader_permissions, HashSet::from([Permission::Read]));
}

#[tokio::test]
async fn test_additive_preserves_prior_grants() {
    let (_repo, manager) = fixture().await;

    manager
        .add_permissions(SUBMISSION)
        .grant_read(["http://repo.local/rest/users/x"])
        .perform()
        .await
        .unwrap();
    manager
        .add_permissions(SUBMISSION)
        .grant_read(["http://repo.local/rest/users/y"])
        .perform()
        .await
        .unwrap();

    for user in ["http://repo.local/rest/users/x", "http://repo.local/rest/users/y"] {
        let permissions = manager.permissions(SUBMISSION, user).await.unwrap();
        assert_eq!(permissions, HashSet::from([Permission::Read]), "{user}");
    }
}

#[tokio::test]
async fn test_resync_is_idempotent() {
    let (repo, manager) = fixture().await;

    fn grants(manager: &AclManager) -> fedsync_acl::PermissionBuilder<'_> {
        manager
            .set_permissions(SUBMISSION)
            .grant_read([READER])
            .grant_write([WRITER])
    }

    let acl = grants(&manager).perform().await.unwrap();
    let read_uri = authorization_uri(&acl, Permission::Read);
    let write_uri = authorization_uri(&acl, Permission::Write);

    let read_before = repo.body_of(&read_uri).unwrap();
    let write_before = repo.body_of(&write_uri).unwrap();
    let count_before = repo.resource_count();

    let again = grants(&manager).perform().await.unwrap();

    assert_eq!(acl, again);
    assert_eq!(repo.body_of(&read_uri).unwrap(), read_before);
    assert_eq!(repo.body_of(&write_uri).unwrap(), write_before);
    assert_eq!(repo.resource_count(), count_before);
}

#[tokio::test]
async fn test_resync_revokes_dropped_roles() {
    let (_repo, manager) = fixture().await;

    manager
        .set_permissions(SUBMISSION)
        .grant_write([WRITER])
        .perform()
        .await
        .unwrap();
    assert!(!manager.permissions(SUBMISSION, WRITER).await.unwrap().is_empty());

    // Empty desired state: overwrite leaves no agents behind
    manager.set_permissions(SUBMISSION).perform().await.unwrap();
    assert!(manager.permissions(SUBMISSION, WRITER).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_resync_prunes_stale_authorizations() {
    let (repo, manager) = fixture().await;

    let acl = manager
        .set_permissions(SUBMISSION)
        .grant_read([READER])
        .perform()
        .await
        .unwrap();

    // A leftover from an earlier permission scheme
    let stale = format!("{acl}/Depositors");
    repo.put(&stale, "<> a <http://www.w3.org/ns/auth/acl#Authorization> .")
        .await
        .unwrap();

    manager
        .set_permissions(SUBMISSION)
        .grant_read([READER])
        .perform()
        .await
        .unwrap();

    assert!(repo.body_of(&stale).is_none());
    assert!(!repo.has_tombstone(&stale), "tombstone must be removed too");
    assert!(repo.body_of(&authorization_uri(&acl, Permission::Read)).is_some());
    assert!(repo.body_of(&authorization_uri(&acl, Permission::Write)).is_some());
}

#[tokio::test]
async fn test_multiple_acls_are_fatal() {
    let (repo, manager) = fixture().await;

    let body = format!(
        "<{SUBMISSION}> <{0}> <{BASE}/one> .\n<{SUBMISSION}> <{0}> <{BASE}/two> .",
        vocab::ACCESS_CONTROL.as_str()
    );
    repo.put(SUBMISSION, &body).await.unwrap();

    let err = manager
        .set_permissions(SUBMISSION)
        .grant_read([READER])
        .perform()
        .await
        .unwrap_err();

    assert!(matches!(err, AclError::MultipleAcls { count: 2, .. }));
}

#[tokio::test]
async fn test_permissions_without_acl_are_empty() {
    let (_repo, manager) = fixture().await;

    let permissions = manager.permissions(SUBMISSION, READER).await.unwrap();
    assert!(permissions.is_empty());
}
