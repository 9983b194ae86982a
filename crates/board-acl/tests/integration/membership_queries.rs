//! How the evaluator talks to its group membership collaborator.

use std::sync::Arc;

use board_acl::{
    AccessControlEntry, AccessEvaluator, ActorId, EvaluatorConfig, GroupId, GroupResolution,
    MemoryDirectory, PermissionKind, PermissionSet,
};

use crate::common::{perms, RecordingGroups, BOARD};

fn setup() -> (Arc<MemoryDirectory>, Arc<RecordingGroups>, AccessEvaluator) {
    let directory = Arc::new(MemoryDirectory::new());
    directory.insert_resource(BOARD, "bob").unwrap();
    let groups = Arc::new(RecordingGroups::new(directory.clone()));
    let evaluator = AccessEvaluator::new(directory.clone(), directory.clone(), groups.clone());
    (directory, groups, evaluator)
}

fn add(directory: &MemoryDirectory, entry: AccessControlEntry) {
    directory.add_acl(entry).unwrap();
}

#[test]
fn test_user_entry_skips_group_lookups() {
    let (directory, groups, evaluator) = setup();
    add(&directory, AccessControlEntry::group(BOARD, "team1", PermissionSet::ALL));
    add(&directory, AccessControlEntry::user(BOARD, "alice", PermissionSet::NONE));

    let granted = evaluator
        .evaluate(&"alice".into(), &BOARD.into(), PermissionKind::Read)
        .unwrap();
    assert!(!granted);
    assert!(groups.asked().is_empty());
}

#[test]
fn test_owner_skips_all_lookups() {
    let (directory, groups, evaluator) = setup();
    add(&directory, AccessControlEntry::group(BOARD, "team1", PermissionSet::NONE));

    evaluator.evaluate_all(&"bob".into(), &BOARD.into()).unwrap();
    assert!(groups.asked().is_empty());
}

#[test]
fn test_group_lookups_stop_at_first_membership() {
    let (directory, groups, evaluator) = setup();
    add(&directory, AccessControlEntry::group(BOARD, "outsiders", PermissionSet::ALL));
    add(&directory, AccessControlEntry::group(BOARD, "team1", perms(&[PermissionKind::Read])));
    add(&directory, AccessControlEntry::group(BOARD, "team2", PermissionSet::ALL));
    directory.add_member("alice", "team1").unwrap();
    directory.add_member("alice", "team2").unwrap();

    let alice = ActorId::from("alice");
    assert!(evaluator
        .evaluate(&alice, &BOARD.into(), PermissionKind::Read)
        .unwrap());
    assert!(!evaluator
        .evaluate(&alice, &BOARD.into(), PermissionKind::Share)
        .unwrap());

    let asked = groups.asked();
    let expected: Vec<GroupId> = ["outsiders", "team1", "outsiders", "team1"]
        .into_iter()
        .map(GroupId::from)
        .collect();
    assert_eq!(asked, expected);
}

#[test]
fn test_any_grant_only_asks_about_granting_groups() {
    let (directory, groups, evaluator) = setup();
    let evaluator = evaluator
        .with_config(EvaluatorConfig::default().with_group_resolution(GroupResolution::AnyGrant));
    add(&directory, AccessControlEntry::group(BOARD, "team1", PermissionSet::NONE));
    add(&directory, AccessControlEntry::group(BOARD, "team2", perms(&[PermissionKind::Share])));
    directory.add_member("alice", "team1").unwrap();
    directory.add_member("alice", "team2").unwrap();

    assert!(evaluator
        .evaluate(&"alice".into(), &BOARD.into(), PermissionKind::Share)
        .unwrap());
    assert_eq!(groups.asked(), vec![GroupId::from("team2")]);
}

#[test]
fn test_mirrored_edit_does_not_requery() {
    let (directory, groups, evaluator) = setup();
    add(&directory, AccessControlEntry::group(BOARD, "team1", perms(&[PermissionKind::Read])));
    directory.add_member("alice", "team1").unwrap();

    let map = evaluator.evaluate_all(&"alice".into(), &BOARD.into()).unwrap();
    assert!(map.read);
    assert!(map.edit);
    // read, manage, share each ask once; edit reuses read
    assert_eq!(groups.asked().len(), 3);
}
