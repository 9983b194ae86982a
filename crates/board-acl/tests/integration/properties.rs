//! Property tests for owner, user-entry and group-entry precedence.

use board_acl::{AccessControlEntry, ActorId, PermissionKind, PermissionMap, PermissionSet};
use proptest::prelude::*;

use crate::common::{TestHarness, BOARD};

const ACTORS: [&str; 3] = ["alice", "bob", "carol"];
const GROUPS: [&str; 3] = ["team1", "team2", "team3"];

/// The actor every property evaluates as.
const ACTING: &str = "alice";

#[derive(Clone, Debug)]
struct World {
    owner: &'static str,
    entries: Vec<AccessControlEntry>,
    memberships: Vec<&'static str>,
}

impl World {
    fn build(&self) -> TestHarness {
        let harness = TestHarness::with_owner(self.owner);
        for entry in &self.entries {
            harness.directory.add_acl(entry.clone()).unwrap();
        }
        for group in &self.memberships {
            harness.join(ACTING, group);
        }
        harness
    }

    fn first_user_entry(&self) -> Option<&AccessControlEntry> {
        let acting = ActorId::from(ACTING);
        self.entries.iter().find(|entry| entry.names_user(&acting))
    }

    fn is_member_of(&self, group: &str) -> bool {
        self.memberships.iter().any(|member_of| *member_of == group)
    }

    fn first_member_group_entry(&self) -> Option<&AccessControlEntry> {
        self.entries.iter().find(|entry| {
            entry
                .group_id()
                .is_some_and(|group| self.is_member_of(group.as_str()))
        })
    }
}

fn permission_set() -> impl Strategy<Value = PermissionSet> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(read, edit, manage, share)| PermissionSet {
            read,
            edit,
            manage,
            share,
        },
    )
}

fn entry() -> impl Strategy<Value = AccessControlEntry> {
    prop_oneof![
        (prop::sample::select(ACTORS.to_vec()), permission_set())
            .prop_map(|(actor, set)| AccessControlEntry::user(BOARD, actor, set)),
        (prop::sample::select(GROUPS.to_vec()), permission_set())
            .prop_map(|(group, set)| AccessControlEntry::group(BOARD, group, set)),
    ]
}

fn world() -> impl Strategy<Value = World> {
    (
        prop::sample::select(ACTORS.to_vec()),
        prop::collection::vec(entry(), 0..8),
        prop::sample::subsequence(GROUPS.to_vec(), 0..=GROUPS.len()),
    )
        .prop_map(|(owner, entries, memberships)| World {
            owner,
            entries,
            memberships,
        })
}

fn kind() -> impl Strategy<Value = PermissionKind> {
    prop::sample::select(PermissionKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_owner_holds_all_permissions(mut world in world()) {
        world.owner = ACTING;
        let harness = world.build();

        let map = harness.evaluator.evaluate_all(&ACTING.into(), &BOARD.into()).unwrap();
        prop_assert_eq!(map, PermissionMap::all());
        for kind in PermissionKind::ALL {
            prop_assert!(harness.can(ACTING, kind));
        }
    }

    #[test]
    fn prop_user_entry_overrides_groups(world in world(), kind in kind()) {
        prop_assume!(world.owner != ACTING);
        let Some(user_entry) = world.first_user_entry() else {
            return Ok(());
        };
        let harness = world.build();
        prop_assert_eq!(harness.can(ACTING, kind), user_entry.grants(kind));
    }

    #[test]
    fn prop_first_member_group_decides(world in world(), kind in kind()) {
        prop_assume!(world.owner != ACTING);
        prop_assume!(world.first_user_entry().is_none());
        let Some(group_entry) = world.first_member_group_entry() else {
            return Ok(());
        };
        let harness = world.build();
        prop_assert_eq!(harness.can(ACTING, kind), group_entry.grants(kind));
    }

    #[test]
    fn prop_unrelated_actor_is_denied(world in world()) {
        prop_assume!(world.owner != ACTING);
        prop_assume!(world.first_user_entry().is_none());
        prop_assume!(world.first_member_group_entry().is_none());
        let harness = world.build();

        let map = harness.evaluator.evaluate_all(&ACTING.into(), &BOARD.into()).unwrap();
        prop_assert_eq!(map, PermissionMap::none());
    }

    #[test]
    fn prop_evaluation_is_repeatable(world in world()) {
        let harness = world.build();
        let acting = ActorId::from(ACTING);

        let first = harness.evaluator.evaluate_all(&acting, &BOARD.into()).unwrap();
        let second = harness.evaluator.evaluate_all(&acting, &BOARD.into()).unwrap();
        prop_assert_eq!(first, second);
        for kind in PermissionKind::ALL {
            prop_assert_eq!(harness.can(ACTING, kind), harness.can(ACTING, kind));
        }
    }

    #[test]
    fn prop_report_matches_single_checks(world in world()) {
        let harness = world.build();
        let map = harness.evaluator.evaluate_all(&ACTING.into(), &BOARD.into()).unwrap();

        for kind in [PermissionKind::Read, PermissionKind::Manage, PermissionKind::Share] {
            prop_assert_eq!(map.get(kind), harness.can(ACTING, kind));
        }
        // Edit mirrors read under the default configuration
        prop_assert_eq!(map.edit, map.read);
    }

    #[test]
    fn prop_groups_without_membership_are_ignored(world in world(), kind in kind()) {
        prop_assume!(world.owner != ACTING);
        let with_groups = world.build();

        let mut pruned = world.clone();
        pruned.entries.retain(|entry| {
            entry
                .group_id()
                .is_none_or(|group| world.is_member_of(group.as_str()))
        });
        let without = pruned.build();

        prop_assert_eq!(with_groups.can(ACTING, kind), without.can(ACTING, kind));
    }
}
