// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Integration tests for promptlog-ledger
//!
//! These tests drive a real ledger directory through the same sequence of
//! operations the `start` and `run` commands perform, and check the numbering
//! properties with proptest.

use std::collections::BTreeSet;
use std::fs;

use proptest::prelude::*;
use promptlog_ledger::{
    Ledger, TurnFileName, TurnRole, format_turn_file_name, parse_turn_file_name,
};

fn role_strategy() -> impl Strategy<Value = TurnRole> {
    prop_oneof![Just(TurnRole::Assistant), Just(TurnRole::User)]
}

#[test]
fn test_conversation_advances_both_roles() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ledger = Ledger::new(dir.path().join(".assistant"));

    ledger
        .create_turn(TurnRole::Assistant, 1, "### Files ###\nroot/\n")
        .expect("assistant 1");
    ledger.create_turn(TurnRole::User, 1, "").expect("user 1");

    for _ in 0..3 {
        let assistant = ledger.next_number(TurnRole::Assistant).expect("scan");
        let user = ledger.next_number(TurnRole::User).expect("scan");
        ledger
            .create_turn(TurnRole::Assistant, assistant, "reply")
            .expect("assistant");
        ledger.create_turn(TurnRole::User, user, "").expect("user");
    }

    let latest = ledger
        .latest_turn(TurnRole::Assistant)
        .expect("scan")
        .expect("latest");
    assert_eq!(latest.number(), 4);
    assert_eq!(latest.path, dir.path().join(".assistant/04_assistant.md"));
    assert_eq!(ledger.turns(TurnRole::User).expect("scan").len(), 4);
}

#[test]
fn test_latest_is_found_past_two_digits() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ledger = Ledger::new(dir.path());
    for n in 95..=105 {
        ledger.create_turn(TurnRole::User, n, "").expect("create");
    }
    let latest = ledger
        .latest_turn(TurnRole::User)
        .expect("scan")
        .expect("latest");
    assert_eq!(latest.number(), 105);
}

#[test]
fn test_turn_entry_serializes_flat() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ledger = Ledger::new(dir.path());
    ledger.create_turn(TurnRole::User, 2, "").expect("create");
    let latest = ledger
        .latest_turn(TurnRole::User)
        .expect("scan")
        .expect("latest");
    let json = serde_json::to_value(&latest).expect("serialize");
    assert_eq!(json["role"], "user");
    assert_eq!(json["number"], 2);
    assert!(json["path"].as_str().expect("path").ends_with("02_user.md"));
}

proptest! {
    #[test]
    fn prop_file_name_roundtrip(role in role_strategy(), number in 1u32..=u32::MAX) {
        let name = TurnFileName::new(role, number);
        prop_assert_eq!(parse_turn_file_name(&format_turn_file_name(&name)), Some(name));
    }

    #[test]
    fn prop_next_number_is_one_past_max(
        role in role_strategy(),
        numbers in prop::collection::btree_set(1u32..500, 0..12),
        other in prop::collection::btree_set(1u32..500, 0..12),
    ) {
        let dir = tempfile::tempdir().expect("tempdir");
        let other_role = match role {
            TurnRole::Assistant => TurnRole::User,
            TurnRole::User => TurnRole::Assistant,
        };
        for n in &numbers {
            fs::write(dir.path().join(TurnFileName::new(role, *n).file_name()), "")
                .expect("write");
        }
        for n in &other {
            fs::write(dir.path().join(TurnFileName::new(other_role, *n).file_name()), "")
                .expect("write");
        }

        let ledger = Ledger::new(dir.path());
        let expected = numbers.iter().max().map_or(1, |max| max + 1);
        prop_assert_eq!(ledger.next_number(role).expect("scan"), expected);

        let listed: BTreeSet<u32> = ledger
            .turns(role)
            .expect("scan")
            .iter()
            .map(|entry| entry.number())
            .collect();
        prop_assert_eq!(listed, numbers);
    }

    #[test]
    fn prop_create_read_roundtrip(
        role in role_strategy(),
        number in 1u32..1000,
        content in "(?s).{0,200}",
    ) {
        let dir = tempfile::tempdir().expect("tempdir");
        let ledger = Ledger::new(dir.path());
        let path = ledger.create_turn(role, number, &content).expect("create");
        prop_assert_eq!(Ledger::read_turn(&path), content);
    }
}
