// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneydash::models::User;
use moneydash::session::{
    Session, SessionStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY,
};

fn sample_user() -> User {
    User {
        id: 7,
        email: "ada@example.com".into(),
        full_name: "Ada Lovelace".into(),
        is_active: true,
        created_at: "2025-01-01T00:00:00".into(),
        updated_at: "2025-01-01T00:00:00".into(),
    }
}

#[test]
fn empty_store_yields_anonymous_session() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::load(SessionStore::at(dir.path()));
    assert!(!session.is_authenticated());
    assert!(session.access_token().is_none());
    assert!(session.user().is_none());
}

#[test]
fn tokens_and_user_round_trip_through_storage() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::load(SessionStore::at(dir.path()));
    session.set_tokens("acc-1", "ref-1").unwrap();
    session.set_user(sample_user()).unwrap();

    // A fresh load sees the persisted state.
    let reloaded = Session::load(SessionStore::at(dir.path()));
    assert!(reloaded.is_authenticated());
    assert_eq!(reloaded.access_token(), Some("acc-1"));
    assert_eq!(reloaded.refresh_token(), Some("ref-1"));
    assert_eq!(reloaded.user().unwrap().email, "ada@example.com");
}

#[test]
fn clear_purges_all_three_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::at(dir.path());
    let mut session = Session::load(store.clone());
    session.set_tokens("acc-1", "ref-1").unwrap();
    session.set_user(sample_user()).unwrap();

    session.clear();
    assert!(!session.is_authenticated());
    assert!(session.refresh_token().is_none());
    assert!(session.user().is_none());
    assert!(store.get(ACCESS_TOKEN_KEY).is_none());
    assert!(store.get(REFRESH_TOKEN_KEY).is_none());
    assert!(store.get(USER_KEY).is_none());
}

#[test]
fn token_without_user_record_is_still_authenticated() {
    // The profile is fetched lazily; a stored token alone authenticates.
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::at(dir.path());
    store.set(ACCESS_TOKEN_KEY, "acc-only").unwrap();

    let session = Session::load(SessionStore::at(dir.path()));
    assert!(session.is_authenticated());
    assert!(session.user().is_none());
}

#[test]
fn corrupt_user_record_degrades_to_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::at(dir.path());
    store.set(ACCESS_TOKEN_KEY, "acc-1").unwrap();
    store.set(USER_KEY, "{ not json").unwrap();

    let session = Session::load(SessionStore::at(dir.path()));
    assert!(session.is_authenticated());
    assert!(session.user().is_none());
}
