// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finboard::config::Config;
use finboard::db;
use finboard::identity::{Identity, LocalIdentity};
use finboard::utils::{get_currency, set_currency, DEFAULT_CURRENCY};

#[test]
fn database_is_created_under_missing_dirs_and_reopened() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("data").join("finboard.sqlite");
    let cfg = Config::with_db_path(path.clone());

    {
        let conn = db::open_or_init(&cfg).unwrap();
        assert_eq!(get_currency(&conn).unwrap(), DEFAULT_CURRENCY);
        set_currency(&conn, "EUR").unwrap();
        LocalIdentity::new(&conn).sign_up("jo@example.com").unwrap();
    }
    assert!(path.exists());

    // schema creation is idempotent and the session persists
    let conn = db::open_or_init(&cfg).unwrap();
    assert_eq!(get_currency(&conn).unwrap(), "EUR");
    let user = LocalIdentity::new(&conn).current_user().unwrap();
    assert_eq!(user.map(|u| u.email), Some("jo@example.com".to_string()));
}
