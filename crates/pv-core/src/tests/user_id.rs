use crate::UserId;

use std::str::FromStr;

#[test]
fn test_user_id_accepts_uuid() {
    let id = UserId::new("0b3c5f4e-4a4f-4d0c-9f61-4f0f6b2b7f11").unwrap();
    assert_eq!(id.as_str(), "0b3c5f4e-4a4f-4d0c-9f61-4f0f6b2b7f11");
    assert_eq!(id.to_string(), "0b3c5f4e-4a4f-4d0c-9f61-4f0f6b2b7f11");
}

#[test]
fn test_user_id_rejects_path_like_values() {
    assert!(UserId::from_str("").is_err());
    assert!(UserId::from_str(".").is_err());
    assert!(UserId::from_str("..").is_err());
    assert!(UserId::from_str("a/b").is_err());
    assert!(UserId::from_str("a\\b").is_err());
}

#[test]
fn test_user_id_serde_round_trip() {
    let id = UserId::new("alice").unwrap();
    let json = serde_json::to_string(&id).unwrap();

    assert_eq!(json, "\"alice\"");
    assert_eq!(serde_json::from_str::<UserId>(&json).unwrap(), id);
    assert!(serde_json::from_str::<UserId>("\"../x\"").is_err());
}
