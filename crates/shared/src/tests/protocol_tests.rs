use super::*;
use candid::{Decode, Encode, Principal};

fn sample_item() -> Item {
    Item {
        id: 1,
        owner: Principal::anonymous(),
        name: "a".into(),
        description: "b".into(),
        created_at: 10,
        updated_at: 10,
    }
}

#[test]
fn ok_tag_becomes_saved_outcome() {
    let outcome = ItemOutcome::from(Ok(sample_item()));
    assert_eq!(outcome.item(), Some(&sample_item()));
    assert!(!outcome.is_rejected());
}

#[test]
fn err_tag_becomes_rejected_outcome() {
    let outcome = ItemOutcome::from(Err::<Item, _>("invalid".to_string()));
    assert_eq!(outcome, ItemOutcome::Rejected("invalid".into()));
    assert!(outcome.item().is_none());
}

#[test]
fn create_reply_decodes_from_candid_variant() {
    let bytes = Encode!(&BackendResult::<Item>::Err("name taken".into())).expect("encode");
    let decoded = Decode!(&bytes, BackendResult<Item>).expect("decode");
    assert_eq!(decoded, Err("name taken".to_string()));
}

#[test]
fn outcome_serializes_with_type_tag() {
    let json = serde_json::to_value(ItemOutcome::Rejected("invalid".into())).expect("json");
    assert_eq!(json["type"], "rejected");
    assert_eq!(json["payload"], "invalid");
}
