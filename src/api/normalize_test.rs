use super::*;
use serde_json::json;

#[test]
fn pick_str_takes_first_usable_key() {
    let row = json!({ "teamName": "  ", "name": "Kathmandu Kings", "title": "ignored" });
    assert_eq!(pick_str(&row, &["teamName", "name", "title"]).as_deref(), Some("Kathmandu Kings"));
}

#[test]
fn pick_str_stringifies_numbers() {
    let row = json!({ "jersey": 18 });
    assert_eq!(pick_str(&row, &["jersey"]).as_deref(), Some("18"));
}

#[test]
fn pick_str_on_non_object_is_none() {
    assert_eq!(pick_str(&json!([1, 2]), &["name"]), None);
    assert_eq!(pick_str(&json!(null), &["name"]), None);
}

#[test]
fn points_fallback_chain() {
    let keys = ["points", "pts", "totalPoints"];
    assert_eq!(pick_i64(&json!({ "points": 8 }), &keys), Some(8));
    assert_eq!(pick_i64(&json!({ "points": null, "pts": 6 }), &keys), Some(6));
    assert_eq!(pick_i64(&json!({ "totalPoints": "4" }), &keys), Some(4));
    assert_eq!(pick_i64(&json!({ "wins": 2 }), &keys), None);
}

#[test]
fn pick_f64_accepts_numeric_strings() {
    assert_eq!(pick_f64(&json!({ "nrr": "+1.250" }), &["nrr"]), Some(1.25));
    assert_eq!(pick_f64(&json!({ "nrr": "-0.5" }), &["nrr"]), Some(-0.5));
    assert_eq!(pick_f64(&json!({ "nrr": "n/a" }), &["nrr"]), None);
}

#[test]
fn pick_i64_truncates_floats() {
    assert_eq!(pick_i64(&json!({ "played": 3.0 }), &["played"]), Some(3));
}

#[test]
fn pick_bool_variants() {
    assert_eq!(pick_bool(&json!({ "isCurrent": true }), &["isCurrent"]), Some(true));
    assert_eq!(pick_bool(&json!({ "isCurrent": 0 }), &["isCurrent"]), Some(false));
    assert_eq!(pick_bool(&json!({ "isCurrent": "TRUE" }), &["isCurrent"]), Some(true));
    assert_eq!(pick_bool(&json!({ "isCurrent": "soon" }), &["isCurrent"]), None);
}

#[test]
fn record_id_prefers_underscore_id() {
    assert_eq!(record_id(&json!({ "_id": "abc", "id": 1 })).as_deref(), Some("abc"));
    assert_eq!(record_id(&json!({ "id": 42 })).as_deref(), Some("42"));
    assert_eq!(record_id(&json!({ "name": "x" })), None);
}

#[test]
fn reference_id_handles_embedded_and_bare() {
    assert_eq!(reference_id(&json!({ "team": { "_id": "t1" } }), &["team"]).as_deref(), Some("t1"));
    assert_eq!(reference_id(&json!({ "teamId": "t2" }), &["team", "teamId"]).as_deref(), Some("t2"));
}

#[test]
fn nested_str_reads_embedded_object() {
    let row = json!({ "team": { "name": "Pokhara Rhinos" }, "teamName": "stale" });
    assert_eq!(pick_nested_str(&row, &["team"], &["name"]).as_deref(), Some("Pokhara Rhinos"));
    assert_eq!(pick_nested_str(&json!({ "team": "t1" }), &["team"], &["name"]), None);
}

#[test]
fn unwrap_list_bare_array() {
    let body = json!([{ "_id": "1" }, { "_id": "2" }]);
    assert_eq!(unwrap_list(&body, &["teams"]).len(), 2);
}

#[test]
fn unwrap_list_named_key() {
    let body = json!({ "success": true, "teams": [{ "_id": "1" }] });
    assert_eq!(unwrap_list(&body, &["teams"]).len(), 1);
}

#[test]
fn unwrap_list_data_envelope() {
    let body = json!({ "data": [{ "_id": "1" }, { "_id": "2" }, { "_id": "3" }] });
    assert_eq!(unwrap_list(&body, &["teams"]).len(), 3);
}

#[test]
fn unwrap_list_nested_envelope() {
    let body = json!({ "data": { "teams": [{ "_id": "1" }], "count": 1 } });
    assert_eq!(unwrap_list(&body, &["teams"]).len(), 1);
}

#[test]
fn unwrap_list_unknown_shape_is_empty() {
    assert!(unwrap_list(&json!({ "count": 0 }), &["teams"]).is_empty());
    assert!(unwrap_list(&json!("nope"), &["teams"]).is_empty());
}

#[test]
fn unwrap_object_shapes() {
    let direct = json!({ "_id": "1", "name": "A" });
    assert_eq!(unwrap_object(&direct, &["team"]), Some(&direct));

    let wrapped = json!({ "team": { "_id": "2" } });
    assert_eq!(record_id(unwrap_object(&wrapped, &["team"]).unwrap()).as_deref(), Some("2"));

    let enveloped = json!({ "data": { "team": { "_id": "3" } } });
    assert_eq!(record_id(unwrap_object(&enveloped, &["team"]).unwrap()).as_deref(), Some("3"));

    let data_only = json!({ "data": { "_id": "4" } });
    assert_eq!(record_id(unwrap_object(&data_only, &["team"]).unwrap()).as_deref(), Some("4"));

    assert_eq!(unwrap_object(&json!([1]), &["team"]), None);
}
