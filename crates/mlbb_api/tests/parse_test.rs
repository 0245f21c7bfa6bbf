use mlbb_api::{
    HeroEntry, HeroId, UpstreamErrorKind, parse_counters, parse_hero_list, parse_rankings,
};
use serde_json::json;

fn sorted(mut entries: Vec<HeroEntry>) -> Vec<HeroEntry> {
    entries.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
    entries
}

#[test]
fn test_hero_list_from_id_map() {
    let body = json!({"1": "Miya", "2": "Balmond", "18": "Layla"});

    let entries = sorted(parse_hero_list(&body).unwrap());

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0], HeroEntry::new("1", "Miya"));
    assert_eq!(entries[1], HeroEntry::new("18", "Layla"));
}

#[test]
fn test_hero_list_from_data_wrapped_map() {
    let body = json!({"code": 0, "data": {"6": "Tigreal", "18": "Layla"}});

    let entries = sorted(parse_hero_list(&body).unwrap());

    assert_eq!(
        entries,
        vec![HeroEntry::new("18", "Layla"), HeroEntry::new("6", "Tigreal")]
    );
}

#[test]
fn test_hero_list_from_array_of_objects() {
    let body = json!([
        {"hero_id": 18, "name": "Layla"},
        {"heroid": "6", "hero_name": "Tigreal"},
        {"id": 1, "name": "  "},
        {"name": "No Id"}
    ]);

    let entries = parse_hero_list(&body).unwrap();

    assert_eq!(
        entries,
        vec![HeroEntry::new(18u64, "Layla"), HeroEntry::new("6", "Tigreal")]
    );
}

#[test]
fn test_hero_list_from_records() {
    let body = json!({
        "code": 0,
        "data": {"records": [
            {"data": {"hero_id": 18, "name": "Layla"}},
            {"data": {"hero_id": 6, "name": "Tigreal"}}
        ]}
    });

    let entries = parse_hero_list(&body).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, HeroId::from(18u64));
}

#[test]
fn test_hero_list_rejects_unrecognised_body() {
    let err = parse_hero_list(&json!({"unexpected": [1, 2, 3]})).unwrap_err();
    assert!(matches!(err.kind, UpstreamErrorKind::Malformed(_)));

    let err = parse_hero_list(&json!([])).unwrap_err();
    assert!(matches!(err.kind, UpstreamErrorKind::Malformed(_)));
}

#[test]
fn test_hero_list_rejects_string_map_with_non_numeric_keys() {
    let body = json!({"status": "error", "message": "Service temporarily unavailable"});

    let err = parse_hero_list(&body).unwrap_err();
    assert!(matches!(err.kind, UpstreamErrorKind::Malformed(_)));

    let err = parse_hero_list(&json!({"data": {"1": "Miya", "note": "partial"}})).unwrap_err();
    assert!(matches!(err.kind, UpstreamErrorKind::Malformed(_)));
}

#[test]
fn test_hero_list_rejects_api_error_code() {
    let body = json!({"code": 500, "message": "maintenance", "data": {"1": "Miya"}});

    let err = parse_hero_list(&body).unwrap_err();

    match err.kind {
        UpstreamErrorKind::Malformed(msg) => assert!(msg.contains("maintenance")),
        other => panic!("unexpected kind: {:?}", other),
    }
}

#[test]
fn test_rankings_reads_rates_and_limits() {
    let body = json!({
        "code": 0,
        "data": {"records": [
            {"data": {
                "main_hero": {"data": {"name": "Layla"}},
                "main_hero_win_rate": 0.5321,
                "main_hero_appearance_rate": "1.25%",
                "main_hero_ban_rate": 0.01
            }},
            {"data": {
                "main_hero": {"data": {}},
                "main_hero_win_rate": 0.49
            }},
            {"data": {
                "main_hero": {"data": {"name": "Miya"}}
            }}
        ]}
    });

    let rows = parse_rankings(&body, 2).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Layla");
    assert_eq!(rows[0].win_rate, Some(0.5321));
    assert_eq!(rows[0].pick_rate, Some(1.25));
    assert_eq!(rows[0].ban_rate, Some(0.01));
    assert_eq!(rows[1].name, "Unknown");
    assert_eq!(rows[1].pick_rate, None);
}

#[test]
fn test_rankings_without_records_is_malformed() {
    let err = parse_rankings(&json!({"code": 0, "data": {}}), 10).unwrap_err();
    assert!(matches!(err.kind, UpstreamErrorKind::Malformed(_)));
}

#[test]
fn test_counters_reads_sub_heroes() {
    let body = json!({
        "code": 0,
        "data": {"records": [{"data": {"sub_hero": [
            {"hero": {"data": {"name": "Saber"}}, "increase_win_rate": 0.034},
            {"hero": {"data": {}}, "increase_win_rate": "0.021"},
            {"hero": {"data": {"name": "Natalia"}}}
        ]}}]}
    });

    let picks = parse_counters(&body, 5).unwrap();

    assert_eq!(picks.len(), 3);
    assert_eq!(picks[0].name, "Saber");
    assert_eq!(picks[0].increase_win_rate, Some(0.034));
    assert_eq!(picks[1].name, "Unknown Hero");
    assert_eq!(picks[1].increase_win_rate, Some(0.021));
    assert_eq!(picks[2].increase_win_rate, None);
}

#[test]
fn test_counters_missing_data_is_empty() {
    let picks = parse_counters(&json!({"code": 0, "data": {"records": []}}), 5).unwrap();
    assert!(picks.is_empty());
}
