//! Tests for the serialized shape of the act record.
//!
//! Hosts consume the extraction as JSON; the Spanish field names and value
//! domains are a compatibility contract and must not drift.

use extracto_core::{
    extract_act, DocumentText, ExtractOptions, PageGeometry, SectionHints,
};

fn sample_act() -> extracto_core::Act {
    let text = "ESCRITURA DE PODER ESPECIAL\n\
OTORGADO POR: PEREZ GOMEZ JUAN CARLOS A FAVOR DE: TORRES VILLACIS MARIA FERNANDA\n\
NOTARIO: DR. CARLOS ANDRADE SALAZAR\nFECHA DE OTORGAMIENTO: 12 DE MARZO DEL 2024";
    extract_act(&DocumentText::new(text), &ExtractOptions::default())
        .expect("extraction should succeed")
        .act
}

#[test]
fn act_serializes_with_spanish_field_names() {
    let value = serde_json::to_value(sample_act()).unwrap();
    let obj = value.as_object().unwrap();

    assert!(obj.contains_key("tipo_acto"));
    assert!(obj.contains_key("otorgantes"));
    assert!(obj.contains_key("beneficiarios"));
    assert!(obj.contains_key("notario"));
    assert!(obj.contains_key("fecha_otorgamiento"));
    assert!(obj.contains_key("perfil_acto"));
    assert!(obj.contains_key("validacion"));

    let grantor = &value["otorgantes"][0];
    assert_eq!(grantor["tipo"], "NATURAL");
    assert_eq!(grantor["name"], "PEREZ GOMEZ JUAN CARLOS");
}

#[test]
fn validation_scores_stay_in_unit_range() {
    let act = sample_act();
    assert!((0.0..=1.0).contains(&act.validation.score));
    for (field, conf) in &act.validation.field_confidence {
        assert!((0.0..=1.0).contains(conf), "{field}: {conf}");
    }
}

#[test]
fn act_round_trips_through_json() {
    let act = sample_act();
    let json = serde_json::to_string(&act).unwrap();
    let back: extracto_core::Act = serde_json::from_str(&json).unwrap();
    assert_eq!(act, back);
}

#[test]
fn hints_deserialize_from_offset_pairs() {
    let hints: SectionHints =
        serde_json::from_str(r#"{"grantors": [10, 42], "notary": [50, 80]}"#).unwrap();
    assert_eq!(hints.grantors, Some((10, 42)));
    assert_eq!(hints.beneficiaries, None);
    assert_eq!(hints.notary, Some((50, 80)));
}

#[test]
fn geometry_deserializes_from_span_records() {
    let pages: Vec<PageGeometry> = serde_json::from_str(
        r#"[{"page": 1, "spans": [{"text": "PEREZ GOMEZ", "x0": 10.0, "top": 20.0, "x1": 90.0, "bottom": 30.0}]}]"#,
    )
    .unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].spans[0].text, "PEREZ GOMEZ");
}
