use openehr::{DatePattern, DvBoolean, DvDate, DvDuration};
use serde_json::json;

#[test]
fn dv_date_serialises_value_and_accuracy() {
    let date = DvDate::parse("2021-08", Some("P1D")).expect("valid date");
    assert_eq!(
        serde_json::to_value(&date).expect("json"),
        json!({ "value": "2021-08", "accuracy": { "value": "P1D" } })
    );

    let date = DvDate::parse("202108", None).expect("valid date");
    assert_eq!(
        serde_json::to_value(&date).expect("json"),
        json!({ "value": "202108" })
    );

    assert_eq!(
        serde_json::to_value(DvDate::empty()).expect("json"),
        json!({})
    );
}

#[test]
fn dv_date_reads_back_from_json() {
    let date: DvDate =
        serde_json::from_value(json!({ "value": "2020", "accuracy": { "value": "P1Y" } }))
            .expect("valid wire shape");
    assert_eq!(date.value().as_deref(), Some("2020"));
    assert_eq!(date.accuracy().map(DvDuration::years), Some(1));

    let empty: DvDate = serde_json::from_value(json!({})).expect("empty date");
    assert!(empty.is_empty());
}

#[test]
fn dv_date_json_is_validated() {
    for wire in [
        json!({ "accuracy": { "value": "PT1H" } }),
        json!({ "value": "2021-02-30" }),
        json!({ "value": "2021-08", "precision": "month" }),
        json!({ "value": "2021-08", "accuracy": { "value": "P1Y1W" } }),
    ] {
        assert!(
            serde_json::from_value::<DvDate>(wire.clone()).is_err(),
            "{wire}"
        );
    }
}

#[test]
fn dv_duration_uses_value_wrapper() {
    let duration = DvDuration::parse("-P1DT0.5S").expect("valid duration");
    assert_eq!(
        serde_json::to_value(&duration).expect("json"),
        json!({ "value": "-P1DT0.5S" })
    );

    let back: DvDuration =
        serde_json::from_value(json!({ "value": "-P1DT0,5S" })).expect("valid wire shape");
    assert_eq!(back, duration);

    assert!(serde_json::from_value::<DvDuration>(json!("PT1H")).is_err());
}

#[test]
fn dv_boolean_and_pattern_shapes() {
    assert_eq!(
        serde_json::to_value(DvBoolean::new(true)).expect("json"),
        json!({ "value": true })
    );
    assert_eq!(
        serde_json::to_value(DatePattern::parse("YYYY-MM-??").expect("valid pattern"))
            .expect("json"),
        json!("yyyy-mm-??")
    );
}
