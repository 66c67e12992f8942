use cxpress::{CxError, DataFrame, DataProfile, InputData, ProfileOptions, VennProfile};
use serde_json::{Value, json};

fn counts() -> InputData {
    InputData::keyed(json!({"venn": {"data": {"A": 10, "B": 20, "AB": 30}}})).expect("keyed")
}

fn with_groups(groups: usize) -> ProfileOptions {
    ProfileOptions::default().with_venn_groups(Some(groups))
}

#[test]
fn legend_is_generated_from_venn_groups() {
    let payload = VennProfile::new().render(&counts(), &with_groups(2)).expect("render");
    assert_eq!(
        Value::Object(payload),
        json!({
            "venn": {
                "data": {"A": 10, "B": 20, "AB": 30},
                "legend": {"A": "Group 1", "B": "Group 2"}
            }
        })
    );
}

#[test]
fn explicit_legend_takes_precedence() {
    let legend = json!({"A": "Frankie", "B": "Louise"});
    let profile = VennProfile::new().with_legend(legend.as_object().cloned().expect("map"));
    let payload = profile.render(&counts(), &with_groups(2)).expect("render");
    assert_eq!(payload["venn"]["legend"], legend);
}

#[test]
fn data_legend_is_used_when_profile_has_none() {
    let data = InputData::keyed(json!({
        "data": {"A": 1, "B": 2},
        "legend": {"A": "Alpha", "B": "Beta"}
    }))
    .expect("keyed");
    let payload = VennProfile::new().render(&data, &with_groups(2)).expect("render");
    assert_eq!(payload["venn"]["legend"], json!({"A": "Alpha", "B": "Beta"}));
}

#[test]
fn no_venn_groups_means_empty_legend() {
    let payload = VennProfile::new()
        .render(&counts(), &ProfileOptions::default())
        .expect("render");
    assert_eq!(payload["venn"]["legend"], json!({}));
}

#[test]
fn frame_counts_are_keyed_by_row_label() {
    let frame = DataFrame::new(
        vec![json!("A"), json!("B"), json!("AB")],
        vec![json!("count")],
        vec![vec![json!(5)], vec![json!(6)], vec![json!(2)]],
    )
    .expect("frame");
    let payload = VennProfile::new()
        .render(&frame.into(), &with_groups(2))
        .expect("render");
    assert_eq!(payload["venn"]["data"], json!({"A": 5, "B": 6, "AB": 2}));
    assert_eq!(payload["venn"]["legend"], json!({"A": "Group 1", "B": "Group 2"}));
}

#[test]
fn reset_legend_falls_back_to_generation() {
    let mut profile = VennProfile::new().with_legend(
        json!({"A": "Frankie"}).as_object().cloned().expect("map"),
    );
    profile.set_legend(None);
    assert!(profile.legend().is_empty());
    let payload = profile.render(&counts(), &with_groups(1)).expect("render");
    assert_eq!(payload["venn"]["legend"], json!({"A": "Group 1"}));
}

#[test]
fn malformed_venn_data_is_rejected() {
    let data = InputData::keyed(json!({"venn": {"data": [1, 2]}})).expect("keyed");
    let err = VennProfile::new()
        .render(&data, &ProfileOptions::default())
        .expect_err("list data");
    assert!(matches!(err, CxError::Profile(_)));

    let missing = InputData::keyed(json!({"venn": {}})).expect("keyed");
    assert!(VennProfile::new().render(&missing, &ProfileOptions::default()).is_err());

    let text = VennProfile::new().render(&InputData::text("A,B"), &ProfileOptions::default());
    assert!(matches!(text, Err(CxError::InvalidType(_))));
}
