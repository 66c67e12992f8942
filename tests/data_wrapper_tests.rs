use cxpress::core::Delimiter;
use cxpress::data::{InputKind, TextShape, classify_text};
use cxpress::{CxError, DataFrame, InputData, ProfileOptions, RawProfile, UrlData, WrappedData};
use indexmap::IndexMap;
use serde_json::{Value, json};

fn sample_frame() -> DataFrame {
    DataFrame::new(
        vec![json!("V1"), json!("V2")],
        vec![json!("S1"), json!("S2"), json!("S3")],
        vec![vec![json!(1), json!(2), json!(3)], vec![json!(4), json!(5), json!(6)]],
    )
    .expect("frame")
}

#[test]
fn frame_raw_dict_form_keeps_index_columns_and_rows() {
    let raw = InputData::from(sample_frame()).raw_dict_form();
    assert_eq!(
        Value::Object(raw),
        json!({
            "index": ["V1", "V2"],
            "columns": ["S1", "S2", "S3"],
            "data": [[1, 2, 3], [4, 5, 6]]
        })
    );
}

#[test]
fn ragged_frames_are_rejected() {
    let err = DataFrame::new(
        vec![json!("V1"), json!("V2")],
        vec![json!("S1"), json!("S2")],
        vec![vec![json!(1), json!(2)], vec![json!(3)]],
    )
    .expect_err("ragged row");
    assert!(matches!(err, CxError::InvalidType(_)));

    let err = DataFrame::new(vec![json!("V1")], vec![json!("S1")], Vec::new()).expect_err("index");
    assert!(matches!(err, CxError::InvalidType(_)));
}

#[test]
fn from_columns_uses_positional_index() {
    let mut columns = IndexMap::new();
    columns.insert("a".to_owned(), vec![json!(1), json!(2)]);
    columns.insert("b".to_owned(), vec![json!(3), json!(4)]);
    let frame = DataFrame::from_columns(columns).expect("frame");
    assert_eq!(frame.index(), &[json!(0), json!(1)]);
    assert_eq!(frame.rows(), &[vec![json!(1), json!(3)], vec![json!(2), json!(4)]]);
}

#[test]
fn csv_with_index_column_round_trips_through_text() {
    let text = ",S1,S2\nV1,1,2.5\nV2,,true\n";
    let frame = DataFrame::from_csv(text, Delimiter::Comma, true).expect("csv");
    assert_eq!(frame.index(), &[json!("V1"), json!("V2")]);
    assert_eq!(frame.columns(), &[json!("S1"), json!("S2")]);
    assert_eq!(frame.rows()[0], vec![json!(1), json!(2.5)]);
    assert_eq!(frame.rows()[1], vec![Value::Null, json!(true)]);

    let written = frame.to_csv(Delimiter::Comma).expect("to csv");
    let reread = DataFrame::from_csv(&written, Delimiter::Comma, true).expect("reread");
    assert_eq!(reread.index(), frame.index());
    assert_eq!(reread.columns(), frame.columns());
}

#[test]
fn tsv_with_blank_corner_and_trailing_empty_cell_parses() {
    let frame = DataFrame::from_csv("\tS1\tS2\nG1\t1\t2\nG2\t3\t\n", Delimiter::Tab, true)
        .expect("tsv");
    assert_eq!(frame.index(), &[json!("G1"), json!("G2")]);
    assert_eq!(frame.columns(), &[json!("S1"), json!("S2")]);
    assert_eq!(frame.rows()[1], vec![json!(3), Value::Null]);

    let positional = DataFrame::from_csv("a\tb\tc\n1\t2\t\n\n", Delimiter::Tab, false)
        .expect("trailing empty cell");
    assert_eq!(positional.rows(), &[vec![json!(1), json!(2), Value::Null]]);

    let input = InputData::from_text("\tS1\tS2\nG1\t1\t2\n").expect("text");
    assert_eq!(input.as_frame().map(DataFrame::column_count), Some(3));
}

#[test]
fn quoted_multiline_cells_keep_their_content() {
    let frame = DataFrame::from_csv("a,b\n\"x\n  y\",1\n", Delimiter::Comma, false)
        .expect("quoted");
    assert_eq!(frame.rows()[0], vec![json!("x\n  y"), json!(1)]);
}

#[test]
fn unsupported_delimiters_are_rejected() {
    assert!(Delimiter::from_char(';').is_err());
    assert_eq!(Delimiter::from_char('\t').expect("tab"), Delimiter::Tab);
}

#[test]
fn keyed_data_requires_a_mapping() {
    assert!(matches!(
        InputData::keyed(json!([1, 2, 3])),
        Err(CxError::InvalidType(_))
    ));
    assert!(matches!(
        InputData::from_json_str("not json"),
        Err(CxError::InvalidType(_))
    ));
    let keyed = InputData::from_json_str(r#"{"y": {"data": [[1]]}}"#).expect("keyed");
    assert_eq!(keyed.kind(), InputKind::Keyed);
}

#[test]
fn url_requires_a_scheme() {
    assert!(matches!(
        UrlData::new("www.example.com/data.json"),
        Err(CxError::InvalidUrl(_))
    ));
    let url = InputData::url("file:///tmp/data.csv").expect("url");
    assert_eq!(Value::Object(url.raw_dict_form()), json!({"raw": "file:///tmp/data.csv"}));
}

#[test]
fn text_auto_detection_prefers_json_then_delimiters() {
    let keyed = InputData::from_text(r#"{"y": {"vars": ["a"]}}"#).expect("json");
    assert_eq!(keyed.kind(), InputKind::Keyed);

    let array = InputData::from_text("[1, 2, 3]").expect("json array");
    assert_eq!(array.kind(), InputKind::Text);
    assert_eq!(Value::Object(array.raw_dict_form()), json!({"raw": [1, 2, 3]}));

    let csv = InputData::from_text("a,b\n1,2\n3,4").expect("csv");
    let frame = csv.as_frame().expect("frame");
    assert_eq!(frame.row_count(), 2);
    assert_eq!(frame.columns(), &[json!("a"), json!("b")]);

    let tsv = classify_text("a\tb\n1\t2");
    assert_eq!(tsv, TextShape::Delimited(Delimiter::Tab));
}

#[test]
fn single_column_csv_is_treated_as_free_text() {
    let input = InputData::from_text("a\n1\n2").expect("text");
    assert_eq!(input.kind(), InputKind::Text);
    assert_eq!(Value::Object(input.raw_dict_form()), json!({"raw": "a\n1\n2"}));
}

#[test]
fn ragged_delimited_text_falls_back_to_free_text() {
    let note = "Hello, world\nthis is a note";
    let input = InputData::from_text(note).expect("text");
    assert_eq!(input.kind(), InputKind::Text);
    assert_eq!(Value::Object(input.raw_dict_form()), json!({"raw": note}));
}

#[test]
fn canonical_view_without_profile_is_raw_dict_form() {
    let wrapped = WrappedData::new(sample_frame());
    let canonical = wrapped.canonical_view(&ProfileOptions::default()).expect("view");
    assert_eq!(canonical, wrapped.raw_dict_form());
}

#[test]
fn raw_profile_matches_raw_dict_form_for_every_input_kind() {
    let inputs = [
        InputData::from(sample_frame()),
        InputData::keyed(json!({"anything": {"goes": [1, 2]}})).expect("keyed"),
        InputData::text("free text"),
        InputData::url("https://example.org/cx.json").expect("url"),
    ];
    for input in inputs {
        let wrapped = WrappedData::new(input).with_profile(RawProfile);
        let canonical = wrapped.canonical_view(&ProfileOptions::default()).expect("raw");
        assert_eq!(canonical, wrapped.raw_dict_form());
    }
}

#[test]
fn reassigning_profile_leaves_input_untouched() {
    let mut wrapped = WrappedData::new(sample_frame()).with_profile(RawProfile);
    let before = wrapped.input().clone();
    wrapped.set_profile(None);
    assert_eq!(wrapped.input(), &before);
    assert!(wrapped.profile().is_none());
}

#[test]
fn wrapped_data_equality_is_structural() {
    let left = WrappedData::new(InputData::keyed(json!({"a": 1})).expect("keyed"));
    let right = WrappedData::new(InputData::keyed(json!({"a": 1})).expect("keyed"));
    let larger = WrappedData::new(InputData::keyed(json!({"a": 1, "b": 2})).expect("keyed"));
    assert_eq!(left, right);
    assert!(left < larger);
}
