use cxpress::align::{Alignment, AlignmentStrategy, align_annotation, resolve_alignment};
use cxpress::{AnnotationAxis, CxError, DataFrame, merge_frames_into_xyz};
use serde_json::{Value, json};

fn labels(names: &[&str]) -> Vec<Value> {
    names.iter().map(|name| json!(name)).collect()
}

/// Square primary table whose row and column labels are both `C1..C3`.
fn primary() -> DataFrame {
    DataFrame::new(
        labels(&["C1", "C2", "C3"]),
        labels(&["C1", "C2", "C3"]),
        vec![
            vec![json!(1), json!(2), json!(3)],
            vec![json!(4), json!(5), json!(6)],
            vec![json!(7), json!(8), json!(9)],
        ],
    )
    .expect("primary frame")
}

#[test]
fn first_column_labels_produce_one_entry_per_row() {
    let annotation = DataFrame::from_rows(
        labels(&["Sample", "Treatment", "Dose"]),
        vec![
            vec![json!("C1"), json!("Control"), json!(0)],
            vec![json!("C2"), json!("Drug"), json!(5)],
            vec![json!("C3"), json!("Drug"), json!(10)],
        ],
    )
    .expect("annotation");

    let payload = merge_frames_into_xyz(&primary(), Some(&annotation), None).expect("merge");
    assert_eq!(
        payload["x"],
        json!({
            "C1": ["Control", 0],
            "C2": ["Drug", 5],
            "C3": ["Drug", 10]
        })
    );
    assert_eq!(payload["y"]["vars"], json!(["C1", "C2", "C3"]));
    assert_eq!(payload["y"]["data"][2], json!([7, 8, 9]));
    assert!(payload.get("z").is_none());
}

#[test]
fn first_row_labels_produce_one_entry_per_column() {
    let annotation = DataFrame::from_rows(
        labels(&["a", "b"]),
        vec![
            vec![json!("C1"), json!("C2")],
            vec![json!(1), json!(2)],
            vec![json!(3), json!(4)],
        ],
    )
    .expect("annotation");
    assert_eq!(
        resolve_alignment(&annotation, &labels(&["C1", "C2", "C3"])),
        Alignment::Confident(AlignmentStrategy::FirstRow)
    );

    let payload = merge_frames_into_xyz(&primary(), None, Some(&annotation)).expect("merge");
    assert_eq!(payload["z"], json!({"C1": [1, 3], "C2": [2, 4]}));
}

#[test]
fn header_labels_produce_one_entry_per_column() {
    let annotation = DataFrame::from_rows(
        labels(&["C1", "C2", "C3"]),
        vec![vec![json!("t1"), json!("t2"), json!("t3")]],
    )
    .expect("annotation");
    let entries = align_annotation(AnnotationAxis::Sample, Some(&annotation), &labels(&["C1", "C2", "C3"]))
        .expect("align")
        .expect("entries");
    assert_eq!(Value::Object(entries), json!({"C1": ["t1"], "C2": ["t2"], "C3": ["t3"]}));
}

#[test]
fn index_labels_produce_one_entry_per_row() {
    let annotation = DataFrame::new(
        labels(&["C2", "C3"]),
        labels(&["Type"]),
        vec![vec![json!("kinase")], vec![json!("receptor")]],
    )
    .expect("annotation");
    assert_eq!(
        resolve_alignment(&annotation, &labels(&["C1", "C2", "C3"])),
        Alignment::Confident(AlignmentStrategy::Index)
    );
    let payload = merge_frames_into_xyz(&primary(), None, Some(&annotation)).expect("merge");
    assert_eq!(payload["z"], json!({"C2": ["kinase"], "C3": ["receptor"]}));
}

#[test]
fn unmatched_tables_fall_back_to_index_alignment() {
    let annotation = DataFrame::from_rows(
        labels(&["Unrelated"]),
        vec![vec![json!("p")], vec![json!("q")]],
    )
    .expect("annotation");
    let alignment = resolve_alignment(&annotation, &labels(&["C1", "C2", "C3"]));
    assert_eq!(alignment, Alignment::NoConfidentAlignment);
    assert_eq!(alignment.strategy(), AlignmentStrategy::Index);

    let payload = merge_frames_into_xyz(&primary(), Some(&annotation), None).expect("merge");
    assert_eq!(payload["x"], json!({"0": ["p"], "1": ["q"]}));
}

#[test]
fn empty_annotation_tables_leave_no_key() {
    let empty = DataFrame::default();
    let payload = merge_frames_into_xyz(&primary(), Some(&empty), Some(&empty)).expect("merge");
    assert!(payload.get("x").is_none());
    assert!(payload.get("z").is_none());
    assert!(payload.get("y").is_some());
}

#[test]
fn single_element_cells_are_unboxed() {
    let annotation = DataFrame::from_rows(
        labels(&["Sample", "Value"]),
        vec![vec![json!("C1"), json!([42])], vec![json!("C2"), json!([7])]],
    )
    .expect("annotation");
    let payload = merge_frames_into_xyz(&primary(), Some(&annotation), None).expect("merge");
    assert_eq!(payload["x"], json!({"C1": [42], "C2": [7]}));
}

#[test]
fn failures_while_applying_a_strategy_name_the_axis() {
    let annotation = DataFrame::from_rows(
        labels(&["Sample", "Value"]),
        vec![vec![json!("C1"), json!(1)], vec![json!("C1"), json!(2)]],
    )
    .expect("annotation");
    let err = merge_frames_into_xyz(&primary(), Some(&annotation), None).expect_err("duplicate");
    match err {
        CxError::Alignment { axis, .. } => assert_eq!(axis, AnnotationAxis::Sample),
        other => panic!("unexpected error: {other}"),
    }

    let err = merge_frames_into_xyz(&primary(), None, Some(&annotation)).expect_err("duplicate");
    assert!(err.to_string().starts_with("variable annotation could not be aligned"));
}
