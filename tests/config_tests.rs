use approx::assert_relative_eq;
use cxpress::config::{RgbColor, RgbaColor};
use cxpress::{ConfigValue, Configs, CxError, GraphType, Profile};
use serde_json::{Value, json};

#[test]
fn set_param_infers_scalar_types() {
    let mut configs = Configs::new();
    configs
        .set_param("title", "Expression")
        .and_then(|c| c.set_param("showLegend", true))
        .and_then(|c| c.set_param("xAxisTicks", 8))
        .and_then(|c| c.set_param("dataPointSize", 2.5))
        .expect("params");

    assert_eq!(configs.get_param("title"), Some(&ConfigValue::String("Expression".to_owned())));
    assert_eq!(configs.get_param("showLegend"), Some(&ConfigValue::Bool(true)));
    assert_eq!(configs.get_param("xAxisTicks"), Some(&ConfigValue::Int(8)));
    match configs.get_param("dataPointSize") {
        Some(ConfigValue::Float(size)) => assert_relative_eq!(size.into_inner(), 2.5),
        other => panic!("expected float, got {other:?}"),
    }
}

#[test]
fn colors_are_detected_in_every_shape() {
    let configs = Configs::new()
        .with_param("a", "rgb(255, 0, 0)")
        .and_then(|c| c.with_param("b", json!([0, 128, 255])))
        .and_then(|c| c.with_param("c", json!({"r": 1, "g": 2, "b": 3, "a": 0.25})))
        .and_then(|c| c.with_param("d", "rgba(10,20,30,1)"))
        .and_then(|c| c.with_param("e", json!([1, 2, 3, 4])))
        .expect("params");

    assert_eq!(configs.get_param("a"), Some(&ConfigValue::RgbColor(RgbColor::new(255, 0, 0))));
    assert_eq!(configs.get_param("b"), Some(&ConfigValue::RgbColor(RgbColor::new(0, 128, 255))));
    let expected = RgbaColor::new(1, 2, 3, 0.25).expect("rgba");
    assert_eq!(configs.get_param("c"), Some(&ConfigValue::RgbaColor(expected)));
    assert!(matches!(configs.get_param("d"), Some(ConfigValue::RgbaColor(_))));
    // alpha above 1 is not a color
    assert!(matches!(configs.get_param("e"), Some(ConfigValue::List(_))));
}

#[test]
fn colors_render_as_css_strings() {
    let configs = Configs::new()
        .with_param("background", json!({"r": 1, "g": 2, "b": 3}))
        .and_then(|c| c.with_param("overlay", json!([4, 5, 6, 0.5])))
        .expect("params");
    assert_eq!(
        Value::Object(configs.render_to_dict()),
        json!({"background": "rgb(1,2,3)", "overlay": "rgba(4,5,6,0.5)"})
    );
}

#[test]
fn changing_an_entry_type_is_rejected() {
    let mut configs = Configs::new().with_param("xAxisTicks", 8).expect("int");
    configs.set_param("xAxisTicks", 10).expect("same type");
    assert_eq!(configs.get_param("xAxisTicks"), Some(&ConfigValue::Int(10)));

    let err = configs.set_param("xAxisTicks", "ten").expect_err("type change");
    assert!(matches!(err, CxError::InvalidConfig(_)));

    configs.remove("xAxisTicks");
    configs.set_param("xAxisTicks", "ten").expect("after removal");
}

#[test]
fn empty_labels_and_null_values_are_rejected() {
    let mut configs = Configs::new();
    assert!(configs.set_param("", 1).is_err());
    assert!(configs.set_param("title", Value::Null).is_err());
    assert!(configs.is_empty());
}

#[test]
fn graph_type_is_recognised_and_selects_profiles() {
    let configs = Configs::new().with_param("graphType", "Venn").expect("graph type");
    assert_eq!(configs.get_param("graphType"), Some(&ConfigValue::GraphType(GraphType::Venn)));
    assert_eq!(configs.graph_type(), Some(GraphType::Venn));
    assert!(matches!(GraphType::Venn.default_profile(), Profile::Venn(_)));
    assert!(matches!(GraphType::Network.default_profile(), Profile::Network(_)));
    assert!(matches!(GraphType::Genome.default_profile(), Profile::Genome(_)));
    assert!(matches!(GraphType::Heatmap.default_profile(), Profile::Standard(_)));

    let custom = Configs::new().with_param("graphType", "Brand New").expect("custom");
    assert_eq!(custom.get_param("graphType"), Some(&ConfigValue::String("Brand New".to_owned())));
    assert_eq!(custom.graph_type(), None);
}

#[test]
fn typed_entries_can_be_added_directly() {
    let mut configs = Configs::new();
    configs
        .add("graphType", GraphType::KaplanMeier)
        .and_then(|c| c.add("background", RgbColor::new(9, 9, 9)))
        .expect("add");
    assert_eq!(
        Value::Object(configs.render_to_dict()),
        json!({"graphType": "Kaplan - Meier", "background": "rgb(9,9,9)"})
    );
    assert!(configs.add(" ", ConfigValue::Bool(true)).is_err());
    assert_eq!(configs.len(), 2);
}

#[test]
fn render_to_list_keeps_insertion_order() {
    let configs = Configs::new()
        .with_param("setDimensions", json!([613, 613, true]))
        .and_then(|c| c.with_param("title", "T"))
        .expect("params");
    assert_eq!(
        configs.render_to_list(),
        vec![json!(["setDimensions", [613, 613, true]]), json!(["title", "T"])]
    );
}

#[test]
fn from_json_map_builds_typed_entries() {
    let map = json!({"graphType": "Bar", "vennGroups": 3})
        .as_object()
        .cloned()
        .expect("map");
    let configs = Configs::from_json_map(map).expect("configs");
    assert_eq!(configs.graph_type(), Some(GraphType::Bar));
    assert_eq!(configs.count_param("vennGroups"), Some(3));
    assert_eq!(serde_json::to_value(&configs).expect("serialize"), json!({"graphType": "Bar", "vennGroups": 3}));
}
