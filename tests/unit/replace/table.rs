use super::*;

fn root() -> &'static Path {
    Path::new("assets")
}

#[test]
fn json_values_resolve_to_tagged_specs() {
    let json = r#"{
        "UI_Chara_1": "chara/1.png",
        "bar": 40,
        "badge": false,
        "frame": true,
        "name_plate": ["Hero 01", "fonts/ui.ttf", 28]
    }"#;
    let table = ReplacementTable::from_json_str(json, root()).unwrap();

    assert_eq!(table.len(), 5);
    assert_eq!(
        table.get("UI_Chara_1"),
        Some(&ReplacementSpec::image("assets/chara/1.png"))
    );
    assert_eq!(table.get("bar"), Some(&ReplacementSpec::reveal(40)));
    assert_eq!(table.get("badge"), Some(&ReplacementSpec::visible(false)));
    assert_eq!(table.get("frame"), Some(&ReplacementSpec::visible(true)));
    assert_eq!(
        table.get("name_plate"),
        Some(&ReplacementSpec::text(
            "Hero 01",
            "assets/fonts/ui.ttf",
            28.0
        ))
    );
}

#[test]
fn mistyped_values_are_config_errors_naming_the_layer() {
    for (json, needle) in [
        (r#"{"bar": 101}"#, "0..=100"),
        (r#"{"bar": -1}"#, "0..=100"),
        (r#"{"bar": 12.5}"#, "0..=100"),
        (r#"{"t": ["a", "f.ttf"]}"#, "[text, font_path, size]"),
        (r#"{"t": ["a", "f.ttf", 0]}"#, "finite and > 0"),
        (r#"{"x": null}"#, "unsupported"),
        (r#"{"x": {"path": "a.png"}}"#, "unsupported"),
    ] {
        let err = ReplacementTable::from_json_str(json, root()).unwrap_err();
        assert!(matches!(err, FrameError::Config(_)), "{json}");
        let msg = err.to_string();
        assert!(msg.contains(needle), "{json}: {msg}");
        assert!(msg.contains("layer '"), "{json}: {msg}");
    }
}

#[test]
fn non_object_table_is_rejected() {
    let err = ReplacementTable::from_json_str("[1, 2]", root()).unwrap_err();
    assert!(err.to_string().contains("not a JSON object"));
}

#[test]
fn last_insert_wins() {
    let mut table = ReplacementTable::new();
    assert!(table.insert("a", ReplacementSpec::visible(false)).is_none());
    let prev = table.insert("a", ReplacementSpec::reveal(10));
    assert_eq!(prev, Some(ReplacementSpec::visible(false)));
    assert_eq!(table.get("a"), Some(&ReplacementSpec::reveal(10)));
    assert_eq!(table.len(), 1);
}

#[test]
fn programmatic_specs_are_validated() {
    let table: ReplacementTable = [
        ("ok", ReplacementSpec::reveal(100)),
        ("bad", ReplacementSpec::reveal(150)),
    ]
    .into_iter()
    .collect();
    let err = table.validate().unwrap_err();
    assert!(err.to_string().contains("layer 'bad'"));
}

#[test]
fn load_missing_table_is_input_error() {
    let err = ReplacementTable::load(Path::new("target/missing-table.json")).unwrap_err();
    assert!(matches!(err, FrameError::Input(_)));
}
