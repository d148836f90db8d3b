use super::options::{CompilationMode, NameComparer, ParserOptions};

#[test]
fn default_is_normal_and_case_insensitive() {
    let options = ParserOptions::default();
    assert_eq!(options.compilation_mode, CompilationMode::Normal);
    assert!(options.name_comparison_case_insensitive());
    assert_eq!(options.name_comparer(), NameComparer::OrdinalIgnoreCase);
}

#[test]
fn restricted_view_generation_is_case_sensitive() {
    let options = ParserOptions::new(CompilationMode::RestrictedViewGeneration);
    assert!(!options.name_comparison_case_insensitive());
    assert_eq!(options.name_comparer(), NameComparer::Ordinal);

    let options = ParserOptions::new(CompilationMode::UserViewGeneration);
    assert!(options.name_comparison_case_insensitive());
}

#[test]
fn comparer_equality_and_keys() {
    assert!(NameComparer::OrdinalIgnoreCase.equals("Name", "NAME"));
    assert!(!NameComparer::Ordinal.equals("Name", "NAME"));
    assert_eq!(NameComparer::OrdinalIgnoreCase.key("Name"), "NAME");
    assert_eq!(NameComparer::Ordinal.key("Name"), "Name");
}

#[test]
fn deserialize_from_json() {
    let options: ParserOptions =
        serde_json::from_str(r#"{ "compilation_mode": "restricted_view_generation" }"#).unwrap();
    assert_eq!(
        options.compilation_mode,
        CompilationMode::RestrictedViewGeneration
    );

    let options: ParserOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, ParserOptions::default());
}

#[test]
fn serialize_round_trip_shape() {
    let json = serde_json::to_string(&ParserOptions::new(CompilationMode::UserViewGeneration)).unwrap();
    assert_eq!(json, r#"{"compilation_mode":"user_view_generation"}"#);
}
