use rowmill::CsvSettings;

#[test]
fn defaults_match_the_reference_configuration() {
    let settings = CsvSettings::default();

    assert_eq!(settings.header_separator, ",");
    assert_eq!(settings.value_separator, ",");
    assert!(!settings.flatten_arrays);
}

#[test]
fn partial_json_fills_missing_fields_with_defaults() -> anyhow::Result<()> {
    let settings: CsvSettings = serde_json::from_str(r#"{ "flatten_arrays": true }"#)?;

    assert!(settings.flatten_arrays);
    assert_eq!(settings.header_separator, ",");
    assert_eq!(settings.value_separator, ",");
    Ok(())
}
