#![allow(non_snake_case)]

use super::*;

fn service() -> ShapeId {
    ShapeId::new("aws.greengrass", "GreengrassCoreIPC")
}

#[test]
fn GeneratorSettings___default___has_documented_defaults() {
    let settings = GeneratorSettings::default();

    assert!(settings.require_operation_io);
    assert!(!settings.generate_client_stubs);
    assert!(!settings.no_clobber);
    assert_eq!(settings.source_subdirectory, "source");
    assert_eq!(settings.java_base_package, "software.amazon.awssdk.iot");
    assert_eq!(settings.backends, Backend::ALL.to_vec());
}

#[test]
fn GeneratorSettings___from_json_empty___returns_defaults() {
    let settings = GeneratorSettings::from_json(b"").unwrap();

    assert_eq!(settings, GeneratorSettings::default());
}

#[test]
fn GeneratorSettings___from_json___reads_camel_case_keys() {
    let json = br#"{
        "serviceShapeId": "aws.greengrass#GreengrassCoreIPC",
        "generateClientStubs": true,
        "requireOperationIo": false,
        "backends": ["python", "ts"]
    }"#;

    let settings = GeneratorSettings::from_json(json).unwrap();

    assert_eq!(settings.service_id().unwrap(), service());
    assert!(settings.generate_client_stubs);
    assert!(!settings.require_operation_io);
    assert_eq!(settings.backends, vec![Backend::Python, Backend::Javascript]);
}

#[test]
fn GeneratorSettings___from_json___unknown_keys_kept_in_extra() {
    let json = br#"{ "serviceShapeId": "a#B", "licenseHeader": "MIT", "retries": 3 }"#;

    let settings = GeneratorSettings::from_json(json).unwrap();

    assert_eq!(settings.get::<String>("licenseHeader"), Some("MIT".to_string()));
    assert_eq!(settings.get::<u32>("retries"), Some(3));
    assert_eq!(settings.get::<u32>("licenseHeader"), None);
}

#[test]
fn GeneratorSettings___from_toml___reads_settings() {
    let toml = r#"
serviceShapeId = "aws.greengrass#GreengrassCoreIPC"
noClobber = true
moduleOverrideDirectory = "out"
"#;

    let settings = GeneratorSettings::from_toml(toml).unwrap();

    assert!(settings.no_clobber);
    assert_eq!(settings.module_override_directory.as_deref(), Some("out"));
}

#[test]
fn GeneratorSettings___from_file___dispatches_on_extension() {
    let dir = std::env::temp_dir().join(format!("shapegen-settings-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("settings.toml");
    std::fs::write(&path, "serviceShapeId = \"a.b#C\"\n").unwrap();

    let settings = GeneratorSettings::from_file(&path).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(settings.service_shape_id, "a.b#C");
}

#[test]
fn GeneratorSettings___from_file_missing___io_error() {
    let result = GeneratorSettings::from_file("/nonexistent/shapegen/settings.json");

    assert!(matches!(result, Err(CodegenError::Io(_))));
}

#[test]
fn GeneratorSettings___validate_without_service___fails() {
    let result = GeneratorSettings::default().validate();

    assert_eq!(
        result.unwrap_err(),
        CodegenError::SettingsError("serviceShapeId is required".to_string())
    );
}

#[test]
fn GeneratorSettings___validate_server_stubs___not_implemented() {
    let mut settings = GeneratorSettings::new("a#B");
    settings.generate_server_stubs = true;

    let result = settings.validate();

    assert!(matches!(result, Err(CodegenError::NotImplemented(_))));
}

#[test]
fn GeneratorSettings___validate_no_backends___fails() {
    let mut settings = GeneratorSettings::new("a#B");
    settings.backends.clear();

    assert!(matches!(
        settings.validate(),
        Err(CodegenError::SettingsError(_))
    ));
}

#[test]
fn GeneratorSettings___validate_complete___ok() {
    assert!(GeneratorSettings::new("a#B").validate().is_ok());
}

#[test]
fn GeneratorSettings___module_directory_default___namespace_path_plus_service() {
    let settings = GeneratorSettings::new("aws.greengrass#GreengrassCoreIPC");

    let dir = settings.module_directory(&service());

    assert_eq!(dir, PathBuf::from("aws/greengrass/greengrasscoreipc"));
}

#[test]
fn GeneratorSettings___module_directory_empty_override___service_only() {
    let mut settings = GeneratorSettings::default();
    settings.module_override_directory = Some(String::new());

    let dir = settings.module_directory(&service());

    assert_eq!(dir, PathBuf::from("greengrasscoreipc"));
}

#[test]
fn GeneratorSettings___cpp_directory___splits_header_and_source() {
    let mut settings = GeneratorSettings::default();
    settings.module_override_directory = Some("gen".to_string());

    let header = settings.cpp_directory(&service(), CppFileKind::Header);
    let source = settings.cpp_directory(&service(), CppFileKind::Source);

    assert_eq!(header, PathBuf::from("gen/include/aws/aws/greengrass"));
    assert_eq!(source, PathBuf::from("gen/source"));
}

#[test]
fn GeneratorSettings___java_packages___derived_from_namespace() {
    let settings = GeneratorSettings::default();

    assert_eq!(
        settings.java_service_package(&service()),
        "software.amazon.awssdk.iot.aws.greengrass"
    );
    assert_eq!(
        settings.java_model_package(&service()),
        "software.amazon.awssdk.iot.aws.greengrass.model"
    );
}

#[test]
fn GeneratorSettings___serialize___round_trips_through_json() {
    let mut settings = GeneratorSettings::new("a#B");
    settings.no_clobber = true;

    let json = serde_json::to_vec(&settings).unwrap();
    let parsed = GeneratorSettings::from_json(&json).unwrap();

    assert_eq!(parsed, settings);
}
