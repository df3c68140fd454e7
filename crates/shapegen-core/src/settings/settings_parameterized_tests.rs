#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case("cpp", Backend::Cpp ; "cpp")]
#[test_case("C++", Backend::Cpp ; "cpp symbol")]
#[test_case("python", Backend::Python ; "python")]
#[test_case("py", Backend::Python ; "python short")]
#[test_case("typescript", Backend::Javascript ; "typescript")]
#[test_case("JS", Backend::Javascript ; "javascript short")]
#[test_case("java", Backend::Java ; "java")]
fn Backend___from_str___parses(input: &str, expected: Backend) {
    assert_eq!(input.parse::<Backend>().unwrap(), expected);
}

#[test_case("rust" ; "rust")]
#[test_case("" ; "empty")]
fn Backend___from_str_unknown___settings_error(input: &str) {
    assert!(matches!(
        input.parse::<Backend>(),
        Err(CodegenError::SettingsError(_))
    ));
}

#[test_case("trace", LogLevel::Trace ; "trace")]
#[test_case("DEBUG", LogLevel::Debug ; "debug upper")]
#[test_case("warning", LogLevel::Warn ; "warning alias")]
#[test_case("off", LogLevel::Off ; "off")]
fn GeneratorSettings___log_level___parsed(input: &str, expected: LogLevel) {
    let mut settings = GeneratorSettings::new("a#B");
    settings.log_level = input.to_string();

    assert_eq!(settings.log_level().unwrap(), expected);
}

#[test_case("" ; "empty")]
#[test_case("NoHash" ; "missing separator")]
#[test_case("a#b#c" ; "two separators")]
#[test_case("#Name" ; "empty namespace")]
fn GeneratorSettings___validate_bad_service_id___fails(id: &str) {
    let settings = GeneratorSettings::new(id);

    assert!(settings.validate().is_err());
}

#[test_case("", "" ; "empty")]
#[test_case("aws", "aws" ; "single segment")]
#[test_case("aws.greengrass.ipc", "aws/greengrass/ipc" ; "nested")]
fn namespace_to_path___converts_dots(namespace: &str, expected: &str) {
    assert_eq!(namespace_to_path(namespace), expected);
}
