//! Naming convention utilities for code generation.
//!
//! Model member names are usually camelCase and shape names PascalCase, but
//! both may arrive in snake_case or kebab-case. Every target profile picks
//! one of these conversions for its fields, methods and variables.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `snake_case` / `PascalCase` | [`to_camel_case`] | `camelCase` |
//! | `snake_case` / `camelCase` | [`to_pascal_case`] | `PascalCase` |
//! | `camelCase` / `PascalCase` | [`to_snake_case`] | `snake_case` |
//! | `word` | [`capitalize`] | `Word` |
//! | `Word` | [`uncapitalize`] | `word` |

/// Convert snake_case, kebab-case or PascalCase to camelCase.
///
/// # Examples
///
/// ```
/// use shapegen_codegen::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("hello_world"), "helloWorld");
/// assert_eq!(to_camel_case("GetForecast"), "getForecast");
/// assert_eq!(to_camel_case("already"), "already");
/// ```
pub fn to_camel_case(s: &str) -> String {
    uncapitalize(&to_pascal_case(s))
}

/// Convert a string to PascalCase.
///
/// Handles snake_case, kebab-case, and already-capitalized input.
///
/// # Examples
///
/// ```
/// use shapegen_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
/// assert_eq!(to_pascal_case("hello-world"), "HelloWorld");
/// assert_eq!(to_pascal_case("cityId"), "CityId");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_']).map(capitalize).collect()
}

/// Convert camelCase or PascalCase to snake_case.
///
/// A run of capitals is treated as one word, so acronyms stay together.
///
/// # Examples
///
/// ```
/// use shapegen_codegen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("cityId"), "city_id");
/// assert_eq!(to_snake_case("GetHTTPStatus"), "get_http_status");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' {
            result.push('_');
            continue;
        }
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1);
            let starts_word = match prev {
                None | Some('_') | Some('-') => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) => p.is_uppercase() && next.is_some_and(|n| n.is_lowercase()),
            };
            if starts_word {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use shapegen_codegen::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first letter of a string.
pub fn uncapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}
