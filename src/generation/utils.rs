//! Identifier transformations for generated Kotlin sources

/// Splits an identifier into lowercase words.
///
/// A word ends at a lowercase-to-uppercase transition or at `-`, `_` and
/// whitespace; other punctuation is dropped. Runs of capitals stay one word.
fn words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut after_lowercase = false;

    for ch in s.chars() {
        if ch.is_uppercase() {
            if after_lowercase {
                words.push(std::mem::take(&mut current));
            }
            current.extend(ch.to_lowercase());
            after_lowercase = false;
        } else if ch.is_alphanumeric() {
            current.push(ch);
            after_lowercase = ch.is_lowercase();
        } else if ch == '-' || ch == '_' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            after_lowercase = false;
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// ```
/// use cordapp_codegen::generation::utils::to_snake_case;
///
/// assert_eq!(to_snake_case("issueObligation"), "issue_obligation");
/// assert_eq!(to_snake_case("get HTTP Response"), "get_http_response");
/// ```
pub fn to_snake_case(s: &str) -> String {
    words(s).join("_")
}

/// camelCase, used for generated method names
pub fn to_camel_case(s: &str) -> String {
    let mut words = words(s).into_iter();
    match words.next() {
        Some(first) => first + &words.map(|word| capitalize(&word)).collect::<String>(),
        None => String::new(),
    }
}

/// Converts a name to a type name, capitalising every alphanumeric run while
/// leaving the rest of each run untouched (so `IOU` stays `IOU`).
///
/// # Examples
/// ```
/// use cordapp_codegen::generation::utils::to_type_name;
///
/// assert_eq!(to_type_name("obligation-cordapp"), "ObligationCordapp");
/// assert_eq!(to_type_name("IOUState"), "IOUState");
/// ```
pub fn to_type_name(s: &str) -> String {
    let name: String = s
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect();

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Class name for a schema. Dotted schema names keep their last segment;
/// characters Kotlin does not allow in identifiers become underscores.
///
/// ```
/// use cordapp_codegen::generation::utils::model_class_name;
///
/// assert_eq!(model_class_name("net.corda.core.contracts.StateRef"), "StateRef");
/// assert_eq!(model_class_name("Trace$SessionId"), "Trace_SessionId");
/// ```
pub fn model_class_name(schema_name: &str) -> String {
    let simple = schema_name.rsplit('.').next().unwrap_or(schema_name);
    let name: String = simple
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Escapes Kotlin hard keywords with backticks
///
/// ```
/// use cordapp_codegen::generation::utils::sanitize_kotlin_identifier;
///
/// assert_eq!(sanitize_kotlin_identifier("object"), "`object`");
/// assert_eq!(sanitize_kotlin_identifier("amount"), "amount");
/// ```
pub fn sanitize_kotlin_identifier(s: &str) -> String {
    match s {
        "as" | "break" | "class" | "continue" | "do" | "else" | "false" | "for" | "fun" | "if"
        | "in" | "interface" | "is" | "null" | "object" | "package" | "return" | "super"
        | "this" | "throw" | "true" | "try" | "typealias" | "typeof" | "val" | "var" | "when"
        | "while" => format!("`{s}`"),
        _ => s.to_string(),
    }
}
