//! Namespace-qualified type names
//!
//! Entity names are backslash-separated (`App\Entity\Product`). Forward
//! slashes are accepted on input and converted, so `App/Entity/Product`
//! names the same type.

/// Separator between namespace segments
pub const SEPARATOR: char = '\\';

/// Normalize a type or namespace name
///
/// Trims whitespace, converts `/` to `\` and strips leading/trailing
/// separators.
pub fn normalize(name: &str) -> String {
    name.trim()
        .replace('/', "\\")
        .trim_matches(SEPARATOR)
        .to_string()
}

/// Join a namespace and a (possibly partial) name
pub fn join(namespace: &str, name: &str) -> String {
    let namespace = normalize(namespace);
    let name = normalize(name);
    if namespace.is_empty() {
        name
    } else {
        format!("{}{}{}", namespace, SEPARATOR, name)
    }
}

/// The last segment of a name (`App\Entity\Product` -> `Product`)
pub fn short_name(name: &str) -> &str {
    let name = name.trim_end_matches(SEPARATOR);
    match name.rfind(SEPARATOR) {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Whether `name` lives inside `namespace`
///
/// When `recursive` is false only direct children match.
pub fn is_within(name: &str, namespace: &str, recursive: bool) -> bool {
    let Some(rest) = name
        .strip_prefix(namespace)
        .and_then(|rest| rest.strip_prefix(SEPARATOR))
    else {
        return false;
    };

    !rest.is_empty() && (recursive || !rest.contains(SEPARATOR))
}

/// Convert a short class name to snake_case (`OrderLine` -> `order_line`)
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_uppercase();
            if i > 0 && (prev_lower || (prev_upper && next_lower)) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
