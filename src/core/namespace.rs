use std::path::{Component, Path};

/// Derive the key namespace of a source file from its path.
///
/// The path is taken relative to `source_root` (or used as-is when it lies outside),
/// extensions are stripped, an `index` stem is dropped when a directory remains, and
/// each segment is PascalCased.
///
/// ```
/// use std::path::Path;
/// use autoglot::core::namespace::namespace_for_path;
///
/// assert_eq!(
///     namespace_for_path(Path::new("src"), Path::new("src/billing/invoice-list.vue")),
///     "Billing.InvoiceList"
/// );
/// ```
pub fn namespace_for_path(source_root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(source_root).unwrap_or(path);

    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
        .map(str::to_string)
        .collect();

    if let Some(file_name) = segments.pop() {
        let stem = file_name.split('.').next().unwrap_or_default().to_string();
        if !(stem.eq_ignore_ascii_case("index") && !segments.is_empty()) {
            segments.push(stem);
        }
    }

    let namespace: Vec<String> = segments
        .iter()
        .map(|segment| pascal_case(segment))
        .filter(|segment| !segment.is_empty())
        .collect();

    if namespace.is_empty() {
        "App".to_string()
    } else {
        namespace.join(".")
    }
}

/// `invoice-list` → `InvoiceList`, `user_settings` → `UserSettings`.
fn pascal_case(segment: &str) -> String {
    segment
        .split(|c: char| matches!(c, '-' | '_' | '.' | ' '))
        .map(|word| {
            let word: String = word.chars().filter(|c| c.is_alphanumeric()).collect();
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}
