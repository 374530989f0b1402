//! Route templates for span names and metric labels.

/// Collapse path parameters so spans and metrics group by route rather than
/// by profile. `/profiles/ada-lovelace` becomes `/profiles/{slug}`.
pub(super) fn route_template(path: &str) -> String {
    let trimmed = path.trim_matches('/');

    if trimmed.is_empty() {
        return "/".to_owned();
    }

    let mut segments = trimmed.split('/');
    let mut template = String::new();

    while let Some(segment) = segments.next() {
        template.push('/');
        template.push_str(segment);

        if segment == "profiles" && segments.next().is_some() {
            template.push_str("/{slug}");
        }
    }

    template
}
