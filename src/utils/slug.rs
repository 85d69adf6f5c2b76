//! URL slugs derived from bootcamp names.

/// Lowercase, ASCII-alphanumeric slug with runs of other characters collapsed
/// into single hyphens.
///
/// # Examples
/// ```ignore
/// assert_eq!(slugify("Devworks Bootcamp"), "devworks-bootcamp");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }

    slug
}
