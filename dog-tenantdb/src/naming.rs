//! Tenant database name generation.

use chrono::{Datelike, Utc};

/// Generate a tenant database name following the standard pattern
/// `{prefix}{id}_{slug}_{year}`.
///
/// The display name is truncated to 20 characters before slugifying;
/// the slug lower-cases ASCII alphanumerics and collapses everything else
/// into single `_` separators. The year comes from the wall clock, so the
/// result is not reproducible across a year boundary; callers needing a
/// stable persisted name must store the result rather than recompute it.
pub fn generate_database_name(prefix: &str, tenant_id: &str, display_name: &str) -> String {
    generate_database_name_with_year(prefix, tenant_id, display_name, Utc::now().year())
}

/// As [`generate_database_name`], with the year pinned
pub fn generate_database_name_with_year(
    prefix: &str,
    tenant_id: &str,
    display_name: &str,
    year: i32,
) -> String {
    let mut slug = slugify(truncate(display_name, 20));
    if slug.is_empty() {
        slug = "tenant".to_string();
    }

    format!("{}{}_{}_{}", prefix, tenant_id, slug, year)
}

fn truncate(name: &str, max_chars: usize) -> &str {
    match name.char_indices().nth(max_chars) {
        Some((idx, _)) => &name[..idx],
        None => name,
    }
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}
