//! Helpers for the dot-terminated name form used as lookup keys.

/// Append the root label if `name` is not already fully qualified.
///
/// ```
/// use dns_blocker_domain::domain_name::to_fqdn;
///
/// assert_eq!(to_fqdn("home.local"), "home.local.");
/// assert_eq!(to_fqdn("home.local."), "home.local.");
/// ```
pub fn to_fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// Remove a single trailing root label, if present.
pub fn strip_root(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_root_removes_one_dot() {
        assert_eq!(strip_root("example.com."), "example.com");
        assert_eq!(strip_root("example.com"), "example.com");
        assert_eq!(strip_root("."), "");
    }

    #[test]
    fn to_fqdn_preserves_case() {
        assert_eq!(to_fqdn("NAS.Home.Lan"), "NAS.Home.Lan.");
    }
}
