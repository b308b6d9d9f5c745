use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A DNS record as seen by callers of a [`DNSProvider`](crate::core::provider::DNSProvider).
///
/// `name` is relative to the zone (`@` for the apex) and `id` is empty
/// until the provider has assigned one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DNSRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub ttl: Duration,
}

impl DNSRecord {
    pub fn new(
        record_type: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: String::new(),
            record_type: record_type.into(),
            name: name.into(),
            value: value.into(),
            ttl,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn is_type(&self, record_type: &str) -> bool {
        self.record_type.eq_ignore_ascii_case(record_type)
    }
}

/// Trims a single trailing dot.
pub fn un_fqdn(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Qualifies `name` with `zone`. Names ending in a dot are taken as already
/// absolute, `""` and `@` denote the zone apex.
pub fn absolute_name(name: &str, zone: &str) -> String {
    let zone = un_fqdn(zone);
    if zone.is_empty() {
        return name.trim_matches('.').to_string();
    }
    match name {
        "" | "@" => zone.to_string(),
        n if n.ends_with('.') => un_fqdn(n).to_string(),
        n => format!("{n}.{zone}"),
    }
}

/// Strips the `zone` suffix from `fqdn`, comparing labels case-insensitively.
/// Names outside the zone are returned unqualified but otherwise untouched.
pub fn relative_name(fqdn: &str, zone: &str) -> String {
    let fqdn = un_fqdn(fqdn);
    let zone = un_fqdn(zone);
    if zone.is_empty() {
        return fqdn.to_string();
    }
    if fqdn.eq_ignore_ascii_case(zone) {
        return "@".to_string();
    }

    let Some(split) = fqdn.len().checked_sub(zone.len() + 1) else {
        return fqdn.to_string();
    };
    match (fqdn.get(..split), fqdn.get(split..)) {
        (Some(prefix), Some(suffix))
            if !prefix.is_empty()
                && suffix.starts_with('.')
                && suffix[1..].eq_ignore_ascii_case(zone) =>
        {
            prefix.to_string()
        }
        _ => fqdn.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_name() {
        assert_eq!(absolute_name("www", "example.com"), "www.example.com");
        assert_eq!(absolute_name("www", "example.com."), "www.example.com");
        assert_eq!(absolute_name("a.b", "example.com"), "a.b.example.com");
        assert_eq!(absolute_name("@", "example.com"), "example.com");
        assert_eq!(absolute_name("", "example.com."), "example.com");
        assert_eq!(
            absolute_name("other.example.org.", "example.com"),
            "other.example.org"
        );
        assert_eq!(absolute_name(".www.", ""), "www");
    }

    #[test]
    fn test_relative_name() {
        assert_eq!(relative_name("www.example.com", "example.com"), "www");
        assert_eq!(relative_name("www.example.com.", "example.com."), "www");
        assert_eq!(relative_name("a.b.Example.COM", "example.com"), "a.b");
        assert_eq!(relative_name("example.com", "example.com."), "@");
        assert_eq!(relative_name("wwwexample.com", "example.com"), "wwwexample.com");
        assert_eq!(relative_name("www.example.org", "example.com"), "www.example.org");
        assert_eq!(relative_name("com", "example.com"), "com");
    }

    #[test]
    fn test_relative_absolute_inverse() {
        for name in ["www", "a.b.c", "_acme-challenge", "@"] {
            let abs = absolute_name(name, "example.com");
            assert_eq!(relative_name(&abs, "example.com"), name);
        }
    }

    #[test]
    fn test_record_builder() {
        let rec = DNSRecord::new("txt", "a", "v1", Duration::from_secs(120)).with_id("rid");
        assert_eq!(rec.id, "rid");
        assert!(rec.is_type("TXT"));
        assert!(!rec.is_type("A"));
    }

    #[test]
    fn test_un_fqdn_strips_one_dot() {
        assert_eq!(un_fqdn("example.com."), "example.com");
        assert_eq!(un_fqdn("example.com"), "example.com");
        assert_eq!(un_fqdn("example.com.."), "example.com.");
        assert_eq!(un_fqdn(""), "");
    }
}
