//! Utility functions for site config file names.
//!
//! This module contains the pure helpers that pick site config files out of a
//! directory listing and turn their names into domain names.

/// Check whether a file name looks like a site config.
///
/// Both markers must occur somewhere in the name. Position is not checked,
/// so `mono.example.com.conf` and `old-mono.example.conf.bak` both qualify.
///
/// # Arguments
///
/// * `name` - The directory entry name
/// * `prefix` - Marker expected before the domain (e.g., "mono.")
/// * `suffix` - Marker expected after the domain (e.g., ".conf")
pub fn is_site_config(name: &str, prefix: &str, suffix: &str) -> bool {
    name.contains(prefix) && name.contains(suffix)
}

/// Keep only the entry names that qualify as site configs.
///
/// The input order is preserved. An empty result is not an error.
pub fn filter_site_configs<I, S>(names: I, prefix: &str, suffix: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter(|name| is_site_config(name.as_ref(), prefix, suffix))
        .map(|name| name.as_ref().to_string())
        .collect()
}

/// Derive the domain name from a site config file name.
///
/// Every occurrence of the suffix is removed first, then every occurrence of
/// the prefix. A domain that itself contains a marker loses it as well:
/// `mono.mono.io.conf` yields `io`.
pub fn extract_domain(name: &str, prefix: &str, suffix: &str) -> String {
    name.replace(suffix, "").replace(prefix, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "mono.";
    const SUFFIX: &str = ".conf";

    #[test]
    fn test_is_site_config() {
        assert!(is_site_config("mono.example.com.conf", PREFIX, SUFFIX));
        assert!(is_site_config("backup-mono.example.conf.old", PREFIX, SUFFIX));

        assert!(!is_site_config("example.com.conf", PREFIX, SUFFIX));
        assert!(!is_site_config("mono.example.com", PREFIX, SUFFIX));
        assert!(!is_site_config("default", PREFIX, SUFFIX));
        assert!(!is_site_config("", PREFIX, SUFFIX));
    }

    #[test]
    fn test_filter_site_configs() {
        let names = vec![
            "mono.example.com.conf",
            "default",
            "other.example.conf",
            "mono.shop.example.org.conf",
            "mono.readme.txt",
        ];

        let result = filter_site_configs(names, PREFIX, SUFFIX);
        assert_eq!(
            result,
            vec!["mono.example.com.conf", "mono.shop.example.org.conf"]
        );
    }

    #[test]
    fn test_filter_site_configs_subset_of_entries_with_both_markers() {
        let names = ["a.conf", "mono.b", "mono.c.conf", "x", "d.conf.mono.", ".conf mono."];
        let result = filter_site_configs(names, PREFIX, SUFFIX);

        for name in &result {
            assert!(name.contains(PREFIX) && name.contains(SUFFIX));
        }
        assert_eq!(result, vec!["mono.c.conf", "d.conf.mono.", ".conf mono."]);
    }

    #[test]
    fn test_filter_site_configs_empty() {
        let names: Vec<String> = vec!["nginx.conf".to_string(), "mono".to_string()];
        assert!(filter_site_configs(names, PREFIX, SUFFIX).is_empty());
        assert!(filter_site_configs(Vec::<String>::new(), PREFIX, SUFFIX).is_empty());
    }

    #[test]
    fn test_extract_domain() {
        assert_eq!(extract_domain("mono.example.com.conf", PREFIX, SUFFIX), "example.com");
        assert_eq!(extract_domain("mono.down.example.conf", PREFIX, SUFFIX), "down.example");
        assert_eq!(
            extract_domain("mono.shop.example.co.uk.conf", PREFIX, SUFFIX),
            "shop.example.co.uk"
        );
    }

    #[test]
    fn test_extract_domain_strips_embedded_markers() {
        // Markers inside the domain are removed too
        assert_eq!(extract_domain("mono.mono.io.conf", PREFIX, SUFFIX), "io");
        assert_eq!(extract_domain("mono.my.conference.com.conf", PREFIX, SUFFIX), "myerence.com");
    }

    #[test]
    fn test_extract_domain_suffix_removed_before_prefix() {
        // Removing ".conf" joins "mon" and "o." into a new "mono." match
        assert_eq!(extract_domain("mon.confo.x.conf", PREFIX, SUFFIX), "x");
    }
}
