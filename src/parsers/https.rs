//! Https upgrade for exported URL fields.
//!
//! Google-owned hosts are served over https today even where the export
//! still carries plain-http URLs from years ago. Upgrading is a pure string
//! transform, applied only to hosts known to be safe; everything else passes
//! through unchanged.

/// Hosts (including subdomains) that are safe to upgrade to https.
const UPGRADE_HOSTS: &[&str] = &[
    "google.com",
    "youtube.com",
    "googleusercontent.com",
    "googleapis.com",
    "gstatic.com",
    "ggpht.com",
    "android.com",
    "blogger.com",
    "googlesource.com",
];

fn host_of(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("http://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let mut host = &rest[..end];
    if let Some(colon) = host.find(':') {
        host = &host[..colon];
    }
    if host.is_empty() { None } else { Some(host) }
}

fn upgradable(host: &str) -> bool {
    UPGRADE_HOSTS.iter().any(|domain| {
        host == *domain || host.strip_suffix(domain).is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Upgrade a plain-http URL to https when the host is safe to upgrade.
pub fn upgrade_to_https(url: &str) -> String {
    match host_of(url) {
        Some(host) if upgradable(host) => format!("https://{}", &url["http://".len()..]),
        _ => url.to_string(),
    }
}

/// Optional-field variant: absent values pass through unchanged.
pub fn upgrade_to_https_opt(url: Option<String>) -> Option<String> {
    url.map(|u| upgrade_to_https(&u))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrades_known_hosts() {
        assert_eq!(
            upgrade_to_https("http://www.youtube.com/watch?v=abc"),
            "https://www.youtube.com/watch?v=abc"
        );
        assert_eq!(upgrade_to_https("http://google.com"), "https://google.com");
        assert_eq!(
            upgrade_to_https("http://maps.google.com/maps?q=somewhere"),
            "https://maps.google.com/maps?q=somewhere"
        );
    }

    #[test]
    fn test_leaves_unknown_hosts_alone() {
        assert_eq!(upgrade_to_https("http://example.com/page"), "http://example.com/page");
        // no suffix trickery: notgoogle.com is not google.com
        assert_eq!(upgrade_to_https("http://notgoogle.com"), "http://notgoogle.com");
    }

    #[test]
    fn test_leaves_other_schemes_alone() {
        assert_eq!(upgrade_to_https("https://google.com"), "https://google.com");
        assert_eq!(upgrade_to_https("ftp://google.com"), "ftp://google.com");
    }

    #[test]
    fn test_optional_passthrough() {
        assert_eq!(upgrade_to_https_opt(None), None);
        assert_eq!(
            upgrade_to_https_opt(Some("http://youtube.com/x".to_string())),
            Some("https://youtube.com/x".to_string())
        );
    }
}
