use url::Url;

/// Extracts the network location (`[userinfo@]host[:port]`) from a URL
///
/// Userinfo is kept as serialized, so `https://user@a.com` and
/// `https://a.com` are different locations. The host is compared in the
/// parser's normalized (lowercase) form, and the port is only present when it
/// differs from the scheme's default.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use contact_harvester::url::network_location;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(network_location(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(network_location(&url), Some("127.0.0.1:8080".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(network_location(&url), None);
/// ```
pub fn network_location(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    if host.is_empty() {
        return None;
    }

    let mut location = String::new();
    if !url.username().is_empty() || url.password().is_some() {
        location.push_str(url.username());
        if let Some(password) = url.password() {
            location.push(':');
            location.push_str(password);
        }
        location.push('@');
    }

    location.push_str(host);
    if let Some(port) = url.port() {
        location.push_str(&format!(":{}", port));
    }

    Some(location)
}

/// Returns true if both URLs share the same network location
///
/// URLs without a host never match anything.
pub fn is_same_origin(candidate: &Url, base: &Url) -> bool {
    match (network_location(candidate), network_location(base)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
