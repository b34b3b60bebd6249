use md5::{Digest, Md5};

/// Computes the dedup fingerprint of a URL
///
/// The fingerprint is the hex-encoded MD5 digest of the literal URL string.
/// No normalization happens first, so `https://a.com` and `https://a.com/`
/// are distinct records.
///
/// # Example
///
/// ```
/// use contact_harvester::storage::fingerprint;
///
/// let fp = fingerprint("https://example.com");
/// assert_eq!(fp.len(), 32);
/// assert_eq!(fp, fingerprint("https://example.com"));
/// ```
pub fn fingerprint(url: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}
