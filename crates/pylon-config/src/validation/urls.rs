//! URL scheme checks.

/// Push an error unless `url` is https, or plain http against a local host.
pub(crate) fn validate_url(errors: &mut Vec<String>, name: &str, url: &str) {
    if url.starts_with("https://") && url.len() > "https://".len() {
        return;
    }
    let local = ["http://localhost", "http://127.0.0.1", "http://10.0.2.2"];
    if local.iter().any(|prefix| url.starts_with(prefix)) {
        return;
    }
    errors.push(format!("{name} = {url:?} must be an https:// URL"));
}
