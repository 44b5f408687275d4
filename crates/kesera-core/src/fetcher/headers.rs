//! Browser-like request headers expected by the results site.

/// Header lines (`Name: value`) sent with every request to `base_url`.
pub(crate) fn browser_headers(base_url: &str, user_agent: &str) -> Vec<String> {
    let origin = base_url.trim_end_matches('/');
    vec![
        format!("User-Agent: {}", user_agent.trim()),
        "Accept: application/json, text/plain, */*".to_string(),
        format!("Referer: {}/", origin),
        format!("Origin: {}", origin),
        "Connection: keep-alive".to_string(),
        "Upgrade-Insecure-Requests: 1".to_string(),
    ]
}
