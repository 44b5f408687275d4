//! Result URL construction.

use url::form_urlencoded;

use super::FetchRequest;

/// Percent-encode a value as a URI component. Spaces become `%20`, not `+`.
pub(crate) fn encode_component(value: &str) -> String {
    // byte_serialize escapes a literal '+' as %2B, so every '+' it emits is a space.
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// `{base}/student-result/{registration_number}?first_name={first_name}&qr=`
///
/// The empty `qr` parameter is part of the site's query contract.
pub fn result_url(base_url: &str, request: &FetchRequest) -> String {
    format!(
        "{}/student-result/{}?first_name={}&qr=",
        base_url.trim_end_matches('/'),
        encode_component(request.registration_number()),
        encode_component(request.first_name()),
    )
}

/// Site root, used for session warming and as the Referer.
pub fn root_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}
