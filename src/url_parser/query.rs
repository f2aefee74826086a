use url::form_urlencoded;

/// Splits a query string into decoded key/value pairs.
///
/// Order and duplicate keys are kept as they appear. `+` decodes to a space,
/// so this also reads the form-style queries produced by normalization.
pub fn query_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}
