use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched by URI component encoding: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds the provider search URL for a raw address.
///
/// `addressdetails=1` is what makes the provider return the structured
/// `address` object; the normalizer has nothing to work with without it.
pub fn build_query(base_url: &str, address: &str) -> String {
    let encoded = utf8_percent_encode(address, URI_COMPONENT);
    format!("{base_url}?q={encoded}&addressdetails=1&format=json")
}
