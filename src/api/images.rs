//! Image reference resolution.

/// Prefixes of image values that are already usable URLs.
const DIRECT_SCHEMES: [&str; 4] = ["http://", "https://", "data:", "blob:"];

/// Resolve a stored image value to a URL. Bare filenames are served by the
/// backend under the products endpoint.
pub fn resolve_image_url(products_url: &str, image: &str) -> String {
    let image = image.trim();
    let lowered = image.to_ascii_lowercase();
    if DIRECT_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        return image.to_string();
    }

    format!(
        "{}/{}",
        products_url.trim_end_matches('/'),
        image.trim_start_matches('/')
    )
}
