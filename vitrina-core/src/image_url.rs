//! CDN delivery URL rewriting

/// Path segment the transformation parameters are inserted after
pub const UPLOAD_SEGMENT: &str = "/upload/";

/// Auto format, auto quality, 600px wide
pub const OPTIMIZED_TRANSFORM: &str = "f_auto,q_auto,w_600";

/// Rewrite an image URL to request the optimized display variant.
///
/// Only the first `/upload/` is rewritten; URLs without it come back as-is.
pub fn optimized_image_url(url: &str) -> String {
    url.replacen(
        UPLOAD_SEGMENT,
        &format!("{UPLOAD_SEGMENT}{OPTIMIZED_TRANSFORM}/"),
        1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserts_transform_after_upload_segment() {
        let url = "https://res.cloudinary.com/demo/image/upload/v1/tienda/cola.jpg";
        assert_eq!(
            optimized_image_url(url),
            "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto,w_600/v1/tienda/cola.jpg"
        );
    }

    #[test]
    fn test_only_first_occurrence_rewritten() {
        let url = "https://cdn.example.com/upload/a/upload/b.jpg";
        assert_eq!(
            optimized_image_url(url),
            "https://cdn.example.com/upload/f_auto,q_auto,w_600/a/upload/b.jpg"
        );
    }

    #[test]
    fn test_foreign_urls_unchanged() {
        let url = "https://images.example.com/cola.jpg";
        assert_eq!(optimized_image_url(url), url);
        assert_eq!(optimized_image_url(""), "");
    }
}
