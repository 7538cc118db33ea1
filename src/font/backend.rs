/// A deterministic provider that estimates glyph extents from character classes. Always available.
pub mod approx;

/// A provider reading advances, bounding boxes and MATH constants from an OpenType font with `ttf-parser`.
#[cfg(feature = "ttfparser-fontparser")]
pub mod ttf_parser;
