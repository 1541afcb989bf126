//! Asset name normalization
//!
//! Variant components in Figma name their children after the variant properties,
//! e.g. `"type=primary, state=active"`. These helpers turn such names into stable,
//! path-friendly asset names.

/// Separator placed between the comma-separated parts of a variant child name
pub const VARIANT_SEPARATOR: &str = "--";

/// Join the comma-separated parts of a variant child name with [`VARIANT_SEPARATOR`]
///
/// Whitespace around each part is trimmed.
///
/// ```
/// use figma_assets_sync::naming::normalize_child_name;
///
/// assert_eq!(normalize_child_name("type=primary, state=active"), "type=primary--state=active");
/// ```
pub fn normalize_child_name(name: &str) -> String {
    name.split(',')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(VARIANT_SEPARATOR)
}

/// Reduce `key=value` variant parts to their values
///
/// The name is split on `/`; each segment is split on [`VARIANT_SEPARATOR`], every
/// part containing `=` keeps only the text after the first `=` (up to a second one),
/// and the parts are rejoined with `-`.
///
/// ```
/// use figma_assets_sync::naming::optimize_variant_name;
///
/// assert_eq!(optimize_variant_name("button/type=primary--state=active"), "button/primary-active");
/// assert_eq!(optimize_variant_name("button/primary-active"), "button/primary-active");
/// ```
pub fn optimize_variant_name(name: &str) -> String {
    name.split('/')
        .map(|segment| {
            segment
                .split(VARIANT_SEPARATOR)
                .map(|part| match part.split('=').nth(1) {
                    Some(value) if part.contains('=') => value,
                    _ => part,
                })
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join("/")
}
