//! Course display colors.
//!
//! A course color is either a hex value (`#RGB` or `#RRGGBB`) or one of
//! the named palette entries below. Names map to the hex values used by
//! the rendering layer.

/// Named palette entries and their hex values.
const COLOR_NAMES: &[(&str, &str)] = &[
    ("blue", "#3B82F6"),
    ("green", "#22C55E"),
    ("yellow", "#EAB308"),
    ("red", "#EF4444"),
    ("purple", "#A855F7"),
    ("orange", "#F97316"),
    ("pink", "#EC4899"),
    ("indigo", "#6366F1"),
    ("turquoise", "#14B8A6"),
    ("teal", "#0D9488"),
    ("lavender", "#C4B5FD"),
    ("ivory", "#FFFBEB"),
    ("mustard", "#CA8A04"),
    ("white", "#FFFFFF"),
    ("grey", "#6B7280"),
    ("coral", "#FB7185"),
    ("amber", "#F59E0B"),
    ("mint", "#6EE7B7"),
    ("emerald", "#10B981"),
    ("periwinkle", "#93C5FD"),
    ("cyan", "#22D3EE"),
    ("magenta", "#EC4899"),
    ("beige", "#F5F5DC"),
    ("gold", "#FFD700"),
    ("silver", "#C0C0C0"),
    ("peach", "#FFCBA4"),
    ("rose", "#FB7185"),
    ("crimson", "#DC143C"),
    ("lilac", "#DDA0DD"),
    ("salmon", "#FA8072"),
    ("tan", "#D2B48C"),
    ("khaki", "#F0E68C"),
];

/// Fallback hex value for unknown color names.
const DEFAULT_HEX: &str = "#6B7280";

/// Look up the hex value for a named color (case-insensitive).
#[must_use]
pub fn name_to_hex(name: &str) -> Option<&'static str> {
    for &(canonical, hex) in COLOR_NAMES {
        if canonical.eq_ignore_ascii_case(name) {
            return Some(hex);
        }
    }
    None
}

/// Hex value for a color name, falling back to the default grey.
#[must_use]
pub fn hex_or_default(name: &str) -> &'static str {
    name_to_hex(name).unwrap_or(DEFAULT_HEX)
}

/// Returns `true` when the name is one of the known palette entries.
#[must_use]
pub fn is_known_name(name: &str) -> bool {
    name_to_hex(name).is_some()
}

/// Returns `true` for a `#RGB` or `#RRGGBB` hex color literal.
#[must_use]
pub fn is_hex(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Returns `true` when the value is acceptable as a course color:
/// a hex literal or a known palette name.
#[must_use]
pub fn is_valid(value: &str) -> bool {
    is_hex(value) || is_known_name(value)
}

/// All palette names, for error messages and pickers.
#[must_use]
pub fn palette_names() -> Vec<&'static str> {
    COLOR_NAMES.iter().map(|&(name, _)| name).collect()
}
