//! Static attribute icon mapping
//!
//! The extraction service tags menu items with icon image URLs. This module
//! maps each known icon URL to the short attribute code shown in chat
//! (see the `legend` command for their meanings).

/// Known icon URLs and the attribute code each one stands for
static ICON_CODES: [(&str, &str); 5] = [
    (
        "http://legacy.cafebonappetit.com/assets/cor_icons/menu-item-type-43c4b7.png?v=1456809068",
        "S",
    ),
    (
        "http://legacy.cafebonappetit.com/assets/cor_icons/menu-item-type-d58f59.png?v=1456809068",
        "FF",
    ),
    (
        "http://legacy.cafebonappetit.com/assets/cor_icons/menu-item-type-668e3c.png?v=1456809068",
        "VG",
    ),
    (
        "http://legacy.cafebonappetit.com/assets/cor_icons/menu-item-type-ce9d00.png?v=1456809068",
        "↓G",
    ),
    (
        "http://legacy.cafebonappetit.com/assets/cor_icons/menu-item-type-c9d18b.png?v=1456809068",
        "V",
    ),
];

/// Looks up the attribute code for an icon URL
///
/// Returns `None` for unknown URLs; callers drop those silently so an icon
/// added upstream never breaks a fetch.
pub fn attribute_code(src: &str) -> Option<&'static str> {
    ICON_CODES
        .iter()
        .find(|(url, _)| *url == src)
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_known_icons_map_to_codes() {
        for (url, code) in ICON_CODES {
            assert_eq!(attribute_code(url), Some(code));
        }
    }

    #[test]
    fn test_vegetarian_icon_maps_to_v() {
        let code = attribute_code(
            "http://legacy.cafebonappetit.com/assets/cor_icons/menu-item-type-c9d18b.png?v=1456809068",
        );
        assert_eq!(code, Some("V"));
    }

    #[test]
    fn test_unknown_icon_returns_none() {
        assert_eq!(attribute_code("http://example.com/new-icon.png"), None);
        assert_eq!(attribute_code(""), None);
    }

    #[test]
    fn test_codes_are_distinct() {
        for (i, (_, code1)) in ICON_CODES.iter().enumerate() {
            for (j, (_, code2)) in ICON_CODES.iter().enumerate() {
                if i != j {
                    assert_ne!(code1, code2);
                }
            }
        }
    }
}
