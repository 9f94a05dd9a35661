//! Locale-keyed fallback families.
//!
//! When the base face lacks a glyph, these families are tried in the
//! caller's locale preference order before the whole catalog is scanned.

/// Fallback families per locale tag, each list in priority order.
pub const FALLBACK_FAMILIES: &[(&str, &[&str])] = &[
    (
        "zh-Hans",
        &[
            "Source Han Sans SC",
            "Source Han Sans CN",
            "Noto Sans CJK SC",
            "Noto Sans SC",
            "PingFang SC",
            "Microsoft YaHei",
            "WenQuanYi Micro Hei",
            "SimHei",
        ],
    ),
    (
        "zh-Hant",
        &[
            "Source Han Sans TC",
            "Noto Sans CJK TC",
            "Noto Sans TC",
            "PingFang TC",
            "Microsoft JhengHei",
        ],
    ),
    (
        "ja",
        &[
            "Source Han Sans JP",
            "Noto Sans CJK JP",
            "Noto Sans JP",
            "Hiragino Sans",
            "MS Gothic",
        ],
    ),
    (
        "ko",
        &[
            "Source Han Sans KR",
            "Noto Sans CJK KR",
            "Noto Sans KR",
            "Apple SD Gothic Neo",
            "Malgun Gothic",
        ],
    ),
    (
        "und",
        &[
            "Noto Color Emoji",
            "Apple Color Emoji",
            "Segoe UI Emoji",
            "Noto Sans Symbols 2",
            "Noto Sans Symbols",
            "Segoe UI Symbol",
            "Symbola",
            "Arial Unicode MS",
            "DejaVu Sans",
        ],
    ),
];

/// Families registered for `locale`.
///
/// Matching is case-insensitive and accepts the common aliases
/// (`zh-CN`/`zh` for Simplified, `zh-TW`/`zh-HK` for Traditional).
/// Unknown locales have no families.
pub fn families_for_locale(locale: &str) -> &'static [&'static str] {
    let normalized = locale.trim().replace('_', "-").to_ascii_lowercase();
    let canonical = match normalized.as_str() {
        "zh" | "zh-cn" | "zh-sg" | "zh-hans" => "zh-Hans",
        "zh-tw" | "zh-hk" | "zh-mo" | "zh-hant" => "zh-Hant",
        "ja" | "ja-jp" => "ja",
        "ko" | "ko-kr" => "ko",
        "und" | "" => "und",
        _ => return &[],
    };
    FALLBACK_FAMILIES
        .iter()
        .find(|(tag, _)| *tag == canonical)
        .map(|(_, families)| *families)
        .unwrap_or(&[])
}
