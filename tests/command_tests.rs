mod common;

use common::{BG_HEIGHT, BG_WIDTH, bundled_catalog, config_with_assets};
use xibao::{CommandError, Preset, PresetStyle, RenderRequest, parse_command};
use xibao_config::Config;
use xibao_render::{Canvas, Renderer};

#[test]
fn test_config_limit_drives_validation() {
    let config = Config::default();
    assert_eq!(config.max_message_chars, 30);

    let message = format!("/悲报 {}", "x".repeat(config.max_message_chars));
    assert_eq!(
        parse_command(&message, config.max_message_chars),
        Err(CommandError::TooLong { limit: 30 })
    );
}

#[test]
fn test_length_counts_characters_not_bytes() {
    // 29 four-byte characters are still under the limit
    let message = format!("喜报 {}", "🎉".repeat(29));
    let request = parse_command(&message, 30).unwrap();
    assert_eq!(request.text.chars().count(), 29);
}

#[test]
fn test_request_round_trip_through_preset() {
    let (config, _dir) = config_with_assets();
    let request = parse_command("/喜报：今天不用加班", config.max_message_chars).unwrap();
    assert_eq!(request, RenderRequest::new(Preset::Celebratory, "今天不用加班"));

    let preset = PresetStyle::from_config(request.preset, &config);
    let canvas = Canvas::load(&preset.background).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (BG_WIDTH, BG_HEIGHT));

    let renderer = Renderer::new(bundled_catalog(), &config).unwrap();
    let bytes = renderer
        .render(&canvas, &request.text, &preset.style, request.font_size)
        .unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (BG_WIDTH, BG_HEIGHT));
}

#[test]
fn test_stroke_can_be_disabled_per_preset() {
    let (mut config, _dir) = config_with_assets();
    config.lamenting.stroke = None;
    let style = PresetStyle::from_config(Preset::Lamenting, &config).style;
    assert!(style.stroke.is_none());
}
