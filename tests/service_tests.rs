mod common;

use std::sync::Arc;

use common::{background, bundled_catalog, config_with_assets};
use xibao::{CommandError, Preset, RenderRequest, RenderService, ServiceError};
use xibao_render::RenderError;

#[tokio::test]
async fn test_message_renders_png() {
    let (config, _dir) = config_with_assets();
    let service = RenderService::new(bundled_catalog(), &config).unwrap();

    let bytes = service.handle_message("/喜报 Good news").await.unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), background(Preset::Celebratory).dimensions());
    assert_ne!(decoded, background(Preset::Celebratory));
}

#[tokio::test]
async fn test_empty_text_returns_background() {
    let (config, _dir) = config_with_assets();
    let service = RenderService::new(bundled_catalog(), &config).unwrap();

    let bytes = service
        .render(RenderRequest::new(Preset::Lamenting, ""))
        .await
        .unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded, background(Preset::Lamenting));
}

#[tokio::test]
async fn test_too_long_message_is_rejected() {
    let (config, _dir) = config_with_assets();
    let service = RenderService::new(bundled_catalog(), &config).unwrap();

    let message = format!("悲报 {}", "长".repeat(40));
    let err = service.handle_message(&message).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Command(CommandError::TooLong { limit: 30 })
    ));
    assert_eq!(err.to_string(), "字数太多啦！长度应在 30 个字符以内。");
}

#[tokio::test]
async fn test_missing_assets_fail_at_startup() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = xibao_config::Config::default().with_assets_dir(dir.path());
    let result = RenderService::new(bundled_catalog(), &config);
    assert!(matches!(
        result,
        Err(ServiceError::Render(RenderError::AssetMissing { .. }))
    ));
}

#[tokio::test]
async fn test_timeout_discards_result() {
    let (mut config, _dir) = config_with_assets();
    config.render_timeout_ms = Some(1);
    let service = RenderService::new(bundled_catalog(), &config).unwrap();

    let request = RenderRequest::new(Preset::Celebratory, "Congratulations to everyone!");
    let err = service.render(request).await.unwrap_err();
    assert!(matches!(err, ServiceError::Timeout(1)));
}

#[tokio::test]
async fn test_concurrent_renders_share_cache() {
    let (config, _dir) = config_with_assets();
    let service = Arc::new(RenderService::new(bundled_catalog(), &config).unwrap());

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .render(RenderRequest::new(Preset::Celebratory, "Hi 中文 ok"))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut outputs = Vec::new();
    for task in tasks {
        outputs.push(task.await.unwrap());
    }
    assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(!service.renderer().cache().is_empty());
}
