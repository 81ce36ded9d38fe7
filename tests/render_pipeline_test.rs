// End-to-end tests: write a source image to disk, render it, save it, reload it.
use binary_photo::photo::{
    self, PhotoConfig, PhotoError, PhotoOptions, PhotoRenderer, PhotoVariant, TileSize,
};
use binary_photo::settings;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use std::path::{Path, PathBuf};

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 255) as u8, (y % 255) as u8, ((x * y) % 255) as u8])
    });
    let path = dir.join(name);
    DynamicImage::ImageRgb8(img)
        .save_with_format(&path, ImageFormat::Png)
        .expect("failed to write test image");
    path
}

fn renderer(options: PhotoOptions) -> PhotoRenderer {
    let config = PhotoConfig::try_from(options).expect("valid config");
    PhotoRenderer::new(config).expect("renderer init failed")
}

#[test]
fn renders_file_to_expected_canvas_size() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "small.png", 7, 5);

    let renderer = renderer(PhotoOptions {
        variant: "binary".to_string(),
        scale: Some((20, 12)),
        ..Default::default()
    });
    let output = renderer.render_path(&input).unwrap();

    assert_eq!(output.dimensions(), (7 * 20, 5 * 12));
}

#[test]
fn large_input_is_downscaled_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "large.png", 640, 640);

    let resized = renderer(PhotoOptions {
        scale: Some((1, 1)),
        ..Default::default()
    });
    assert_eq!(resized.load_source(&input).unwrap().dimensions(), (256, 256));
    assert_eq!(resized.render_path(&input).unwrap().dimensions(), (256, 256));

    let native = renderer(PhotoOptions {
        scale: Some((1, 1)),
        resize: false,
        ..Default::default()
    });
    assert_eq!(native.load_source(&input).unwrap().dimensions(), (640, 640));
}

#[test]
fn saved_output_reloads_with_same_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "src.png", 4, 3);

    let renderer = renderer(PhotoOptions {
        variant: "box-binary".to_string(),
        ..Default::default()
    });
    let output = renderer.render_path(&input).unwrap();

    let target = photo::default_output_path(dir.path().join("out"), PhotoVariant::BoxBinary);
    let saved = photo::save_output(&output, &target).unwrap();
    let reloaded = image::open(saved).unwrap().into_rgb8();

    assert_eq!(reloaded, output);
    let tile = PhotoVariant::BoxBinary.default_scale();
    assert_eq!(reloaded.dimensions(), (4 * tile.width, 3 * tile.height));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "src.png", 9, 6);

    let options = PhotoOptions {
        background_mode: "shade".to_string(),
        text_color_mode: "tint".to_string(),
        ..Default::default()
    };
    let first = renderer(options.clone()).render_path(&input).unwrap();
    let second = renderer(options).render_path(&input).unwrap();

    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn invalid_configuration_fails_before_any_rendering() {
    let bad_mode = PhotoConfig::try_from(PhotoOptions {
        background_mode: "Red".to_string(),
        ..Default::default()
    });
    let err = bad_mode.unwrap_err();
    assert!(err.is_invalid_configuration());
    assert!(err.to_string().contains("default / tint / shade / negative"));

    let bad_tint = PhotoConfig::try_from(PhotoOptions {
        tint_factor: 1.25,
        ..Default::default()
    });
    assert!(matches!(
        bad_tint,
        Err(PhotoError::InvalidConfiguration { field: "tint_factor", .. })
    ));
}

#[test]
fn settings_file_feeds_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(dir.path(), "src.png", 3, 3);
    let settings_path = dir.path().join("settings.json");
    std::fs::write(
        &settings_path,
        r#"{ "variant": "text", "text": "@", "scale": [6, 9], "background_mode": "negative" }"#,
    )
    .unwrap();

    let options = settings::load_settings(&settings_path).unwrap();
    let config = PhotoConfig::try_from(options).unwrap();
    assert_eq!(config.scale(), TileSize::new(6, 9));

    let renderer = PhotoRenderer::new(config).unwrap();
    let output = renderer.render_path(&input).unwrap();
    assert_eq!(output.dimensions(), (18, 27));

    // 背景为原色反色：左上像素 (0,0,0) 的瓦片右下角应为白色
    assert_eq!(*output.get_pixel(5, 8), Rgb([255, 255, 255]));
}

#[test]
fn non_image_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.png");
    std::fs::write(&path, "definitely not a png").unwrap();

    let result = renderer(PhotoOptions::default()).render_path(&path);
    assert!(matches!(result, Err(PhotoError::InvalidFormat(_))));
}
