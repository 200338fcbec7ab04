use image::{GenericImageView, Rgb, Rgba, RgbaImage};
use qr_logo::{
    create_image, encode, encode_with_logo, Config, EncodeHints, EncodingRequest, Error,
    LogoOutcome, LogoPlacement, MatrixEncoder, OutputFormat, QrImageComposer, QrMatrixEncoder,
};
use std::path::PathBuf;
use tempfile::TempDir;

const CONTENT: &str = "https://example.com/menu?table=12";
const OUTLINE: Rgb<u8> = Rgb([0x00, 0xFF, 0x00]);

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_logo(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.path().join(name);
    RgbaImage::from_pixel(width, height, Rgba([0xFF, 0x00, 0x00, 0xFF]))
        .save(&path)
        .unwrap();
    path
}

fn is_red(p: &Rgb<u8>) -> bool {
    p[0] > 200 && p[1] < 50 && p[2] < 50
}

#[test]
fn plain_image_matches_matrix_and_is_black_and_white() {
    init_logger();
    let matrix = QrMatrixEncoder::new()
        .encode(CONTENT, 300, 300, &EncodeHints::default())
        .unwrap();
    let image = create_image(CONTENT, None, false).unwrap();

    assert_eq!(image.dimensions(), (matrix.width(), matrix.height()));
    for (x, y, pixel) in image.enumerate_pixels() {
        let expected = if matrix.get(x, y) {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        };
        assert_eq!(*pixel, expected, "pixel ({}, {})", x, y);
    }
}

#[test]
fn rendering_is_deterministic() {
    init_logger();
    let first = create_image(CONTENT, None, false).unwrap();
    let second = create_image(CONTENT, None, false).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_logo_falls_back_to_plain_code() {
    init_logger();
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.png");

    let plain = create_image(CONTENT, None, false).unwrap();
    let with_missing = create_image(CONTENT, Some(missing.as_path()), true).unwrap();
    assert_eq!(plain, with_missing);

    let composer = QrImageComposer::default();
    let mut image = plain.clone();
    let outcome = composer.insert_logo(&mut image, &missing, true).unwrap();
    assert_eq!(outcome, LogoOutcome::Missing(missing));
    assert_eq!(image, plain);
}

#[test]
fn unreadable_logo_fails_the_call() {
    init_logger();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.jpg");
    std::fs::write(&path, b"\xFF\xD8 truncated").unwrap();

    let err = create_image(CONTENT, Some(path.as_path()), true).unwrap_err();
    assert!(matches!(err, Error::LogoRead { .. }));

    let mut out = Vec::new();
    let err = encode_with_logo(CONTENT, Some(path.as_path()), &mut out, false).unwrap_err();
    assert!(matches!(err, Error::LogoRead { .. }));
    assert!(out.is_empty());
}

#[test]
fn wide_logo_is_compressed_to_cap() {
    init_logger();
    let dir = TempDir::new().unwrap();
    let path = write_logo(&dir, "wide.png", 200, 100);
    let composer = QrImageComposer::new(Config::new().outline_color(OUTLINE)).unwrap();

    let mut image = create_image(CONTENT, None, false).unwrap();
    let outcome = composer.insert_logo(&mut image, &path, true).unwrap();
    assert_eq!(
        outcome,
        LogoOutcome::Inserted(LogoPlacement {
            x: 120,
            y: 120,
            width: 60,
            height: 60,
            outline_width: 60,
            outline_height: 60,
        })
    );
    assert_eq!(image.dimensions(), (300, 300));
    assert!(is_red(image.get_pixel(150, 150)));
    assert_eq!(*image.get_pixel(150, 120), OUTLINE);
    assert_eq!(*image.get_pixel(179, 150), OUTLINE);

    // the request form produces the same bitmap
    let request = EncodingRequest::new(CONTENT).logo(&path).compress_logo(true);
    assert_eq!(composer.create_image(&request).unwrap(), image);
}

#[test]
fn small_logo_is_placed_unscaled_with_square_outline() {
    init_logger();
    let dir = TempDir::new().unwrap();
    let path = write_logo(&dir, "small.png", 40, 30);
    let composer = QrImageComposer::new(Config::new().outline_color(OUTLINE)).unwrap();

    let mut image = create_image(CONTENT, None, false).unwrap();
    let plain = image.clone();
    let outcome = composer.insert_logo(&mut image, &path, false).unwrap();
    let placement = outcome.placement().copied().unwrap();
    assert_eq!((placement.x, placement.y), (130, 135));
    assert_eq!((placement.width, placement.height), (40, 30));
    assert_eq!((placement.outline_width, placement.outline_height), (40, 40));

    assert!(is_red(image.get_pixel(150, 150)));
    // outline bottom edge sits at y = 135 + 40, ten pixels below the logo
    assert_eq!(*image.get_pixel(150, 175), OUTLINE);
    // between the logo and that edge the QR code shows through
    assert_eq!(image.get_pixel(150, 168), plain.get_pixel(150, 168));
}

#[test]
fn plain_jpeg_decodes_to_the_same_code() {
    init_logger();
    let mut out = Vec::new();
    encode(CONTENT, &mut out).unwrap();
    let decoded = image::load_from_memory_with_format(&out, image::ImageFormat::Jpeg)
        .unwrap()
        .to_luma8();
    let expected = create_image(CONTENT, None, false).unwrap();

    assert_eq!(decoded.dimensions(), expected.dimensions());
    let matching = expected
        .enumerate_pixels()
        .filter(|(x, y, p)| (decoded.get_pixel(*x, *y)[0] < 128) == (p[0] == 0))
        .count();
    let total = (expected.width() * expected.height()) as usize;
    assert!(
        matching * 100 >= total * 98,
        "only {} of {} pixels agree",
        matching,
        total
    );
}

#[test]
fn png_output_round_trips_exactly() {
    init_logger();
    let composer = QrImageComposer::new(Config::new().format(OutputFormat::Png)).unwrap();
    let mut out = Vec::new();
    composer.encode(CONTENT, &mut out).unwrap();
    let decoded = image::load_from_memory_with_format(&out, image::ImageFormat::Png).unwrap();

    let expected = composer
        .create_image(&EncodingRequest::new(CONTENT))
        .unwrap();
    assert_eq!(decoded.dimensions(), expected.dimensions());
    assert_eq!(decoded.to_rgb8(), expected);
}

#[test]
fn logo_survives_jpeg_encoding() {
    init_logger();
    let dir = TempDir::new().unwrap();
    let path = write_logo(&dir, "logo.png", 80, 80);
    let mut out = Vec::new();
    encode_with_logo(CONTENT, Some(path.as_path()), &mut out, true).unwrap();

    let decoded = image::load_from_memory(&out).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (300, 300));
    assert!(is_red(decoded.get_pixel(150, 150)));
}
