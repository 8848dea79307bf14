//! End-to-end runs through the public API with the real backend.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageDecoder, ImageEncoder, ImageReader, Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use storeicons::catalog::{VariantClass, targets_for};
use storeicons::generate::{
    self, GenerateError, GenerateEvent, GenerateOptions, GenerateRequest,
};
use storeicons::imaging::RustBackend;
use storeicons::validation::Verdict;
use tempfile::TempDir;

fn write_source(path: &Path, width: u32, height: u32, icc: Option<&[u8]>) {
    let pixels = RgbaImage::from_fn(width, height, |x, y| {
        if ((x / 16) + (y / 16)) % 2 == 0 {
            Rgba([20, 90, 200, 255])
        } else {
            Rgba([240, 240, 240, 200])
        }
    });
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = PngEncoder::new(file);
    if let Some(profile) = icc {
        encoder.set_icc_profile(profile.to_vec()).unwrap();
    }
    encoder
        .write_image(pixels.as_raw(), width, height, ExtendedColorType::Rgba8)
        .unwrap();
}

fn icc_of(path: &Path) -> Option<Vec<u8>> {
    let mut decoder = ImageReader::open(path)
        .unwrap()
        .with_guessed_format()
        .unwrap()
        .into_decoder()
        .unwrap();
    decoder.icc_profile().unwrap()
}

/// Real pixel sizes of each ICO frame, in directory order.
fn ico_frame_sizes(bytes: &[u8]) -> Vec<(u32, u32)> {
    let count = u16::from_le_bytes([bytes[4], bytes[5]]) as usize;
    (0..count)
        .map(|i| {
            let e = 6 + i * 16;
            let len = u32::from_le_bytes(bytes[e + 8..e + 12].try_into().unwrap()) as usize;
            let off = u32::from_le_bytes(bytes[e + 12..e + 16].try_into().unwrap()) as usize;
            let frame = image::load_from_memory(&bytes[off..off + len]).unwrap();
            (frame.width(), frame.height())
        })
        .collect()
}

fn request(source: PathBuf, out: PathBuf, class: VariantClass) -> GenerateRequest {
    GenerateRequest {
        source,
        output_dir: out,
        class,
        options: GenerateOptions::default(),
    }
}

#[test]
fn square_set_from_profiled_source() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("logo.png");
    let profile = b"test-icc-profile".to_vec();
    write_source(&source, 512, 512, Some(&profile));
    let out = tmp.path().join("Assets");

    let report =
        generate::generate(&request(source, out.clone(), VariantClass::Square), None).unwrap();

    assert_eq!(report.written.len(), 20);
    assert!(report.icc_profile);
    for target in targets_for(VariantClass::Square) {
        let path = out.join(target.name);
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (target.width, target.height), "{target}");
        assert_eq!(icc_of(&path).as_deref(), Some(profile.as_slice()), "{target}");
    }
}

#[test]
fn unprofiled_source_writes_no_profile() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("plain.png");
    write_source(&source, 310, 150, None);
    let out = tmp.path().join("out");

    generate::generate(&request(source, out.clone(), VariantClass::Wide), None).unwrap();

    for target in targets_for(VariantClass::Wide) {
        assert!(icc_of(&out.join(target.name)).is_none(), "{target}");
    }
}

#[test]
fn wide_mismatch_needs_opt_in() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("banner.png");
    write_source(&source, 400, 150, None);
    let out = tmp.path().join("out");

    let mut req = request(source, out.clone(), VariantClass::Wide);
    let err = generate::generate(&req, None).unwrap_err();
    assert!(matches!(err, GenerateError::AspectWarning(_)));
    assert!(!out.exists());

    req.options.allow_aspect_mismatch = true;
    let report = generate::generate(&req, None).unwrap();
    assert_eq!(report.aspect.verdict, Verdict::Warn);
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 5);
}

#[test]
fn non_square_source_is_blocked() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("wide.png");
    write_source(&source, 200, 100, None);
    let out = tmp.path().join("out");
    let (tx, rx) = mpsc::channel();

    let err = generate::generate(&request(source, out.clone(), VariantClass::Square), Some(tx))
        .unwrap_err();

    match err {
        GenerateError::Validation(check) => {
            assert_eq!(check.ratio, Some(2.0));
            assert_eq!(check.verdict, Verdict::Block);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(rx.try_iter().count(), 0);
    assert!(!out.exists());
}

#[test]
fn container_holds_seven_frames_largest_first() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("logo.png");
    write_source(&source, 512, 512, None);
    let out = tmp.path().join("out");

    let report = generate::generate(
        &request(source, out.clone(), VariantClass::MultiSizeContainer),
        None,
    )
    .unwrap();

    assert_eq!(report.written, vec![out.join("icon.ico")]);
    let bytes = std::fs::read(out.join("icon.ico")).unwrap();
    assert_eq!(
        ico_frame_sizes(&bytes),
        vec![
            (512, 512),
            (256, 256),
            (128, 128),
            (64, 64),
            (48, 48),
            (32, 32),
            (16, 16)
        ]
    );
    // Only the container is written.
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 1);
}

#[test]
fn corrupt_source_is_decode_error() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("broken.png");
    std::fs::write(&source, b"not an image").unwrap();

    let err = generate::generate(
        &request(source, tmp.path().join("out"), VariantClass::Square),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, GenerateError::Decode(_)));
}

#[test]
fn background_worker_reports_progress() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("logo.png");
    write_source(&source, 256, 256, None);
    let out = tmp.path().join("out");

    let handle = generate::spawn_generation(
        RustBackend::new(),
        request(source, out, VariantClass::MultiSizeContainer),
    );
    let events: Vec<GenerateEvent> = handle.events().iter().collect();
    let report = handle.join().unwrap();

    assert!(matches!(
        events.first(),
        Some(GenerateEvent::Started { total: 7, .. })
    ));
    assert!(matches!(
        events.last(),
        Some(GenerateEvent::ContainerWritten { sizes, .. }) if sizes.len() == 7
    ));
    assert_eq!(report.artifacts.len(), 7);
}

#[test]
fn check_source_reads_header_only() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("logo.png");
    write_source(&source, 300, 150, None);

    let backend = RustBackend::new();
    let wide = generate::check_source(&backend, &source, VariantClass::Wide).unwrap();
    let square = generate::check_source(&backend, &source, VariantClass::Square).unwrap();

    assert_eq!(wide.verdict, Verdict::Pass);
    assert_eq!(square.verdict, Verdict::Block);
}
