// SPDX-License-Identifier: MPL-2.0
use image_rs::{Rgba, RgbaImage};
use lens_edit::config::EditorConfig;
use lens_edit::editor::{EditorPhase, KeyChord, Session, TransformPatch, TransformState};
use lens_edit::error::Error;
use lens_edit::media::{DirectorySink, ExportFormat, ExportRequest, MemorySink, SourceImage};
use std::path::PathBuf;
use tempfile::tempdir;

fn write_checkerboard(dir: &std::path::Path, width: u32, height: u32) -> PathBuf {
    let path = dir.join("input.png");
    RgbaImage::from_fn(width, height, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            Rgba([230, 40, 40, 255])
        } else {
            Rgba([20, 20, 200, 255])
        }
    })
    .save(&path)
    .expect("write input");
    path
}

#[test]
fn edit_and_export_to_directory() {
    let dir = tempdir().expect("temp dir");
    let input = write_checkerboard(dir.path(), 64, 48);
    let out = dir.path().join("exports");

    let mut session = Session::new(EditorConfig::default(), DirectorySink::new(&out));
    session.load_path(&input).expect("load");
    session
        .update(&TransformPatch::scale(1.5).with_rotation(-30.0))
        .expect("update");
    let exported = session
        .export(&ExportRequest::new(ExportFormat::Png, 1.0))
        .expect("export");

    let written = session.sink().written();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0], out.join(&exported.filename));

    let decoded = image_rs::open(&written[0]).expect("decode written file");
    assert_eq!((decoded.width(), decoded.height()), (96, 72));
    assert_eq!(
        session.current_raster().map(|raster| raster.dimensions()),
        Some((96, 72))
    );
}

#[test]
fn every_format_reaches_the_sink() {
    let dir = tempdir().expect("temp dir");
    let input = write_checkerboard(dir.path(), 32, 32);

    let mut session = Session::new(EditorConfig::default(), MemorySink::default());
    session.load_path(&input).expect("load");
    session
        .update(&TransformPatch::brightness(80.0).with_contrast(120.0))
        .expect("update");

    for format in ExportFormat::all() {
        let exported = session
            .export(&ExportRequest::new(*format, 0.75))
            .expect("export");
        assert!(!exported.bytes.is_empty());
        assert!(exported
            .filename
            .ends_with(&format!(".{}", format.extension())));
        // Encoded output decodes back to the rendered size
        let decoded = image_rs::load_from_memory(&exported.bytes).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
    }
    assert_eq!(session.sink().saved().len(), 3);
}

#[test]
fn keyboard_session_round_trip() {
    let dir = tempdir().expect("temp dir");
    let input = write_checkerboard(dir.path(), 16, 16);

    let mut session = Session::new(EditorConfig::default(), MemorySink::default());
    session.load_path(&input).expect("load");

    for degrees in [15.0, 30.0, 45.0] {
        session
            .update(&TransformPatch::rotation(degrees))
            .expect("update");
    }
    for _ in 0..3 {
        session
            .dispatch_shortcut(&KeyChord::primary('z'))
            .expect("undo");
    }
    assert_eq!(session.current_state(), Some(TransformState::default()));
    assert_eq!(session.phase(), EditorPhase::ImageLoaded { dirty: true });

    session
        .dispatch_shortcut(&KeyChord::primary('s'))
        .expect("export");
    assert_eq!(session.phase(), EditorPhase::ImageLoaded { dirty: false });
    assert_eq!(session.sink().saved().len(), 1);
}

#[test]
fn decode_failures_leave_session_empty() {
    let dir = tempdir().expect("temp dir");
    let bogus = dir.path().join("bogus.png");
    std::fs::write(&bogus, b"definitely not a png").expect("write");

    let mut session = Session::new(EditorConfig::default(), MemorySink::default());
    let err = session.load_path(&bogus).expect_err("bogus input");
    assert!(matches!(err, Error::Load(_)));
    assert_eq!(session.phase(), EditorPhase::NoImage);
}

#[test]
fn sources_can_be_shared_across_sessions() {
    let source = SourceImage::from_rgba(2, 2, vec![255; 16]).expect("source");

    let mut first = Session::new(EditorConfig::default(), MemorySink::default());
    let mut second = Session::new(EditorConfig::default(), MemorySink::default());
    first.load(source.clone()).expect("load");
    second.load(source).expect("load");

    first.update(&TransformPatch::rotation(90.0)).expect("update");
    assert_eq!(second.current_state(), Some(TransformState::default()));
}
