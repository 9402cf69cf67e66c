mod common;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;
use zip::ZipArchive;

fn run_command(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_docdeck"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn count_files_with_pattern(dir: &Path, pattern: &str) -> usize {
    let glob_pattern = format!("{}/{}", glob::Pattern::escape(&dir.to_string_lossy()), pattern);
    glob::glob(&glob_pattern)
        .expect("Failed to read glob pattern")
        .filter_map(Result::ok)
        .count()
}

fn slide_part_count(pptx: &Path) -> usize {
    let file = fs::File::open(pptx).expect("Failed to open PPTX file");
    let mut archive = ZipArchive::new(file).expect("Failed to read PPTX as ZIP");
    (0..archive.len())
        .filter_map(|i| archive.by_index(i).ok().map(|f| f.name().to_string()))
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .count()
}

#[test]
fn test_full_pipeline() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    common::write_default_inputs(temp_dir.path());

    let output = run_command(temp_dir.path(), &[]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6, "unexpected stdout: {}", stdout);
    assert_eq!(lines[0], "DOCX_CHECK_START");
    assert_eq!(lines[4], "DOCX_CHECK_END");
    for record in &lines[1..4] {
        assert!(record.contains("'paragraphs': 1"), "record: {}", record);
        assert!(record.contains("'margins_cm': (3.0, 1.5, 2.0, 2.0)"), "record: {}", record);
        assert!(record.contains("'font_size_pt': None"), "record: {}", record);
    }
    assert!(lines[1].contains(docdeck::config::TARGET_DOCX));
    assert_eq!(lines[5], format!("PPTX_CREATED: {}", docdeck::config::PPTX_OUTPUT));

    let assets_dir = temp_dir.path().join(docdeck::config::ASSETS_DIR);
    assert_eq!(count_files_with_pattern(&assets_dir, "*.png"), 14);
    assert!(assets_dir.join("01_title.png").exists());
    assert!(assets_dir.join("14_thanks.png").exists());

    let pptx = temp_dir.path().join(docdeck::config::PPTX_OUTPUT);
    assert_eq!(slide_part_count(&pptx), 14);
}

#[test]
fn test_second_run_produces_same_content() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    common::write_default_inputs(temp_dir.path());
    let pptx = temp_dir.path().join(docdeck::config::PPTX_OUTPUT);
    let assets_dir = temp_dir.path().join(docdeck::config::ASSETS_DIR);

    let first = run_command(temp_dir.path(), &[]);
    assert!(first.status.success(), "Command failed: {:?}", first);
    let first_outline = docdeck::read_outline(&pptx).expect("Failed to read first deck");

    let second = run_command(temp_dir.path(), &[]);
    assert!(second.status.success(), "Command failed: {:?}", second);
    let second_outline = docdeck::read_outline(&pptx).expect("Failed to read second deck");

    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first_outline, second_outline);
    for image in docdeck::IMAGES.iter() {
        let dims = image::image_dimensions(assets_dir.join(image.file_name))
            .expect("Failed to read image");
        assert_eq!(dims, (1280, 720));
    }
    let first_card = image::open(assets_dir.join(docdeck::IMAGES[0].file_name))
        .expect("Failed to open image")
        .to_rgb8();
    assert_eq!(*first_card.get_pixel(5, 5), docdeck::IMAGES[0].background);
}

#[test]
fn test_missing_input_aborts_before_deck() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    common::write_default_inputs(temp_dir.path());
    fs::remove_file(temp_dir.path().join(docdeck::config::EXAMPLE_DOCX_1))
        .expect("Failed to remove input");

    let output = run_command(temp_dir.path(), &[]);
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("PPTX_CREATED"));
    assert!(!stdout.contains("DOCX_CHECK_START"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "stderr: {}", stderr);
    assert!(!temp_dir.path().join(docdeck::config::PPTX_OUTPUT).exists());
}

#[test]
fn test_check_docx_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    common::write_default_inputs(temp_dir.path());

    let output = run_command(temp_dir.path(), &["check-docx"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("DOCX_CHECK_START\n"));
    assert!(stdout.ends_with("DOCX_CHECK_END\n"));
    assert!(!temp_dir.path().join(docdeck::config::ASSETS_DIR).exists());
}

#[test]
fn test_outline_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    common::write_default_inputs(temp_dir.path());
    let build = run_command(temp_dir.path(), &[]);
    assert!(build.status.success(), "Command failed: {:?}", build);

    let output = run_command(temp_dir.path(), &["outline", docdeck::config::PPTX_OUTPUT]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("1. Тема проекта\n"));
    assert!(stdout.contains("14. Спасибо за внимание\n"));
    assert!(stdout.contains("  - Нижневартовск, 2026\n"));
}
