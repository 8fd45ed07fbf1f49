//! Integration tests for loading images from disk and saving reports.

mod common;

use assert_fs::prelude::*;
use common::{credentials, encoded_image, matches, ScriptedComparator};
use face_compare::config::AppConfig;
use face_compare::core::intake::{render_preview, ImageAsset, ImageSlot};
use face_compare::core::{digest, ComparisonSession, CredentialCollector, CredentialInput};
use face_compare::error::{FaceCompareError, InvalidImageError, MissingInput};
use predicates::prelude::*;

#[tokio::test]
async fn files_on_disk_end_up_in_saved_report() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source_bytes = encoded_image(40, 30, 5, image::ImageFormat::Jpeg);
    let target_bytes = encoded_image(40, 30, 6, image::ImageFormat::Png);
    temp.child("me.jpg").write_binary(&source_bytes).unwrap();
    temp.child("id-card.png").write_binary(&target_bytes).unwrap();

    let mut session = ComparisonSession::default();
    session.set_credentials(credentials());
    session.set_image(
        ImageSlot::Source,
        ImageAsset::from_path(temp.child("me.jpg").path()).unwrap(),
    );
    session.set_image(
        ImageSlot::Target,
        ImageAsset::from_path(temp.child("id-card.png").path()).unwrap(),
    );

    let outcome = session
        .submit(&ScriptedComparator::answering(matches(&[93.456])))
        .await
        .unwrap();

    let reports = temp.child("reports");
    let path = outcome.report.write_to_dir(reports.path()).unwrap();

    let file_name = path.file_name().unwrap().to_str().unwrap();
    assert!(predicate::str::is_match(r"^face_comparison_report_\d+\.txt$")
        .unwrap()
        .eval(file_name));

    let saved = reports.child(file_name);
    saved.assert(predicate::str::contains("Image 1: me.jpg"));
    saved.assert(predicate::str::contains("Image 2: id-card.png"));
    saved.assert(predicate::str::contains(digest(&source_bytes).as_hex()));
    saved.assert(predicate::str::contains(digest(&target_bytes).as_hex()));
    saved.assert(predicate::str::contains("Match found with 93.46% similarity"));
    saved.assert(predicate::str::contains("Match count: 1"));
}

#[test]
fn corrupt_upload_is_rejected_at_intake() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("broken.jpg");
    file.write_str("this is not a valid image file").unwrap();

    let err = ImageAsset::from_path(file.path()).unwrap_err();
    assert!(matches!(err, InvalidImageError::UnsupportedFormat { .. }));

    let top: FaceCompareError = err.into();
    assert!(top.to_string().contains("broken.jpg"));
}

#[test]
fn preview_failure_leaves_bytes_usable() {
    let bytes = encoded_image(16, 16, 1, image::ImageFormat::Png);
    let asset = ImageAsset::from_bytes("tiny.png", bytes.clone()).unwrap();

    assert!(render_preview(&asset, 0).is_err());
    assert_eq!(asset.bytes(), &bytes[..]);
    assert_eq!(digest(asset.bytes()), digest(&bytes));
}

#[tokio::test]
async fn environment_defaults_feed_the_collector() {
    let mut config = AppConfig::default();
    config.apply_env(|key| match key {
        "ACCESS_KEY_ID" => Some("AKIAFROMENV".to_string()),
        "REGION" => Some("sa-east-1".to_string()),
        _ => None,
    });

    let collector = CredentialCollector::new(config.credentials.clone());
    let credentials = collector.collect(CredentialInput::default());
    assert_eq!(credentials.access_key(), "AKIAFROMENV");
    assert_eq!(credentials.region(), "sa-east-1");

    // Secret never configured: refused before the service is called
    let mut session = ComparisonSession::default();
    session.set_credentials(credentials);
    session.set_image(ImageSlot::Source, common::png_asset("a.png", 1));
    session.set_image(ImageSlot::Target, common::png_asset("b.png", 2));

    let comparator = ScriptedComparator::answering(matches(&[99.0]));
    let err = session.submit(&comparator).await.unwrap_err();
    assert_eq!(comparator.calls(), 0);
    assert!(matches!(
        err,
        FaceCompareError::Incomplete(ref incomplete) if incomplete.missing == vec![MissingInput::SecretKey]
    ));
}
