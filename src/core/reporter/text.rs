//! Plain-text report layout.

use super::{Report, ReportedImage};
use std::fmt::Write;

const TITLE: &str = "Face Comparison Report";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(super) fn render(report: &Report) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out, "{}", "=".repeat(TITLE.len()));
    let _ = writeln!(
        out,
        "Generated: {}",
        report.generated_at.format(TIMESTAMP_FORMAT)
    );
    let _ = writeln!(out, "Region: {}", report.region);
    let _ = writeln!(out);
    write_image(&mut out, "Image 1", &report.source);
    write_image(&mut out, "Image 2", &report.target);
    let _ = writeln!(out);
    let _ = writeln!(out, "Result: {}", report.headline);
    let _ = writeln!(out, "Match count: {}", report.match_count);

    out
}

fn write_image(out: &mut String, label: &str, image: &ReportedImage) {
    let _ = writeln!(out, "{}: {}", label, printable(&image.filename));
    let _ = writeln!(
        out,
        "  {}: {}",
        image.digest.algorithm(),
        image.digest.as_hex()
    );
}

/// Escape control characters so a filename always stays on its own line
fn printable(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}
