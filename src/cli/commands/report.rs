//! Report command handler
//!
//! Builds a gradebook from the sample data and renders one report as text or
//! Markdown, to stdout or to a file.

use crate::args::ReportTarget;
use gradebook::config::Config;
use gradebook::core::gradebook::Gradebook;
use gradebook::core::identity::{CourseCode, UserId};
use gradebook::core::report::{
    MarkdownReporter, ReportContext, ReportFormat, ReportGenerator, ReportKind, TextReporter,
};
use gradebook::core::sample::seed_sample_data;
use logger::{error, info, verbose};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Where the rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Print to stdout
    Stdout,
    /// Write to this file
    File(PathBuf),
    /// Write into the configured reports directory under a generated name
    ReportsDir,
}

/// Run the report command, printing any failure to stderr.
///
/// # Arguments
/// * `target` - Report kind requested on the command line
/// * `id` - Student ID/number or course code
/// * `format_str` - Report format (text, markdown)
/// * `destination` - Where to write the result
/// * `config` - Configuration with the school name and reports directory
pub fn run(
    target: ReportTarget,
    id: Option<&str>,
    format_str: &str,
    destination: Destination,
    config: &Config,
) {
    if let Err(err) = generate(target, id, format_str, destination, config) {
        error!("Report generation failed: {err}");
        eprintln!("✗ {err}");
    }
}

fn generate(
    target: ReportTarget,
    id: Option<&str>,
    format_str: &str,
    destination: Destination,
    config: &Config,
) -> Result<(), String> {
    let format = ReportFormat::from_str(format_str)?;

    let mut book = if config.school.name.is_empty() {
        Gradebook::new()
    } else {
        Gradebook::with_school_name(&config.school.name)
    };
    seed_sample_data(&mut book).map_err(|e| format!("Failed to seed sample data: {e}"))?;

    let kind = resolve_kind(&book, target, id)?;
    if destination != Destination::Stdout {
        verbose!("Rendering {kind} as {format} for {}", book.school_name());
    }
    let content = render(&book, kind.clone(), format)?;

    match destination {
        Destination::Stdout => print!("{content}"),
        Destination::File(path) => write_report(&path, &content)?,
        Destination::ReportsDir => {
            let dir = PathBuf::from(&config.paths.reports_dir);
            fs::create_dir_all(&dir).map_err(|e| {
                format!("Failed to create reports directory {}: {e}", dir.display())
            })?;
            let path = dir.join(format!("{kind}.{}", format.extension()));
            write_report(&path, &content)?;
        }
    }
    Ok(())
}

fn write_report(path: &Path, content: &str) -> Result<(), String> {
    fs::write(path, content)
        .map_err(|e| format!("Failed to write report {}: {e}", path.display()))?;
    info!("Report written to {}", path.display());
    verbose!("  {} bytes, {} lines", content.len(), content.lines().count());
    println!("✓ Report generated: {}", path.display());
    Ok(())
}

/// Render `kind` over `book` in the requested format
///
/// # Errors
/// Returns an error if a handle in `kind` does not resolve.
pub fn render(book: &Gradebook, kind: ReportKind, format: ReportFormat) -> Result<String, String> {
    let ctx = ReportContext::new(book, kind);
    let rendered = match format {
        ReportFormat::Text => TextReporter::new().render(&ctx),
        ReportFormat::Markdown => MarkdownReporter::new().render(&ctx),
    };
    rendered.map_err(|e| e.to_string())
}

/// Turn the command-line target and id into a report kind
///
/// Students are accepted by user ID or by student number.
///
/// # Errors
/// Returns an error if the id is missing or does not name a record.
pub fn resolve_kind(
    book: &Gradebook,
    target: ReportTarget,
    id: Option<&str>,
) -> Result<ReportKind, String> {
    let require_id = || id.ok_or_else(|| format!("Report '{target:?}' needs an ID"));

    match target {
        ReportTarget::Stats => Ok(ReportKind::Statistics),
        ReportTarget::Course => {
            let code = require_id()?;
            book.find_course_by_code(code)
                .map(|c| ReportKind::CourseGrades(c.code().clone()))
                .ok_or_else(|| format!("Course {code} not found"))
        }
        ReportTarget::Student | ReportTarget::Transcript => {
            let raw = require_id()?;
            let student = raw
                .parse::<u32>()
                .ok()
                .and_then(|n| book.find_student_by_id(UserId::new(n)))
                .or_else(|| book.find_student_by_number(raw))
                .ok_or_else(|| format!("Student {raw} not found"))?;
            Ok(if target == ReportTarget::Student {
                ReportKind::StudentGrades(student.id())
            } else {
                ReportKind::Transcript(student.id())
            })
        }
    }
}
