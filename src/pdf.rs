//! HTML to PDF through an external converter (wkhtmltopdf, prince, a headless
//! chrome wrapper, ...). The command line comes from `PDF_CONVERTER` and
//! `PDF_CONVERTER_ARGS`, where `{input}` and `{output}` name the temp files.

use std::fmt;
use std::path::Path;
use tokio::fs;
use tokio::process::Command;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug)]
pub enum PdfError {
    Io(std::io::Error),
    Converter { status: Option<i32>, stderr: String },
    EmptyOutput,
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "PDF export failed: {err}"),
            Self::Converter { status, stderr } => match status {
                Some(code) => write!(f, "PDF converter exited with status {code}: {stderr}"),
                None => write!(f, "PDF converter was terminated: {stderr}"),
            },
            Self::EmptyOutput => write!(f, "PDF converter produced no output"),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<std::io::Error> for PdfError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Splits the argument template on whitespace and substitutes the file paths.
pub fn converter_args(template: &str, input: &Path, output: &Path) -> Vec<String> {
    let input = input.display().to_string();
    let output = output.display().to_string();
    template
        .split_whitespace()
        .map(|arg| arg.replace("{input}", &input).replace("{output}", &output))
        .collect()
}

pub async fn export_pdf(converter: &str, args_template: &str, html: &str) -> Result<Vec<u8>, PdfError> {
    let temp_dir = std::env::temp_dir()
        .join("adreport-pdf")
        .join(Uuid::new_v4().simple().to_string());
    fs::create_dir_all(&temp_dir).await?;

    let result = convert(converter, args_template, html, &temp_dir).await;
    if let Err(err) = fs::remove_dir_all(&temp_dir).await {
        error!("failed to clean up {}: {err}", temp_dir.display());
    }
    result
}

async fn convert(
    converter: &str,
    args_template: &str,
    html: &str,
    temp_dir: &Path,
) -> Result<Vec<u8>, PdfError> {
    let input = temp_dir.join("report.html");
    let output = temp_dir.join("report.pdf");
    fs::write(&input, html).await?;

    info!(converter, "rendering report PDF");
    let result = Command::new(converter)
        .args(converter_args(args_template, &input, &output))
        .output()
        .await?;

    if !result.status.success() {
        return Err(PdfError::Converter {
            status: result.status.code(),
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }

    let bytes = fs::read(&output).await?;
    if bytes.is_empty() {
        return Err(PdfError::EmptyOutput);
    }
    Ok(bytes)
}
