// src/output.rs
use crate::error::{ErrorContext, Result};
use crate::types::{OutputConfig, OutputFormat, Resolution, ScanReport, SubprobeError, Unresolved};
use std::fs::File;
use std::io::{BufWriter, Write};

pub struct OutputManager {
    config: OutputConfig,
}

impl OutputManager {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Prints the per-candidate line shown while a scan is running.
    pub fn notify(&self, resolution: &Resolution) {
        self.notify_to(&mut std::io::stdout().lock(), resolution);
    }

    fn notify_to<W: Write>(&self, writer: &mut W, resolution: &Resolution) {
        if let Some(line) = self.notice(resolution) {
            emit(writer, &line);
        }
    }

    /// Progress message for the user, suppressed in silent mode.
    pub fn status(&self, message: &str) {
        if !self.config.silent {
            emit(&mut std::io::stdout().lock(), message);
        }
    }

    fn notice(&self, resolution: &Resolution) -> Option<String> {
        match resolution {
            Resolution::Found(found) => Some(format!("Found: {}", found)),
            Resolution::NotFound(_) if self.config.silent => None,
            Resolution::NotFound(missing) => Some(match &missing.cause {
                Unresolved::NoSuchName => format!("NA: {}", missing.target),
                Unresolved::Transient(reason) => format!("NA: {} ({})", missing.target, reason),
            }),
        }
    }

    pub fn write_report(&self, report: &ScanReport) -> Result<()> {
        if let Some(file_path) = &self.config.file {
            self.write_to_file(file_path, report)
        } else {
            self.write_to_stdout(report)
        }
    }

    fn write_to_file(&self, file_path: &str, report: &ScanReport) -> Result<()> {
        let file = File::create(file_path).with_context(SubprobeError::OutputError, || {
            format!("Failed to create {}", file_path)
        })?;

        let mut writer = BufWriter::new(file);
        self.write_output(&mut writer, report)?;
        writer
            .flush()
            .with_context(SubprobeError::OutputError, || format!("Failed to write {}", file_path))?;

        self.status(&format!("Results saved to {}", file_path));
        Ok(())
    }

    fn write_to_stdout(&self, report: &ScanReport) -> Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if self.config.format == OutputFormat::Text {
            writeln!(handle, "Subdomains found:").map_err(|e| SubprobeError::OutputError(e.to_string()))?;
        }
        self.write_output(&mut handle, report)
    }

    pub fn write_output<W: Write>(&self, writer: &mut W, report: &ScanReport) -> Result<()> {
        match self.config.format {
            OutputFormat::Text => self.write_text_output(writer, report),
            OutputFormat::Json => self.write_json_output(writer, report),
            OutputFormat::Csv => self.write_csv_output(writer, report),
        }
    }

    fn write_text_output<W: Write>(&self, writer: &mut W, report: &ScanReport) -> Result<()> {
        for found in &report.results {
            writeln!(writer, "{}", found).map_err(|e| SubprobeError::OutputError(e.to_string()))?;
        }
        Ok(())
    }

    fn write_json_output<W: Write>(&self, writer: &mut W, report: &ScanReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)
            .with_context(SubprobeError::OutputError, || "Failed to serialize JSON".to_string())?;

        writeln!(writer, "{}", json).map_err(|e| SubprobeError::OutputError(e.to_string()))?;

        Ok(())
    }

    fn write_csv_output<W: Write>(&self, writer: &mut W, report: &ScanReport) -> Result<()> {
        writeln!(writer, "target,address").map_err(|e| SubprobeError::OutputError(e.to_string()))?;

        for found in &report.results {
            writeln!(writer, "{},{}", found.target, found.address)
                .map_err(|e| SubprobeError::OutputError(e.to_string()))?;
        }

        Ok(())
    }
}

// A closed stdout (e.g. piped into `head`) must not abort a running scan.
fn emit<W: Write>(writer: &mut W, line: &str) {
    let _ = writeln!(writer, "{}", line);
}
