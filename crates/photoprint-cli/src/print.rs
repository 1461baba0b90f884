//! Handing a rendered raster to the system print spooler.
//!
//! Jobs go through CUPS `lp`. The raster already has the paper's exact
//! pixel size, so the only page options passed are the media size, the copy
//! count and, for landscape rasters, the page orientation. Printers are
//! listed with `lpstat -e`.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use photoprint_core::PaperSize;

const LP: &str = "lp";
const LPSTAT: &str = "lpstat";

/// What to send and where.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintJob<'a> {
    /// `None` sends to the system default printer.
    pub printer: Option<&'a str>,
    pub copies: u32,
    pub paper: PaperSize,
    /// The raster is wider than tall; ask for landscape pages.
    pub landscape: bool,
}

impl PrintJob<'_> {
    /// CUPS media keyword for a custom size, e.g. `Custom.4x6in`.
    pub fn media(&self) -> String {
        format!("Custom.{}in", self.paper)
    }

    /// Arguments for `lp` to print `file`.
    pub fn lp_args(&self, file: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        if let Some(printer) = self.printer {
            args.push("-d".into());
            args.push(printer.into());
        }
        args.push("-n".into());
        args.push(self.copies.max(1).to_string().into());
        args.push("-o".into());
        args.push(format!("media={}", self.media()).into());
        if self.landscape {
            args.push("-o".into());
            args.push("orientation-requested=4".into());
        }
        args.push("--".into());
        args.push(file.as_os_str().to_owned());
        args
    }

    /// Run `lp` and wait for the spooler to accept the job.
    ///
    /// Returns whatever `lp` printed, usually the request id.
    pub fn submit(&self, file: &Path) -> Result<String> {
        let args = self.lp_args(file);
        tracing::info!(
            printer = self.printer.unwrap_or("<default>"),
            copies = self.copies,
            landscape = self.landscape,
            "submitting print job"
        );
        tracing::debug!(?args, "running {LP}");

        let output = Command::new(LP)
            .args(&args)
            .output()
            .with_context(|| format!("failed to run '{LP}'; is CUPS installed?"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{LP} failed ({}): {}", output.status, stderr.trim());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// One destination known to the spooler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterEntry {
    pub name: String,
    /// Matches the saved printer.
    pub selected: bool,
}

/// Turn `lpstat -e` output (one destination per line) into entries, marking
/// the one named `selected`.
pub fn parse_printers(lpstat: &str, selected: Option<&str>) -> Vec<PrinterEntry> {
    lpstat
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|name| PrinterEntry {
            name: name.to_string(),
            selected: selected == Some(name),
        })
        .collect()
}

/// Ask CUPS for its destinations.
pub fn list_printers(selected: Option<&str>) -> Result<Vec<PrinterEntry>> {
    let output = Command::new(LPSTAT)
        .arg("-e")
        .output()
        .with_context(|| format!("failed to run '{LPSTAT}'; is CUPS installed?"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("{LPSTAT} failed ({}): {}", output.status, stderr.trim());
    }
    Ok(parse_printers(&String::from_utf8_lossy(&output.stdout), selected))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_lp_args_with_printer() {
        let job = PrintJob {
            printer: Some("Canon_SELPHY"),
            copies: 2,
            paper: PaperSize::PHOTO_4X6,
            landscape: false,
        };
        assert_eq!(
            strings(job.lp_args(Path::new("/tmp/job.png"))),
            ["-d", "Canon_SELPHY", "-n", "2", "-o", "media=Custom.4x6in", "--", "/tmp/job.png"]
        );
    }

    #[test]
    fn test_lp_args_default_printer() {
        let job = PrintJob {
            printer: None,
            copies: 0,
            paper: "5x7".parse().unwrap(),
            landscape: false,
        };
        let args = strings(job.lp_args(Path::new("job.png")));
        assert!(!args.contains(&"-d".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("orientation")));
        assert_eq!(&args[..4], ["-n", "1", "-o", "media=Custom.5x7in"]);
    }

    #[test]
    fn test_lp_args_landscape() {
        let job = PrintJob {
            printer: None,
            copies: 1,
            paper: PaperSize::PHOTO_4X6,
            landscape: true,
        };
        assert_eq!(
            strings(job.lp_args(Path::new("job.png"))),
            [
                "-n",
                "1",
                "-o",
                "media=Custom.4x6in",
                "-o",
                "orientation-requested=4",
                "--",
                "job.png"
            ]
        );
    }

    #[test]
    fn test_parse_printers_marks_saved_one() {
        let lpstat = "Canon_SELPHY_CP1300\nHP_OfficeJet\n\n  PDF  \n";
        let printers = parse_printers(lpstat, Some("HP_OfficeJet"));
        assert_eq!(
            printers,
            [
                PrinterEntry {
                    name: "Canon_SELPHY_CP1300".to_string(),
                    selected: false,
                },
                PrinterEntry {
                    name: "HP_OfficeJet".to_string(),
                    selected: true,
                },
                PrinterEntry {
                    name: "PDF".to_string(),
                    selected: false,
                },
            ]
        );
    }

    #[test]
    fn test_parse_printers_without_saved_printer() {
        let printers = parse_printers("Canon_SELPHY_CP1300\n", None);
        assert_eq!(printers.len(), 1);
        assert!(!printers[0].selected);
        assert!(parse_printers("", Some("Canon_SELPHY_CP1300")).is_empty());
    }
}
