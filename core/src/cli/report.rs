use crate::batch::{BatchSummary, JobOutcome, JobReport};
use crate::types::ScanMetadata;
use std::fmt;

/// Text report formatter for a batch run
pub struct TextReport<'a> {
    reports: &'a [JobReport],
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(reports: &'a [JobReport]) -> Self {
        Self { reports }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mammogram Conversion")?;
        writeln!(f, "====================")?;
        writeln!(f)?;

        for report in self.reports {
            writeln!(f, "{}", report.source.display())?;
            match &report.outcome {
                JobOutcome::Converted { png, metadata } => {
                    writeln!(f, "  Status:     converted")?;
                    writeln!(f, "  Output:     {}", png.display())?;
                    write_metadata(f, metadata)?;
                }
                JobOutcome::Described(metadata) => {
                    writeln!(f, "  Status:     metadata only")?;
                    write_metadata(f, metadata)?;
                }
                JobOutcome::Skipped(target) => {
                    writeln!(f, "  Status:     skipped ({} exists)", target.display())?;
                }
                JobOutcome::Failed(e) => {
                    writeln!(f, "  Status:     FAILED")?;
                    writeln!(f, "  Error:      {}", e)?;
                }
            }
            writeln!(f)?;
        }

        let summary = BatchSummary::from_reports(self.reports);
        writeln!(f, "Summary")?;
        writeln!(f, "-------")?;
        writeln!(f, "Converted:  {}", summary.converted)?;
        if summary.described > 0 {
            writeln!(f, "Described:  {}", summary.described)?;
        }
        writeln!(f, "Skipped:    {}", summary.skipped)?;
        writeln!(f, "Failed:     {}", summary.failed)?;

        Ok(())
    }
}

fn write_metadata(f: &mut fmt::Formatter<'_>, metadata: &ScanMetadata) -> fmt::Result {
    writeln!(f, "  Size:       {} x {}", metadata.rows, metadata.cols)?;
    writeln!(f, "  Digitizer:  {}", metadata.digitizer)?;
    if let Some(bits) = metadata.bits_per_pixel {
        writeln!(f, "  Bits:       {}", bits)?;
    }
    if let Some(resolution) = metadata.resolution {
        writeln!(f, "  Resolution: {} um", resolution)?;
    }
    if metadata.has_overlay {
        writeln!(f, "  Overlay:    yes")?;
    }
    Ok(())
}
