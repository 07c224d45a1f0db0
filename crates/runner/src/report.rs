//! Report Generator.
//!
//! Renders the end-of-run text report: unmatched titles per distributor,
//! a drafted outreach email when the distributor has a contact on file,
//! and the list of files that failed to copy.

use crate::unmatched::UnmatchedTitles;
use anyhow::{Context, Result};
use catalog::ContactBook;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the report written inside the run's output directory
pub const REPORT_FILE_NAME: &str = "image_search_report.txt";

pub const ALL_FOUND_LINE: &str = "All images were successfully found.";

/// Builds and writes the run report.
#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    /// Release the assets are requested for, quoted in outreach drafts
    campaign: Option<String>,
}

impl ReportGenerator {
    pub fn new(campaign: Option<String>) -> Self {
        Self { campaign }
    }

    /// Compose the report text.
    pub fn render(
        &self,
        unmatched: &UnmatchedTitles,
        copy_errors: &[String],
        contacts: &ContactBook,
    ) -> String {
        let mut lines: Vec<String> = Vec::new();

        let total_missing = unmatched.total();
        if total_missing > 0 {
            lines.push(format!("Images were not found for {} titles:\n", total_missing));

            for (distributor, titles) in unmatched.iter() {
                lines.push(format!("DISTRIBUTOR {}:", distributor.to_uppercase()));
                for title in titles {
                    lines.push(format!(" - {}", title));
                }

                match contacts.find(distributor) {
                    Some(contact) => {
                        lines.push(format!("\nEmail draft for {}:", distributor));
                        lines.push(format!("To: {}", contact.email));
                        lines.push("Message:".to_string());
                        lines.push(self.draft_message(&contact.contact_name, titles));
                    }
                    None => {
                        lines.push(format!("No contact information found for {}", distributor));
                    }
                }
            }
        } else {
            lines.push(ALL_FOUND_LINE.to_string());
        }

        if !copy_errors.is_empty() {
            lines.push("\nErrors copying these files:".to_string());
            for path in copy_errors {
                lines.push(format!("- {}", path));
            }
        }

        lines.join("\n")
    }

    /// Outreach email body asking a distributor contact for the missing titles
    pub fn draft_message(&self, contact_name: &str, titles: &[String]) -> String {
        let mut message = format!(
            "Hi {},\n\n\
             I hope this message finds you well.\n\
             Could you please assist with the poster and still images for the titles listed below?\n\n",
            contact_name
        );
        for title in titles {
            message.push_str(&format!("- {}\n", title));
        }
        message.push('\n');
        if let Some(campaign) = &self.campaign {
            message.push_str(&format!("These assets will be featured onboard the {}.\n\n", campaign));
        }
        message.push_str("Thank you in advance.\n\nBest regards,\n");
        message
    }

    /// Write report text to [`REPORT_FILE_NAME`] inside `output_dir`
    pub fn write(&self, text: &str, output_dir: &Path) -> Result<PathBuf> {
        let path = output_dir.join(REPORT_FILE_NAME);
        fs::write(&path, text)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("Report saved to {}", path.display());
        Ok(path)
    }
}
