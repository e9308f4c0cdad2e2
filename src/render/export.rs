use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{BannerError, BannerResult};
use crate::personalize::recipient::Recipient;
use crate::render::batch::BatchReport;

/// File name for one recipient's banner: `<banner>_<recipient>.png`, spaces turned into `_`
/// and path separators dropped.
pub fn archive_file_name(banner_name: &str, recipient_name: &str) -> String {
    fn clean(s: &str) -> String {
        s.trim()
            .chars()
            .filter(|c| !matches!(c, '/' | '\\' | '\0'))
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect()
    }
    format!("{}_{}.png", clean(banner_name), clean(recipient_name))
}

/// `name`, or `name` with `_2`, `_3`, ... before the extension if an earlier file in the same
/// batch already took it. Compared case-insensitively.
fn unique_file_name(name: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(name.to_lowercase()) {
        return name;
    }
    let stem = name.strip_suffix(".png").unwrap_or(&name);
    let mut n = 2u32;
    loop {
        let candidate = format!("{stem}_{n}.png");
        if taken.insert(candidate.to_lowercase()) {
            return candidate;
        }
        n += 1;
    }
}

/// Write every successful banner of `report` into `dir`; returns the written paths in input
/// order. `recipients` must be the list the batch ran on. Recipients whose names map to the
/// same file get numbered suffixes, so no banner overwrites another.
pub fn write_outputs(
    dir: &Path,
    banner_name: &str,
    report: &BatchReport,
    recipients: &[Recipient],
) -> BannerResult<Vec<PathBuf>> {
    if report.outcomes.len() != recipients.len() {
        return Err(BannerError::validation(format!(
            "report has {} outcomes for {} recipients",
            report.outcomes.len(),
            recipients.len()
        )));
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir '{}'", dir.display()))?;

    let mut written = Vec::new();
    let mut taken = HashSet::new();
    for (outcome, recipient) in report.outcomes.iter().zip(recipients) {
        if outcome.recipient_id != recipient.id {
            return Err(BannerError::validation(format!(
                "outcome for '{}' paired with recipient '{}'",
                outcome.recipient_id, recipient.id
            )));
        }
        let Some(png) = outcome.png() else {
            continue;
        };
        let name = unique_file_name(archive_file_name(banner_name, &recipient.name), &mut taken);
        let path = dir.join(name);
        std::fs::write(&path, png).with_context(|| format!("write png '{}'", path.display()))?;
        written.push(path);
    }
    tracing::info!(dir = %dir.display(), files = written.len(), "outputs written");
    Ok(written)
}

/// Write `report.summary()` as pretty JSON to `path`.
pub fn write_report(path: &Path, report: &BatchReport) -> BannerResult<()> {
    let json = serde_json::to_string_pretty(&report.summary()).context("serialize report")?;
    std::fs::write(path, json).with_context(|| format!("write report '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
