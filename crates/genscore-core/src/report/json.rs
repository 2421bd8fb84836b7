use crate::model::MetricsSummary;
use std::path::Path;

pub fn write_metrics_json(summary: &MetricsSummary, out: &Path) -> anyhow::Result<()> {
    if let Some(dir) = out.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(out, serde_json::to_string_pretty(summary)?)?;
    Ok(())
}
