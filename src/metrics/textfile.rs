use prometheus::{Encoder, Registry, TextEncoder};
use std::path::Path;

/// Render the registry in Prometheus text format and write it to `path`
///
/// Written to a sibling temp file first and renamed, so the collector never
/// reads a half-written file.
pub fn write_textfile(registry: &Registry, path: &Path) -> anyhow::Result<()> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();

    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;

    let tmp = path.with_extension("prom.tmp");
    std::fs::write(&tmp, &buffer)?;
    std::fs::rename(&tmp, path)?;

    tracing::debug!(path = %path.display(), bytes = buffer.len(), "📊 Wrote metrics textfile");
    Ok(())
}
