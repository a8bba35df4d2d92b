//! Text exposition encoder.
//!
//! Line shapes follow the Prometheus text format: `# HELP` / `# TYPE`
//! (plus `# UNIT` when declared) per family, then one sample line per
//! series. Histograms expand into cumulative `_bucket` lines with a
//! synthetic `le="+Inf"` equal to the total count, followed by `_sum` and
//! `_count`; summaries expand into one line per target quantile.

use std::fmt::Write;

use metryx_core::label::LabelSet;
use metryx_core::state::MetricValue;
use metryx_core::{FamilyEncoder, MetricFamily};

/// Accumulating text encoder. Feed it to [`Registry::encode`] and take the
/// rendition with [`into_string`].
///
/// [`Registry::encode`]: metryx_core::Registry::encode
/// [`into_string`]: TextEncoder::into_string
#[derive(Default)]
pub struct TextEncoder {
    out: String,
}

impl TextEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn sample(
        &mut self,
        name: &str,
        suffix: &str,
        labels: &LabelSet,
        extra: Option<(&str, &str)>,
        value: f64,
    ) -> std::fmt::Result {
        self.out.push_str(name);
        self.out.push_str(suffix);
        let mut parts: Vec<String> = labels
            .pairs()
            .iter()
            .map(|p| format!("{}=\"{}\"", p.name, escape_label(&p.value)))
            .collect();
        if let Some((k, v)) = extra {
            parts.push(format!("{k}=\"{v}\""));
        }
        if !parts.is_empty() {
            write!(self.out, "{{{}}}", parts.join(","))?;
        }
        writeln!(self.out, " {}", fmt_float(value))
    }
}

impl FamilyEncoder for TextEncoder {
    fn encode(
        &mut self,
        family: &MetricFamily,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let name = family.name();
        if let Some(help) = family.help() {
            writeln!(self.out, "# HELP {name} {}", escape_help(help))?;
        }
        if let Some(unit) = family.unit() {
            writeln!(self.out, "# UNIT {name} {unit}")?;
        }
        writeln!(self.out, "# TYPE {name} {}", family.kind())?;

        for state in family.metrics() {
            let labels = state.labels();
            match state.value() {
                MetricValue::Counter { value } | MetricValue::Gauge { value } => {
                    self.sample(name, "", labels, None, value.load())?;
                }
                MetricValue::Histogram {
                    count,
                    sum,
                    buckets,
                } => {
                    let total = count.load(std::sync::atomic::Ordering::Relaxed);
                    for bucket in buckets {
                        self.sample(
                            name,
                            "_bucket",
                            labels,
                            Some(("le", &fmt_float(bucket.upper_bound()))),
                            bucket.cumulative() as f64,
                        )?;
                    }
                    self.sample(name, "_bucket", labels, Some(("le", "+Inf")), total as f64)?;
                    self.sample(name, "_sum", labels, None, sum.load())?;
                    self.sample(name, "_count", labels, None, total as f64)?;
                }
                MetricValue::Summary {
                    count,
                    sum,
                    quantiles,
                    ..
                } => {
                    for cell in quantiles {
                        self.sample(
                            name,
                            "",
                            labels,
                            Some(("quantile", &fmt_float(cell.target()))),
                            cell.estimate(),
                        )?;
                    }
                    let total = count.load(std::sync::atomic::Ordering::Relaxed);
                    self.sample(name, "_sum", labels, None, sum.load())?;
                    self.sample(name, "_count", labels, None, total as f64)?;
                }
            }
        }
        Ok(())
    }
}

/// Escape a label value: backslash, double quote, newline.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Escape help text: backslash, newline.
fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn fmt_float(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{v}")
    }
}
