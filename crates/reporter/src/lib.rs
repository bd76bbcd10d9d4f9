use crate::error::{RenderError, ReportError};
use analytics::MetricsReport;
use core_types::{ReportTier, ReturnSeries};
use serde::Serialize;

pub mod error;
pub mod html;

// --- Public API ---
pub use html::TearsheetRenderer;

/// Presentation options handed to a renderer.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub title: String,
    /// Whether to include per-day cumulative return and drawdown detail.
    pub detailed: bool,
}

/// The abstract interface for a tearsheet renderer.
///
/// The assembler treats implementations as black boxes producing an opaque
/// presentational document from two aligned return series.
pub trait Renderer: Send + Sync {
    fn render(
        &self,
        instrument: &ReturnSeries,
        benchmark: &ReturnSeries,
        options: &RenderOptions,
    ) -> Result<String, RenderError>;
}

/// The final output of one report request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ReportDocument {
    /// Structured metrics only.
    Basic(MetricsReport),
    /// An opaque rendered payload from the renderer collaborator.
    Rendered { tier: ReportTier, html: String },
}

impl ReportDocument {
    pub fn tier(&self) -> ReportTier {
        match self {
            ReportDocument::Basic(_) => ReportTier::Basic,
            ReportDocument::Rendered { tier, .. } => *tier,
        }
    }
}

/// Assembles a report document for a requested tier.
///
/// `Basic` wraps the metrics directly and never involves the renderer.
/// `Full`/`Detailed` hand the series to the renderer after re-checking that
/// they are aligned; a renderer failure is converted into a typed error,
/// never propagated as a raw fault.
pub struct ReportAssembler<R: Renderer> {
    renderer: R,
    title: String,
}

impl<R: Renderer> ReportAssembler<R> {
    pub fn new(renderer: R, title: impl Into<String>) -> Self {
        Self {
            renderer,
            title: title.into(),
        }
    }

    pub fn assemble(
        &self,
        tier: ReportTier,
        instrument: &ReturnSeries,
        benchmark: &ReturnSeries,
        metrics: &MetricsReport,
    ) -> Result<ReportDocument, ReportError> {
        match tier {
            ReportTier::Basic => Ok(ReportDocument::Basic(metrics.clone())),
            ReportTier::Full | ReportTier::Detailed => {
                check_aligned(instrument, benchmark)?;

                let options = RenderOptions {
                    title: self.title.clone(),
                    detailed: tier == ReportTier::Detailed,
                };
                tracing::debug!(%tier, days = instrument.len(), "delegating to renderer");
                let html = self.renderer.render(instrument, benchmark, &options)?;
                Ok(ReportDocument::Rendered { tier, html })
            }
        }
    }
}

/// The renderer contract requires already-aligned inputs. Finiteness is
/// guaranteed by `ReturnSeries` construction; alignment is re-checked here.
fn check_aligned(instrument: &ReturnSeries, benchmark: &ReturnSeries) -> Result<(), ReportError> {
    if instrument.len() != benchmark.len() {
        return Err(ReportError::Misaligned(format!(
            "instrument has {} points, benchmark has {}",
            instrument.len(),
            benchmark.len()
        )));
    }
    for (a, b) in instrument.points().iter().zip(benchmark.points()) {
        if a.date != b.date {
            return Err(ReportError::Misaligned(format!(
                "instrument date {} does not match benchmark date {}",
                a.date, b.date
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::MetricsEngine;
    use chrono::NaiveDate;
    use core_types::ReturnPoint;

    fn series(values: &[f64]) -> ReturnSeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| ReturnPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .checked_add_days(chrono::Days::new(i as u64))
                    .unwrap(),
                value: *v,
            })
            .collect();
        ReturnSeries::new(points).unwrap()
    }

    fn metrics(returns: &ReturnSeries) -> MetricsReport {
        MetricsEngine::new().compute(returns, None).unwrap()
    }

    /// A renderer that must not be invoked.
    struct ExplodingRenderer;

    impl Renderer for ExplodingRenderer {
        fn render(
            &self,
            _: &ReturnSeries,
            _: &ReturnSeries,
            _: &RenderOptions,
        ) -> Result<String, RenderError> {
            panic!("renderer must not be invoked for the Basic tier");
        }
    }

    /// A renderer that always fails.
    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(
            &self,
            _: &ReturnSeries,
            _: &ReturnSeries,
            _: &RenderOptions,
        ) -> Result<String, RenderError> {
            Err(RenderError("template exploded".to_string()))
        }
    }

    #[test]
    fn basic_tier_never_touches_the_renderer() {
        let returns = series(&[0.01, -0.02]);
        let assembler = ReportAssembler::new(ExplodingRenderer, "t");
        let document = assembler
            .assemble(ReportTier::Basic, &returns, &returns, &metrics(&returns))
            .unwrap();
        assert_eq!(document.tier(), ReportTier::Basic);
    }

    #[test]
    fn renderer_failure_becomes_a_typed_error() {
        let returns = series(&[0.01, -0.02]);
        let assembler = ReportAssembler::new(FailingRenderer, "t");
        let err = assembler
            .assemble(ReportTier::Full, &returns, &returns, &metrics(&returns))
            .unwrap_err();
        assert!(matches!(err, ReportError::Render(_)));
    }

    #[test]
    fn misaligned_series_are_rejected_before_rendering() {
        let a = series(&[0.01, -0.02]);
        let b = series(&[0.01]);
        let assembler = ReportAssembler::new(ExplodingRenderer, "t");
        let err = assembler
            .assemble(ReportTier::Full, &a, &b, &metrics(&a))
            .unwrap_err();
        assert!(matches!(err, ReportError::Misaligned(_)));
    }

    #[test]
    fn basic_document_serializes_to_json() {
        let returns = series(&[0.01, -0.02]);
        let document = ReportDocument::Basic(metrics(&returns));
        let json = serde_json::to_string(&document).unwrap();
        assert!(json.contains("TotalReturn"));
    }

    #[test]
    fn full_tier_wraps_the_rendered_payload() {
        let returns = series(&[0.01, -0.02, 0.005]);
        let assembler = ReportAssembler::new(TearsheetRenderer::new(), "SPY vs SPY");
        let document = assembler
            .assemble(ReportTier::Full, &returns, &returns, &metrics(&returns))
            .unwrap();
        match document {
            ReportDocument::Rendered { tier, html } => {
                assert_eq!(tier, ReportTier::Full);
                assert!(html.contains("SPY vs SPY"));
            }
            other => panic!("expected a rendered document, got {other:?}"),
        }
    }
}
