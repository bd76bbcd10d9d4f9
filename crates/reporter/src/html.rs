use crate::error::RenderError;
use crate::{RenderOptions, Renderer};
use analytics::MetricsEngine;
use core_types::ReturnSeries;

/// The built-in tearsheet renderer.
///
/// Produces a self-contained HTML document with a side-by-side metric table
/// for the instrument and its benchmark, and, in detailed mode, a per-day
/// cumulative return and drawdown table.
#[derive(Debug, Default)]
pub struct TearsheetRenderer {}

impl TearsheetRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for TearsheetRenderer {
    fn render(
        &self,
        instrument: &ReturnSeries,
        benchmark: &ReturnSeries,
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        let engine = MetricsEngine::new();
        let instrument_metrics = engine
            .compute(instrument, Some(benchmark))
            .map_err(|e| RenderError(e.to_string()))?;
        let benchmark_metrics = engine
            .compute(benchmark, None)
            .map_err(|e| RenderError(e.to_string()))?;

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str(&format!("<title>{}</title>\n", options.title));
        html.push_str(
            "<style>body{font-family:sans-serif}table{border-collapse:collapse}\
             td,th{border:1px solid #ccc;padding:4px 10px;text-align:right}\
             td:first-child,th:first-child{text-align:left}</style>\n",
        );
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", options.title));

        html.push_str("<h2>Performance Metrics</h2>\n<table>\n");
        html.push_str("<tr><th>Metric</th><th>Strategy</th><th>Benchmark</th></tr>\n");
        for (strat, bench) in instrument_metrics
            .entries()
            .iter()
            .zip(benchmark_metrics.entries())
        {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                strat.metric.label(),
                strat.formatted_value(),
                bench.formatted_value(),
            ));
        }
        html.push_str("</table>\n");

        if options.detailed {
            push_daily_detail(&mut html, instrument, benchmark);
        }

        html.push_str("</body>\n</html>\n");
        Ok(html)
    }
}

/// Per-day cumulative return and running drawdown for both series.
fn push_daily_detail(html: &mut String, instrument: &ReturnSeries, benchmark: &ReturnSeries) {
    html.push_str("<h2>Daily Detail</h2>\n<table>\n");
    html.push_str(
        "<tr><th>Date</th><th>Cumulative</th><th>Drawdown</th>\
         <th>Benchmark Cumulative</th></tr>\n",
    );

    let mut cumulative = 1.0_f64;
    let mut peak = 1.0_f64;
    let mut bench_cumulative = 1.0_f64;
    for (point, bench) in instrument.points().iter().zip(benchmark.points()) {
        cumulative *= 1.0 + point.value;
        bench_cumulative *= 1.0 + bench.value;
        if cumulative > peak {
            peak = cumulative;
        }
        let drawdown = cumulative / peak - 1.0;
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.2}%</td><td>{:.2}%</td><td>{:.2}%</td></tr>\n",
            point.date,
            (cumulative - 1.0) * 100.0,
            drawdown * 100.0,
            (bench_cumulative - 1.0) * 100.0,
        ));
    }
    html.push_str("</table>\n");
}
