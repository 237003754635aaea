use base64::{engine::general_purpose, Engine as _};
use chrono::NaiveDate;
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::ReportError;
use crate::types::*;
use crate::ReportResult;

/// A single dated line to draw.
pub(crate) struct LineChart<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
    pub dates: &'a [NaiveDate],
    pub values: Vec<f64>,
}

/// Compound periodic returns into an index rebased so the first
/// observation equals 100.
pub fn growth_index(name: &str, returns: &[Rate]) -> ReportResult<Vec<Decimal>> {
    let out_of_range = || ReportError::InvalidInput {
        field: name.to_string(),
        reason: "cumulative growth leaves the decimal range (expected fractions such as 0.01, not percent)"
            .into(),
    };

    let mut cumulative = Decimal::ONE;
    let mut growth = Vec::with_capacity(returns.len());
    for r in returns {
        cumulative = Decimal::ONE
            .checked_add(*r)
            .and_then(|factor| cumulative.checked_mul(factor))
            .ok_or_else(out_of_range)?;
        growth.push(cumulative);
    }

    let first = match growth.first() {
        Some(first) => *first,
        None => return Ok(growth),
    };
    if first.is_zero() {
        return Err(ReportError::DivisionByZero {
            context: "growth index rebasing (first return is -100%)".into(),
        });
    }

    growth
        .into_iter()
        .map(|g| {
            g.checked_div(first)
                .and_then(|rel| rel.checked_mul(dec!(100)))
                .ok_or_else(out_of_range)
        })
        .collect()
}

/// Growth-of-100 chart for `series`, ready to draw.
pub(crate) fn growth_chart<'a>(
    series: &'a ReturnSeries,
    title: &'a str,
) -> ReportResult<LineChart<'a>> {
    let index = growth_index(series.name(), series.values())?;
    Ok(LineChart {
        title,
        x_desc: "Date",
        y_desc: "Returns",
        dates: series.dates(),
        values: index
            .iter()
            .map(|v| v.to_f64().unwrap_or(f64::NAN))
            .collect(),
    })
}

/// Draw the chart into an RGB buffer and encode it as PNG.
pub(crate) fn render_png(chart: &LineChart<'_>, (width, height): (u32, u32)) -> ReportResult<Vec<u8>> {
    if chart.values.is_empty() {
        return Err(ReportError::InsufficientData(format!(
            "nothing to plot for '{}'",
            chart.title
        )));
    }

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let (min_v, max_v) = value_range(&chart.values);
        let last = (chart.values.len() - 1).max(1);
        let dates = chart.dates;

        let mut ctx = ChartBuilder::on(&root)
            .caption(chart.title, ("sans-serif", 24).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0usize..last, min_v..max_v)
            .map_err(draw_error)?;

        ctx.configure_mesh()
            .x_desc(chart.x_desc)
            .y_desc(chart.y_desc)
            .x_labels(6)
            .x_label_formatter(&|i: &usize| dates.get(*i).map(|d| d.to_string()).unwrap_or_default())
            .draw()
            .map_err(draw_error)?;

        ctx.draw_series(LineSeries::new(
            chart
                .values
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(i, v)| (i, *v)),
            &BLUE,
        ))
        .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&buffer, width, height, ColorType::Rgb8)
        .map_err(|e| ReportError::Render(e.to_string()))?;
    Ok(png)
}

/// `<img>` tag embedding the PNG as a base64 data URI.
pub(crate) fn embed_png(png: &[u8]) -> String {
    format!(
        "<img src=\"data:image/png;base64,{}\">",
        general_purpose::STANDARD.encode(png)
    )
}

/// Y-axis extent with a 5% margin; flat lines get a unit band.
fn value_range(values: &[f64]) -> (f64, f64) {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let min_v = finite.clone().fold(f64::INFINITY, f64::min);
    let max_v = finite.fold(f64::NEG_INFINITY, f64::max);

    if !min_v.is_finite() || !max_v.is_finite() {
        return (0.0, 1.0);
    }
    let span = max_v - min_v;
    if span < 1e-9 {
        return (min_v - 1.0, max_v + 1.0);
    }
    (min_v - span * 0.05, max_v + span * 0.05)
}

fn draw_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> ReportError {
    ReportError::Render(e.to_string())
}
