//! SVG charts of the fleet: efficiency per vehicle (line) and ticket sales
//! per vehicle (bars). Both y-axes start at zero.

use std::path::{Path, PathBuf};

use fleet_domain::model::Fleet;
use fleet_types::{Error, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{debug, info};

pub const EFFICIENCY_CHART_FILE: &str = "efficiency_chart.svg";
pub const TICKET_SALES_CHART_FILE: &str = "ticket_sales_chart.svg";

const CHART_SIZE: (u32, u32) = (960, 540);
const EFFICIENCY_COLOR: RGBColor = RGBColor(75, 192, 192);
const SALES_COLOR: RGBColor = RGBColor(255, 99, 132);

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Where the two rendered charts were written
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPaths {
    pub efficiency: PathBuf,
    pub ticket_sales: PathBuf,
}

/// (vehicle no, efficiency) points for the line series
pub fn efficiency_series(fleet: &Fleet) -> Vec<(String, f64)> {
    fleet
        .iter()
        .map(|v| (v.vehicle_no.clone(), v.efficiency.value()))
        .collect()
}

/// (vehicle no, ticket sales) points for the bar series
pub fn ticket_sales_series(fleet: &Fleet) -> Vec<(String, f64)> {
    fleet
        .iter()
        .map(|v| (v.vehicle_no.clone(), v.ticket_sales))
        .collect()
}

pub fn render_charts(fleet: &Fleet, output_dir: &Path) -> Result<ChartPaths> {
    std::fs::create_dir_all(output_dir)?;
    let paths = ChartPaths {
        efficiency: output_dir.join(EFFICIENCY_CHART_FILE),
        ticket_sales: output_dir.join(TICKET_SALES_CHART_FILE),
    };

    {
        let root = SVGBackend::new(&paths.efficiency, CHART_SIZE).into_drawing_area();
        draw_efficiency_chart(&root, &efficiency_series(fleet))
            .map_err(|e| Error::Chart(e.to_string()))?;
    }
    {
        let root = SVGBackend::new(&paths.ticket_sales, CHART_SIZE).into_drawing_area();
        draw_ticket_sales_chart(&root, &ticket_sales_series(fleet))
            .map_err(|e| Error::Chart(e.to_string()))?;
    }

    info!(dir = %output_dir.display(), "rendered charts");
    Ok(paths)
}

/// Upper y bound from the finite values; never below 1
fn y_upper(points: &[(String, f64)]) -> f64 {
    let max = points
        .iter()
        .map(|(_, v)| *v)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max * 1.1
    }
}

fn label_at(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

fn draw_efficiency_chart<DB>(root: &DrawingArea<DB, Shift>, points: &[(String, f64)]) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let labels: Vec<String> = points.iter().map(|(l, _)| l.clone()).collect();
    let x_max = points.len().max(1) as f64 - 0.5;

    let mut chart = ChartBuilder::on(root)
        .caption("Fuel Efficiency", ("sans-serif", 24))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(-0.5..x_max, 0.0..y_upper(points))?;

    let x_formatter = |x: &f64| label_at(&labels, *x);
    chart
        .configure_mesh()
        .x_labels(points.len().max(1))
        .x_label_formatter(&x_formatter)
        .y_desc("km/l")
        .draw()?;

    let finite: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .filter(|(_, (_, v))| v.is_finite())
        .map(|(i, (_, v))| (i as f64, *v))
        .collect();
    debug!(points = finite.len(), skipped = points.len() - finite.len(), "efficiency series");

    chart
        .draw_series(LineSeries::new(finite.iter().copied(), &EFFICIENCY_COLOR))?
        .label("Fuel Efficiency (km/l)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], EFFICIENCY_COLOR));
    chart.draw_series(
        finite
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, EFFICIENCY_COLOR.filled())),
    )?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_ticket_sales_chart<DB>(root: &DrawingArea<DB, Shift>, points: &[(String, f64)]) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let labels: Vec<String> = points.iter().map(|(l, _)| l.clone()).collect();
    let x_max = points.len().max(1) as f64 - 0.5;

    let mut chart = ChartBuilder::on(root)
        .caption("Ticket Sales", ("sans-serif", 24))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(-0.5..x_max, 0.0..y_upper(points))?;

    let x_formatter = |x: &f64| label_at(&labels, *x);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(points.len().max(1))
        .x_label_formatter(&x_formatter)
        .y_desc("$")
        .draw()?;

    let bars = points
        .iter()
        .enumerate()
        .filter(|(_, (_, v))| v.is_finite())
        .map(|(i, (_, v))| (i as f64, *v))
        .collect::<Vec<_>>();

    chart
        .draw_series(bars.iter().map(|&(x, v)| {
            Rectangle::new([(x - 0.35, 0.0), (x + 0.35, v)], SALES_COLOR.mix(0.2).filled())
        }))?
        .label("Ticket Sales ($)")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], SALES_COLOR.mix(0.2).filled()));
    chart.draw_series(
        bars.iter()
            .map(|&(x, v)| Rectangle::new([(x - 0.35, 0.0), (x + 0.35, v)], SALES_COLOR.stroke_width(1))),
    )?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
