use crate::error::{Result, TimingError};
use crate::utils::*;
use log::debug;
use plotters::prelude::*;
use std::fs;
use std::path::Path;

/// Line colors, cycled in registration order.
const SERIES_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// One plotted line: distances on x, times on y.
/// `xs` and `ys` always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub(crate) label: String,
    pub(crate) xs: Vec<i64>,
    pub(crate) ys: Vec<f64>,
}

impl Series {
    pub fn new<S: Into<String>>(label: S, xs: Vec<i64>, ys: Vec<f64>) -> Result<Series> {
        let label = label.into();
        if xs.len() != ys.len() {
            return Err(TimingError::SeriesLength {
                label,
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        Ok(Series { label, xs, ys })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn xs(&self) -> &[i64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Points in chart coordinates, NaN times are left out
    /// and the others clamped into the largest drawable axis.
    fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs
            .iter()
            .zip(self.ys.iter())
            .filter(|(_, y)| !y.is_nan())
            .map(|(x, y)| (*x as f64, y.clamp(-AXIS_LIMIT, AXIS_LIMIT)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl LegendPosition {
    fn to_plotters(self) -> SeriesLabelPosition {
        match self {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

/// Accumulates the series and the axis/legend settings
/// until the chart is rendered once at the end of the run.
#[derive(Debug, Clone)]
pub struct Chart {
    size: (u32, u32),
    series: Vec<Series>,
    x_label: String,
    y_label: String,
    legend: Option<LegendPosition>,
}

impl Default for Chart {
    fn default() -> Self {
        Chart::new()
    }
}

impl Chart {
    pub fn new() -> Chart {
        Chart::with_size(1024, 768)
    }

    pub fn with_size(width: u32, height: u32) -> Chart {
        Chart {
            size: (width, height),
            series: Vec::new(),
            x_label: String::new(),
            y_label: String::new(),
            legend: None,
        }
    }

    pub fn add_series(&mut self, series: Series) {
        debug!(
            "register series {:?} with {} points",
            series.label,
            series.len()
        );
        self.series.push(series);
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn set_x_label<S: Into<String>>(&mut self, label: S) {
        self.x_label = label.into();
    }

    pub fn set_y_label<S: Into<String>>(&mut self, label: S) {
        self.y_label = label.into();
    }

    pub fn set_legend(&mut self, position: LegendPosition) {
        self.legend = Some(position);
    }

    /// Total number of points over all the registered series.
    pub fn points(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }

    /// Autoscale both axes on the registered points only.
    fn ranges(&self) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
        let xs = min_and_max(self.series.iter().flat_map(|s| s.xs.iter()));
        let ys = min_and_max(
            self.series
                .iter()
                .flat_map(|s| s.ys.iter())
                .filter(|y| !y.is_nan()),
        );
        (x_range(xs), y_range(ys))
    }

    /// Render the chart to an svg document in memory.
    pub fn render_svg(&self) -> Result<String> {
        let (xrange, yrange) = self.ranges();
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;
            let mut chart = ChartBuilder::on(&root)
                .margin(30)
                .x_label_area_size(50)
                .y_label_area_size(70)
                .build_cartesian_2d(xrange, yrange)
                .map_err(render_err)?;
            chart
                .configure_mesh()
                .light_line_style(&TRANSPARENT)
                .bold_line_style(RGBColor(100, 100, 100).mix(0.3))
                .label_style(("sans-serif", 16))
                .x_desc(self.x_label.as_str())
                .y_desc(self.y_label.as_str())
                .x_label_formatter(&|x: &f64| format!("{:.0}", x))
                .y_label_formatter(&|y: &f64| format!("{:.1}", y))
                .draw()
                .map_err(render_err)?;
            for (i, s) in self.series.iter().enumerate() {
                let color = SERIES_COLORS[i % SERIES_COLORS.len()];
                chart
                    .draw_series(LineSeries::new(s.points(), color.stroke_width(2)))
                    .map_err(render_err)?
                    .label(s.label.clone())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }
            if let Some(position) = self.legend {
                chart
                    .configure_series_labels()
                    .position(position.to_plotters())
                    .background_style(&WHITE.mix(0.8))
                    .border_style(&BLACK.mix(0.3))
                    .label_font(("sans-serif", 16))
                    .draw()
                    .map_err(render_err)?;
            }
            root.present().map_err(render_err)?;
        }
        Ok(svg)
    }

    /// Render and write the svg file, overwriting it if it exists.
    pub fn export<P>(&self, fout: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let svg = self.render_svg()?;
        fs::write(fout.as_ref(), svg).map_err(|source| TimingError::Export {
            path: fout.as_ref().to_path_buf(),
            source,
        })
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> TimingError {
    TimingError::Render(e.to_string())
}
