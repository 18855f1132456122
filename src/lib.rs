use crate::chart::{Chart, Series};
use crate::error::{Result, TimingError};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
pub mod chart;
pub mod error;
pub mod timing_plot;
pub mod utils;

// constants
pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");
pub const DEFAULT_CSVIN: &str = "docs/inc/timing.csv";
pub const DEFAULT_SVGOUT: &str = "result.svg";
pub const DEFAULT_BOUNCES: [i64; 4] = [1, 2, 4, 8];
pub const X_LABEL: &str = "дальность видимости";
pub const Y_LABEL: &str = "время, мкс";

/// Legend label for the series of the given bounce count.
pub fn bounce_label(bounce_count: i64) -> String {
    format!("число отскоков {}", bounce_count)
}

/// One timing measurement: view distance, number of ray bounces
/// and the measured time in microseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub distance: i64,
    pub bounce_count: i64,
    pub time_micros: f64,
}

impl Record {
    /// Parse a `distance,bounce_count,time_micros` line.
    /// `line_no` is only used for the error.
    pub fn parse(line: &str, line_no: usize) -> Result<Record> {
        let format_err = |reason: String| TimingError::Format {
            line: line_no,
            content: line.to_string(),
            reason,
        };
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(format_err(format!(
                "expected 3 comma separated fields, found {}",
                fields.len()
            )));
        }
        let distance = fields[0]
            .parse::<i64>()
            .map_err(|e| format_err(format!("invalid distance {:?}: {}", fields[0], e)))?;
        let bounce_count = fields[1]
            .parse::<i64>()
            .map_err(|e| format_err(format!("invalid bounce count {:?}: {}", fields[1], e)))?;
        let time_micros = fields[2]
            .parse::<f64>()
            .map_err(|e| format_err(format!("invalid time {:?}: {}", fields[2], e)))?;
        Ok(Record {
            distance,
            bounce_count,
            time_micros,
        })
    }
}

/// All the records of one input file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Read the whole file and parse it.
    /// The file is closed before parsing starts, the first bad line aborts the load.
    pub fn from_csv<P>(fin: P) -> Result<Dataset>
    where
        P: AsRef<Path>,
    {
        let io_err = |source: std::io::Error| TimingError::Io {
            path: fin.as_ref().to_path_buf(),
            source,
        };
        let file = File::open(fin.as_ref()).map_err(io_err)?;
        let raw_lines = BufReader::new(file)
            .split(b'\n')
            .collect::<std::io::Result<Vec<Vec<u8>>>>()
            .map_err(io_err)?;
        debug!("read {} lines from {:?}", raw_lines.len(), fin.as_ref());
        let lines = raw_lines
            .into_iter()
            .enumerate()
            .map(|(i, l)| {
                String::from_utf8(l).map_err(|e| TimingError::Format {
                    line: i + 1,
                    content: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                    reason: format!("not UTF-8 text: {}", e.utf8_error()),
                })
            })
            .collect::<Result<Vec<String>>>()?;
        Dataset::parse_lines(lines.iter().map(String::as_str))
    }

    pub fn parse_str(text: &str) -> Result<Dataset> {
        Dataset::parse_lines(text.lines())
    }

    fn parse_lines<'a, I>(lines: I) -> Result<Dataset>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut records = Vec::new();
        for (i, l) in lines.enumerate() {
            let l = l.trim();
            if l.is_empty() {
                continue;
            }
            records.push(Record::parse(l, i + 1)?);
        }
        Ok(Dataset { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct bounce counts present in the data.
    pub fn bounce_counts(&self) -> Vec<i64> {
        let mut counts: Vec<i64> = self.records.iter().map(|r| r.bounce_count).collect();
        counts.sort_unstable();
        counts.dedup();
        counts
    }

    /// Distances and times of the records with the given bounce count, in file order.
    pub fn select_series<S: Into<String>>(&self, bounce_count: i64, label: S) -> Series {
        let (xs, ys) = self
            .records
            .iter()
            .filter(|r| r.bounce_count == bounce_count)
            .map(|r| (r.distance, r.time_micros))
            .unzip();
        Series {
            label: label.into(),
            xs,
            ys,
        }
    }
}

/// Select the series of one bounce count and add it to the chart.
/// Returns the number of points, an unknown bounce count just adds an empty series.
pub fn plot_slice<S: Into<String>>(
    chart: &mut Chart,
    dataset: &Dataset,
    bounce_count: i64,
    label: S,
) -> usize {
    let series = dataset.select_series(bounce_count, label);
    let n = series.len();
    if n == 0 {
        warn!("no measurements with {} bounces", bounce_count);
    } else {
        info!("plot {} measurements with {} bounces", n, bounce_count);
    }
    chart.add_series(series);
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::LegendPosition;

    const SCENARIO: &str = "1,1,2.5\n2,1,3.5\n1,2,9.0\n";

    fn reference_chart(dataset: &Dataset) -> Chart {
        let mut chart = Chart::new();
        for b in DEFAULT_BOUNCES {
            plot_slice(&mut chart, dataset, b, bounce_label(b));
        }
        chart.set_y_label(Y_LABEL);
        chart.set_x_label(X_LABEL);
        chart.set_legend(LegendPosition::UpperLeft);
        chart
    }

    #[test]
    fn scenario_series() {
        let ds = Dataset::parse_str(SCENARIO).unwrap();
        let s1 = ds.select_series(1, "one");
        assert_eq!(s1.xs, vec![1, 2]);
        assert_eq!(s1.ys, vec![2.5, 3.5]);
        let s2 = ds.select_series(2, "two");
        assert_eq!(s2.xs, vec![1]);
        assert_eq!(s2.ys, vec![9.0]);
        assert_eq!(s2.label, "two");
    }

    #[test]
    fn two_fields_is_a_format_error() {
        let res = Dataset::parse_str("1,2\n");
        match res {
            Err(TimingError::Format { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected a format error, got {:?}", other),
        }
    }

    #[test]
    fn bad_numbers_are_format_errors() {
        for text in ["1,1,2.5\n1.5,1,2.0\n", "1,x,2.0\n", "1,1,fast\n", "1,1,2.0,3\n"] {
            assert!(matches!(
                Dataset::parse_str(text),
                Err(TimingError::Format { .. })
            ));
        }
        match Dataset::parse_str("1,1,2.5\n\n1,x,2.0\n") {
            Err(TimingError::Format { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected a format error, got {:?}", other),
        }
    }

    #[test]
    fn fields_are_trimmed() {
        let ds = Dataset::parse_str(" 3 , 4 ,1.25\r\n").unwrap();
        assert_eq!(
            ds.records(),
            &[Record {
                distance: 3,
                bounce_count: 4,
                time_micros: 1.25
            }]
        );
    }

    #[test]
    fn records_match_non_empty_lines() {
        let text = std::fs::read_to_string("./test/timing.csv").unwrap();
        let non_empty = text.lines().filter(|l| !l.trim().is_empty()).count();
        let ds = Dataset::from_csv("./test/timing.csv").unwrap();
        assert_eq!(ds.len(), non_empty);
        assert_eq!(ds.bounce_counts(), vec![1, 2, 4, 8, 16]);
    }

    #[test]
    fn bounce_counts_partition_the_dataset() {
        let ds = Dataset::from_csv("./test/timing.csv").unwrap();
        let mut rebuilt: Vec<(usize, Record)> = Vec::new();
        for b in ds.bounce_counts() {
            let s = ds.select_series(b, bounce_label(b));
            // recover each point's position in the file to check the order
            let mut from = 0;
            for (x, y) in s.xs.iter().zip(s.ys.iter()) {
                let pos = ds.records()[from..]
                    .iter()
                    .position(|r| r.bounce_count == b && r.distance == *x && r.time_micros == *y)
                    .unwrap()
                    + from;
                rebuilt.push((pos, ds.records()[pos]));
                from = pos + 1;
            }
        }
        assert_eq!(rebuilt.len(), ds.len());
        rebuilt.sort_by_key(|(pos, _)| *pos);
        let rebuilt: Vec<Record> = rebuilt.into_iter().map(|(_, r)| r).collect();
        assert_eq!(rebuilt, ds.records());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let res = Dataset::from_csv("./test/no_such_file.csv");
        assert!(matches!(res, Err(TimingError::Io { .. })));
    }

    #[test]
    fn non_utf8_input_is_a_format_error() {
        let fin = "./test/not_utf8.csv";
        std::fs::write(fin, b"1,1,2.5\n2,1,\xff3.5\n").unwrap();
        match Dataset::from_csv(fin) {
            Err(TimingError::Format { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("UTF-8"));
            }
            other => panic!("expected a format error, got {:?}", other),
        }
    }

    #[test]
    fn unknown_bounce_count_adds_empty_series() {
        let ds = Dataset::parse_str(SCENARIO).unwrap();
        let mut chart = Chart::new();
        assert_eq!(plot_slice(&mut chart, &ds, 8, bounce_label(8)), 0);
        assert_eq!(chart.series().len(), 1);
        assert!(chart.series()[0].is_empty());
        assert!(chart.render_svg().is_ok());
    }

    #[test]
    fn empty_input_still_exports() {
        let ds = Dataset::parse_str("").unwrap();
        assert!(ds.is_empty());
        let chart = reference_chart(&ds);
        assert_eq!(chart.points(), 0);
        let fout = "./test/empty_input.svg";
        chart.export(fout).unwrap();
        let svg = std::fs::read_to_string(fout).unwrap();
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn reference_run_is_idempotent() {
        let ds = Dataset::from_csv("./test/timing.csv").unwrap();
        let chart = reference_chart(&ds);
        // 16 bounces are in the file but not requested
        assert_eq!(chart.series().len(), 4);
        assert_eq!(chart.points(), ds.len() - 3);
        let first = "./test/timing_first.svg";
        let second = "./test/timing_second.svg";
        chart.export(first).unwrap();
        reference_chart(&Dataset::from_csv("./test/timing.csv").unwrap())
            .export(second)
            .unwrap();
        assert_eq!(
            std::fs::read(first).unwrap(),
            std::fs::read(second).unwrap()
        );
    }
}
