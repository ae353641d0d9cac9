//! Munin plugin protocol output for the `load` series.

use std::io::{self, Write};

use crate::units::format_watts;

/// Name of the single data series on the graph.
pub const FIELD: &str = "load";

const GRAPH_LINES: [&str; 5] = [
    "graph_title UPS Load",
    "graph_args --base 1000 -l 0",
    "graph_vlabel Watts",
    "graph_scale no",
    "graph_category sensors",
];

/// Graph declaration printed for `config`.
pub fn write_config<W: Write>(out: &mut W) -> io::Result<()> {
    for line in GRAPH_LINES {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{FIELD}.label {FIELD}")?;
    writeln!(out, "{FIELD}.info UPS load in Watts.")
}

/// `load.value` line for a reading in watts, without the newline.
pub fn value_line(watts: f64) -> String {
    format!("{FIELD}.value {}", format_watts(watts))
}

/// Print the fetched reading as one protocol line.
pub fn write_value<W: Write>(out: &mut W, watts: f64) -> io::Result<()> {
    writeln!(out, "{}", value_line(watts))
}
