// lcstats/src/ui/output_format.rs
//! Status messages written to stderr, colored when the stream is a terminal.

use owo_colors::{AnsiColors, OwoColorize};
use std::io::{self, Write};

fn print_message<W: Write>(
    writer: &mut W,
    prefix: &str,
    msg: &str,
    color: AnsiColors,
    supports_color: bool,
) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", prefix.color(color).bold(), msg)
    } else {
        writeln!(writer, "{} {}", prefix, msg)
    }
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    print_message(writer, "warning:", msg, AnsiColors::Yellow, supports_color)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    print_message(writer, "error:", msg, AnsiColors::Red, supports_color)
}
