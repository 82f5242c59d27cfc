//! Welcome banner: "FOLIO" in figlet letters, shaded from ink to amber row by row.

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{self, Write, stdout};
use tracing::warn;

const INK: (u8, u8, u8) = (0x1d, 0x35, 0x57);
const AMBER: (u8, u8, u8) = (0xf4, 0xa2, 0x61);

/// Shade of row `row` out of `rows`: the first row is ink, the last amber.
fn row_color(row: usize, rows: usize) -> Color {
    let last = rows.saturating_sub(1);
    let span = last.max(1) as i32;
    let step = row.min(last) as i32;
    let mix = |from: u8, to: u8| {
        let (from, to) = (i32::from(from), i32::from(to));
        (from + (to - from) * step / span) as u8
    };
    Color::Rgb {
        r: mix(INK.0, AMBER.0),
        g: mix(INK.1, AMBER.1),
        b: mix(INK.2, AMBER.2),
    }
}

/// Figlet's standard font; plain text if the font fails.
fn banner_art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("FOLIO").map(|figure| figure.to_string()))
        .unwrap_or_else(|| "FOLIO".to_string())
}

fn write_welcome(out: &mut impl Write, source: &str) -> io::Result<()> {
    let art = banner_art();
    let rows = art.lines().count();
    for (row, line) in art.lines().enumerate() {
        queue!(
            out,
            SetForegroundColor(row_color(row, rows)),
            Print(line),
            ResetColor,
            Print("\r\n")
        )?;
    }
    queue!(
        out,
        SetForegroundColor(row_color(rows, rows)),
        Print(format!(
            "v{}  ·  content: {}\r\n",
            env!("CARGO_PKG_VERSION"),
            source
        )),
        ResetColor
    )?;
    out.flush()
}

/// Prints the banner, the version and where content is read from.
pub fn print_welcome(source: &str) {
    if let Err(e) = write_welcome(&mut stdout(), source) {
        warn!(error = %e, "could not print welcome banner");
    }
}
