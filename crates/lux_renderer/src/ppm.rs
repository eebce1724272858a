//! Plain-text PPM (`P3`) output.

use crate::error::RenderResult;
use crate::renderer::{color_to_rgb, ImageBuffer};
use std::io::Write;

/// Write `image` as a `P3` PPM: header, then one `r g b` line per pixel,
/// row-major from the top row.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut out: W) -> RenderResult<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb(*color);
        writeln!(out, "{} {} {}", r, g, b)?;
    }

    out.flush()?;
    Ok(())
}
