use crate::error::Result;
use crate::tour::Tour;
use image::{GenericImageView, RgbaImage};
use std::io::Write;

/// Bounds in `(x0,y0)-(x1,y1)` form, exclusive on the far corner.
pub fn bounds(img: &RgbaImage) -> String {
    let (width, height) = img.dimensions();
    format!("(0,0)-({width},{height})")
}

pub fn images(t: &mut Tour<'_>) -> Result<()> {
    let img = RgbaImage::new(100, 100);
    writeln!(t.out, "image bounds = {}", bounds(&img))?;
    let pixel = img.get_pixel(0, 0);
    writeln!(t.out, "color at (0,0) = {:?}", pixel.0)?;
    writeln!(t.out, "in bounds (99,99)? {}", img.in_bounds(99, 99))?;
    Ok(())
}
