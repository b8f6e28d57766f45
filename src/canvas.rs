use std::io::{ BufWriter, Write };
use std::fs::File;
use std::path::Path;

use crate::color::Color;
use crate::error::{ RayCasterError, Result };

// Plain PPM readers may choke on longer lines.
const PPM_LINE_WIDTH: usize = 70;
const PPM_MAX_VALUE: u8 = 255;

/// A grid of pixels, the output of a render.
///
/// Pixels are stored row-major in a single buffer, initially black. Colors
/// are kept unclamped; clamping happens only when the canvas is serialized.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Writes a color at column `x`, row `y` (both zero-indexed).
    ///
    /// # Examples
    ///
    /// ```
    /// # use ray_caster::color::Color;
    /// # use ray_caster::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    ///
    /// canvas.write_pixel(4, 2, purple).unwrap();
    /// assert_eq!(canvas.read_pixel(4, 2), Some(purple));
    /// assert!(canvas.write_pixel(8, 0, purple).is_err());
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, color: Color) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(RayCasterError::PixelOutOfBounds {
                x, y, width: self.width, height: self.height,
            });
        }

        self.pixels[(y * self.width) + x] = color;
        Ok(())
    }

    /// Reads the color at column `x`, row `y`, or `None` if out of bounds.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// The raw row-major pixel buffer, for filling whole rows at once.
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Serializes the canvas as a plain (P3) PPM image.
    ///
    /// Channels are clamped to `[0, 1]`, scaled to `0..=255` and rounded.
    /// Each pixel row starts a new line, and no line runs past 70
    /// characters. The output ends with a newline.
    pub fn to_ppm(&self) -> String {
        let mut out = format!("P3\n{} {}\n{}\n", self.width, self.height, PPM_MAX_VALUE);

        for row in self.pixels.chunks(self.width.max(1)) {
            let mut line = String::new();

            for pixel in row {
                for channel in [pixel.red, pixel.green, pixel.blue].iter() {
                    let value = scale_channel(*channel).to_string();

                    if !line.is_empty() && line.len() + 1 + value.len() > PPM_LINE_WIDTH {
                        out.push_str(&line);
                        out.push('\n');
                        line.clear();
                    }

                    if !line.is_empty() {
                        line.push(' ');
                    }
                    line.push_str(&value);
                }
            }

            out.push_str(&line);
            out.push('\n');
        }

        out
    }

    pub fn write_ppm<W: Write>(&self, mut out: W) -> Result<()> {
        out.write_all(self.to_ppm().as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Saves the canvas as a PPM file, replacing anything already at `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_ppm(BufWriter::new(file))
    }
}

fn scale_channel(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * PPM_MAX_VALUE as f64).round() as u8
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.width(), 10);
    assert_eq!(c.height(), 20);
    for y in 0..20 {
        for x in 0..10 {
            assert_eq!(c.read_pixel(x, y), Some(Color::black()));
        }
    }
}

#[test]
fn write_out_of_bounds() {
    let mut c = Canvas::new(10, 20);

    assert!(matches!(
        c.write_pixel(3, 20, Color::white()),
        Err(RayCasterError::PixelOutOfBounds { x: 3, y: 20, width: 10, height: 20 })
    ));
    assert_eq!(c.read_pixel(10, 0), None);
    assert_eq!(c, Canvas::new(10, 20));
}

#[test]
fn ppm_header() {
    let ppm = Canvas::new(5, 3).to_ppm();
    let lines: Vec<&str> = ppm.lines().take(3).collect();

    assert_eq!(lines, vec!["P3", "5 3", "255"]);
}

#[test]
fn ppm_pixel_data() {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, Color::rgb(1.5, 0.0, 0.0)).unwrap();
    c.write_pixel(2, 1, Color::rgb(0.0, 0.5, 0.0)).unwrap();
    c.write_pixel(4, 2, Color::rgb(-0.5, 0.0, 1.0)).unwrap();

    let ppm = c.to_ppm();
    let lines: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(lines, vec![
        "255 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 128 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 0 0 0 0 0 0 0 255",
    ]);
}

#[test]
fn ppm_wraps_long_lines() {
    let mut c = Canvas::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            c.write_pixel(x, y, Color::rgb(1.0, 0.8, 0.6)).unwrap();
        }
    }

    let ppm = c.to_ppm();
    let lines: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(lines, vec![
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
    ]);
    assert!(ppm.lines().all(|l| l.len() <= PPM_LINE_WIDTH));
}

#[test]
fn ppm_ends_with_newline() {
    assert!(Canvas::new(5, 3).to_ppm().ends_with('\n'));
}

#[test]
fn write_ppm_to_buffer() {
    let mut c = Canvas::new(1, 1);
    c.write_pixel(0, 0, Color::rgb(0.2, 0.4, 0.6)).unwrap();

    let mut buf = Vec::new();
    c.write_ppm(&mut buf).unwrap();

    assert_eq!(String::from_utf8(buf).unwrap(), "P3\n1 1\n255\n51 102 153\n");
}
