//! Background matte removal for sprites with solid-color backdrops
//!
//! Pure pixel transform over an RGBA buffer; knows nothing about entities.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Backdrop color to clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatteColor {
    White,
    Black,
    /// Black if the top-left pixel is dark, white otherwise
    Auto,
    Rgb(u8, u8, u8),
}

/// Which pixels are cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatteMethod {
    /// Only the region connected to the four corners
    FloodFill,
    /// Every matching pixel, connected or not
    GlobalScan,
}

/// A complete matte recipe for one sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MattePreset {
    pub color: MatteColor,
    /// Per-channel distance that still counts as backdrop (exclusive)
    pub tolerance: u8,
    pub method: MatteMethod,
}

impl MattePreset {
    pub const fn flood(color: MatteColor) -> Self {
        Self {
            color,
            tolerance: 50,
            method: MatteMethod::FloodFill,
        }
    }

    pub const fn scan(color: MatteColor, tolerance: u8) -> Self {
        Self {
            color,
            tolerance,
            method: MatteMethod::GlobalScan,
        }
    }

    pub fn apply(&self, pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, MatteError> {
        remove_background(pixels, width, height, self.color, self.tolerance, self.method)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatteError {
    #[error("pixel buffer is {actual} bytes, expected {expected} for a {width}x{height} RGBA image")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Brightness below which `Auto` treats the corner as black
const AUTO_DARK_LIMIT: u8 = 50;

/// Make backdrop pixels transparent, returning a new RGBA buffer
pub fn remove_background(
    pixels: &[u8],
    width: u32,
    height: u32,
    color: MatteColor,
    tolerance: u8,
    method: MatteMethod,
) -> Result<Vec<u8>, MatteError> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(MatteError::BufferSize {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }

    let mut out = pixels.to_vec();
    if expected == 0 {
        return Ok(out);
    }

    let backdrop = resolve_color(color, pixels);
    let is_backdrop = |i: usize| {
        let px = &pixels[i * 4..i * 4 + 3];
        px.iter()
            .zip(backdrop.iter())
            .all(|(&c, &b)| (c as i16 - b as i16).abs() < tolerance as i16)
    };

    match method {
        MatteMethod::GlobalScan => {
            for i in 0..(width as usize * height as usize) {
                if is_backdrop(i) {
                    out[i * 4 + 3] = 0;
                }
            }
        }
        MatteMethod::FloodFill => {
            let (w, h) = (width as usize, height as usize);
            let mut visited = vec![false; w * h];
            let mut stack: Vec<(usize, usize)> = Vec::new();

            let corners = [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)];
            for (x, y) in corners {
                let idx = y * w + x;
                if !visited[idx] && is_backdrop(idx) {
                    visited[idx] = true;
                    stack.push((x, y));
                }
            }

            while let Some((x, y)) = stack.pop() {
                out[(y * w + x) * 4 + 3] = 0;

                let neighbors = [
                    (x + 1 < w).then(|| (x + 1, y)),
                    x.checked_sub(1).map(|nx| (nx, y)),
                    (y + 1 < h).then(|| (x, y + 1)),
                    y.checked_sub(1).map(|ny| (x, ny)),
                ];
                for (nx, ny) in neighbors.into_iter().flatten() {
                    let idx = ny * w + nx;
                    if !visited[idx] && is_backdrop(idx) {
                        visited[idx] = true;
                        stack.push((nx, ny));
                    }
                }
            }
        }
    }

    Ok(out)
}

fn resolve_color(color: MatteColor, pixels: &[u8]) -> [u8; 3] {
    match color {
        MatteColor::White => [255, 255, 255],
        MatteColor::Black => [0, 0, 0],
        MatteColor::Rgb(r, g, b) => [r, g, b],
        MatteColor::Auto => {
            if pixels[..3].iter().all(|&c| c < AUTO_DARK_LIMIT) {
                [0, 0, 0]
            } else {
                [255, 255, 255]
            }
        }
    }
}
