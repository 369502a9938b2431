//! Tool: swatch — Render a solid-colour PNG.

use std::io::Cursor;

use anyhow::Context;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use toolhost::{Arguments, ParamDescriptor, ToolCallResult, ToolError, ToolResult, ToolSpec};

const DEFAULT_SIZE: i64 = 64;
const MAX_SIZE: i64 = 512;

pub fn spec() -> ToolSpec {
    ToolSpec::new("swatch", "Render a square PNG filled with one colour")
        .param(ParamDescriptor::new("color").describe("Hex colour, e.g. #ff8800"))
        .param(ParamDescriptor::of::<Option<u32>>("size").describe("Edge length in pixels (1-512)"))
}

pub fn execute(args: Arguments) -> ToolResult<ToolCallResult> {
    let color = args.require_str("color")?;
    let rgb = parse_hex(color)
        .ok_or_else(|| ToolError::invalid_params(format!("'{color}' is not a hex colour")))?;

    let size = args.i64("size").unwrap_or(DEFAULT_SIZE);
    if !(1..=MAX_SIZE).contains(&size) {
        return Err(ToolError::invalid_params(format!(
            "'size' must be between 1 and {MAX_SIZE}"
        )));
    }

    let png = render_png(rgb, size as u32)?;
    Ok(ToolCallResult::text(format!("{size}x{size} swatch of {color}")).with_image_png(&png))
}

fn render_png(rgb: [u8; 3], size: u32) -> anyhow::Result<Vec<u8>> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(size, size, Rgb(rgb)));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .context("failed to encode swatch as PNG")?;
    Ok(buf)
}

fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#ff8800"), Some([255, 136, 0]));
        assert_eq!(parse_hex("00FF00"), Some([0, 255, 0]));
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#gg0000"), None);
    }

    #[test]
    fn test_render_png_decodes() {
        let png = render_png([1, 2, 3], 8).unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!((img.width(), img.height()), (8, 8));
    }
}
