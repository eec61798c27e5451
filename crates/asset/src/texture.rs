//! Decoded images ready for GPU upload.

use std::path::Path;

use anyhow::Context;

/// Texture data in CPU-friendly format before GPU upload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Supported texture formats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextureFormat {
    /// 8-bit RGBA with sRGB-encoded color channels.
    Rgba8Srgb,
}

impl TextureData {
    /// Wrap raw sRGB RGBA8 pixels. Fails if the buffer size does not match.
    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> anyhow::Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected || width == 0 || height == 0 {
            anyhow::bail!(
                "RGBA8 texture {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            );
        }
        Ok(Self {
            data,
            width,
            height,
            format: TextureFormat::Rgba8Srgb,
        })
    }

    /// Decode a PNG or JPEG file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::info!("Loading texture from {:?}", path);

        let img = image::open(path).with_context(|| format!("Failed to open image {:?}", path))?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let data = rgba.into_raw();

        log::info!("Loaded texture {}x{} with {} bytes", width, height, data.len());

        Self::new_rgba8(width, height, data)
    }

    /// A 1x1 texture of the given sRGB color.
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            data: rgba.to_vec(),
            width: 1,
            height: 1,
            format: TextureFormat::Rgba8Srgb,
        }
    }

    /// Get the number of bytes per pixel for the format.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self.format {
            TextureFormat::Rgba8Srgb => 4,
        }
    }

    /// Check if the texture data is valid.
    pub fn is_valid(&self) -> bool {
        let expected_size = (self.width * self.height * self.bytes_per_pixel()) as usize;
        self.data.len() == expected_size && self.width > 0 && self.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_mismatch_is_rejected() {
        assert!(TextureData::new_rgba8(2, 2, vec![0; 16]).is_ok());
        assert!(TextureData::new_rgba8(2, 2, vec![0; 15]).is_err());
        assert!(TextureData::new_rgba8(0, 0, Vec::new()).is_err());
    }

    #[test]
    fn solid_is_one_pixel() {
        let t = TextureData::solid([255, 255, 255, 255]);
        assert!(t.is_valid());
        assert_eq!(t.bytes_per_pixel(), 4);
    }

    #[test]
    fn decodes_png_from_disk() {
        let path = std::env::temp_dir().join(format!("catscene-tex-{}.png", std::process::id()));
        let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();

        let tex = TextureData::load(&path).unwrap();
        assert_eq!((tex.width, tex.height), (4, 2));
        assert_eq!(&tex.data[..4], &[10, 20, 30, 255]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_image_names_the_path() {
        let err = TextureData::load("resources/images/nope.jpg").unwrap_err();
        assert!(format!("{err:#}").contains("nope.jpg"));
    }
}
