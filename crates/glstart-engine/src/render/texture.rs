use std::path::Path;

use anyhow::{Context, Result};
use glow::{HasContext, PixelUnpackData};
use image::DynamicImage;

/// Texture units every GL 3.3 implementation provides to the fragment stage.
pub const MIN_TEXTURE_UNITS: u32 = 16;

/// Texture coordinate wrapping along one axis (s = x, t = y).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WrapMode {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
}

impl WrapMode {
    pub fn gl_enum(self) -> u32 {
        match self {
            WrapMode::Repeat => glow::REPEAT,
            WrapMode::MirroredRepeat => glow::MIRRORED_REPEAT,
            WrapMode::ClampToEdge => glow::CLAMP_TO_EDGE,
        }
    }
}

/// Texel filtering.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FilterMode {
    /// Pixelated look.
    Nearest,
    /// Bilinear interpolation between texels.
    Linear,
}

impl FilterMode {
    pub fn gl_enum(self) -> u32 {
        match self {
            FilterMode::Nearest => glow::NEAREST,
            FilterMode::Linear => glow::LINEAR,
        }
    }
}

/// Sampling state applied when a texture is created.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TextureParams {
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub generate_mipmaps: bool,
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            wrap_s: WrapMode::Repeat,
            wrap_t: WrapMode::Repeat,
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Linear,
            generate_mipmaps: true,
        }
    }
}

/// Layout of the 8-bit texel data handed to `glTexImage2D`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PixelFormat {
    Red,
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            1 => Some(PixelFormat::Red),
            3 => Some(PixelFormat::Rgb),
            4 => Some(PixelFormat::Rgba),
            _ => None,
        }
    }

    pub fn gl_enum(self) -> u32 {
        match self {
            PixelFormat::Red => glow::RED,
            PixelFormat::Rgb => glow::RGB,
            PixelFormat::Rgba => glow::RGBA,
        }
    }
}

/// Decoded image ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Converts a decoded image to 8-bit texels.
    ///
    /// Gray, RGB and RGBA images keep their channel count; everything else
    /// (gray + alpha, 16-bit, float) is expanded to RGBA8.
    ///
    /// GL expects the first row at the bottom of the image, image files store
    /// it at the top; `flip_vertically` reconciles the two.
    pub fn from_dynamic(image: DynamicImage, flip_vertically: bool) -> Self {
        let image = if flip_vertically { image.flipv() } else { image };
        let (width, height) = (image.width(), image.height());

        let (format, pixels) = match image {
            DynamicImage::ImageLuma8(buf) => (PixelFormat::Red, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (PixelFormat::Rgb, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (PixelFormat::Rgba, buf.into_raw()),
            other => (PixelFormat::Rgba, other.into_rgba8().into_raw()),
        };

        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Width and height as the signed sizes `glTexImage2D` takes.
    pub fn gl_size(&self) -> Result<(i32, i32)> {
        let width = i32::try_from(self.width);
        let height = i32::try_from(self.height);
        match (width, height) {
            (Ok(w), Ok(h)) => Ok((w, h)),
            _ => anyhow::bail!("image {}x{} is too large for GL", self.width, self.height),
        }
    }

    /// Decodes an image file.
    pub fn load(path: impl AsRef<Path>, flip_vertically: bool) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("failed to decode image {}", path.display()))?;
        Ok(Self::from_dynamic(image, flip_vertically))
    }
}

/// A 2D texture object.
#[derive(Debug)]
pub struct Texture2d {
    raw: glow::Texture,
    params: TextureParams,
    size: Option<(u32, u32)>,
}

impl Texture2d {
    /// Creates a texture with `params` applied and no storage yet.
    ///
    /// The texture stays bound to `TEXTURE_2D` on the active unit.
    pub fn new(gl: &glow::Context, params: TextureParams) -> Result<Self> {
        let raw = unsafe { gl.create_texture() }
            .map_err(anyhow::Error::msg)
            .context("failed to create texture object")?;

        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(raw));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, params.wrap_s.gl_enum() as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, params.wrap_t.gl_enum() as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                params.min_filter.gl_enum() as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                params.mag_filter.gl_enum() as i32,
            );
        }

        Ok(Self {
            raw,
            params,
            size: None,
        })
    }

    /// Creates a texture and fills it from an image file.
    ///
    /// A missing or undecodable file is logged and the texture is returned
    /// without storage; sampling it yields black.
    pub fn from_file(
        gl: &glow::Context,
        path: impl AsRef<Path>,
        params: TextureParams,
        flip_vertically: bool,
    ) -> Result<Self> {
        let path = path.as_ref();
        let mut texture = Self::new(gl, params)?;

        match TextureImage::load(path, flip_vertically) {
            Ok(image) => texture.upload(gl, &image)?,
            Err(e) => log::error!("failed to load texture: {e:#}"),
        }

        Ok(texture)
    }

    /// Replaces the texture's storage with `image` (mip level 0) and builds
    /// the mipmap chain when requested.
    pub fn upload(&mut self, gl: &glow::Context, image: &TextureImage) -> Result<()> {
        let (width, height) = image.gl_size()?;
        let format = image.format.gl_enum();
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(self.raw));
            // RGB rows are rarely 4-byte aligned.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format as i32,
                width,
                height,
                0,
                format,
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(Some(&image.pixels)),
            );
            if self.params.generate_mipmaps {
                gl.generate_mipmap(glow::TEXTURE_2D);
            }
        }

        self.size = Some((image.width, image.height));
        log::debug!(
            "texture {:?} uploaded: {}x{} {:?}",
            self.raw,
            image.width,
            image.height,
            image.format
        );
        Ok(())
    }

    /// Size of level 0, if storage was uploaded.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    /// Activates texture unit `unit` and binds this texture to it.
    pub fn bind_to_unit(&self, gl: &glow::Context, unit: u32) {
        debug_assert!(unit < MIN_TEXTURE_UNITS, "texture unit {unit} out of range");
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.raw));
        }
    }

    pub fn raw(&self) -> glow::Texture {
        self.raw
    }

    pub fn delete(self, gl: &glow::Context) {
        unsafe { gl.delete_texture(self.raw) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, LumaA, Rgb, RgbImage};

    fn two_row_image() -> DynamicImage {
        // Top row red, bottom row blue.
        let mut img = RgbImage::new(1, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn channel_counts_map_to_formats() {
        assert_eq!(PixelFormat::from_channels(1), Some(PixelFormat::Red));
        assert_eq!(PixelFormat::from_channels(3), Some(PixelFormat::Rgb));
        assert_eq!(PixelFormat::from_channels(4), Some(PixelFormat::Rgba));
        assert_eq!(PixelFormat::from_channels(2), None);
    }

    #[test]
    fn rgb_image_keeps_three_channels() {
        let tex = TextureImage::from_dynamic(two_row_image(), false);
        assert_eq!(tex.format, PixelFormat::Rgb);
        assert_eq!((tex.width, tex.height), (1, 2));
        assert_eq!(tex.pixels, vec![255, 0, 0, 0, 0, 255]);
    }

    #[test]
    fn flip_puts_bottom_row_first() {
        let tex = TextureImage::from_dynamic(two_row_image(), true);
        assert_eq!(tex.pixels, vec![0, 0, 255, 255, 0, 0]);
    }

    #[test]
    fn gray_alpha_expands_to_rgba() {
        let mut img = GrayAlphaImage::new(1, 1);
        img.put_pixel(0, 0, LumaA([10, 200]));
        let tex = TextureImage::from_dynamic(DynamicImage::ImageLumaA8(img), false);
        assert_eq!(tex.format, PixelFormat::Rgba);
        assert_eq!(tex.pixels, vec![10, 10, 10, 200]);
    }

    #[test]
    fn gl_size_rejects_dimensions_past_i32() {
        let mut tex = TextureImage::from_dynamic(two_row_image(), false);
        assert_eq!(tex.gl_size().unwrap(), (1, 2));

        tex.width = u32::MAX;
        assert!(tex.gl_size().is_err());
    }

    #[test]
    fn missing_file_fails_to_load() {
        let path = std::env::temp_dir().join("glstart-no-such-texture.png");
        assert!(TextureImage::load(&path, false).is_err());
    }

    #[test]
    fn default_params_repeat_and_filter_linearly() {
        let p = TextureParams::default();
        assert_eq!(p.wrap_s, WrapMode::Repeat);
        assert_eq!(p.wrap_t, WrapMode::Repeat);
        assert_eq!(p.mag_filter, FilterMode::Linear);
        assert!(p.generate_mipmaps);
    }
}
