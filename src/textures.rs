//! The image drawn for every particle.
//!
//! `src` names a local PNG or JPEG. When it is missing or fails to decode the
//! viewer falls back to a generated placeholder so the rain still runs.

use crate::error::TextureError;
use std::path::Path;

/// Side length of the generated placeholder, matching the default sprite size.
pub const PLACEHOLDER_SIZE: u32 = 50;

/// Filter mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Smooth linear filtering (default).
    #[default]
    Linear,
    /// Sharp nearest-neighbor filtering. Good for pixel art.
    Nearest,
}

impl From<FilterMode> for wgpu::FilterMode {
    fn from(mode: FilterMode) -> Self {
        match mode {
            FilterMode::Linear => wgpu::FilterMode::Linear,
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
        }
    }
}

/// Decoded RGBA8 pixels for the particle sprite.
#[derive(Debug, Clone)]
pub struct SpriteTexture {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub filter: FilterMode,
}

impl SpriteTexture {
    /// Wrap raw RGBA data.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != width * height * 4`.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "Texture data size mismatch: expected {} bytes, got {}",
            width * height * 4,
            data.len()
        );
        Self {
            data,
            width,
            height,
            filter: FilterMode::Linear,
        }
    }

    /// Decode an image file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path.as_ref())?;
        let img = image::load_from_memory(&bytes)?.to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self::from_rgba(img.into_raw(), width, height))
    }

    /// Soft round blob, opaque in the middle and transparent at the rim.
    pub fn placeholder() -> Self {
        let size = PLACEHOLDER_SIZE;
        let half = size as f32 / 2.0;
        let mut data = Vec::with_capacity((size * size * 4) as usize);

        for y in 0..size {
            for x in 0..size {
                let dx = (x as f32 + 0.5 - half) / half;
                let dy = (y as f32 + 0.5 - half) / half;
                let d = (dx * dx + dy * dy).sqrt();
                let alpha = (1.0 - d).clamp(0.0, 1.0).powf(0.5);
                data.extend_from_slice(&[180, 210, 255, (alpha * 255.0) as u8]);
            }
        }

        Self::from_rgba(data, size, size)
    }

    /// Load `src` if given, otherwise (or on failure) the placeholder.
    pub fn load_or_placeholder(src: Option<&str>) -> Self {
        match src {
            Some(path) => match Self::from_file(path) {
                Ok(texture) => {
                    log::info!("Loaded sprite {} ({}x{})", path, texture.width, texture.height);
                    texture
                }
                Err(e) => {
                    log::warn!("{}; using placeholder sprite", e);
                    Self::placeholder()
                }
            },
            None => Self::placeholder(),
        }
    }

    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }
}
