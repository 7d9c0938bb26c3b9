//! The logo placed at the top of every exported document.

use std::path::PathBuf;

use printpdf::image_crate::{self, DynamicImage, Rgb, RgbImage};

use crate::render::ExportError;

static BUNDLED_LOGO: &[u8] = include_bytes!("../../assets/logo.png");

/// Where the logo bytes come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogoSource {
    #[default]
    Bundled,
    File(PathBuf),
}

impl LogoSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(LogoSource::Bundled, LogoSource::File)
    }

    /// Reads and decodes the logo. A configured file that is missing or not an
    /// image fails the export rather than silently dropping the logo.
    pub async fn load(&self) -> Result<Logo, ExportError> {
        let bytes = match self {
            LogoSource::Bundled => BUNDLED_LOGO.to_vec(),
            LogoSource::File(path) => tokio::fs::read(path).await.map_err(|e| {
                ExportError::Asset(format!("cannot read logo {}: {e}", path.display()))
            })?,
        };
        Logo::decode(bytes)
    }
}

/// Encoded logo bytes plus the decoded image.
#[derive(Debug, Clone)]
pub struct Logo {
    /// Original encoded bytes, embedded as-is by the DOCX writer.
    pub bytes: Vec<u8>,
    pub image: DynamicImage,
}

impl Logo {
    pub fn decode(bytes: Vec<u8>) -> Result<Self, ExportError> {
        let image = image_crate::load_from_memory(&bytes)
            .map_err(|e| ExportError::Asset(format!("logo is not a readable image: {e}")))?;
        Ok(Self { bytes, image })
    }

    pub fn width_px(&self) -> u32 {
        self.image.width()
    }

    pub fn height_px(&self) -> u32 {
        self.image.height()
    }

    /// The logo as opaque RGB, with any transparency composited over white.
    pub fn flattened_rgb(&self) -> RgbImage {
        let rgba = self.image.to_rgba8();
        RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let [r, g, b, a] = rgba.get_pixel(x, y).0;
            let over_white = |c: u8| -> u8 {
                let (c, a) = (u32::from(c), u32::from(a));
                ((c * a + 255 * (255 - a) + 127) / 255) as u8
            };
            Rgb([over_white(r), over_white(g), over_white(b)])
        })
    }
}
