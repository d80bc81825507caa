//! Attendance tokens: scan URL + QR code image

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use shared::RegistrationId;
use std::io::Cursor;
use thiserror::Error;

/// Minimum rendered QR size in pixels
const QR_MIN_DIMENSION: u32 = 240;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("QR image rendering failed: {0}")]
    Render(#[from] image::ImageError),
}

/// Build `<base-url>/scan?id=<id>`
pub fn scan_url(base_url: &str, id: &RegistrationId) -> String {
    format!("{}/scan?id={id}", base_url.trim_end_matches('/'))
}

/// Rendered QR code for one registration
#[derive(Debug, Clone)]
pub struct QrToken {
    pub scan_url: String,
    pub png: Vec<u8>,
}

impl QrToken {
    /// Encode `scan_url` as a PNG QR code
    pub fn encode(scan_url: impl Into<String>) -> Result<Self, TokenError> {
        let scan_url = scan_url.into();
        let code = QrCode::new(scan_url.as_bytes())?;
        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(QR_MIN_DIMENSION, QR_MIN_DIMENSION)
            .build();

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(Self { scan_url, png })
    }

    /// Embeddable `data:image/png;base64,...` URI
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}
