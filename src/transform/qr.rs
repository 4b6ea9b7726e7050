// ! QR rendering of the finished config, for scanning straight into the
// WireGuard iOS app.

use std::path::Path;

use image::Luma;
use qrcode::{EcLevel, QrCode};

use crate::error::{ProcessError, ProcessResult};

/// Encodes `payload` at error-correction level L (the payload is a whole
/// config file, so capacity matters more than damage tolerance) and saves
/// the auto-sized code as a grayscale PNG.
pub fn save_png(payload: &str, path: &Path) -> ProcessResult<()> {
    let code = QrCode::with_error_correction_level(payload, EcLevel::L)?;
    let img = code.render::<Luma<u8>>().build();
    img.save(path).map_err(|source| ProcessError::QrImage {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("QR code saved as {}", path.display());
    Ok(())
}

#[cfg(test)]
mod qr_test {
    use super::*;

    #[test]
    fn test_payload_over_capacity_is_an_encode_error() {
        let huge = "x".repeat(8000);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("huge-QR.png");
        match save_png(&huge, &out) {
            Err(ProcessError::Qr(_)) => {}
            other => panic!("expected Qr error, got {:?}", other.map(|_| ())),
        }
        assert!(!out.exists());
    }

    #[test]
    fn test_save_writes_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("small-QR.png");
        save_png("[Interface]\nDNS = 0.0.0.0/32\n", &out).unwrap();
        let bytes = std::fs::read(&out).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
