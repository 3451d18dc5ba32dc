//! Saving exported snapshots to disk.

use super::types::CaptureError;
use crate::config::CaptureConfig;
use crate::draw::RasterSurface;
use chrono::Local;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for file saving.
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Directory to save snapshots to.
    pub save_directory: PathBuf,
    /// Filename template (supports chrono format specifiers).
    pub filename_template: String,
    /// Image format extension.
    pub format: String,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: "%Y%m%d_%H%M%S".to_string(),
            format: "png".to_string(),
        }
    }
}

impl FileSaveConfig {
    pub fn from_config(config: &CaptureConfig) -> Self {
        let save_directory = config
            .save_directory
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(default_save_directory);
        Self {
            save_directory,
            filename_template: config.filename_template.clone(),
            format: config.format.to_lowercase(),
        }
    }

    /// Same settings, saving into `directory` instead.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.save_directory = directory.into();
        self
    }
}

fn default_save_directory() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ScreenPen")
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - File extension (e.g., "png")
///
/// # Errors
/// `InvalidTemplate` when the template has an unknown specifier or renders
/// to something that is not a plain file name.
pub fn generate_filename(template: &str, format: &str) -> Result<String, CaptureError> {
    let mut filename = String::new();
    write!(filename, "{}", Local::now().format(template))
        .map_err(|_| CaptureError::InvalidTemplate(template.to_string()))?;

    if filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\'])
    {
        return Err(CaptureError::InvalidTemplate(template.to_string()));
    }

    Ok(format!("{}.{}", filename, format))
}

/// Checks that `template` produces a usable file name.
pub fn validate_filename_template(template: &str) -> Result<(), CaptureError> {
    generate_filename(template, "png").map(|_| ())
}

/// Ensure the save directory exists, creating it if necessary.
///
/// Returns the canonicalized path to the directory.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, CaptureError> {
    if !directory.exists() {
        log::info!("Creating snapshot directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Picks `name` inside `directory`, appending `-1`, `-2`, ... to the stem
/// while a file of that name already exists.
fn unique_path(directory: &Path, name: &str) -> PathBuf {
    let candidate = directory.join(name);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{ext}")),
        None => (name, String::new()),
    };
    (1..)
        .map(|n| directory.join(format!("{stem}-{n}{ext}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Encodes `snapshot` as PNG and writes it under a timestamped name.
///
/// # Returns
/// Path to the saved file
pub fn save_snapshot(
    snapshot: &RasterSurface,
    config: &FileSaveConfig,
) -> Result<PathBuf, CaptureError> {
    if config.format != "png" {
        return Err(CaptureError::UnsupportedFormat(config.format.clone()));
    }

    let mut image_data = Vec::new();
    snapshot.write_png(&mut image_data)?;

    let directory = ensure_directory_exists(&config.save_directory)?;
    let filename = generate_filename(&config.filename_template, &config.format)?;
    let file_path = unique_path(&directory, &filename);

    log::info!(
        "Saving snapshot to: {} ({} bytes)",
        file_path.display(),
        image_data.len()
    );

    fs::write(&file_path, &image_data)?;

    let written_size = fs::metadata(&file_path)?.len();
    log::debug!("File written: {} bytes", written_size);

    // User read/write only
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    log::info!("Snapshot saved successfully: {}", file_path.display());

    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RED;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_generate_filename() {
        let filename = generate_filename("test_%Y%m%d", "png").unwrap();
        assert!(filename.starts_with("test_"));
        assert!(filename.ends_with(".png"));
        assert_eq!(filename.len(), "test_YYYYMMDD.png".len());
    }

    #[test]
    fn test_default_template_shape() {
        let config = FileSaveConfig::default();
        let filename = generate_filename(&config.filename_template, &config.format).unwrap();
        // 20240131_235959.png
        assert_eq!(filename.len(), 19);
        assert_eq!(filename.as_bytes()[8], b'_');
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with("~"));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_from_config_uses_directory_and_template() {
        let config = CaptureConfig {
            save_directory: Some("/tmp/shots".into()),
            filename_template: "shot_%H".into(),
            format: "PNG".into(),
        };
        let save = FileSaveConfig::from_config(&config);
        assert_eq!(save.save_directory, PathBuf::from("/tmp/shots"));
        assert_eq!(save.filename_template, "shot_%H");
        assert_eq!(save.format, "png");
    }

    #[test]
    fn test_save_snapshot_writes_png() {
        let temp = TempDir::new().unwrap();
        let mut surface = RasterSurface::new(8, 8).unwrap();
        surface.fill(RED).unwrap();
        let config = FileSaveConfig::default().with_directory(temp.path().join("out"));

        let path = save_snapshot(&surface, &config).unwrap();
        assert!(path.exists());
        assert_eq!(path.extension().unwrap(), "png");

        let decoded = RasterSurface::from_png(&mut File::open(&path).unwrap()).unwrap();
        assert_eq!(decoded.pixel(4, 4).unwrap(), [255, 0, 0, 255]);
    }

    #[test]
    fn test_same_second_saves_do_not_overwrite() {
        let temp = TempDir::new().unwrap();
        let surface = RasterSurface::new(2, 2).unwrap();
        let config = FileSaveConfig {
            filename_template: "fixed".into(),
            ..FileSaveConfig::default()
        }
        .with_directory(temp.path());

        let first = save_snapshot(&surface, &config).unwrap();
        let second = save_snapshot(&surface, &config).unwrap();
        assert_ne!(first, second);
        assert!(second.to_string_lossy().ends_with("fixed-1.png"));
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        let temp = TempDir::new().unwrap();
        let surface = RasterSurface::new(2, 2).unwrap();
        let config = FileSaveConfig {
            format: "bmp".into(),
            ..FileSaveConfig::default()
        }
        .with_directory(temp.path());
        assert!(matches!(
            save_snapshot(&surface, &config),
            Err(CaptureError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_unknown_specifier_is_an_error() {
        assert!(matches!(
            generate_filename("shot_%Q", "png"),
            Err(CaptureError::InvalidTemplate(t)) if t == "shot_%Q"
        ));
        assert!(validate_filename_template("shot_%Q").is_err());
    }

    #[test]
    fn test_template_cannot_leave_save_directory() {
        for template in ["../escape_%H", "sub/dir_%H", "..", "win\\path"] {
            assert!(
                generate_filename(template, "png").is_err(),
                "{template} should be rejected"
            );
        }
        assert!(validate_filename_template("shot..%H").is_ok());
    }

    #[test]
    fn test_save_with_invalid_template_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let surface = RasterSurface::new(2, 2).unwrap();
        let config = FileSaveConfig {
            filename_template: "shot_%Q".into(),
            ..FileSaveConfig::default()
        }
        .with_directory(temp.path());

        assert!(matches!(
            save_snapshot(&surface, &config),
            Err(CaptureError::InvalidTemplate(_))
        ));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }
}
