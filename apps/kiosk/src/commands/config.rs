//! `kupon-kiosk config`: prints the configuration in effect after file and
//! environment overrides.

use std::path::PathBuf;

use tracing::info;

use kupon_session::KuponConfig;

use crate::cli::ConfigArgs;
use crate::error::{ApiError, ApiResult};

/// Prints the effective configuration, optionally saving it.
pub fn handle(args: ConfigArgs, config: &KuponConfig, path: Option<PathBuf>) -> ApiResult<()> {
    println!("{}", render(config, args.json)?);

    if args.save {
        let target = path.clone().or_else(KuponConfig::default_config_path);
        config.save(path)?;
        info!(?target, "Saved effective configuration");
    }

    Ok(())
}

/// Formats the configuration as TOML or JSON.
pub fn render(config: &KuponConfig, json: bool) -> ApiResult<String> {
    if json {
        serde_json::to_string_pretty(config).map_err(|e| ApiError::internal(e.to_string()))
    } else {
        toml::to_string_pretty(config).map_err(|e| ApiError::internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_toml() {
        let text = render(&KuponConfig::default(), false).unwrap();
        assert!(text.contains("[qr]"));
        assert!(text.contains("size = 300"));
        assert!(text.contains("[countdown]"));
    }

    #[test]
    fn test_render_json() {
        let text = render(&KuponConfig::default(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["barcode"]["bar_height"], 128);
    }

    #[test]
    fn test_save_to_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kupon.toml");

        handle(
            ConfigArgs {
                json: false,
                save: true,
            },
            &KuponConfig::default(),
            Some(path.clone()),
        )
        .unwrap();

        assert_eq!(KuponConfig::from_file(&path).unwrap(), KuponConfig::default());
    }
}
