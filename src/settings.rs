//! JSON 设置文件读写。
//!
//! 设置文件内容即 `PhotoOptions` 的 JSON 形式，缺省字段取默认值。

use std::fs;
use std::path::Path;

use crate::error::AppError;
use crate::photo::PhotoOptions;

pub fn load_settings(path: &Path) -> Result<PhotoOptions, AppError> {
    let content = fs::read_to_string(path)?;
    let parsed = serde_json::from_str::<PhotoOptions>(&content)
        .map_err(|e| AppError::Settings(format!("解析设置文件失败 {}: {}", path.display(), e)))?;

    log::debug!("已读取设置文件: {}", path.display());
    Ok(parsed)
}

pub fn save_settings(path: &Path, options: &PhotoOptions) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(options)
        .map_err(|e| AppError::Settings(format!("序列化设置失败: {}", e)))?;

    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_settings_load_back_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf/settings.json");
        let options = PhotoOptions {
            variant: "box-binary".to_string(),
            scale: Some((30, 60)),
            background_mode: "negative".to_string(),
            ..Default::default()
        };

        save_settings(&path, &options).unwrap();
        assert_eq!(load_settings(&path).unwrap(), options);
    }

    #[test]
    fn malformed_json_is_settings_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_settings(&path), Err(AppError::Settings(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_settings(Path::new("/no/such/settings.json"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
