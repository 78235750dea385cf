//! # Config 模块
//!
//! 动画宿主的配置管理，集中管理所有默认参数。
//!
//! ## 配置优先级
//!
//! 1. 调用方在 `AnimateOptions` 中显式设置的值（最高）
//! 2. 配置文件 (tween.json)
//! 3. 默认值（最低）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};
use tween_runtime::{AnimateOptions, DeltaSpec, EaseMode, EasingKind, set_delta};

/// 宿主配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweenConfig {
    /// 定时器模拟帧的间隔（毫秒）
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: f64,

    /// 默认时长（秒）
    #[serde(default = "default_duration")]
    pub default_duration: f64,

    /// 默认延迟（秒）
    #[serde(default)]
    pub default_delay: f64,

    /// 默认缓动方向
    #[serde(default)]
    pub default_ease: EaseMode,

    /// 默认缓动函数
    #[serde(default)]
    pub default_delta: DeltaSpec,

    /// 是否严格校验缓动函数名称
    ///
    /// 关闭时（默认）未知名称回退到 linear；开启时 `validate` 会拒绝未知名称。
    #[serde(default)]
    pub strict_easing: bool,

    /// 调试配置
    #[serde(default)]
    pub debug: DebugConfig,
}

/// 调试配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// 是否在日志中输出每一帧
    #[serde(default)]
    pub log_frames: bool,

    /// 日志级别（trace / debug / info / warn / error）
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("IO 错误: {0}")]
    IoError(String),

    #[error("序列化失败: {0}")]
    SerializationFailed(String),

    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}

// 默认值函数
fn default_frame_interval_ms() -> f64 {
    16.0
}

fn default_duration() -> f64 {
    tween_runtime::DEFAULT_DURATION_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            default_duration: default_duration(),
            default_delay: 0.0,
            default_ease: EaseMode::default(),
            default_delta: DeltaSpec::default(),
            strict_easing: false,
            debug: DebugConfig::default(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_frames: false,
            log_level: default_log_level(),
        }
    }
}

impl TweenConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = ?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!(path = ?path, "配置文件加载成功");
                    config
                }
                Err(e) => {
                    warn!(error = %e, "配置文件解析失败，使用默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(error = %e, "配置文件读取失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.frame_interval_ms.is_finite() && self.frame_interval_ms > 0.0) {
            return Err(ConfigError::ValidationFailed(format!(
                "帧间隔必须为正数: {}",
                self.frame_interval_ms
            )));
        }

        if !(self.default_duration.is_finite() && self.default_duration > 0.0) {
            return Err(ConfigError::ValidationFailed(format!(
                "默认时长必须为正数: {}",
                self.default_duration
            )));
        }

        if !(self.default_delay.is_finite() && self.default_delay >= 0.0) {
            return Err(ConfigError::ValidationFailed(format!(
                "默认延迟不能为负数: {}",
                self.default_delay
            )));
        }

        if self.strict_easing {
            self.default_delta
                .name
                .parse::<EasingKind>()
                .map_err(|e| ConfigError::ValidationFailed(e.to_string()))?;
        }

        Ok(())
    }

    /// 用配置填充调用方未设置的字段
    pub fn fill(&self, mut options: AnimateOptions) -> AnimateOptions {
        options.duration.get_or_insert(self.default_duration);
        options.delay.get_or_insert(self.default_delay);
        if options.delta.is_none() {
            options.delta = Some(set_delta(self.default_ease, Some(&self.default_delta), None));
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = TweenConfig::default();
        assert_eq!(config.frame_interval_ms, 16.0);
        assert_eq!(config.default_duration, 1.0);
        assert_eq!(config.default_ease, EaseMode::EaseOut);
        assert_eq!(config.default_delta, DeltaSpec::named("linear"));
        assert!(!config.strict_easing);
        assert_eq!(config.debug.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TweenConfig = serde_json::from_str(
            r#"{
                "default_duration": 0.5,
                "default_ease": "easeInOut",
                "default_delta": { "name": "quadrantic", "shape_param": 3.0 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.default_duration, 0.5);
        assert_eq!(config.default_ease, EaseMode::EaseInOut);
        assert_eq!(config.default_delta, DeltaSpec::new("quadrantic", 3.0));
        assert_eq!(config.frame_interval_ms, 16.0);
        assert!(!config.debug.log_frames);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tween.json");

        let config = TweenConfig {
            frame_interval_ms: 8.0,
            strict_easing: true,
            ..TweenConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = TweenConfig::load(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_or_broken_file() {
        let dir = tempdir().unwrap();
        assert_eq!(
            TweenConfig::load(dir.path().join("missing.json")),
            TweenConfig::default()
        );

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert_eq!(TweenConfig::load(&broken), TweenConfig::default());
    }

    #[test]
    fn test_validate() {
        let config = TweenConfig {
            frame_interval_ms: 0.0,
            ..TweenConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ValidationFailed(_))));

        let config = TweenConfig {
            default_delay: -1.0,
            ..TweenConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_strict_easing_rejects_unknown_name() {
        let lenient = TweenConfig {
            default_delta: DeltaSpec::named("wobble"),
            ..TweenConfig::default()
        };
        assert!(lenient.validate().is_ok());

        let strict = TweenConfig {
            strict_easing: true,
            ..lenient
        };
        assert!(strict.validate().is_err());
    }

    #[test]
    fn test_fill_keeps_explicit_values() {
        let config = TweenConfig {
            default_duration: 2.0,
            default_delay: 0.25,
            ..TweenConfig::default()
        };

        let filled = config.fill(AnimateOptions::new().with_duration(0.5));
        assert_eq!(filled.duration, Some(0.5));
        assert_eq!(filled.delay, Some(0.25));
        assert!(filled.delta.is_some());
    }
}
