//! 环形缓冲的尺寸配置。
//!
//! # 模块定位（Why）
//! - 宿主通常在配置文件中为每条连接的收发暂存区给出“初始尺寸 / 上限”两项参数，
//!   需要一个可序列化、可校验的载体，并在装配阶段一次性暴露非法组合；
//! - 启用 `config` 特性后支持 serde 反序列化与 TOML 直接装载。
//!
//! # 契约说明（What）
//! - `validate` 与 [`RingBuffer::new`] 的校验规则完全一致：通过校验的配置必然能构造成功；
//! - 缺省字段回落到 [`RingBufferConfig::default`]，未知字段直接拒绝，避免拼写错误被静默忽略。

use alloc::format;

use crate::{
    error::{Result, RingBufferError},
    ring::RingBuffer,
    sizing::next_capacity,
};

/// 默认初始尺寸：足以容纳典型的协议首部，首个大报文到来时再按需扩容。
pub const DEFAULT_INITIAL_SIZE: usize = 256;

/// 默认容量上限：32 MiB。
pub const DEFAULT_MAX_SIZE: usize = 32 * 1024 * 1024;

/// 环形缓冲的尺寸配置。
///
/// ```toml
/// initial_size = 4096
/// max_size = 1048576
/// ```
#[cfg_attr(feature = "config", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RingBufferConfig {
    /// 初始请求尺寸，构造时向上取整为 2 的幂。
    pub initial_size: usize,
    /// 容量上限，扩容永不越过该值。
    pub max_size: usize,
}

impl Default for RingBufferConfig {
    fn default() -> Self {
        Self {
            initial_size: DEFAULT_INITIAL_SIZE,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl RingBufferConfig {
    pub fn new(initial_size: usize, max_size: usize) -> Self {
        Self {
            initial_size,
            max_size,
        }
    }

    /// 校验配置能否构造出缓冲，不分配内存。
    pub fn validate(&self) -> Result<()> {
        if self.initial_size > self.max_size {
            return Err(RingBufferError::invalid_argument(format!(
                "initial requested size {} larger than maximum size {}",
                self.initial_size, self.max_size
            )));
        }
        next_capacity(self.initial_size, self.max_size).map(|_| ())
    }

    /// 按配置构造缓冲。
    pub fn build(&self) -> Result<RingBuffer> {
        RingBuffer::new(self.initial_size, self.max_size)
    }

    /// 从 TOML 文本装载并校验配置。
    #[cfg(feature = "config")]
    pub fn from_toml_str(input: &str) -> core::result::Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }
}

impl RingBuffer {
    /// 按 [`RingBufferConfig`] 构造缓冲，等价于 [`RingBufferConfig::build`]。
    pub fn from_config(config: &RingBufferConfig) -> Result<Self> {
        config.build()
    }
}

/// 配置装载阶段的错误。
#[cfg(feature = "config")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML 语法错误、字段类型不符或出现未知字段。
    #[error("failed to parse ring buffer configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// 语法合法但尺寸组合无法构造缓冲。
    #[error(transparent)]
    Invalid(#[from] RingBufferError),
}
