//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 为环形缓冲对外暴露的失败语义提供集中定义：构造期误用、读下溢、写上溢；
//! - 所有失败均同步返回给直接调用方，模块内部不吞没、不记录错误日志。
//!
//! ## 设计要求（What）
//! - 启用 `std` 时派生 `thiserror::Error`，兼容 `std::error::Error` 与 `std::io::Error`；
//! - 关闭 `std` 时提供等价的手写 `Display`，保持 `no_std + alloc` 可编译；
//! - 每个变体都携带排障所需的数值上下文，并映射到稳定的点分错误码。

#[cfg(not(feature = "std"))]
use core::fmt;

#[cfg(feature = "std")]
use thiserror::Error;

use alloc::string::String;

/// 环形缓冲错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：区分“构造参数非法”“可读字节不足”“扩容触顶后仍放不下”三类失败，
///   让调用方据此选择放弃构造、等待更多数据或先行消费再重试。
/// - **契约 (What)**：
///   - `InvalidArgument` 只出现在构造与尺寸计算阶段，出现时不会产出任何缓冲实例；
///   - `Underflow`/`Overflow` 出现时缓冲状态保持原样，可在前置条件变化后安全重试；
///   - 所有变体均为 `Send + Sync + 'static`。
/// - **设计权衡 (Trade-offs)**：`InvalidArgument` 使用 `String` 保存原因，构造路径上的少量分配
///   换取可读诊断；热路径上的 `Underflow`/`Overflow` 只携带整数字段，不分配。
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RingBufferError {
    /// 构造期误用：初始尺寸超过上限，或尺寸无法向上取整为 2 的幂。
    #[cfg_attr(feature = "std", error("invalid argument: {reason}"))]
    InvalidArgument { reason: String },

    /// 读取请求超过当前可读字节数。
    #[cfg_attr(
        feature = "std",
        error("underflow: requested {requested} bytes but only {available} available")
    )]
    Underflow { requested: usize, available: usize },

    /// 即使扩容到上限，也无法容纳现有未读字节、新写入字节与牺牲槽位。
    #[cfg_attr(
        feature = "std",
        error(
            "attempted overflow: writing {requested} bytes with {available} unread exceeds maximum capacity {max_capacity}"
        )
    )]
    Overflow {
        requested: usize,
        available: usize,
        max_capacity: usize,
    },
}

impl RingBufferError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        RingBufferError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// 稳定的机器可读错误码，沿用工作区 `domain.kind` 的点分命名。
    pub fn code(&self) -> &'static str {
        match self {
            RingBufferError::InvalidArgument { .. } => "ring_buffer.invalid_argument",
            RingBufferError::Underflow { .. } => "ring_buffer.underflow",
            RingBufferError::Overflow { .. } => "ring_buffer.overflow",
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RingBufferError::InvalidArgument { .. })
    }

    pub fn is_underflow(&self) -> bool {
        matches!(self, RingBufferError::Underflow { .. })
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, RingBufferError::Overflow { .. })
    }
}

/// 环形缓冲操作的统一返回类型。
pub type Result<T, E = RingBufferError> = core::result::Result<T, E>;

#[cfg(not(feature = "std"))]
impl fmt::Display for RingBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingBufferError::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            RingBufferError::Underflow {
                requested,
                available,
            } => write!(
                f,
                "underflow: requested {requested} bytes but only {available} available"
            ),
            RingBufferError::Overflow {
                requested,
                available,
                max_capacity,
            } => write!(
                f,
                "attempted overflow: writing {requested} bytes with {available} unread exceeds maximum capacity {max_capacity}"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl From<RingBufferError> for std::io::Error {
    /// 将环形缓冲错误桥接为 I/O 错误，便于在 `Read`/`Write` 适配层直接 `?` 传播。
    ///
    /// - 下溢对应 `UnexpectedEof`：调用方要求的字节尚未到达；
    /// - 上溢对应 `WriteZero`：缓冲已触顶，本次写入无法被接纳；
    /// - 参数非法对应 `InvalidInput`。
    fn from(value: RingBufferError) -> Self {
        let kind = match &value {
            RingBufferError::InvalidArgument { .. } => std::io::ErrorKind::InvalidInput,
            RingBufferError::Underflow { .. } => std::io::ErrorKind::UnexpectedEof,
            RingBufferError::Overflow { .. } => std::io::ErrorKind::WriteZero,
        };
        std::io::Error::new(kind, value)
    }
}
