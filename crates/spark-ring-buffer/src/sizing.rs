//! 容量取整：把请求尺寸向上取整为 2 的幂，并以上限截断。

use alloc::format;

use crate::error::{Result, RingBufferError};

/// 计算不小于 `requested` 的最小 2 的幂，再与 `max_capacity` 取较小值。
///
/// # 契约说明（What）
/// - `requested == 0` 取整为 `1`，与 `requested == 1` 一致；
/// - 返回值可能小于 `requested`：当上限截断生效时，由调用方判定是否构成上溢；
/// - 2 的幂超出 `usize` 表示范围时返回 [`RingBufferError::InvalidArgument`]，绝不静默回绕为 0。
pub(crate) fn next_capacity(requested: usize, max_capacity: usize) -> Result<usize> {
    let rounded = requested.max(1).checked_next_power_of_two().ok_or_else(|| {
        RingBufferError::invalid_argument(format!(
            "value too large to round to a power of two: {requested}"
        ))
    })?;
    Ok(rounded.min(max_capacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_up_to_power_of_two() {
        assert_eq!(next_capacity(0, 1024).unwrap(), 1);
        assert_eq!(next_capacity(1, 1024).unwrap(), 1);
        assert_eq!(next_capacity(3, 1024).unwrap(), 4);
        assert_eq!(next_capacity(4, 1024).unwrap(), 4);
        assert_eq!(next_capacity(5, 1024).unwrap(), 8);
        assert_eq!(next_capacity(1000, 1024).unwrap(), 1024);
    }

    #[test]
    fn caps_at_max_capacity() {
        assert_eq!(next_capacity(5, 4).unwrap(), 4);
        assert_eq!(next_capacity(5, 6).unwrap(), 6);
        assert_eq!(next_capacity(1, 0).unwrap(), 0);
    }

    #[test]
    fn rejects_unrepresentable_power_of_two() {
        let err = next_capacity(usize::MAX, usize::MAX).unwrap_err();
        assert!(err.is_invalid_argument());

        let largest = 1usize << (usize::BITS - 1);
        assert_eq!(next_capacity(largest, usize::MAX).unwrap(), largest);
        assert!(next_capacity(largest + 1, usize::MAX).is_err());
    }
}
