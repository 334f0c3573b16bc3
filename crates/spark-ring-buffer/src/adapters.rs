//! `RingBuffer` 与生态 I/O 抽象的桥接。
//!
//! # 模块定位（Why）
//! - 流水线中的编解码器普遍以 `bytes::Buf` 消费字节，直接实现该 trait 可免去一次中转拷贝；
//! - 启用 `std` 时再提供 `std::io::Read`/`std::io::Write`，便于与阻塞式 I/O 或 `io::copy` 组合。
//!
//! # 语义差异（What）
//! - 固有方法 `read`/`write` 是“全有或全无”：要么处理全部请求字节，要么返回错误；
//! - `io::Read`/`io::Write` 遵循标准库的“尽力而为”语义：按可读字节数或剩余上限截断，
//!   返回实际处理的字节数；缓冲触顶时 `write` 返回 `Ok(0)`，由 `write_all` 转换为 `WriteZero`。
//! - 固有方法在方法调用语法中优先于 trait 方法，需要 trait 语义时请使用 `Read::read(&mut ring, ..)`
//!   或 `read_to_end`/`write_all` 等扩展方法。

use bytes::Buf;

use crate::ring::RingBuffer;

impl Buf for RingBuffer {
    fn remaining(&self) -> usize {
        self.available()
    }

    fn chunk(&self) -> &[u8] {
        self.segments().0
    }

    /// 丢弃 `cnt` 个未读字节。
    ///
    /// # Panics
    /// `cnt > remaining()` 时 panic，与 `Buf::advance` 的约定一致。
    fn advance(&mut self, cnt: usize) {
        let available = self.available();
        assert!(
            cnt <= available,
            "cannot advance past `remaining`: {cnt} > {available}"
        );
        self.consume(cnt);
    }

    #[cfg(feature = "std")]
    fn chunks_vectored<'a>(&'a self, dst: &mut [std::io::IoSlice<'a>]) -> usize {
        let (first, second) = self.segments();
        let mut filled = 0;
        for segment in [first, second] {
            if filled == dst.len() || segment.is_empty() {
                break;
            }
            dst[filled] = std::io::IoSlice::new(segment);
            filled += 1;
        }
        filled
    }
}

#[cfg(feature = "std")]
impl std::io::Read for RingBuffer {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let len = buf.len().min(self.available());
        self.copy_out(&mut buf[..len]);
        Ok(len)
    }
}

#[cfg(feature = "std")]
impl std::io::Write for RingBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let len = buf.len().min(self.max_possible_remaining_capacity());
        if len == 0 {
            return Ok(0);
        }
        self.ensure_capacity(len)?;
        self.copy_in(&buf[..len]);
        Ok(len)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
