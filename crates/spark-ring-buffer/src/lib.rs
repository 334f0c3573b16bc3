#![cfg_attr(not(feature = "std"), no_std)]

//! `spark-ring-buffer` 提供流式 I/O 使用的可增长环形字节缓冲。
//!
//! # 模块定位（Why）
//! - 传输层收到的字节需要先暂存，再由编解码器按帧消费；暂存区既要复用已消费空间，
//!   又要能在突发流量下扩容，同时受硬上限约束。
//! - 该 crate 只负责字节的暂存与搬移，不涉及任何传输实现与同步原语。
//!
//! # 设计概要（How）
//! - `ring` 模块实现 [`RingBuffer`]：单一底层数组、读写两个游标、牺牲槽位区分空与满，
//!   写入前按 2 的幂扩容并压实未读数据；
//! - `sizing` 模块负责带溢出保护的 2 的幂取整；
//! - `error` 模块定义 [`RingBufferError`]，所有失败均为“全有或全无”；
//! - `config` 模块提供 [`RingBufferConfig`]，启用 `config` 特性后可从 TOML 装载；
//! - `adapters` 模块为 [`RingBuffer`] 实现 `bytes::Buf`，启用 `std` 时再实现 `std::io::Read`/`Write`。
//!
//! # 使用示例
//! ```
//! use spark_ring_buffer::RingBuffer;
//!
//! let mut ring = RingBuffer::new(4, 1024)?;
//! ring.write(b"spark")?.write(b"-ring")?;
//! assert_eq!(ring.available(), 10);
//!
//! let mut frame = [0u8; 5];
//! ring.read(&mut frame)?;
//! assert_eq!(&frame, b"spark");
//! # Ok::<(), spark_ring_buffer::RingBufferError>(())
//! ```

extern crate alloc;

mod adapters;
mod config;
mod error;
mod ring;
mod sizing;

#[cfg(feature = "config")]
pub use config::ConfigError;
pub use config::{DEFAULT_INITIAL_SIZE, DEFAULT_MAX_SIZE, RingBufferConfig};
pub use error::{Result, RingBufferError};
pub use ring::RingBuffer;
