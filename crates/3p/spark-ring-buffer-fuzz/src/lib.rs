//! spark-ring-buffer-fuzz 公共支持库。
//!
//! # 教案式定位
//! - **Why**：fuzz target 与常规测试共享同一套“真实缓冲 vs 影子模型”的差分执行逻辑，
//!   CI 中运行 `cargo test` 即可重放回归样本，无需 libFuzzer 运行时。
//! - **What**：[`RingScript`] 描述构造参数与操作序列，[`execute_ring_script`] 逐步执行并在
//!   任何偏差处 panic。
//! - **How**：以 `VecDeque<u8>` 作为影子模型，按“未读 + 新写 + 牺牲槽位 <= 上限”预测写入成败。

use std::collections::VecDeque;

use arbitrary::Arbitrary;
use spark_ring_buffer::RingBuffer;

/// 单步操作。长度字段取 `u8`，让样本集中在容易触发回绕与扩容的小尺寸区间。
#[derive(Clone, Debug, Arbitrary)]
pub enum RingOp {
    Write { len: u8, fill: u8 },
    Read { len: u8 },
}

/// 一次完整的 fuzz 样本：构造参数加操作序列。
#[derive(Clone, Debug, Arbitrary)]
pub struct RingScript {
    pub initial_size: u16,
    pub max_size: u16,
    pub ops: Vec<RingOp>,
}

/// 执行脚本，任何与影子模型不一致的行为都会 panic。
///
/// 非法构造参数（初始尺寸大于上限）要求构造失败后直接返回。
pub fn execute_ring_script(script: &RingScript) {
    let initial = usize::from(script.initial_size);
    let max = usize::from(script.max_size);
    let mut ring = match RingBuffer::new(initial, max) {
        Ok(ring) => ring,
        Err(err) => {
            assert!(initial > max, "unexpected construction failure: {err}");
            assert!(err.is_invalid_argument());
            return;
        }
    };
    let mut model: VecDeque<u8> = VecDeque::new();
    let mut counter = 0u8;

    for op in &script.ops {
        match *op {
            RingOp::Write { len, fill } => {
                let bytes: Vec<u8> = (0..len)
                    .map(|i| {
                        counter = counter.wrapping_add(1);
                        fill ^ i ^ counter
                    })
                    .collect();
                let fits = model.len() + bytes.len() < max;
                match ring.write(&bytes) {
                    Ok(_) => {
                        assert!(fits, "write should have overflowed: {ring}");
                        model.extend(bytes.iter().copied());
                    }
                    Err(err) => {
                        assert!(!fits, "write should have fit: {err}");
                        assert!(err.is_overflow());
                    }
                }
            }
            RingOp::Read { len } => {
                let mut dst = vec![0u8; usize::from(len)];
                match ring.read(&mut dst) {
                    Ok(()) => {
                        let expected: Vec<u8> = model.drain(..dst.len()).collect();
                        assert_eq!(dst, expected, "byte order diverged: {ring}");
                    }
                    Err(err) => {
                        assert!(dst.len() > model.len());
                        assert!(err.is_underflow());
                    }
                }
            }
        }
        assert_eq!(ring.available(), model.len());
        assert!(ring.capacity() <= max);
    }
}
