use alloc::{boxed::Box, format, vec};
use core::fmt;

use tracing::{debug, trace};

use crate::{
    error::{Result, RingBufferError},
    sizing::next_capacity,
};

/// `RingBuffer` 是流式 I/O 的可增长环形字节暂存区。
///
/// # 设计动机（Why）
/// - 网络读写需要一个“尾部追加、头部消费”的字节队列；若消费后整体前移数据，
///   每次读取都要付出 O(n) 的搬移代价。环形布局让读写游标各自回绕，复用已消费的空间。
/// - 峰值流量下需要自动扩容，但必须有硬上限，防止对端无限灌入导致内存失控。
///
/// # 架构关系（How）
/// - `backing` 为独占持有的连续数组，长度即当前容量；扩容时整体替换，旧数组直接丢弃，不存在别名；
/// - `read_pos`/`write_pos` 为 `[0, capacity)` 内的游标，按容量回绕；
/// - 写入前统一经过 `ensure_capacity`：空闲槽位严格多于写入长度时原地写入，
///   否则按 2 的幂扩容并把一段或两段未读数据搬移到新数组起点。
///
/// # 契约说明（What）
/// - 任意时刻最多存放 `capacity - 1` 字节：牺牲一个槽位，使 `read_pos == write_pos` 唯一表示“空”；
/// - `available() = (write_pos - read_pos) mod capacity`；
/// - `read`/`write` 失败时不修改任何状态，可在前置条件变化后重试；
/// - 非线程安全：所有修改都要求 `&mut self`，并发访问需由持有者在外部串行化。
///
/// # 风险与取舍（Trade-offs）
/// - 容量取整为 2 的幂，但会被 `max_capacity` 截断；上限本身不是 2 的幂时，触顶后的容量即为上限值。
///   游标回绕使用比较与减法而非位掩码，因此不依赖容量为 2 的幂。
/// - 扩容只增不减；需要归还峰值内存时由持有者丢弃并重建缓冲。
pub struct RingBuffer {
    backing: Box<[u8]>,
    max_capacity: usize,
    read_pos: usize,
    write_pos: usize,
}

impl RingBuffer {
    /// 以初始尺寸与容量上限构造缓冲。
    ///
    /// # 前置条件
    /// - `initial_size <= max_capacity`，否则返回 [`RingBufferError::InvalidArgument`]；
    /// - `initial_size` 的 2 的幂取整必须可在 `usize` 内表示。
    ///
    /// # 后置条件
    /// - `capacity()` 为不小于 `initial_size` 的最小 2 的幂，并以 `max_capacity` 截断；
    /// - `available() == 0`。
    pub fn new(initial_size: usize, max_capacity: usize) -> Result<Self> {
        if initial_size > max_capacity {
            return Err(RingBufferError::invalid_argument(format!(
                "initial requested size {initial_size} larger than maximum size {max_capacity}"
            )));
        }
        let capacity = next_capacity(initial_size, max_capacity)?;
        trace!(initial_size, capacity, max_capacity, "ring buffer allocated");
        Ok(Self {
            backing: vec![0u8; capacity].into_boxed_slice(),
            max_capacity,
            read_pos: 0,
            write_pos: 0,
        })
    }

    /// 当前底层数组长度。可存放的字节数比它少一。
    pub fn capacity(&self) -> usize {
        self.backing.len()
    }

    /// 构造时确定的容量上限，扩容永不越过该值。
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// 尚未读取的字节数。
    pub fn available(&self) -> usize {
        if self.write_pos >= self.read_pos {
            self.write_pos - self.read_pos
        } else {
            self.write_pos + self.capacity() - self.read_pos
        }
    }

    pub fn is_empty(&self) -> bool {
        self.read_pos == self.write_pos
    }

    /// 在触及容量上限前最多还能写入的字节数。
    ///
    /// 由两部分组成：当前数组中除牺牲槽位外的空闲槽位，即 `(read_pos - write_pos - 1) mod capacity`，
    /// 以及未来扩容可获得的余量 `max_capacity - capacity`。容量为 0 时空闲部分按 0 计。
    pub fn max_possible_remaining_capacity(&self) -> usize {
        let free = (self.capacity() - self.available()).saturating_sub(1);
        free + (self.max_capacity - self.capacity())
    }

    /// 未读字节按逻辑顺序拆成至多两段：从 `read_pos` 到数组末尾的尾段，以及回绕后从 0 开始的头段。
    ///
    /// 第二段在未回绕时为空。返回的切片借用缓冲，下一次修改前有效。
    pub fn segments(&self) -> (&[u8], &[u8]) {
        if self.write_pos >= self.read_pos {
            (&self.backing[self.read_pos..self.write_pos], &[])
        } else {
            (&self.backing[self.read_pos..], &self.backing[..self.write_pos])
        }
    }

    /// 读取恰好 `dst.len()` 字节并推进读游标。
    ///
    /// # 契约说明（What）
    /// - `dst.len() > available()` 时返回 [`RingBufferError::Underflow`]，读游标与数据均不变；
    /// - 成功后 `available()` 减少 `dst.len()`；底层字节不被清除，只是失去“未读”身份。
    pub fn read(&mut self, dst: &mut [u8]) -> Result<()> {
        let available = self.available();
        if dst.len() > available {
            return Err(RingBufferError::Underflow {
                requested: dst.len(),
                available,
            });
        }
        self.copy_out(dst);
        Ok(())
    }

    /// 以“偏移 + 长度”形式读取，写入 `dst[offset..offset + len]`。
    ///
    /// 区间越界属于调用方的切片越界，按 Rust 切片语义 panic；缓冲自身只校验可读字节数。
    pub fn read_raw_bytes(&mut self, dst: &mut [u8], offset: usize, len: usize) -> Result<()> {
        self.read(&mut dst[offset..][..len])
    }

    /// 追加 `src` 的全部字节，必要时先扩容。返回 `&mut Self` 以便链式调用。
    ///
    /// # 契约说明（What）
    /// - 即使扩容到 `max_capacity` 仍放不下“未读字节 + 新字节 + 牺牲槽位”时，
    ///   返回 [`RingBufferError::Overflow`]，不发生部分写入；
    /// - 成功后 `available()` 增加 `src.len()`，且此前未读的字节顺序不变。
    pub fn write(&mut self, src: &[u8]) -> Result<&mut Self> {
        self.ensure_capacity(src.len())?;
        self.copy_in(src);
        Ok(self)
    }

    /// 以“偏移 + 长度”形式写入 `src[offset..offset + len]`。
    pub fn put_raw_bytes(&mut self, src: &[u8], offset: usize, len: usize) -> Result<&mut Self> {
        self.write(&src[offset..][..len])
    }

    /// 确保还能再写入 `len` 字节，必要时扩容并压实。
    ///
    /// # 执行逻辑（How）
    /// 1. 空闲槽位严格多于 `len` 时直接返回：严格不等号为牺牲槽位留出位置，
    ///    因此带余量的小写入永远不会触发重新分配；
    /// 2. 否则所需尺寸为 `available + len + 1`，向上取整为 2 的幂并以上限截断；
    /// 3. 截断后仍小于所需尺寸即为上溢；
    /// 4. 分配新数组，把未读数据搬到起点：未回绕时是一段连续拷贝，
    ///    回绕时先拷贝 `read_pos` 右侧的尾段，再紧接着拷贝 `write_pos` 左侧的头段；
    /// 5. 读游标归零，写游标落在 `available` 处，整体替换底层数组。
    pub(crate) fn ensure_capacity(&mut self, len: usize) -> Result<()> {
        let available = self.available();
        let capacity = self.capacity();
        if capacity - available > len {
            return Ok(());
        }

        let overflow = RingBufferError::Overflow {
            requested: len,
            available,
            max_capacity: self.max_capacity,
        };
        let needed = match available.checked_add(len).and_then(|n| n.checked_add(1)) {
            Some(needed) if needed <= self.max_capacity => needed,
            _ => return Err(overflow),
        };
        // 2 的幂无法在 usize 内表示时必然大于上限，截断结果就是上限本身。
        let next = next_capacity(needed, self.max_capacity).unwrap_or(self.max_capacity);
        if next < needed {
            return Err(overflow);
        }

        let mut grown = vec![0u8; next].into_boxed_slice();
        let wrapped = self.write_pos < self.read_pos;
        if wrapped {
            let tail = capacity - self.read_pos;
            grown[..tail].copy_from_slice(&self.backing[self.read_pos..]);
            grown[tail..available].copy_from_slice(&self.backing[..self.write_pos]);
        } else {
            grown[..available].copy_from_slice(&self.backing[self.read_pos..self.write_pos]);
        }
        debug!(
            old_capacity = capacity,
            new_capacity = next,
            available,
            wrapped,
            "ring buffer grown"
        );

        self.backing = grown;
        self.read_pos = 0;
        self.write_pos = available;
        Ok(())
    }

    /// 将 `dst.len()` 个未读字节拷贝出去并推进读游标。调用方保证 `dst.len() <= available()`。
    pub(crate) fn copy_out(&mut self, dst: &mut [u8]) {
        let len = dst.len();
        let tail = self.capacity() - self.read_pos;
        if len <= tail {
            dst.copy_from_slice(&self.backing[self.read_pos..self.read_pos + len]);
        } else {
            dst[..tail].copy_from_slice(&self.backing[self.read_pos..]);
            dst[tail..].copy_from_slice(&self.backing[..len - tail]);
        }
        self.consume(len);
    }

    /// 将 `src` 拷贝到写游标处并推进写游标。调用方已通过 `ensure_capacity(src.len())`。
    pub(crate) fn copy_in(&mut self, src: &[u8]) {
        let len = src.len();
        let tail = self.capacity() - self.write_pos;
        if len <= tail {
            self.backing[self.write_pos..self.write_pos + len].copy_from_slice(src);
        } else {
            self.backing[self.write_pos..].copy_from_slice(&src[..tail]);
            self.backing[..len - tail].copy_from_slice(&src[tail..]);
        }
        self.write_pos = wrap(self.write_pos + len, self.capacity());
    }

    /// 丢弃 `len` 个未读字节。调用方保证 `len <= available()`。
    pub(crate) fn consume(&mut self, len: usize) {
        self.read_pos = wrap(self.read_pos + len, self.capacity());
    }
}

/// 游标回绕：`pos` 至多比容量多出一圈以内，一次减法即可归位。
#[inline]
fn wrap(pos: usize, capacity: usize) -> usize {
    if pos >= capacity { pos - capacity } else { pos }
}

impl fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("read_pos", &self.read_pos)
            .field("write_pos", &self.write_pos)
            .field("capacity", &self.capacity())
            .field("max_capacity", &self.max_capacity)
            .field("available", &self.available())
            .finish()
    }
}

impl fmt::Display for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RingBuffer [rpos={}, wpos={}, size={}]",
            self.read_pos,
            self.write_pos,
            self.capacity()
        )
    }
}
