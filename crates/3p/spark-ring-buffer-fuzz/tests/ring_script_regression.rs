//! 回归测试：重放固定的边界样本，确保差分执行逻辑在常规 `cargo test` 中可用。

use spark_ring_buffer_fuzz::{RingOp, RingScript, execute_ring_script};

#[test]
fn replay_boundary_scripts() {
    let scripts = [
        // 上限 4：写满 3 字节后任何写入都上溢。
        RingScript {
            initial_size: 1,
            max_size: 4,
            ops: vec![
                RingOp::Write { len: 3, fill: 1 },
                RingOp::Write { len: 1, fill: 2 },
                RingOp::Read { len: 2 },
                RingOp::Write { len: 2, fill: 3 },
                RingOp::Read { len: 4 },
                RingOp::Read { len: 3 },
            ],
        },
        // 写 3 读 2 多圈回绕后触发扩容。
        RingScript {
            initial_size: 8,
            max_size: 512,
            ops: (0..40)
                .flat_map(|i| {
                    [
                        RingOp::Write { len: 3, fill: i },
                        RingOp::Read { len: 2 },
                    ]
                })
                .collect(),
        },
        // 初始尺寸大于上限。
        RingScript {
            initial_size: 16,
            max_size: 8,
            ops: vec![RingOp::Write { len: 1, fill: 0 }],
        },
        // 上限为 0：一切写入都上溢。
        RingScript {
            initial_size: 0,
            max_size: 0,
            ops: vec![RingOp::Write { len: 0, fill: 0 }, RingOp::Read { len: 0 }],
        },
    ];

    for script in &scripts {
        execute_ring_script(script);
    }
}
