#![no_main]

use libfuzzer_sys::fuzz_target;
use spark_ring_buffer_fuzz::{RingScript, execute_ring_script};

// 差分执行：真实缓冲与影子模型在每一步后都必须一致。
fuzz_target!(|script: RingScript| {
    execute_ring_script(&script);
});
