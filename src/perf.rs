// ==========================================
// 卡车租赁 - 性能统计
// ==========================================
// 开关:
// - Debug 默认开启；Release 默认关闭
// - `TRUCK_ALLOCATION_PERF=1` 强制开启, `=0` 强制关闭
// ==========================================

use std::sync::OnceLock;
use std::time::Instant;

/// 性能统计开关环境变量
pub const PERF_ENV: &str = "TRUCK_ALLOCATION_PERF";

static PERF_ENABLED: OnceLock<bool> = OnceLock::new();

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 是否开启性能日志（首次调用时读取环境变量）
pub fn perf_enabled() -> bool {
    *PERF_ENABLED.get_or_init(|| match std::env::var(PERF_ENV) {
        Ok(v) => is_true(&v),
        Err(_) => cfg!(debug_assertions),
    })
}

/// 性能统计 Guard：在作用域结束时记录 elapsed_us
///
/// 使用方式：
/// ```ignore
/// let _perf = truck_allocation::perf::PerfGuard::new("allocation_plan");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Option<Instant>,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: perf_enabled().then(Instant::now),
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let Some(start) = self.start else {
            return;
        };
        let elapsed_us = start.elapsed().as_micros() as u64;
        tracing::info!(target: "perf", op = self.op, elapsed_us, "done");
    }
}
