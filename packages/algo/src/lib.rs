//! # hanzi-algo - 汉字复习调度核心算法库
//!
//! 本 crate 提供纯 Rust 实现的复习调度算法:
//!
//! - **Forgetting Curve** - 单参数指数遗忘曲线 `P = 1 - exp(-t / S)`
//! - **Memory Update** - 答题后更新稳定度 (stability) 与易度 (ease)
//! - **Session Selection** - 当前课必出 + 旧课按遗忘概率排序补足
//!
//! ## 设计理念
//!
//! - **纯函数** - 不做 I/O，不持有调度状态，所有状态都在 [`HanziItem`] 中
//! - **容错** - 缺失字段补默认值，异常稳定度在读取时截断，时钟回拨按 0 天处理
//!
//! ## 模块结构
//!
//! - [`normalize`] - 默认值补齐
//! - [`estimator`] - 遗忘概率
//! - [`updater`] - 答题后记忆参数更新
//! - [`selector`] - 本次测试题目选择
//! - [`types`] - 公共类型和常量
//!
//! ## 使用示例
//!
//! ```rust
//! use hanzi_algo::{select_for_session, update_after_answer, HanziItem};
//!
//! let now = 1_700_000_000_000;
//! let mut pool = vec![HanziItem::new("1_1", "人", 1), HanziItem::new("2_1", "口", 2)];
//!
//! let session = select_for_session(&pool, 2, now);
//! assert_eq!(session.len(), 2);
//!
//! update_after_answer(&mut pool[0], true, now);
//! assert_eq!(pool[0].history.len(), 1);
//! ```

// ============================================================================
// 模块声明
// ============================================================================

pub mod estimator;
pub mod normalize;
pub mod selector;
pub mod types;
pub mod updater;

// ============================================================================
// 重新导出
// ============================================================================

/// 重新导出所有公共类型
pub use types::*;

pub use estimator::{days_between, forgetting_prob};
pub use normalize::{ensure_defaults, normalized};
pub use selector::{plan_session, plan_session_with, select_for_session, select_for_session_with};
pub use updater::update_after_answer;
