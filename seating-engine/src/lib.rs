//! Seating Engine - 婚礼座位规划核心
//!
//! # 架构概述
//!
//! The spatial and assignment core of the seating-plan designer:
//!
//! - **Plan** (`plan`): layout state, command actions and pure event appliers
//! - **History** (`history`): per-mode undo/redo snapshot stack
//! - **Assignment** (`assignment`): conflict detection and scored recommendations
//! - **Viewport** (`viewport`): world ↔ screen transform, fit and zoom
//! - **Locks** (`locks`): per-table edit locks for collaboration
//! - **Persistence** (`persistence`): store traits and the debounced autosave worker
//! - **Session** (`session`): the facade tying them together
//!
//! # 模块结构
//!
//! ```text
//! seating-engine/src/
//! ├── core/          # 配置
//! ├── plan/          # 状态、命令、事件
//! ├── assignment/    # 冲突检测、推荐评分
//! ├── session/       # PlanSession
//! ├── persistence/   # 存储边界、自动保存
//! └── utils/         # 日志
//! ```

pub mod assignment;
pub mod core;
pub mod frame;
pub mod history;
pub mod locks;
pub mod persistence;
pub mod plan;
pub mod session;
pub mod utils;
pub mod viewport;

// Re-export 公共类型
pub use assignment::{AssignmentEngine, Recommendation, Suggestion, SuggestionAction};
pub use core::{PlannerConfig, ScoringWeights};
pub use frame::TableEdit;
pub use history::HistoryManager;
pub use locks::{LockManager, LockTable};
pub use persistence::{
    AutosaveHandle, AutosaveWorker, GuestDirectory, PersistenceError, PlanStore, SyncStatus,
};
pub use plan::{GuestRoster, PlanError, PlanResult, PlanState};
pub use session::{AutoAssignReport, FrameFlush, PlanSession};
pub use viewport::{ViewportController, ViewportState};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
