// ==========================================
// 采购后台 - 采购单进度条派生
// ==========================================
// 职责: PoStatus（封闭集合）→ 进度步骤状态（封闭集合）的纯函数
// ==========================================

use crate::domain::types::PoStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressStep {
    Created,   // 创建
    Approved,  // 审批
    Confirmed, // 供应商确认
    Shipped,   // 发货
    Received,  // 收货
    Closed,    // 关闭
}

impl ProgressStep {
    pub const ALL: [ProgressStep; 6] = [
        ProgressStep::Created,
        ProgressStep::Approved,
        ProgressStep::Confirmed,
        ProgressStep::Shipped,
        ProgressStep::Received,
        ProgressStep::Closed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProgressStep::Created => "创建",
            ProgressStep::Approved => "审批",
            ProgressStep::Confirmed => "供应商确认",
            ProgressStep::Shipped => "发货",
            ProgressStep::Received => "收货",
            ProgressStep::Closed => "关闭",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepState {
    Finished,   // 已完成
    InProgress, // 进行中
    Waiting,    // 未开始
    Error,      // 中止
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStatus {
    pub step: ProgressStep,
    pub state: StepState,
}

/// 当前所处步骤下标，以及该步骤的状态
///
/// 已取消的单据停在"审批"步骤并标记为 Error。
fn cursor(status: PoStatus) -> (usize, StepState) {
    match status {
        PoStatus::Draft => (1, StepState::Waiting),
        PoStatus::PendingApproval => (1, StepState::InProgress),
        PoStatus::Approved => (2, StepState::InProgress),
        PoStatus::Confirmed => (3, StepState::InProgress),
        PoStatus::PartiallyShipped => (3, StepState::InProgress),
        PoStatus::Shipped => (4, StepState::InProgress),
        PoStatus::PartiallyReceived => (4, StepState::InProgress),
        PoStatus::Received => (5, StepState::InProgress),
        PoStatus::Closed => (ProgressStep::ALL.len(), StepState::Finished),
        PoStatus::Cancelled => (1, StepState::Error),
    }
}

/// 派生进度条
pub fn progress_steps(status: PoStatus) -> Vec<StepStatus> {
    let (current, current_state) = cursor(status);

    ProgressStep::ALL
        .iter()
        .enumerate()
        .map(|(idx, step)| {
            let state = if idx < current {
                StepState::Finished
            } else if idx == current {
                current_state
            } else {
                StepState::Waiting
            };
            StepStatus { step: *step, state }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(status: PoStatus) -> Vec<StepState> {
        progress_steps(status).into_iter().map(|s| s.state).collect()
    }

    #[test]
    fn test_draft_only_created_finished() {
        use StepState::*;
        assert_eq!(
            states(PoStatus::Draft),
            vec![Finished, Waiting, Waiting, Waiting, Waiting, Waiting]
        );
    }

    #[test]
    fn test_shipped_in_progress_at_receiving() {
        use StepState::*;
        assert_eq!(
            states(PoStatus::Shipped),
            vec![Finished, Finished, Finished, Finished, InProgress, Waiting]
        );
    }

    #[test]
    fn test_closed_all_finished() {
        assert!(states(PoStatus::Closed)
            .iter()
            .all(|s| *s == StepState::Finished));
    }

    #[test]
    fn test_cancelled_marks_error() {
        let steps = progress_steps(PoStatus::Cancelled);
        assert_eq!(steps[1].state, StepState::Error);
        assert!(steps[2..].iter().all(|s| s.state == StepState::Waiting));
    }

    #[test]
    fn test_every_status_yields_full_bar() {
        for status in PoStatus::ALL {
            assert_eq!(progress_steps(status).len(), ProgressStep::ALL.len());
        }
    }
}
