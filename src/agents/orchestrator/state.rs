use crate::error::{BriefingError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BriefingStage {
    Received,
    Classified,
    Delegating,
    Synthesizing,
    Done,
    Failed,
}

impl BriefingStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BriefingStage::Done | BriefingStage::Failed)
    }

    fn allows(&self, next: BriefingStage) -> bool {
        use BriefingStage::*;
        match (self, next) {
            (from, Failed) => !from.is_terminal(),
            (Received, Classified)
            | (Classified, Delegating)
            | (Classified, Done)
            | (Delegating, Synthesizing)
            | (Synthesizing, Done) => true,
            _ => false,
        }
    }
}

impl fmt::Display for BriefingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Stage tracker for one attempt at a briefing
#[derive(Debug)]
pub struct BriefingRun {
    run_id: String,
    stage: BriefingStage,
}

impl BriefingRun {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            stage: BriefingStage::Received,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn stage(&self) -> BriefingStage {
        self.stage
    }

    pub fn advance(&mut self, next: BriefingStage) -> Result<()> {
        if !self.stage.allows(next) {
            log::error!(
                "[{}] Rejected briefing transition {} -> {}",
                self.run_id,
                self.stage,
                next
            );
            return Err(BriefingError::InvalidTransition {
                from: self.stage.to_string(),
                to: next.to_string(),
            });
        }

        log::debug!("[{}] Briefing {} -> {}", self.run_id, self.stage, next);
        self.stage = next;
        Ok(())
    }

    /// Move to `Failed` unless the run already finished.
    pub fn fail(&mut self, reason: &str) {
        if self.stage.is_terminal() {
            return;
        }
        log::debug!("[{}] Briefing {} -> Failed: {}", self.run_id, self.stage, reason);
        self.stage = BriefingStage::Failed;
    }
}
