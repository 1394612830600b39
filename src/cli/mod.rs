//! Release workflow driven by the command line

pub mod orchestration;

pub use orchestration::{
    plan_release, publish_release, run_release_workflow, ReleasePlan, ReleaseWorkflowArgs,
    WorkflowResult,
};
