pub mod hide;
pub mod output;
pub mod process;

pub use hide::{HideErrorPolicy, HideOutput, HideReport, HideResult, hide_old_summaries};
pub use output::write_workflow_output;
pub use process::{
    ProcessOptions, ProcessOutput, no_modify_applies, process_formalities, render_comment,
};
