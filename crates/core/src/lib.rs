pub mod error;
pub mod event;
pub mod history;
pub mod source;
pub mod state;

pub use error::{GraphError, Result};
pub use event::Message;
pub use history::RollingHistory;
pub use source::CpuSource;
pub use state::{CpuData, RunState, Statistics, ViewMode};
