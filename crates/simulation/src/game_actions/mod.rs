pub mod actions;
pub mod context;
pub mod dispatcher;
pub mod executor;
pub mod plugin;
pub mod queue;
pub mod result_log;
pub mod results;

pub use actions::*;
pub use context::{ActionDispatcher, ParkContext, ParkParams, ParkRef, ParkView};
pub use dispatcher::WorldDispatcher;
pub use executor::{execute_action, execute_queued_actions, query_action};
pub use plugin::GameActionsPlugin;
pub use queue::*;
pub use result_log::{ActionResultLog, SourceTally};
pub use results::*;
