//! Built-in actions

mod declare_launch_argument;
mod emit_event;
mod group;
mod log_info;
mod register_event_handler;
mod reset_launch_configurations;
mod set_environment_variable;
mod set_launch_configuration;
mod shutdown;
mod unset_environment_variable;

pub use declare_launch_argument::*;
pub use emit_event::*;
pub use group::*;
pub use log_info::*;
pub use register_event_handler::*;
pub use reset_launch_configurations::*;
pub use set_environment_variable::*;
pub use set_launch_configuration::*;
pub use shutdown::*;
pub use unset_environment_variable::*;
