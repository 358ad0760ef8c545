//! Launch Core
//!
//! A ROS2-inspired declarative launch interpreter.
//!
//! # Overview
//!
//! A launch description is a tree of actions parsed from a frontend (XML or
//! YAML) or built in code. The interpreter:
//! - Resolves `$(var ...)` / `$(env ...)` substitutions lazily, at execution time
//! - Runs actions depth-first against a shared [`LaunchContext`]
//! - Queues events and dispatches them to registered [`EventHandler`]s
//! - Shuts the launched system down when a required process exits
//!
//! # Example Launch File
//!
//! ```yaml
//! launch:
//!   - arg:
//!       name: robot
//!       default: "turtle"
//!   - let:
//!       name: log_dir
//!       value: "$(env HOME)/.launch/$(var robot)"
//!   - group:
//!       scoped: true
//!       children:
//!         - set_env:
//!             name: ROBOT_NAME
//!             value: "$(var robot)"
//!         - log:
//!             message: "logging to $(var log_dir)"
//! ```
//!
//! The same description in XML:
//!
//! ```xml
//! <launch>
//!   <arg name="robot" default="turtle"/>
//!   <let name="log_dir" value="$(env HOME)/.launch/$(var robot)"/>
//!   <group scoped="true">
//!     <set_env name="ROBOT_NAME" value="$(var robot)"/>
//!     <log message="logging to $(var log_dir)"/>
//!   </group>
//! </launch>
//! ```

pub mod action;
pub mod actions;
pub mod condition;
pub mod context;
pub mod description;
pub mod event;
pub mod frontend;
pub mod introspection;
pub mod service;
pub mod substitution;

pub use action::{Action, ActionError, ActionParams, ActionRef, ExecuteResult, ParseAction};
pub use condition::Condition;
pub use context::{ContextSnapshot, LaunchContext};
pub use description::LaunchDescription;
pub use event::{Event, EventHandler};
pub use frontend::{
    ActionRegistry, Attribute, Entity, ParseError, Parser, RegistrationError,
};
pub use introspection::{is_a, is_a_subclass, Class, HasClass, IntrospectionError, Object};
pub use service::{LaunchOutcome, LaunchService, ServiceConfig, ServiceError};
pub use substitution::{
    perform_substitutions, ResolutionError, SomeSubstitutions, Substitution,
    SubstitutionSyntaxError,
};
