//! Launch service - visits launch descriptions and dispatches events

use crate::action::{ActionError, ActionRef};
use crate::context::{ContextSnapshot, LaunchContext};
use crate::description::LaunchDescription;
use crate::event::Event;
use indexmap::IndexMap;
use serde::Serialize;

/// Launch service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Values for launch arguments, set before anything is visited
    pub launch_arguments: IndexMap<String, String>,
    /// Seed the context environment from this process
    pub inherit_environment: bool,
    /// Upper bound on events dispatched by one drain of the queue
    pub max_event_dispatches: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            launch_arguments: IndexMap::new(),
            inherit_environment: true,
            max_event_dispatches: 1024,
        }
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchOutcome {
    /// Reason of the first shutdown event, if one was dispatched
    pub shutdown_reason: Option<String>,
    /// Number of actions visited, including those skipped by a condition
    pub actions_executed: usize,
    /// Final launch configurations and environment
    pub context: ContextSnapshot,
}

/// Owns the launch context and drives actions and events through it
pub struct LaunchService {
    config: ServiceConfig,
    context: LaunchContext,
    actions_executed: usize,
}

impl LaunchService {
    /// Create a service with a fresh context
    pub fn new(config: ServiceConfig) -> Self {
        let mut context = if config.inherit_environment {
            LaunchContext::from_process_env()
        } else {
            LaunchContext::new()
        };
        for (name, value) in &config.launch_arguments {
            context.set_launch_configuration(name.clone(), value.clone());
        }
        Self {
            config,
            context,
            actions_executed: 0,
        }
    }

    pub fn context(&self) -> &LaunchContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut LaunchContext {
        &mut self.context
    }

    pub fn actions_executed(&self) -> usize {
        self.actions_executed
    }

    /// Visit every entity of `description` in order
    ///
    /// Events are drained after each top-level entity. Once shutdown has been
    /// dispatched the remaining entities are skipped.
    pub fn include(&mut self, description: &LaunchDescription) -> Result<(), ServiceError> {
        for (index, entity) in description.entities().iter().enumerate() {
            if self.context.is_shutdown() {
                log::info!(
                    "Shutting down, skipping {} remaining entities",
                    description.len() - index
                );
                break;
            }
            self.actions_executed += visit_depth_first(&mut self.context, entity)?;
            self.process_events()?;
        }
        Ok(())
    }

    /// Queue an event from outside (e.g. a process supervisor) and dispatch it
    pub fn deliver_event(&mut self, event: Event) -> Result<(), ServiceError> {
        self.context.emit_event(event);
        self.process_events()
    }

    /// Include `description` and report the outcome
    pub fn run(&mut self, description: &LaunchDescription) -> Result<LaunchOutcome, ServiceError> {
        log::info!("Launching {} entities...", description.len());
        self.include(description)?;
        let outcome = self.outcome();
        match &outcome.shutdown_reason {
            Some(reason) => log::info!("Launch shut down: {}", reason),
            None => log::info!("Launch description processed"),
        }
        Ok(outcome)
    }

    /// Current outcome, without running anything
    pub fn outcome(&self) -> LaunchOutcome {
        LaunchOutcome {
            shutdown_reason: self.context.shutdown_reason().map(str::to_string),
            actions_executed: self.actions_executed,
            context: self.context.snapshot(),
        }
    }

    /// Dispatch pending events in FIFO order until the queue is empty
    fn process_events(&mut self) -> Result<(), ServiceError> {
        let mut dispatched = 0;
        while let Some(event) = self.context.take_pending_event() {
            dispatched += 1;
            if dispatched > self.config.max_event_dispatches {
                return Err(ServiceError::EventDispatchLimit(
                    self.config.max_event_dispatches,
                ));
            }

            if let Event::Shutdown { reason, .. } = &event {
                if self.context.is_shutdown() {
                    log::debug!("Already shutting down, ignoring shutdown: {}", reason);
                    continue;
                }
                log::info!("Shutdown requested: {}", reason);
                self.context.mark_shutdown(reason.clone());
            }

            let handlers = self.context.handlers_for(&event);
            if handlers.is_empty() {
                log::debug!("No handler for event: {}", event);
                continue;
            }
            for handler in handlers {
                let executed = self.context.with_current_event(event.clone(), |context| {
                    let mut executed = 0;
                    for action in handler.entities() {
                        executed += visit_depth_first(context, action)?;
                    }
                    Ok::<_, ServiceError>(executed)
                })?;
                self.actions_executed += executed;
            }
        }
        Ok(())
    }
}

/// Visit `root` and every action it yields, depth-first and in order
///
/// Returns the number of actions visited. If an action fails, scopes opened
/// during the visit are popped so the launch configurations are restored.
fn visit_depth_first(context: &mut LaunchContext, root: &ActionRef) -> Result<usize, ServiceError> {
    let depth = context.launch_configurations_depth();
    let mut stack = vec![ActionRef::clone(root)];
    let mut visited = 0;
    while let Some(action) = stack.pop() {
        visited += 1;
        let yielded = match action.visit(context) {
            Ok(yielded) => yielded,
            Err(source) => {
                while context.launch_configurations_depth() > depth {
                    context.pop_launch_configurations();
                }
                return Err(ServiceError::Action {
                    action: action.describe(),
                    source,
                });
            }
        };
        if let Some(actions) = yielded {
            stack.extend(actions.into_iter().rev());
        }
    }
    Ok(visited)
}

/// Errors that can occur while running a launch description
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Action '{action}' failed: {source}")]
    Action {
        action: String,
        #[source]
        source: ActionError,
    },

    #[error("More than {0} events dispatched in one pass, aborting")]
    EventDispatchLimit(usize),
}
