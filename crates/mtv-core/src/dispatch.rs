//! Forwarding of user intent to the host.
//!
//! The panel never edits records. Every row or button action becomes an
//! [`ActionEvent`] handed to the host's [`ActionHandler`]; the call is fire
//! and forget.

use tracing::debug;

use mtv_model::{ActionCommand, ActionEvent};

use crate::category::{CategoryEntry, DEFAULT_TOOL_GROUP};
use crate::state::ViewState;

/// Host callback receiving forwarded actions.
pub trait ActionHandler {
    fn on_action(&self, event: &ActionEvent);
}

impl<F> ActionHandler for F
where
    F: Fn(&ActionEvent),
{
    fn on_action(&self, event: &ActionEvent) {
        self(event);
    }
}

/// Host facility that switches the active measurement tool.
pub trait ToolActivator {
    fn activate_tool(&self, tool_name: &str, tool_group_id: &str);
}

impl<F> ToolActivator for F
where
    F: Fn(&str, &str),
{
    fn activate_tool(&self, tool_name: &str, tool_group_id: &str) {
        self(tool_name, tool_group_id);
    }
}

/// Outcome of a dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Forwarded,
    /// Editing is disabled and the command edits the record set.
    Suppressed,
}

/// Routes actions from one panel to the host.
pub struct ActionDispatcher<'h> {
    handler: Option<&'h dyn ActionHandler>,
    tools: Option<&'h dyn ToolActivator>,
    disable_editing: bool,
    tool_group_id: String,
}

impl<'h> ActionDispatcher<'h> {
    /// A dispatcher with no handler; every action is dropped.
    pub fn detached() -> Self {
        Self {
            handler: None,
            tools: None,
            disable_editing: false,
            tool_group_id: DEFAULT_TOOL_GROUP.to_string(),
        }
    }

    pub fn new(handler: &'h dyn ActionHandler) -> Self {
        Self {
            handler: Some(handler),
            ..Self::detached()
        }
    }

    #[must_use]
    pub fn with_tools(mut self, tools: &'h dyn ToolActivator) -> Self {
        self.tools = Some(tools);
        self
    }

    #[must_use]
    pub fn with_editing_disabled(mut self, disable_editing: bool) -> Self {
        self.disable_editing = disable_editing;
        self
    }

    #[must_use]
    pub fn with_tool_group(mut self, tool_group_id: impl Into<String>) -> Self {
        self.tool_group_id = tool_group_id.into();
        self
    }

    pub fn editing_disabled(&self) -> bool {
        self.disable_editing
    }

    /// Row commands exposed under the current editing mode.
    pub fn row_actions(&self) -> Vec<ActionCommand> {
        ActionCommand::ROW
            .into_iter()
            .filter(|command| !(self.disable_editing && command.is_editing()))
            .collect()
    }

    /// Whether the "add measurement" buttons are exposed.
    pub fn can_add(&self) -> bool {
        !self.disable_editing
    }

    /// Forward an event to the host.
    pub fn dispatch(&self, event: &ActionEvent) -> Dispatch {
        if self.disable_editing && event.command.is_editing() {
            debug!(command = %event.command, "action suppressed: editing disabled");
            return Dispatch::Suppressed;
        }
        debug!(command = %event.command, uid = event.uid.as_deref(), "action forwarded");
        if let Some(handler) = self.handler {
            handler.on_action(event);
        }
        Dispatch::Forwarded
    }

    /// Forward a row action for the record `uid`.
    pub fn dispatch_row(&self, command: ActionCommand, uid: &str) -> Dispatch {
        self.dispatch(&ActionEvent::for_record(command, uid))
    }

    /// Handle a category "add measurement" button press.
    ///
    /// Records the press, activates the category's tool, then asks the host
    /// to add a measurement tagged with the category.
    pub fn press_category_button(&self, state: &mut ViewState, button: &CategoryEntry) -> Dispatch {
        if !self.can_add() {
            debug!(category = %button.label, "category button ignored: editing disabled");
            return Dispatch::Suppressed;
        }
        state.record_category_press(button.label.clone());
        if let (Some(tools), Some(tool)) = (self.tools, button.tool.as_deref()) {
            tools.activate_tool(tool, &self.tool_group_id);
        }
        self.dispatch(&ActionEvent::add(button.tag.clone(), button.label.clone()))
    }
}
