//! Built-in permission catalog

use super::types::{ModuleDescriptor, PermissionSchema, ResourceDescriptor};
use tracing::debug;

/// Default scope levels, weakest first
pub const SCOPE_LEVELS: [&str; 3] = ["own", "team", "all"];

impl PermissionSchema {
    /// The catalog shipped with the engine
    pub fn builtin() -> Self {
        debug!("Building built-in permission schema");

        Self::new()
            // CRM
            .module(
                "crm",
                ModuleDescriptor::new("CRM")
                    .resource(
                        "leads",
                        ResourceDescriptor::new("Leads")
                            .scope("view", &SCOPE_LEVELS)
                            .boolean("create")
                            .scope("edit", &SCOPE_LEVELS)
                            .boolean("delete")
                            .scope("export", &SCOPE_LEVELS),
                    )
                    .resource(
                        "activities",
                        ResourceDescriptor::new("Activities")
                            .scope("view", &SCOPE_LEVELS)
                            .boolean("create")
                            .scope("edit", &SCOPE_LEVELS)
                            .boolean("delete"),
                    )
                    .resource(
                        "payments",
                        ResourceDescriptor::new("Payments")
                            .scope("view", &SCOPE_LEVELS)
                            .boolean("create")
                            .scope("edit", &SCOPE_LEVELS)
                            .boolean("delete"),
                    ),
            )
            // Messaging
            .module(
                "whatsapp",
                ModuleDescriptor::new("WhatsApp")
                    .resource(
                        "messages",
                        ResourceDescriptor::new("Messages")
                            .boolean("send")
                            .boolean("view")
                            .boolean("delete"),
                    )
                    .resource(
                        "templates",
                        ResourceDescriptor::new("Templates")
                            .boolean("view")
                            .boolean("create")
                            .boolean("edit")
                            .boolean("delete"),
                    ),
            )
            // Scheduling
            .module(
                "meetings",
                ModuleDescriptor::new("Meetings").resource(
                    "meetings",
                    ResourceDescriptor::new("Meetings")
                        .scope("view", &SCOPE_LEVELS)
                        .boolean("create")
                        .scope("edit", &SCOPE_LEVELS)
                        .scope("delete", &SCOPE_LEVELS)
                        .scope("cancel", &SCOPE_LEVELS),
                ),
            )
            .module(
                "tasks",
                ModuleDescriptor::new("Tasks").resource(
                    "tasks",
                    ResourceDescriptor::new("Tasks")
                        .scope("view", &SCOPE_LEVELS)
                        .boolean("create")
                        .scope("edit", &SCOPE_LEVELS)
                        .scope("delete", &SCOPE_LEVELS)
                        .boolean("assign"),
                ),
            )
    }
}
