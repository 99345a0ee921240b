use std::any::Any;
use std::fmt;

/// The kinds of content a loaded mod can contribute to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityKind {
    Entity,
    Item,
    Scene,
    Dialog,
    Quest,
    Ai,
    Command,
    Locale,
}

impl CapabilityKind {
    pub const ALL: [CapabilityKind; 8] = [
        CapabilityKind::Entity,
        CapabilityKind::Item,
        CapabilityKind::Scene,
        CapabilityKind::Dialog,
        CapabilityKind::Quest,
        CapabilityKind::Ai,
        CapabilityKind::Command,
        CapabilityKind::Locale,
    ];
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CapabilityKind::Entity => "entity",
            CapabilityKind::Item => "item",
            CapabilityKind::Scene => "scene",
            CapabilityKind::Dialog => "dialog",
            CapabilityKind::Quest => "quest",
            CapabilityKind::Ai => "ai",
            CapabilityKind::Command => "command",
            CapabilityKind::Locale => "locale",
        };
        f.write_str(s)
    }
}

/// A provider object a mod hands to the host (an entity provider, a locale
/// table, ...). Consumers look providers up by [`CapabilityKind`] and downcast
/// through [`as_any`](ModProvider::as_any) to the concrete type they know.
pub trait ModProvider: Send + Sync {
    fn kind(&self) -> CapabilityKind;

    fn name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}

impl fmt::Debug for dyn ModProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModProvider")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}
