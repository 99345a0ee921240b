#![cfg(test)]

use std::any::Any;
use std::collections::HashMap;

use super::common::{mem_mod, mem_mod_with};
use crate::mod_system::capability::{CapabilityKind, ModProvider};
use crate::mod_system::manifest::{ManifestBuilder, ModPriority};
use crate::mod_system::{ModManager, NoopActivator};

/// A locale table contributed by a mod
struct LocaleTable {
    language: &'static str,
    entries: HashMap<&'static str, &'static str>,
}

impl ModProvider for LocaleTable {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Locale
    }

    fn name(&self) -> &str {
        self.language
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A console command contributed by a mod
struct Command(&'static str);

impl ModProvider for Command {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Command
    }

    fn name(&self) -> &str {
        self.0
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn locale(language: &'static str, key: &'static str, value: &'static str) -> Box<LocaleTable> {
    Box::new(LocaleTable {
        language,
        entries: HashMap::from([(key, value)]),
    })
}

fn setup() -> ModManager {
    let mut manager = ModManager::new();
    manager.set_activator(Box::new(NoopActivator));
    manager.register_mod(mem_mod("base", ModPriority::Low)).unwrap();
    manager
        .register_mod(mem_mod_with(ManifestBuilder::new("tweaks", "Tweaks", "1.0").load_after("base")))
        .unwrap();
    manager.register_mod(mem_mod("disabled", ModPriority::High)).unwrap();

    manager.attach_provider("base", locale("en", "greeting", "Hello")).unwrap();
    manager.attach_provider("base", Box::new(Command("spawn"))).unwrap();
    manager.attach_provider("tweaks", locale("en", "greeting", "Howdy")).unwrap();
    manager.attach_provider("disabled", locale("de", "greeting", "Hallo")).unwrap();
    manager.disable_mod("disabled");
    manager
}

#[test]
fn test_no_providers_before_loading() {
    let manager = setup();
    assert!(manager.providers(CapabilityKind::Locale).is_empty());

    let base = manager.get_mod("base").unwrap();
    assert_eq!(base.capabilities(), vec![CapabilityKind::Command, CapabilityKind::Locale]);
    assert!(!base.has_capability(CapabilityKind::Entity));
}

#[test]
fn test_providers_follow_load_order() {
    let mut manager = setup();
    assert!(manager.load_all().unwrap().success());

    let locales = manager.providers(CapabilityKind::Locale);
    let owners: Vec<&str> = locales.iter().map(|(id, _)| *id).collect();
    assert_eq!(owners, vec!["base", "tweaks"]);

    // Later mods override earlier ones
    let mut merged: HashMap<&str, &str> = HashMap::new();
    for (_, provider) in &locales {
        let table = provider
            .as_any()
            .downcast_ref::<LocaleTable>()
            .expect("locale providers are LocaleTables");
        assert_eq!(table.name(), "en");
        merged.extend(table.entries.iter().map(|(k, v)| (*k, *v)));
    }
    assert_eq!(merged.get("greeting"), Some(&"Howdy"));

    let commands = manager.providers(CapabilityKind::Command);
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].1.name(), "spawn");
    assert!(manager.providers(CapabilityKind::Quest).is_empty());
}

#[test]
fn test_unloaded_mods_stop_contributing() {
    let mut manager = setup();
    manager.load_all().unwrap();
    manager.unload_all();
    assert!(manager.providers(CapabilityKind::Locale).is_empty());
}
