//! Keyboard shortcut registry and documentation.

use crate::ui::UiAction;
use sketchify_core::input::Modifiers;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    pub action: UiAction,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
        action: UiAction,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Whether a key press triggers this shortcut. Cmd counts as Ctrl.
    pub fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == modifiers.command()
            && self.shift == modifiers.shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, "Undo", UiAction::Undo),
            Shortcut::new("Z", true, true, "Redo", UiAction::Redo),
            Shortcut::new("Y", true, false, "Redo", UiAction::Redo),
            Shortcut::new("E", true, false, "Export to PNG", UiAction::ExportPng),
        ]
    }

    /// Action bound to a key press, if any.
    pub fn lookup(key: &str, modifiers: Modifiers) -> Option<UiAction> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, modifiers))
            .map(|shortcut| shortcut.action)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::default()
        }
    }

    #[test]
    fn test_undo_redo_bindings() {
        assert_eq!(ShortcutRegistry::lookup("z", ctrl()), Some(UiAction::Undo));
        let ctrl_shift = Modifiers {
            shift: true,
            ..ctrl()
        };
        assert_eq!(ShortcutRegistry::lookup("Z", ctrl_shift), Some(UiAction::Redo));
        assert_eq!(ShortcutRegistry::lookup("y", ctrl()), Some(UiAction::Redo));
    }

    #[test]
    fn test_meta_acts_as_ctrl() {
        let meta = Modifiers {
            meta: true,
            ..Modifiers::default()
        };
        assert_eq!(ShortcutRegistry::lookup("z", meta), Some(UiAction::Undo));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(ShortcutRegistry::lookup("z", Modifiers::default()), None);
        assert_eq!(ShortcutRegistry::lookup("q", ctrl()), None);
    }

    #[test]
    fn test_format() {
        let redo = &ShortcutRegistry::all()[1];
        assert_eq!(redo.format(), "Ctrl+Shift+Z");
    }
}
