//! The macro namespace: builtins below, user and runtime definitions
//! on top, with group-scoped undo.

use rustc_hash::FxHashMap;

use crate::macro_expander::MacroDefinition;
use crate::macros::get_builtin;

pub(crate) struct Namespace<'a> {
    current: FxHashMap<String, MacroDefinition<'a>>,
    undef_stack: Vec<FxHashMap<String, Option<MacroDefinition<'a>>>>,
}

impl<'a> Namespace<'a> {
    /// Seeds the namespace with the caller's macros.
    pub fn new(user_macros: &'a FxHashMap<String, String>) -> Self {
        let mut current = FxHashMap::default();
        for (name, definition) in user_macros {
            current.insert(
                format!("\\{name}"),
                MacroDefinition::Text(std::borrow::Cow::Borrowed(definition.as_str())),
            );
        }
        Namespace {
            current,
            undef_stack: Vec::new(),
        }
    }

    /// Starts a new scope; definitions made after this are undone by
    /// the matching [`end_group`](Self::end_group).
    pub fn begin_group(&mut self) {
        self.undef_stack.push(FxHashMap::default());
    }

    pub fn end_group(&mut self) {
        let Some(undefs) = self.undef_stack.pop() else {
            // Unbalanced \endgroup is caught by the parser; ignore.
            return;
        };
        for (name, value) in undefs {
            match value {
                Some(value) => self.current.insert(name, value),
                None => self.current.remove(&name),
            };
        }
    }

    pub fn end_groups(&mut self) {
        while !self.undef_stack.is_empty() {
            self.end_group();
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.current.contains_key(name) || get_builtin(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<MacroDefinition<'a>> {
        self.current
            .get(name)
            .cloned()
            .or_else(|| get_builtin(name))
    }

    /// Defines (or, with `None`, undefines) a macro. Local definitions
    /// are recorded for undo; global ones punch through every open
    /// scope.
    pub fn set(&mut self, name: &str, value: Option<MacroDefinition<'a>>, global: bool) {
        if global {
            for undefs in &mut self.undef_stack {
                undefs.remove(name);
            }
            if let Some(undefs) = self.undef_stack.last_mut() {
                // Keep the value past the group end.
                undefs.insert(name.to_string(), value.clone());
            }
        } else if let Some(undefs) = self.undef_stack.last_mut()
            && !undefs.contains_key(name)
        {
            undefs.insert(name.to_string(), self.current.get(name).cloned());
        }
        match value {
            Some(value) => self.current.insert(name.to_string(), value),
            None => self.current.remove(name),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    fn text(s: &'static str) -> MacroDefinition<'static> {
        MacroDefinition::Text(Cow::Borrowed(s))
    }

    #[test]
    fn group_scoping_restores() {
        let user = FxHashMap::default();
        let mut ns = Namespace::new(&user);
        ns.set("\\x", Some(text("a")), false);
        ns.begin_group();
        ns.set("\\x", Some(text("b")), false);
        assert!(matches!(ns.get("\\x"), Some(MacroDefinition::Text(t)) if t == "b"));
        ns.end_group();
        assert!(matches!(ns.get("\\x"), Some(MacroDefinition::Text(t)) if t == "a"));
    }

    #[test]
    fn global_defs_survive_group_end() {
        let user = FxHashMap::default();
        let mut ns = Namespace::new(&user);
        ns.begin_group();
        ns.set("\\x", Some(text("g")), true);
        ns.end_group();
        assert!(matches!(ns.get("\\x"), Some(MacroDefinition::Text(t)) if t == "g"));
    }

    #[test]
    fn builtins_are_visible() {
        let user = FxHashMap::default();
        let ns = Namespace::new(&user);
        assert!(ns.has("\\dotsb"));
        assert!(!ns.has("\\definitely-not-a-macro"));
    }
}
