//! Lexical scope stack.
//!
//! The checker keeps two of these: one for type identifiers, one for value
//! identifiers (`self`, parameters). Layers are pushed when entering a
//! declaration body and popped on every exit path; the guard form makes the
//! pop automatic.

use rustc_hash::FxHashMap;

use vela_ir::Name;

/// Error returned by [`Activations::declare`] when the innermost layer
/// already binds the identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AlreadyDeclared;

/// A stack of lexical layers mapping identifiers to bindings.
#[derive(Clone, Debug)]
pub struct Activations<T> {
    layers: Vec<FxHashMap<Name, T>>,
}

impl<T> Activations<T> {
    /// Create a stack with a single base layer.
    pub fn new() -> Self {
        Activations {
            layers: vec![FxHashMap::default()],
        }
    }

    /// Current number of layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Push a fresh layer.
    pub fn enter(&mut self) {
        self.layers.push(FxHashMap::default());
    }

    /// Pop the innermost layer. The base layer is never popped.
    pub fn leave(&mut self) {
        if self.layers.len() > 1 {
            self.layers.pop();
        }
    }

    /// Push a fresh layer, returning a guard that pops it on drop.
    pub fn scoped(&mut self) -> ActivationsGuard<'_, T> {
        self.enter();
        ActivationsGuard { activations: self }
    }

    /// Declare an identifier in the innermost layer.
    ///
    /// Shadowing an outer layer is allowed; a collision within the innermost
    /// layer is an error and leaves the existing binding in place.
    pub fn declare(&mut self, name: Name, value: T) -> Result<(), AlreadyDeclared> {
        let layer = self
            .layers
            .last_mut()
            .unwrap_or_else(|| crate::fault::internal("activation stack has no base layer"));
        if layer.contains_key(&name) {
            return Err(AlreadyDeclared);
        }
        layer.insert(name, value);
        Ok(())
    }

    /// Look up an identifier, innermost layer first.
    pub fn lookup(&self, name: Name) -> Option<&T> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.get(&name))
    }
}

impl<T> Default for Activations<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard that pops the layer pushed by [`Activations::scoped`].
pub struct ActivationsGuard<'a, T> {
    activations: &'a mut Activations<T>,
}

impl<T> Drop for ActivationsGuard<'_, T> {
    fn drop(&mut self) {
        self.activations.leave();
    }
}

impl<T> std::ops::Deref for ActivationsGuard<'_, T> {
    type Target = Activations<T>;

    fn deref(&self) -> &Self::Target {
        self.activations
    }
}

impl<T> std::ops::DerefMut for ActivationsGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.activations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vela_ir::StringInterner;

    #[test]
    fn declare_and_lookup() {
        let interner = StringInterner::new();
        let vault = interner.intern("Vault");

        let mut activations = Activations::new();
        activations.declare(vault, 1).unwrap();
        assert_eq!(activations.lookup(vault), Some(&1));
    }

    #[test]
    fn inner_layer_shadows_outer() {
        let interner = StringInterner::new();
        let vault = interner.intern("Vault");

        let mut activations = Activations::new();
        activations.declare(vault, 1).unwrap();
        activations.enter();
        activations.declare(vault, 2).unwrap();
        assert_eq!(activations.lookup(vault), Some(&2));
        activations.leave();
        assert_eq!(activations.lookup(vault), Some(&1));
    }

    #[test]
    fn collision_in_same_layer_keeps_first_binding() {
        let interner = StringInterner::new();
        let vault = interner.intern("Vault");

        let mut activations = Activations::new();
        activations.declare(vault, 1).unwrap();
        assert_eq!(activations.declare(vault, 2), Err(AlreadyDeclared));
        assert_eq!(activations.lookup(vault), Some(&1));
    }

    #[test]
    fn guard_pops_layer_on_drop() {
        let interner = StringInterner::new();
        let provider = interner.intern("Provider");

        let mut activations = Activations::new();
        {
            let mut scoped = activations.scoped();
            scoped.declare(provider, 7).unwrap();
            assert_eq!(scoped.lookup(provider), Some(&7));
        }
        assert_eq!(activations.lookup(provider), None);
        assert_eq!(activations.depth(), 1);
    }

    #[test]
    fn base_layer_is_never_popped() {
        let mut activations: Activations<u32> = Activations::new();
        activations.leave();
        activations.leave();
        assert_eq!(activations.depth(), 1);
    }
}
