//! The type registry: identifier → compiled descriptor.
//!
//! The registry is the source of truth for "what a record of this type
//! looks like". It owns every registered [`TypeDescriptor`] behind
//! `Arc`, keyed by the compact identifier-derived [`TypeKey`] the arena
//! stamps into record headers. Keys depend only on the identifier
//! string, never on registration order, so two processes that register
//! the same identifiers in different orders still agree on every
//! record header in a shared region. It uses `IndexMap` (not
//! `HashMap`) so iteration is deterministic for diagnostics.

use std::sync::Arc;

use indexmap::IndexMap;
use vellum_core::{TypeIdent, TypeKey};

use crate::descriptor::TypeDescriptor;
use crate::error::RegistryError;

/// Maps globally unique type identifiers to compiled descriptors.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    entries: IndexMap<TypeIdent, Arc<TypeDescriptor>>,
    tags: IndexMap<TypeKey, TypeIdent>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under `ident`.
    ///
    /// Idempotent: registering an identical descriptor under an already
    /// registered identifier returns the existing key. A differing
    /// descriptor under the same identifier is
    /// [`RegistryError::DuplicateIdentifier`] — schema evolution
    /// requires a new identifier or a version bump compiled into the
    /// descriptor before first registration. Two distinct identifiers
    /// whose derived tags collide are [`RegistryError::KeyCollision`];
    /// the second registration must pick a different identifier.
    pub fn register(
        &mut self,
        ident: &TypeIdent,
        descriptor: TypeDescriptor,
    ) -> Result<TypeKey, RegistryError> {
        if descriptor.ident() != ident {
            return Err(RegistryError::IdentifierMismatch {
                registered: ident.clone(),
                declared: descriptor.ident().clone(),
            });
        }

        let key = TypeKey::of(ident);
        if let Some(existing) = self.entries.get(ident) {
            if **existing == descriptor {
                return Ok(key);
            }
            return Err(RegistryError::DuplicateIdentifier {
                ident: ident.clone(),
            });
        }
        if let Some(holder) = self.tags.get(&key) {
            return Err(RegistryError::KeyCollision {
                key,
                ident: ident.clone(),
                existing: holder.clone(),
            });
        }

        self.entries.insert(ident.clone(), Arc::new(descriptor));
        self.tags.insert(key, ident.clone());
        Ok(key)
    }

    /// Look up a descriptor by identifier. Read-only, never blocks.
    pub fn lookup(&self, ident: &TypeIdent) -> Option<Arc<TypeDescriptor>> {
        self.entries.get(ident).cloned()
    }

    /// Look up a descriptor by its compact key.
    pub fn by_key(&self, key: TypeKey) -> Option<Arc<TypeDescriptor>> {
        self.tags
            .get(&key)
            .and_then(|ident| self.entries.get(ident))
            .cloned()
    }

    /// The compact key for an identifier, if registered.
    pub fn key_of(&self, ident: &TypeIdent) -> Option<TypeKey> {
        self.entries
            .contains_key(ident)
            .then(|| TypeKey::of(ident))
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::FieldDecl;
    use crate::layout::compile;
    use vellum_core::{FieldKind, SchemaVersion};

    fn descriptor(ident: &str, kinds: &[FieldKind]) -> TypeDescriptor {
        let decls: Vec<_> = kinds
            .iter()
            .enumerate()
            .map(|(i, &k)| FieldDecl::new(format!("f{i}"), k))
            .collect();
        compile(TypeIdent::new(ident), SchemaVersion::INITIAL, &decls).unwrap()
    }

    #[test]
    fn keys_are_identifier_derived() {
        let mut reg = TypeRegistry::new();
        let a = reg
            .register(&"A".into(), descriptor("A", &[FieldKind::Bool]))
            .unwrap();
        let b = reg
            .register(&"B".into(), descriptor("B", &[FieldKind::U16]))
            .unwrap();
        assert_eq!(a, TypeKey::of(&"A".into()));
        assert_eq!(b, TypeKey::of(&"B".into()));
        assert_ne!(a, b);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn keys_do_not_depend_on_registration_order() {
        // Two cooperating processes may register the same types in any
        // order; record headers must mean the same thing to both.
        let mut forward = TypeRegistry::new();
        let a1 = forward
            .register(&"A".into(), descriptor("A", &[FieldKind::Bool]))
            .unwrap();
        let b1 = forward
            .register(&"B".into(), descriptor("B", &[FieldKind::U16]))
            .unwrap();

        let mut backward = TypeRegistry::new();
        let b2 = backward
            .register(&"B".into(), descriptor("B", &[FieldKind::U16]))
            .unwrap();
        let a2 = backward
            .register(&"A".into(), descriptor("A", &[FieldKind::Bool]))
            .unwrap();

        assert_eq!(a1, a2);
        assert_eq!(b1, b2);
        assert_eq!(forward.by_key(a1).unwrap(), backward.by_key(a2).unwrap());
    }

    #[test]
    fn colliding_tags_are_rejected() {
        // "costarring" and "liquid" are a known FNV-1a 32-bit collision.
        let mut reg = TypeRegistry::new();
        reg.register(
            &"costarring".into(),
            descriptor("costarring", &[FieldKind::Bool]),
        )
        .unwrap();
        let err = reg
            .register(&"liquid".into(), descriptor("liquid", &[FieldKind::Bool]))
            .unwrap_err();
        assert!(matches!(err, RegistryError::KeyCollision { .. }));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn identical_reregistration_is_idempotent() {
        let mut reg = TypeRegistry::new();
        let ident = TypeIdent::new("Example::Record");
        let first = reg
            .register(&ident, descriptor("Example::Record", &[FieldKind::Bool]))
            .unwrap();
        let second = reg
            .register(&ident, descriptor("Example::Record", &[FieldKind::Bool]))
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn differing_descriptor_is_duplicate_identifier() {
        let mut reg = TypeRegistry::new();
        let ident = TypeIdent::new("Example::Record");
        reg.register(&ident, descriptor("Example::Record", &[FieldKind::Bool]))
            .unwrap();
        let err = reg
            .register(&ident, descriptor("Example::Record", &[FieldKind::F64]))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateIdentifier { .. }));
    }

    #[test]
    fn version_bump_counts_as_different_descriptor() {
        let mut reg = TypeRegistry::new();
        let ident = TypeIdent::new("T");
        let decls = [FieldDecl::new("f0", FieldKind::Bool)];
        reg.register(
            &ident,
            compile(ident.clone(), SchemaVersion(1), &decls).unwrap(),
        )
        .unwrap();
        let err = reg
            .register(
                &ident,
                compile(ident.clone(), SchemaVersion(2), &decls).unwrap(),
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateIdentifier { .. }));
    }

    #[test]
    fn identifier_mismatch_rejected() {
        let mut reg = TypeRegistry::new();
        let err = reg
            .register(&"A".into(), descriptor("B", &[FieldKind::Bool]))
            .unwrap_err();
        assert!(matches!(err, RegistryError::IdentifierMismatch { .. }));
    }

    #[test]
    fn lookup_by_ident_and_key_agree() {
        let mut reg = TypeRegistry::new();
        let ident = TypeIdent::new("T");
        let key = reg
            .register(&ident, descriptor("T", &[FieldKind::U32]))
            .unwrap();
        let by_ident = reg.lookup(&ident).unwrap();
        let by_key = reg.by_key(key).unwrap();
        assert!(Arc::ptr_eq(&by_ident, &by_key));
        assert_eq!(reg.key_of(&ident), Some(key));
    }

    #[test]
    fn missing_lookups_return_none() {
        let reg = TypeRegistry::new();
        assert!(reg.lookup(&"nope".into()).is_none());
        assert!(reg.by_key(TypeKey(0)).is_none());
        assert!(reg.key_of(&"nope".into()).is_none());
    }
}
