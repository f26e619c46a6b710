//! The store: one engine instance over one managed region.
//!
//! `Store` wires the four subsystems together behind per-structure
//! locks: mutators take the write side of only the structure they
//! touch, readers share read locks and never block each other. Where
//! two locks must be held at once the acquisition order is fixed —
//! registry, then arena, then namespace, then forwarding — so lock
//! cycles cannot form.

use log::{debug, trace};
use parking_lot::RwLock;

use vellum_arena::{Arena, ArenaConfig};
use vellum_core::{FieldValue, Liveness, RecordRef, TypeIdent, TypeKey};
use vellum_namespace::{ForwardingTable, NamePath, Namespace};
use vellum_schema::{TypeDescriptor, TypeRegistry};

use crate::error::StoreError;

/// A typed-record store over one managed memory region.
///
/// All operations are `&self`; the store is `Send + Sync` and intended
/// to be shared (`Arc<Store>`) across the threads of a process. The
/// region's contents — record payloads, free list, headers — use only
/// arena-relative offsets, so a persisted region can be reopened with
/// [`Store::open`] (or mapped by another cooperating process) and
/// every [`RecordRef`] stays meaningful.
pub struct Store {
    registry: RwLock<TypeRegistry>,
    arena: RwLock<Arena>,
    namespace: RwLock<Namespace>,
    forwarding: RwLock<ForwardingTable>,
}

impl Store {
    /// Create a store over a freshly initialised region.
    pub fn new(config: ArenaConfig) -> Result<Self, StoreError> {
        Ok(Self::with_arena(Arena::new(config)?))
    }

    /// Reopen a store over an existing region (e.g. read back from a
    /// file). Types must be re-registered — the registry is process
    /// state, and identical declarations recompile to identical
    /// layouts by design. Registration order does not matter: record
    /// headers carry identifier-derived tags, not registration
    /// ordinals.
    pub fn open(region: Vec<u8>) -> Result<Self, StoreError> {
        Ok(Self::with_arena(Arena::from_bytes(region)?))
    }

    fn with_arena(arena: Arena) -> Self {
        Self {
            registry: RwLock::new(TypeRegistry::new()),
            arena: RwLock::new(arena),
            namespace: RwLock::new(Namespace::new()),
            forwarding: RwLock::new(ForwardingTable::new()),
        }
    }

    /// Register a compiled descriptor under its identifier.
    ///
    /// Idempotent for identical descriptors; a differing descriptor
    /// under the same identifier is rejected. Returns the compact key
    /// the arena stamps on instances of this type.
    pub fn register_type(
        &self,
        ident: &TypeIdent,
        descriptor: TypeDescriptor,
    ) -> Result<TypeKey, StoreError> {
        let key = self.registry.write().register(ident, descriptor)?;
        debug!("registered type '{ident}' as {key}");
        Ok(key)
    }

    /// Allocate a zero-initialised record of a registered type.
    pub fn create(&self, ident: &TypeIdent) -> Result<RecordRef, StoreError> {
        let registry = self.registry.read();
        let descriptor = registry
            .lookup(ident)
            .ok_or_else(|| StoreError::UnknownType {
                ident: ident.clone(),
            })?;

        let record = self
            .arena
            .write()
            .allocate(&descriptor, TypeKey::of(ident))?;
        debug!("created '{ident}' at {record}");
        Ok(record)
    }

    /// Destroy a record, releasing its block.
    ///
    /// Forwarding is resolved first, so a pre-relocation reference
    /// destroys the live successor. Bindings and forwarding entries
    /// pointing at the record dangle; they resolve to "not found"
    /// from here on.
    pub fn destroy(&self, record: RecordRef) -> Result<(), StoreError> {
        let target = self.forwarding.read().resolve(record)?;
        self.arena.write().free(target)?;
        debug!("destroyed {target}");
        Ok(())
    }

    /// Read one field of a record by name.
    ///
    /// Returns `Ok(None)` for a const field that was never written.
    /// Stale references (freed records) are an error, not a value.
    pub fn get_field(
        &self,
        record: RecordRef,
        name: &str,
    ) -> Result<Option<FieldValue>, StoreError> {
        let target = self.forwarding.read().resolve(record)?;
        let registry = self.registry.read();
        let arena = self.arena.read();
        let descriptor = self.descriptor_of(&registry, &arena, target)?;
        Ok(arena.read_field(target, &descriptor, name)?)
    }

    /// Write one field of a record by name.
    ///
    /// The first write to a const field succeeds; later ones fail with
    /// a const-field violation. Mutable fields accept any number of
    /// writes.
    pub fn set_field(
        &self,
        record: RecordRef,
        name: &str,
        value: FieldValue,
    ) -> Result<(), StoreError> {
        let target = self.forwarding.read().resolve(record)?;
        let registry = self.registry.read();
        let mut arena = self.arena.write();
        let descriptor = self.descriptor_of(&registry, &arena, target)?;
        arena.write_field(target, &descriptor, name, value)?;
        trace!("set {target}.{name} = {value}");
        Ok(())
    }

    /// Bind a namespace path to a record.
    ///
    /// Idempotent for the same record; a path bound to a different
    /// record (or clashing with a subtree) is a collision.
    pub fn bind(&self, path: &str, record: RecordRef) -> Result<(), StoreError> {
        let path = NamePath::parse(path)?;
        self.namespace.write().bind(&path, record)?;
        debug!("bound '{path}' to {record}");
        Ok(())
    }

    /// Remove a binding. The record itself is untouched. Returns
    /// whether a binding existed.
    pub fn unbind(&self, path: &str) -> Result<bool, StoreError> {
        let path = NamePath::parse(path)?;
        let removed = self.namespace.write().unbind(&path);
        if removed {
            debug!("unbound '{path}'");
        }
        Ok(removed)
    }

    /// Resolve a namespace path to a live record.
    ///
    /// Dangling bindings report as `None`, never as a stale reference.
    pub fn resolve(&self, path: &str) -> Result<Option<RecordRef>, StoreError> {
        let path = NamePath::parse(path)?;
        let arena = self.arena.read();
        let namespace = self.namespace.read();
        Ok(namespace.resolve(&path, &*arena))
    }

    /// Install or update a forwarding entry `old → new`.
    ///
    /// Fails if the entry would, transitively, loop back to `old`.
    pub fn redirect(&self, old: RecordRef, new: RecordRef) -> Result<(), StoreError> {
        self.forwarding.write().redirect(old, new)?;
        debug!("forwarding {old} -> {new}");
        Ok(())
    }

    /// Follow forwarding entries from `record` to the current live
    /// reference.
    ///
    /// Returns `Ok(None)` when the chain's fixed point is no longer
    /// live — a dangling entry is "not found", not a stale pointer.
    pub fn resolve_reference(
        &self,
        record: RecordRef,
    ) -> Result<Option<RecordRef>, StoreError> {
        let target = self.forwarding.read().resolve(record)?;
        let arena = self.arena.read();
        Ok(arena.is_live(target).then_some(target))
    }

    /// Total region capacity in bytes.
    pub fn capacity(&self) -> u32 {
        self.arena.read().capacity()
    }

    /// Bytes currently on the arena free list.
    pub fn free_bytes(&self) -> u32 {
        self.arena.read().free_bytes()
    }

    /// Consume the store and take back the raw region bytes.
    ///
    /// The bytes can be persisted and later handed to [`Store::open`].
    /// Registry, namespace, and forwarding state are process-local and
    /// are dropped here.
    pub fn into_region(self) -> Vec<u8> {
        self.arena.into_inner().into_bytes()
    }

    /// Look up the descriptor tagged on a live record.
    fn descriptor_of(
        &self,
        registry: &TypeRegistry,
        arena: &Arena,
        record: RecordRef,
    ) -> Result<std::sync::Arc<TypeDescriptor>, StoreError> {
        let key = arena.type_key_of(record).map_err(|_| {
            StoreError::Field(vellum_arena::FieldError::StaleRecord { record })
        })?;
        registry.by_key(key).ok_or(StoreError::UnregisteredTypeKey { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::{FieldKind, SchemaVersion};
    use vellum_schema::{compile, FieldDecl};

    fn example_store() -> (Store, TypeIdent) {
        let store = Store::new(ArenaConfig::new(4096)).unwrap();
        let ident = TypeIdent::new("Example::Record");
        let descriptor = compile(
            ident.clone(),
            SchemaVersion::INITIAL,
            &[
                FieldDecl::constant("is_active", FieldKind::Bool),
                FieldDecl::new("number_of_players", FieldKind::U16),
            ],
        )
        .unwrap();
        store.register_type(&ident, descriptor).unwrap();
        (store, ident)
    }

    #[test]
    fn create_requires_registration() {
        let store = Store::new(ArenaConfig::new(4096)).unwrap();
        let err = store.create(&TypeIdent::new("Nope")).unwrap_err();
        assert!(matches!(err, StoreError::UnknownType { .. }));
    }

    #[test]
    fn field_access_finds_descriptor_from_the_ref() {
        let (store, ident) = example_store();
        let rec = store.create(&ident).unwrap();
        store
            .set_field(rec, "number_of_players", FieldValue::U16(4))
            .unwrap();
        assert_eq!(
            store.get_field(rec, "number_of_players").unwrap(),
            Some(FieldValue::U16(4))
        );
    }

    #[test]
    fn destroy_through_forwarding_frees_the_target() {
        let (store, ident) = example_store();
        let old = store.create(&ident).unwrap();
        let new = store.create(&ident).unwrap();
        store.redirect(old, new).unwrap();

        store.destroy(old).unwrap();
        // The successor died; the original was never touched twice.
        assert_eq!(store.resolve_reference(new).unwrap(), None);
        assert_eq!(store.resolve_reference(old).unwrap(), None);
    }

    #[test]
    fn capacity_and_free_bytes_track_allocations() {
        let (store, ident) = example_store();
        let before = store.free_bytes();
        let rec = store.create(&ident).unwrap();
        assert!(store.free_bytes() < before);
        store.destroy(rec).unwrap();
        assert_eq!(store.free_bytes(), before);
        assert_eq!(store.capacity(), 4096);
    }
}
