use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use arbor_value::Value;
use foldhash::fast::FixedState;
use hashbrown::{HashMap, HashSet};

use crate::attr::Attr;
use crate::error::ConfigurationError;
use crate::object::{Declare, Descriptor};
use crate::registry::baseline;
use crate::registry::{DeserializeRule, RuleKey, SerializeRule};

// -----------------------------------------------------------------------------
// Registry

/// Ordered serialize and deserialize rules, plus the descriptors of every
/// declared serializable type.
///
/// A registry is an ordinary value: callers may build as many as they need,
/// each with its own rules. See [`global`](crate::registry::global) for the
/// process-wide one.
///
/// # Examples
///
/// ```
/// use arbor_serial::registry::{Capability, Registry, RuleKey};
///
/// let registry = Registry::new();
/// let keys: Vec<RuleKey> = registry.serializers().map(|r| *r.key()).collect();
///
/// assert_eq!(keys[0], RuleKey::Capability(Capability::Serializable));
/// assert_eq!(keys.len(), 5);
/// ```
pub struct Registry {
    serializers: Vec<SerializeRule>,
    deserializers: Vec<DeserializeRule>,
    descriptors: HashMap<TypeId, Descriptor, FixedState>,
    type_path_to_id: HashMap<&'static str, TypeId, FixedState>,
    type_name_to_id: HashMap<&'static str, TypeId, FixedState>,
    ambiguous_names: HashSet<&'static str, FixedState>,
    auto_registered: bool,
}

impl Default for Registry {
    /// See [`Registry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry without any rule or descriptor.
    ///
    /// Every conversion through an empty registry fails with
    /// [`DispatchExhausted`](crate::error::DispatchExhausted).
    pub const fn empty() -> Self {
        Self {
            serializers: Vec::new(),
            deserializers: Vec::new(),
            descriptors: HashMap::with_hasher(FixedState::with_seed(0)),
            type_path_to_id: HashMap::with_hasher(FixedState::with_seed(0)),
            type_name_to_id: HashMap::with_hasher(FixedState::with_seed(0)),
            ambiguous_names: HashSet::with_hasher(FixedState::with_seed(0)),
            auto_registered: false,
        }
    }

    /// Creates a registry preseeded with the baseline rules.
    ///
    /// See the [module documentation](crate::registry) for their order.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for rule in baseline::serialize_rules() {
            registry.register_serializer(rule);
        }
        for rule in baseline::deserialize_rules() {
            registry.register_deserializer(rule);
        }
        registry
    }

    // -------------------------------------------------------------------------
    // Rules

    /// Appends a serialize rule.
    ///
    /// If a rule with the same [`RuleKey`] exists, it is replaced in place,
    /// keeping its priority, and the old rule is returned.
    pub fn register_serializer(&mut self, rule: SerializeRule) -> Option<SerializeRule> {
        match self.serializers.iter().position(|r| r.key() == rule.key()) {
            Some(index) => {
                log::debug!("serialize {} replaced at priority {index}", rule.key());
                Some(core::mem::replace(&mut self.serializers[index], rule))
            }
            None => {
                log::trace!(
                    "serialize {} registered at priority {}",
                    rule.key(),
                    self.serializers.len()
                );
                self.serializers.push(rule);
                None
            }
        }
    }

    /// Appends a deserialize rule, with the same replacement semantics as
    /// [`register_serializer`](Self::register_serializer).
    pub fn register_deserializer(&mut self, rule: DeserializeRule) -> Option<DeserializeRule> {
        match self.deserializers.iter().position(|r| r.key() == rule.key()) {
            Some(index) => {
                log::debug!("deserialize {} replaced at priority {index}", rule.key());
                Some(core::mem::replace(&mut self.deserializers[index], rule))
            }
            None => {
                log::trace!(
                    "deserialize {} registered at priority {}",
                    rule.key(),
                    self.deserializers.len()
                );
                self.deserializers.push(rule);
                None
            }
        }
    }

    /// Inserts a serialize rule right before the rule keyed `before`, or at
    /// the end when there is no such rule.
    ///
    /// A rule with the same key as `rule` is removed first and returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_serial::registry::{Capability, Registry, RuleKey, SerializeRule};
    /// use arbor_serial::Value;
    ///
    /// let mut registry = Registry::new();
    /// registry.insert_serializer_before(
    ///     RuleKey::Capability(Capability::Primitive),
    ///     SerializeRule::for_type(|b: &bool, _| Ok(Value::from(u8::from(*b)))),
    /// );
    ///
    /// let value = arbor_serial::convert::serialize(&true, &registry).unwrap();
    /// assert_eq!(value, Value::from(1));
    /// ```
    pub fn insert_serializer_before(
        &mut self,
        before: RuleKey,
        rule: SerializeRule,
    ) -> Option<SerializeRule> {
        let old = self
            .serializers
            .iter()
            .position(|r| r.key() == rule.key())
            .map(|index| self.serializers.remove(index));
        let index = self
            .serializers
            .iter()
            .position(|r| *r.key() == before)
            .unwrap_or(self.serializers.len());
        log::trace!("serialize {} inserted at priority {index}", rule.key());
        self.serializers.insert(index, rule);
        old
    }

    /// Deserialize counterpart of [`insert_serializer_before`](Self::insert_serializer_before).
    pub fn insert_deserializer_before(
        &mut self,
        before: RuleKey,
        rule: DeserializeRule,
    ) -> Option<DeserializeRule> {
        let old = self
            .deserializers
            .iter()
            .position(|r| r.key() == rule.key())
            .map(|index| self.deserializers.remove(index));
        let index = self
            .deserializers
            .iter()
            .position(|r| *r.key() == before)
            .unwrap_or(self.deserializers.len());
        log::trace!("deserialize {} inserted at priority {index}", rule.key());
        self.deserializers.insert(index, rule);
        old
    }

    /// Removes the serialize rule keyed `key`.
    pub fn remove_serializer(&mut self, key: &RuleKey) -> Option<SerializeRule> {
        let index = self.serializers.iter().position(|r| r.key() == key)?;
        Some(self.serializers.remove(index))
    }

    /// Removes the deserialize rule keyed `key`.
    pub fn remove_deserializer(&mut self, key: &RuleKey) -> Option<DeserializeRule> {
        let index = self.deserializers.iter().position(|r| r.key() == key)?;
        Some(self.deserializers.remove(index))
    }

    /// The first serialize rule, in priority order, that accepts `value`.
    #[inline]
    pub fn find_serializer(&self, value: &dyn Attr) -> Option<&SerializeRule> {
        self.serializers.iter().find(|r| r.matches(value))
    }

    /// The first deserialize rule, in priority order, that accepts `value`.
    #[inline]
    pub fn find_deserializer(&self, value: &Value) -> Option<&DeserializeRule> {
        self.deserializers.iter().find(|r| r.matches(value))
    }

    /// Serialize rules in priority order.
    #[inline]
    pub fn serializers(&self) -> impl ExactSizeIterator<Item = &SerializeRule> {
        self.serializers.iter()
    }

    /// Deserialize rules in priority order.
    #[inline]
    pub fn deserializers(&self) -> impl ExactSizeIterator<Item = &DeserializeRule> {
        self.deserializers.iter()
    }

    // -------------------------------------------------------------------------
    // Descriptors

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(&mut self, descriptor: &Descriptor) {
        let type_name = descriptor.type_name();
        let type_id = descriptor.type_id();

        if !self.ambiguous_names.contains(type_name) {
            if self.type_name_to_id.contains_key(type_name) {
                log::warn!("short type name `{type_name}` is ambiguous; look it up by path");
                self.type_name_to_id.remove(type_name);
                self.ambiguous_names.insert(type_name);
            } else {
                self.type_name_to_id.insert(type_name, type_id);
            }
        }

        self.type_path_to_id.insert(descriptor.type_path(), type_id);
    }

    /// Declares `T` as serializable, validating its attribute set.
    ///
    /// Returns `Ok(false)` if `T` was already declared. Errors leave the
    /// registry unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_serial::Serializable;
    /// use arbor_serial::registry::Registry;
    ///
    /// #[derive(Serializable)]
    /// #[serial(attrs(name))]
    /// struct Tag {
    ///     name: String,
    /// }
    ///
    /// let mut registry = Registry::new();
    /// assert_eq!(registry.declare::<Tag>(), Ok(true));
    /// assert_eq!(registry.declare::<Tag>(), Ok(false));
    /// assert!(registry.get_with_type_name("Tag").is_some());
    /// ```
    pub fn declare<T: Declare>(&mut self) -> Result<bool, ConfigurationError> {
        let type_id = TypeId::of::<T>();
        if self.descriptors.contains_key(&type_id) {
            return Ok(false);
        }
        let descriptor = T::descriptor()?;
        self.insert_descriptor(descriptor)
    }

    /// Inserts a descriptor built by hand.
    ///
    /// Returns `Ok(false)` if its type was already declared.
    pub fn insert_descriptor(&mut self, descriptor: Descriptor) -> Result<bool, ConfigurationError> {
        if self.descriptors.contains_key(&descriptor.type_id()) {
            return Ok(false);
        }
        if self.type_path_to_id.contains_key(descriptor.type_path()) {
            return Err(ConfigurationError::Conflict {
                type_path: descriptor.type_path(),
            });
        }
        log::debug!(
            "declared `{}` with attributes {:?}",
            descriptor.type_path(),
            descriptor.attribute_set()
        );
        self.add_new_type_indices(&descriptor);
        self.descriptors.insert(descriptor.type_id(), descriptor);
        Ok(true)
    }

    /// Declares every type annotated with `#[serial(auto_register)]`.
    ///
    /// Repeated calls are cheap and will not insert duplicates.
    ///
    /// ## Return Value
    ///
    /// Returns `Ok(true)` if automatic registration is supported on the
    /// current platform, `Ok(false)` otherwise. The first declaration error
    /// aborts the walk and is returned.
    ///
    /// ## Feature Dependency
    ///
    /// Requires the `auto_register` feature. When disabled, it does nothing
    /// and returns `Ok(false)`.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> Result<bool, ConfigurationError> {
        #[cfg(feature = "auto_register")]
        {
            if self.auto_registered {
                return Ok(true);
            }
            crate::__macro_exports::auto_register::declare_all(self)?;
            Ok(self.auto_registered)
        }
        #[cfg(not(feature = "auto_register"))]
        {
            Ok(false)
        }
    }

    #[cfg(feature = "auto_register")]
    #[inline]
    pub(crate) fn mark_auto_registered(&mut self) {
        self.auto_registered = true;
    }

    /// Whether a type with the given [`TypeId`] has been declared.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.descriptors.contains_key(&type_id)
    }

    #[inline]
    pub fn descriptor(&self, type_id: TypeId) -> Option<&Descriptor> {
        self.descriptors.get(&type_id)
    }

    #[inline]
    pub fn descriptor_of<T: 'static>(&self) -> Option<&Descriptor> {
        self.descriptor(TypeId::of::<T>())
    }

    /// Looks up a descriptor by its full type path.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&Descriptor> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.descriptor(*id),
            None => None,
        }
    }

    /// Looks up a descriptor by the last segment of its type path.
    ///
    /// Returns `None` if the name is ambiguous.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&Descriptor> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.descriptor(*id),
            None => None,
        }
    }

    /// Returns `true` if the short name matches more than one declared type.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Iterates the declared descriptors, in no particular order.
    #[inline]
    pub fn iter_descriptors(&self) -> impl ExactSizeIterator<Item = &Descriptor> {
        self.descriptors.values()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("serializers", &self.serializers)
            .field("deserializers", &self.deserializers)
            .field("declared", &self.type_path_to_id.keys())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Registry;
    use crate::convert::serialize;
    use crate::error::SerialError;
    use crate::registry::{Capability, RuleKey, SerializeRule};
    use crate::Value;

    #[test]
    fn empty_registry_exhausts() {
        let registry = Registry::empty();
        let err = serialize(&1_i32, &registry).unwrap_err();
        assert!(matches!(err, SerialError::Dispatch(_)));
    }

    #[test]
    fn replacing_keeps_priority() {
        let mut registry = Registry::new();
        let old = registry.register_serializer(SerializeRule::capability(
            Capability::Primitive,
            |_, _| Ok(Value::from("replaced")),
        ));
        assert!(old.is_some());
        assert_eq!(registry.serializers().len(), 5);
        assert_eq!(
            registry.serializers().last().map(|r| *r.key()),
            Some(RuleKey::Capability(Capability::Primitive))
        );
        assert_eq!(serialize(&3_u8, &registry).unwrap(), Value::from("replaced"));
    }

    #[test]
    fn appended_rule_loses_to_baseline() {
        let mut registry = Registry::new();
        registry.register_serializer(SerializeRule::for_type(|_: &i32, _| Ok(Value::from("late"))));
        assert_eq!(serialize(&7_i32, &registry).unwrap(), Value::from(7));

        registry.insert_serializer_before(
            RuleKey::Capability(Capability::Serializable),
            SerializeRule::for_type(|_: &i32, _| Ok(Value::from("early"))),
        );
        assert_eq!(registry.serializers().len(), 6);
        assert_eq!(serialize(&7_i32, &registry).unwrap(), Value::from("early"));
    }

    #[test]
    fn remove_rule() {
        let mut registry = Registry::new();
        let key = RuleKey::Capability(Capability::SetLike);
        assert!(registry.remove_serializer(&key).is_some());
        assert!(registry.remove_serializer(&key).is_none());
        assert_eq!(registry.serializers().len(), 4);
    }
}
