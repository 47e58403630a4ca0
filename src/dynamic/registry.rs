//! Signature-keyed tables of instantiations.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::{DispatchError, Signature};

/// A table from argument signatures to the function implementing an
/// algorithm for those types.
///
/// Registries are process-wide: each algorithm keeps one in a `OnceLock`,
/// populated on first use with the built-in instantiations. Hosts may add
/// their own with [`register`](Self::register).
pub struct Registry<F: Copy> {
    name: &'static str,
    table: RwLock<FxHashMap<Signature, F>>,
}

impl<F: Copy> Registry<F> {
    /// An empty registry for `name`.
    pub fn new(name: &'static str) -> Self {
        Registry {
            name,
            table: RwLock::new(FxHashMap::default()),
        }
    }

    /// The algorithm name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register `f` for `signature`.
    ///
    /// The first registration wins: returns `false`, and keeps the existing
    /// entry, if the signature is already known.
    pub fn register(&self, signature: Signature, f: F) -> bool {
        let mut table = self.table.write();
        if table.contains_key(&signature) {
            trace!(registry = self.name, %signature, "already registered");
            return false;
        }
        table.insert(signature, f);
        true
    }

    /// The function registered for `signature`.
    pub fn get(&self, signature: &Signature) -> Result<F, DispatchError> {
        self.table
            .read()
            .get(signature)
            .copied()
            .ok_or_else(|| {
                debug!(registry = self.name, %signature, "no such instantiation");
                DispatchError::NoSuchInstantiation {
                    algorithm: self.name,
                    signature: signature.clone(),
                }
            })
    }

    /// Whether `signature` is registered.
    pub fn contains(&self, signature: &Signature) -> bool {
        self.table.read().contains_key(signature)
    }

    /// The registered signatures, sorted.
    pub fn signatures(&self) -> Vec<Signature> {
        let mut sigs: Vec<_> = self.table.read().keys().cloned().collect();
        sigs.sort();
        sigs
    }

    /// Number of registered signatures.
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }
}

impl<F: Copy> std::fmt::Debug for Registry<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one() -> u32 {
        1
    }

    fn two() -> u32 {
        2
    }

    #[test]
    fn test_first_registration_wins() {
        let reg: Registry<fn() -> u32> = Registry::new("test");
        let sig = Signature::new(["lal_char_b"]);
        assert!(reg.register(sig.clone(), one));
        assert!(!reg.register(sig.clone(), two));
        assert_eq!((reg.get(&sig).unwrap())(), 1);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_unknown_signature() {
        let reg: Registry<fn() -> u32> = Registry::new("test");
        let sig = Signature::new(["lal_char_q", "lal_char_b"]);
        assert_eq!(
            reg.get(&sig).unwrap_err(),
            DispatchError::NoSuchInstantiation {
                algorithm: "test",
                signature: sig.clone(),
            }
        );
        assert_eq!(
            reg.get(&sig).unwrap_err().to_string(),
            "test: no instantiation for (lal_char_q, lal_char_b)"
        );
        assert!(!reg.contains(&sig));
    }

    #[test]
    fn test_signatures_are_sorted() {
        let reg: Registry<fn() -> u32> = Registry::new("test");
        reg.register(Signature::new(["z"]), one);
        reg.register(Signature::new(["b"]), one);
        assert_eq!(
            reg.signatures(),
            vec![Signature::new(["b"]), Signature::new(["z"])]
        );
    }
}
