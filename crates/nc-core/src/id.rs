use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for entity IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Process-wide sequence behind [`EntityId::generate`]. Never rewinds.
static NEXT_ENTITY: AtomicU64 = AtomicU64::new(1);

/// Identifier of a placed image. Interned, so it is `Copy` and compares in O(1)
/// while still resolving to its original string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(Spur);

impl EntityId {
    /// Intern a string as an EntityId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        EntityId(INTERNER.get_or_intern(s))
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Mint a fresh ID for a newly placed image (`img_1`, `img_2`, ...).
    pub fn generate() -> Self {
        Self::with_prefix("img")
    }

    /// Mint `<prefix>_<n>` for the next free `n`. Names already interned
    /// (deserialized or host-supplied IDs) are skipped, so a minted ID never
    /// aliases an existing one.
    pub fn with_prefix(prefix: &str) -> Self {
        loop {
            let n = NEXT_ENTITY.fetch_add(1, Ordering::Relaxed);
            let name = format!("{prefix}_{n}");
            if INTERNER.get(&name).is_none() {
                return EntityId(INTERNER.get_or_intern(name));
            }
            log::debug!("{name} already in use; skipping");
        }
    }

    /// Number the next [`generate`](Self::generate) call will try first.
    pub fn peek_next() -> u64 {
        NEXT_ENTITY.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(EntityId::intern(&s))
    }
}
