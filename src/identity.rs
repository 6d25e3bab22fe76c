//! Canonical identity strings and digests for disk-cache keys.

use std::fmt;

use xxhash_rust::xxh3::Xxh3;

use crate::geometry::rings::{Border, Borders};
use crate::transform::ShapeSpec;

const IDENTITY_PREFIX: &str = "shapeclip.";
const XXH3_SEED: u64 = 0x8b5ad4a0c7d8e9f1;

/// Canonical description of every parameter that affects a transform's pixels.
///
/// Two transforms produce identical output exactly when their identities are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransformIdentity(String);

/// 128-bit content digest of a [`TransformIdentity`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IdentityDigest {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl IdentityDigest {
    /// Lowercase 32-digit hex rendering.
    pub fn to_hex(self) -> String {
        format!("{:016x}{:016x}", self.hi, self.lo)
    }
}

impl TransformIdentity {
    pub(crate) fn of(spec: &ShapeSpec) -> Self {
        let body = match spec {
            ShapeSpec::Circle { borders } => format!("Circle({})", RingsKey(borders)),
            ShapeSpec::RoundedRect {
                radius,
                corners,
                borders,
            } => format!(
                "RoundedRect(radius={radius},corners={},{})",
                corners.name(),
                RingsKey(borders)
            ),
            ShapeSpec::ExternalMask { mask, borders } => {
                format!("Mask(mask={mask},{})", RingsKey(borders))
            }
            ShapeSpec::VectorPath {
                path: Some(id),
                borders,
            } => format!("Path(path={id},{})", RingsKey(borders)),
            ShapeSpec::VectorPath {
                path: None,
                borders,
            } => format!("Path(path=none,{})", RingsKey(borders)),
        };
        Self(format!("{IDENTITY_PREFIX}{body}"))
    }

    /// Identity text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Cache-key bytes (UTF-8 of the identity text).
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Stable xxh3-128 digest of the identity bytes.
    pub fn digest(&self) -> IdentityDigest {
        let mut h = StableHasher::new();
        h.write_str(&self.0);
        h.finish()
    }
}

impl fmt::Display for TransformIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct RingsKey<'a>(&'a Borders);

impl fmt::Display for RingsKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ring(f, "b1", self.0.first())?;
        f.write_str(",")?;
        write_ring(f, "b2", self.0.second())
    }
}

fn write_ring(f: &mut fmt::Formatter<'_>, label: &str, ring: Option<&Border>) -> fmt::Result {
    match ring {
        Some(b) => write!(f, "{label}={},{},{:?}", b.width, b.color.to_hex(), b.opacity),
        None => write!(f, "{label}=0,#00000000,{:?}", 1.0f32),
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> IdentityDigest {
        let v = self.inner.digest128();
        IdentityDigest {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/identity.rs"]
mod tests;
