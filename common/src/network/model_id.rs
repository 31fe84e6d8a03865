use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable key used for all addressing inside the directory.
///
/// Two values are reserved: [`ModelId::NONE`] marks a failed lookup and
/// [`ModelId::ROOT`] belongs to the synthetic root container. Ids derived
/// from a uid never take either value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(pub u64);

impl ModelId {
    pub const NONE: ModelId = ModelId(0);
    pub const ROOT: ModelId = ModelId(1);

    /// Folds the 128 bits of `uid` into 64, stepping around the sentinels.
    pub fn from_uid(uid: &Uuid) -> Self {
        let bits: u128 = uid.as_u128();
        let folded: u64 = (bits as u64) ^ ((bits >> 64) as u64);

        if folded <= Self::ROOT.0 {
            ModelId(folded + 2)
        } else {
            ModelId(folded)
        }
    }

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl From<u64> for ModelId {
    fn from(value: u64) -> Self {
        ModelId(value)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
