use serde::{Deserialize, Serialize};

/// A palette color code carried by a placement.
///
/// Code 16 is the inherit sentinel: the placement takes whatever color its
/// parent placement resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorCode(pub i32);

impl ColorCode {
    pub const INHERIT: ColorCode = ColorCode(16);

    pub fn is_inherit(self) -> bool {
        self == Self::INHERIT
    }

    /// Resolve the inherit sentinel against the parent's color.
    pub fn resolve(self, parent: ColorCode) -> ColorCode {
        if self.is_inherit() {
            parent
        } else {
            self
        }
    }
}
