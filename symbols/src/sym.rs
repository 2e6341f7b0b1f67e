use arcstr::ArcStr;
use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

/// A cheaply-clonable interned-ish string used to name types, objects and
/// predicate/function symbols throughout the problem description.
///
/// Cloning a `Sym` is a refcount bump, not an allocation, which matters since
/// symbols are copied into every grounded action name and tuple.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Sym(ArcStr);

impl Sym {
    pub fn new(s: impl AsRef<str>) -> Self {
        Sym(ArcStr::from(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for Sym {
    fn from(s: &str) -> Self {
        Sym::new(s)
    }
}
impl From<String> for Sym {
    fn from(s: String) -> Self {
        Sym::new(s)
    }
}

impl Display for Sym {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for Sym {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}
