//! Map data structures.

use std::fmt;

pub mod bidirectional;
pub mod dict;
pub mod multi;

pub use bidirectional::BiDirectionalMap;
pub use dict::Dict;
pub use multi::MultiMap;

/// Writes `{k: v, k: v}`
fn write_pairs<'a, K, V, I>(f: &mut fmt::Formatter<'_>, pairs: I) -> fmt::Result
where
    K: fmt::Display + 'a,
    V: fmt::Display + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    f.write_str("{")?;
    for (i, (key, value)) in pairs.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}: {}", key, value)?;
    }
    f.write_str("}")
}
