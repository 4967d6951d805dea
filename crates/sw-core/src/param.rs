//! Recognized node and link parameters.
//!
//! Each attribute carries the position of its variable inside a reporting
//! period of the SWMM binary output file, so stores can address values
//! without a lookup table.
//!
//! | Kind | Canonical        | Aliases                        | Index |
//! |------|------------------|--------------------------------|-------|
//! | node | `depth`          | `invert_depth`                 | 0     |
//! | node | `head`           | `hydraulic_head`               | 1     |
//! | node | `volume`         | `ponded_volume`                | 2     |
//! | node | `lateral_inflow` | `lat_flow`                     | 3     |
//! | node | `total_inflow`   | `inflow`                       | 4     |
//! | node | `flooding`       | `overflow`, `flooding_losses`  | 5     |
//! | link | `flow`           | `flow_rate`                    | 0     |
//! | link | `depth`          | `flow_depth`                   | 1     |
//! | link | `velocity`       | `flow_velocity`                | 2     |
//! | link | `volume`         | `flow_volume`                  | 3     |
//! | link | `capacity`       |                                | 4     |

use std::fmt;

use crate::{CoreError, CoreResult, EntityKind};

/// Generate an attribute enum with its canonical names, aliases and
/// result-file variable index.
macro_rules! attribute_enum {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident = $index:literal, $canonical:literal $(| $alias:literal)* ; )+
        }
    ) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis enum $name {
            $( $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Variable position within one object's block of a reporting period.
            #[inline]
            pub fn index(self) -> usize {
                match self {
                    $( $name::$variant => $index, )+
                }
            }

            pub fn canonical_name(self) -> &'static str {
                match self {
                    $( $name::$variant => $canonical, )+
                }
            }

            /// Case-insensitive lookup by canonical name or alias.
            pub fn from_name(name: &str) -> Option<$name> {
                let key = name.trim().to_ascii_lowercase();
                $(
                    if key == $canonical $(|| key == $alias)* {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.canonical_name())
            }
        }
    };
}

attribute_enum! {
    /// Time-varying node results.
    pub enum NodeAttribute {
        Depth         = 0, "depth" | "invert_depth";
        Head          = 1, "head" | "hydraulic_head";
        Volume        = 2, "volume" | "ponded_volume";
        LateralInflow = 3, "lateral_inflow" | "lat_flow";
        TotalInflow   = 4, "total_inflow" | "inflow";
        Flooding      = 5, "flooding" | "overflow" | "flooding_losses";
    }
}

attribute_enum! {
    /// Time-varying link results.
    pub enum LinkAttribute {
        Flow     = 0, "flow" | "flow_rate";
        Depth    = 1, "depth" | "flow_depth";
        Velocity = 2, "velocity" | "flow_velocity";
        Volume   = 3, "volume" | "flow_volume";
        Capacity = 4, "capacity";
    }
}

// ── Attribute ─────────────────────────────────────────────────────────────────

/// A node or link attribute.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Attribute {
    Node(NodeAttribute),
    Link(LinkAttribute),
}

impl Attribute {
    pub fn kind(self) -> EntityKind {
        match self {
            Attribute::Node(_) => EntityKind::Node,
            Attribute::Link(_) => EntityKind::Link,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Attribute::Node(a) => a.index(),
            Attribute::Link(a) => a.index(),
        }
    }

    pub fn resolve(kind: EntityKind, name: &str) -> Option<Attribute> {
        match kind {
            EntityKind::Node => NodeAttribute::from_name(name).map(Attribute::Node),
            EntityKind::Link => LinkAttribute::from_name(name).map(Attribute::Link),
        }
    }
}

// ── Parameter ─────────────────────────────────────────────────────────────────

/// A requested parameter: the column name the caller asked for, bound to
/// the attribute it resolves to.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Parameter {
    /// Name as requested; used verbatim as the CSV column header.
    pub name:      String,
    pub attribute: Attribute,
}

impl Parameter {
    /// Resolve `name` against the attributes of `kind`.
    pub fn resolve(kind: EntityKind, name: &str) -> CoreResult<Parameter> {
        Attribute::resolve(kind, name)
            .map(|attribute| Parameter { name: name.to_owned(), attribute })
            .ok_or_else(|| CoreError::UnknownParameter { kind, name: name.to_owned() })
    }

    /// Resolve every name in `names`, failing on the first unknown one.
    pub fn resolve_all<S: AsRef<str>>(kind: EntityKind, names: &[S]) -> CoreResult<Vec<Parameter>> {
        names.iter().map(|n| Parameter::resolve(kind, n.as_ref())).collect()
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.attribute.kind()
    }

    /// Human-readable form for chart titles: `total_inflow` → `Total Inflow`.
    pub fn title(&self) -> String {
        title_case(&self.name)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Replace `_` with spaces and capitalise each word, lower-casing the rest.
pub fn title_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
