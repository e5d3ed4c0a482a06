//! Icon identifier grammar.
//!
//! Identifiers look like `ph.house.fill` or `ion.arrow.back.outline`: a
//! provider prefix followed by one or more dot-separated segments. The last
//! segment may name a modifier (a Phosphor weight or an Ionicons variant), but
//! only when at least one segment is left over for the base name. That rule is
//! table driven through [`split_modifier`] so it can be exercised without the
//! rest of the parser.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Provider {
    Phosphor,
    Ionicons,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Phosphor, Provider::Ionicons];

    /// Identifier prefix recognised for this provider.
    pub fn prefix(self) -> &'static str {
        match self {
            Provider::Phosphor => "ph",
            Provider::Ionicons => "ion",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Provider::ALL
            .into_iter()
            .find(|provider| provider.prefix() == prefix)
    }

    /// Modifier used when the identifier does not carry one.
    pub fn default_modifier(self) -> Modifier {
        match self {
            Provider::Phosphor => Modifier::Weight(PhosphorWeight::Regular),
            Provider::Ionicons => Modifier::Variant(IoniconsVariant::Default),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhosphorWeight {
    Regular,
    Thin,
    Light,
    Bold,
    Fill,
}

impl PhosphorWeight {
    pub fn as_str(self) -> &'static str {
        match self {
            PhosphorWeight::Regular => "regular",
            PhosphorWeight::Thin => "thin",
            PhosphorWeight::Light => "light",
            PhosphorWeight::Bold => "bold",
            PhosphorWeight::Fill => "fill",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IoniconsVariant {
    Default,
    Outline,
    Sharp,
}

impl IoniconsVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            IoniconsVariant::Default => "default",
            IoniconsVariant::Outline => "outline",
            IoniconsVariant::Sharp => "sharp",
        }
    }
}

/// Rendition suffix; the inner type always matches the owning provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Weight(PhosphorWeight),
    Variant(IoniconsVariant),
}

impl Modifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Weight(weight) => weight.as_str(),
            Modifier::Variant(variant) => variant.as_str(),
        }
    }

    pub fn provider(self) -> Provider {
        match self {
            Modifier::Weight(_) => Provider::Phosphor,
            Modifier::Variant(_) => Provider::Ionicons,
        }
    }

    pub fn is_default(self) -> bool {
        self == self.provider().default_modifier()
    }
}

struct ModifierKeyword {
    provider: Provider,
    keyword: &'static str,
    modifier: Modifier,
}

// Keywords that may be consumed from the end of an identifier. The Ionicons
// `default` variant is absent: `ion.home.default` keeps `default` in the base
// name.
const MODIFIER_KEYWORDS: &[ModifierKeyword] = &[
    ModifierKeyword {
        provider: Provider::Phosphor,
        keyword: "regular",
        modifier: Modifier::Weight(PhosphorWeight::Regular),
    },
    ModifierKeyword {
        provider: Provider::Phosphor,
        keyword: "thin",
        modifier: Modifier::Weight(PhosphorWeight::Thin),
    },
    ModifierKeyword {
        provider: Provider::Phosphor,
        keyword: "light",
        modifier: Modifier::Weight(PhosphorWeight::Light),
    },
    ModifierKeyword {
        provider: Provider::Phosphor,
        keyword: "bold",
        modifier: Modifier::Weight(PhosphorWeight::Bold),
    },
    ModifierKeyword {
        provider: Provider::Phosphor,
        keyword: "fill",
        modifier: Modifier::Weight(PhosphorWeight::Fill),
    },
    ModifierKeyword {
        provider: Provider::Ionicons,
        keyword: "outline",
        modifier: Modifier::Variant(IoniconsVariant::Outline),
    },
    ModifierKeyword {
        provider: Provider::Ionicons,
        keyword: "sharp",
        modifier: Modifier::Variant(IoniconsVariant::Sharp),
    },
];

/// Look up `keyword` in the provider's modifier table.
pub fn modifier_keyword(provider: Provider, keyword: &str) -> Option<Modifier> {
    MODIFIER_KEYWORDS
        .iter()
        .find(|entry| entry.provider == provider && entry.keyword == keyword)
        .map(|entry| entry.modifier)
}

/// Split the segments after the prefix into base-name segments and a modifier.
///
/// The last segment becomes the modifier only when it is a keyword for
/// `provider` and at least one segment remains after removing it. Otherwise
/// every segment belongs to the base name and the provider default applies,
/// so `ph.fill` names an icon called `fill` in the regular weight.
pub fn split_modifier<'a, 's>(
    provider: Provider,
    segments: &'a [&'s str],
) -> (&'a [&'s str], Modifier) {
    if let Some((last, rest)) = segments.split_last() {
        if !rest.is_empty() {
            if let Some(modifier) = modifier_keyword(provider, last) {
                return (rest, modifier);
            }
        }
    }
    (segments, provider.default_modifier())
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IconIdentifier {
    provider: Provider,
    base_name: String,
    modifier: Modifier,
}

impl IconIdentifier {
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Base name with its internal dots preserved (`arrow.up`).
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn modifier(&self) -> Modifier {
        self.modifier
    }

    /// Canonical asset name: prefix, base name, and the modifier when it is
    /// not the provider default. Used as catalog entry name and lookup key.
    pub fn asset_name(&self) -> String {
        if self.modifier.is_default() {
            format!("{}.{}", self.provider.prefix(), self.base_name)
        } else {
            format!(
                "{}.{}.{}",
                self.provider.prefix(),
                self.base_name,
                self.modifier.as_str()
            )
        }
    }

    /// Base name as it appears in source file names. Ionicons files are
    /// hyphen-joined; Phosphor keeps the dotted form.
    pub fn path_stem(&self) -> String {
        match self.provider {
            Provider::Phosphor => self.base_name.clone(),
            Provider::Ionicons => self.base_name.replace('.', "-"),
        }
    }

    pub fn is_outline_variant(&self) -> bool {
        self.modifier == Modifier::Variant(IoniconsVariant::Outline)
    }
}

impl fmt::Display for IconIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.asset_name())
    }
}

/// Parse a dotted icon identifier. Returns `None` for unknown prefixes,
/// identifiers with fewer than two segments, and empty segments.
pub fn parse(raw: &str) -> Option<IconIdentifier> {
    let segments: Vec<&str> = raw.split('.').collect();
    if segments.len() < 2 || segments.iter().any(|segment| segment.is_empty()) {
        return None;
    }

    let provider = Provider::from_prefix(segments[0])?;
    let (base_segments, modifier) = split_modifier(provider, &segments[1..]);
    let base_name = base_segments.join(".");
    if base_name.is_empty() {
        return None;
    }

    Some(IconIdentifier {
        provider,
        base_name,
        modifier,
    })
}
