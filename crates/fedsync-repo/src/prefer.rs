//! Representation negotiation for resource fetches

/// LDP containment-triples preference
const CONTAINMENT: &str = "http://www.w3.org/ns/ldp#PreferContainment";
/// Embed contained resources' own triples in the response
const EMBED_RESOURCES: &str = "http://fedora.info/definitions/v4/repository#EmbedResources";
/// Server-managed triples (always omitted)
const SERVER_MANAGED: &str = "http://fedora.info/definitions/v4/repository#ServerManaged";

/// What a `Repository::get` response should contain
///
/// Server-managed triples are omitted unconditionally; containment and
/// embedded children are opt-in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Prefer {
    pub containment: bool,
    pub embed: bool,
}

impl Prefer {
    /// Only the resource's own triples
    pub fn minimal() -> Self {
        Self::default()
    }

    /// Own triples plus `ldp:contains` links to direct children
    pub fn with_containment() -> Self {
        Self {
            containment: true,
            embed: false,
        }
    }

    /// Own triples plus the full bodies of direct children
    pub fn with_embedded() -> Self {
        Self {
            containment: false,
            embed: true,
        }
    }

    /// Render as a `Prefer` header value
    pub fn header_value(&self) -> String {
        let mut include = Vec::new();
        let mut omit = vec![SERVER_MANAGED];

        if self.containment {
            include.push(CONTAINMENT);
        } else {
            omit.push(CONTAINMENT);
        }
        if self.embed {
            include.push(EMBED_RESOURCES);
        }

        let mut value = String::from("return=representation");
        if !include.is_empty() {
            value.push_str(&format!("; include=\"{}\"", include.join(" ")));
        }
        value.push_str(&format!("; omit=\"{}\"", omit.join(" ")));
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_omits_containment() {
        let value = Prefer::minimal().header_value();
        assert!(value.starts_with("return=representation"));
        assert!(value.contains(&format!("omit=\"{SERVER_MANAGED} {CONTAINMENT}\"")));
        assert!(!value.contains("include="));
    }

    #[test]
    fn test_containment_included_when_requested() {
        let value = Prefer::with_containment().header_value();
        assert!(value.contains(&format!("include=\"{CONTAINMENT}\"")));
        assert!(value.contains(&format!("omit=\"{SERVER_MANAGED}\"")));
    }

    #[test]
    fn test_embedded() {
        let value = Prefer::with_embedded().header_value();
        assert!(value.contains(EMBED_RESOURCES));
        assert!(value.contains(&format!("omit=\"{SERVER_MANAGED} {CONTAINMENT}\"")));
    }
}
