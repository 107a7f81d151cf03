pub mod html;

#[cfg(test)]
mod tests;

use url::Url;

use crate::resources::ResourceKind;

/// A resource reference discovered in the page tree
#[derive(Debug, Clone)]
pub struct ResourceRef {
    /// Kind assigned by the detection rule that matched
    pub kind: ResourceKind,

    /// Tag the reference was found on
    pub tag: &'static str,

    /// Attribute the reference was found in
    pub attribute: &'static str,

    /// Attribute value exactly as written in the page
    pub raw: String,

    /// The reference resolved against the page's base URL
    pub resolved: Url,
}
