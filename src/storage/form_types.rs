//! Form types

use crate::links::LinkStatus;

/// Values to create a Template
pub struct CreateTemplateValues<'a> {
    /// Display name of the template
    pub name: &'a str,

    /// URL prefix the tokens are appended to
    pub base_url: &'a str,
}

/// Values to update a GeneratedLink
pub struct UpdateLinkValues {
    /// New status of the link
    pub status: LinkStatus,
}
