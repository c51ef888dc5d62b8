//! Generated links

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Status of a generated link
///
/// Links start as `new`, the external system consuming them marks them `used`
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkStatus {
    /// Not used yet, `active` is accepted as an alias
    #[serde(alias = "active")]
    New,

    /// Used for a registration
    Used,
}

impl LinkStatus {
    /// Status as written to external systems
    pub fn as_str(self) -> &'static str {
        match self {
            LinkStatus::New => "new",
            LinkStatus::Used => "used",
        }
    }
}

/// A minted link
#[derive(Clone, Debug)]
pub struct GeneratedLink {
    /// Link ID
    pub id: Uuid,

    /// Template the link was minted from
    pub template_id: Uuid,

    /// Copy of the template name at the time of minting
    pub template_name: String,

    /// The token appended to the base URL
    pub token: String,

    /// Base URL of the template followed by the token
    pub full_url: String,

    /// Current status
    pub status: LinkStatus,

    /// Creation date, local time
    pub created_at: NaiveDateTime,
}

impl GeneratedLink {
    /// Is the link still usable?
    pub fn is_new(&self) -> bool {
        self.status == LinkStatus::New
    }
}

/// Counts derived from the ledger
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    /// All links
    pub total: usize,

    /// Links with status `new`
    pub new: usize,

    /// Links with status `used`
    pub used: usize,
}

impl LinkStats {
    /// Count the links by status
    pub fn from_links<'a, I>(links: I) -> Self
    where
        I: IntoIterator<Item = &'a GeneratedLink>,
    {
        links
            .into_iter()
            .fold(Self::default(), |mut stats, link| {
                stats.total += 1;

                match link.status {
                    LinkStatus::New => stats.new += 1,
                    LinkStatus::Used => stats.used += 1,
                }

                stats
            })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_status_vocabulary() {
        let status: LinkStatus = serde_json::from_value(json!("new")).unwrap();
        assert_eq!(status, LinkStatus::New);

        let status: LinkStatus = serde_json::from_value(json!("active")).unwrap();
        assert_eq!(status, LinkStatus::New);

        let status: LinkStatus = serde_json::from_value(json!("used")).unwrap();
        assert_eq!(status, LinkStatus::Used);

        assert!(serde_json::from_value::<LinkStatus>(json!("expired")).is_err());

        assert_eq!(serde_json::to_value(LinkStatus::New).unwrap(), json!("new"));
    }
}
