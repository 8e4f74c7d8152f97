use serde::Serialize;

/// A user profile assembled from one fetched page
///
/// Every field except `id` is optional; profile pages expose whatever the
/// account holder (and the platform's privacy settings) allow. A record is
/// only worth keeping when at least one optional field carries data, which
/// callers check through [`ProfileRecord::has_data`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    /// Numeric user ID the platform assigned to this profile
    pub id: u32,

    /// Display name, taken from the page title
    pub name: Option<String>,

    /// Decoded email address, when the page exposes a mailto link
    pub email: Option<String>,

    /// Absolute URL of the profile picture
    pub image: Option<String>,

    /// Free-text self description
    pub description: Option<String>,

    /// Human-readable "last access" timestamp as the platform renders it
    pub last_access: Option<String>,
}

impl ProfileRecord {
    /// Creates an empty record for the given user ID
    pub fn new(id: u32) -> Self {
        ProfileRecord {
            id,
            name: None,
            email: None,
            image: None,
            description: None,
            last_access: None,
        }
    }

    /// Returns true if at least one optional field is populated
    ///
    /// The ID alone never counts: a page that answered 200 but exposed
    /// nothing is treated as "no data", not as a found profile.
    pub fn has_data(&self) -> bool {
        is_present(&self.name)
            || is_present(&self.email)
            || is_present(&self.image)
            || is_present(&self.description)
            || is_present(&self.last_access)
    }

    /// Returns the populated fields as (label, value) pairs in display order
    ///
    /// The ID is always first; optional fields follow only when non-empty.
    pub fn present_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("Id", self.id.to_string())];
        for (label, value) in [
            ("Name", &self.name),
            ("Email", &self.email),
            ("Image", &self.image),
            ("Description", &self.description),
            ("Last_Access", &self.last_access),
        ] {
            if let Some(value) = value {
                if !value.is_empty() {
                    fields.push((label, value.clone()));
                }
            }
        }
        fields
    }
}

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}
