use std::fmt;

/// Suffix appended to the uppercased organization to form its facility.
pub const FACILITY_SUFFIX: &str = "-DM1";

/// Default prefix of the password-grant username; the lowercased org follows it.
pub const DEFAULT_USERNAME_PREFIX: &str = "sdtadmin@";

/// Facility routing value for an organization, e.g. `ss-demo` -> `SS-DEMO-DM1`.
pub fn derive_facility_id(org: &str) -> String {
    format!("{}{}", org.to_uppercase(), FACILITY_SUFFIX)
}

pub fn token_username(prefix: &str, org: &str) -> String {
    format!("{}{}", prefix, org.to_lowercase())
}

/// Caller-supplied credentials scoping one data-plane call to a tenant.
///
/// The token is opaque and never cached; callers resupply it on every request.
#[derive(Clone, PartialEq, Eq)]
pub struct TenantContext {
    org: String,
    token: String,
}

impl TenantContext {
    /// Trims both fields; `None` when either ends up empty.
    pub fn parse(org: &str, token: &str) -> Option<Self> {
        let org = org.trim();
        let token = token.trim();
        if org.is_empty() || token.is_empty() {
            return None;
        }
        Some(Self {
            org: org.to_string(),
            token: token.to_string(),
        })
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn organization(&self) -> String {
        self.org.to_uppercase()
    }

    pub fn facility_id(&self) -> String {
        derive_facility_id(&self.org)
    }

    pub fn headers(&self) -> [(&'static str, String); 5] {
        let facility = self.facility_id();
        [
            ("Authorization", format!("Bearer {}", self.token)),
            ("Content-Type", "application/json".to_string()),
            ("FacilityId", facility.clone()),
            ("selectedOrganization", self.organization()),
            ("selectedLocation", facility),
        ]
    }
}

impl fmt::Debug for TenantContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantContext")
            .field("org", &self.org)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
