use serde::{Deserialize, Serialize};

/// Capability flags the authenticated user holds on one group.
///
/// Flags absent from the response read as false.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Permissions {
    pub manage_group_settings: bool,
    pub manage_members: bool,
    pub manage_subgroups: bool,
    pub invite_members: bool,
    pub ban_members: bool,
    pub view_archives: bool,
    pub download_members: bool,
    pub delete_group: bool,
}
