use groupsio_models::{
    group::{Group, GroupPrivacy, GroupUpdate},
    id::GroupId,
    permissions::Permissions,
};
use hyper::Method;
use std::sync::Arc;

use crate::{
    error::{ErrorKind, GroupsError},
    route::Route,
    PermissionLookup, Transport,
};

/// Client-side facade for the group family of endpoints.
#[derive(Clone)]
pub struct GroupResource {
    transport: Arc<Transport>,
    perms: Arc<dyn PermissionLookup>,
}

impl GroupResource {
    #[must_use]
    pub fn new(transport: Arc<Transport>, perms: Arc<dyn PermissionLookup>) -> Self {
        Self { transport, perms }
    }

    /// Gets the authenticated user's [`Permissions`] for a group.
    ///
    /// Not cached: repeating the call reflects whatever the server reports
    /// at that moment.
    pub async fn get_permissions(&self, group_id: GroupId) -> Result<Permissions, GroupsError> {
        self.perms.permissions(group_id).await
    }

    /// Gets a [`Group`] by ID.
    ///
    /// Prechecks `manage_group_settings`; without it the call fails with
    /// [`ErrorKind::InadequatePermissions`] and the `getgroup` request is
    /// never issued.
    pub async fn get_group(&self, group_id: GroupId) -> Result<Group, GroupsError> {
        let perms = self.perms.permissions(group_id).await?;
        if !perms.manage_group_settings {
            return Err(GroupsError::inadequate_permissions(group_id));
        }

        self.transport
            .send(&Route::GetGroup { group_id }, Method::GET, None)
            .await
    }

    /// Gets every subgroup of a parent group, following continuation
    /// tokens until the server reports no more pages.
    pub async fn get_subgroups(&self, group_id: GroupId) -> Result<Vec<Group>, GroupsError> {
        self.transport
            .collect_pages(|page_token| Route::GetSubgroups {
                group_id,
                page_token,
            })
            .await
    }

    /// Updates a group from a sparse [`GroupUpdate`].
    ///
    /// The form body contains exactly the fields set on the update, never
    /// the untouched ones. Prechecks `manage_group_settings`.
    pub async fn update_group(
        &self,
        group_id: GroupId,
        update: &GroupUpdate,
    ) -> Result<Group, GroupsError> {
        let perms = self.perms.permissions(group_id).await?;
        if !perms.manage_group_settings {
            return Err(GroupsError::inadequate_permissions(group_id));
        }

        let body =
            serde_urlencoded::to_string(update.form_pairs()).map_err(|source| GroupsError {
                source: Some(Box::new(source)),
                kind: ErrorKind::BuildingRequest,
            })?;

        self.transport
            .send(&Route::UpdateGroup { group_id }, Method::POST, Some(body))
            .await
    }

    /// Not implemented by the remote API; fails immediately with
    /// [`ErrorKind::Unsupported`] and performs no I/O.
    pub fn create_subgroup(
        &self,
        _group_id: GroupId,
        _name: &str,
        _description: &str,
        _privacy: GroupPrivacy,
    ) -> Result<Group, GroupsError> {
        Err(GroupsError::unsupported("createsubgroup"))
    }

    /// Not implemented by the remote API; fails immediately with
    /// [`ErrorKind::Unsupported`] and performs no I/O.
    pub fn delete_group(&self, _group_id: GroupId) -> Result<(), GroupsError> {
        Err(GroupsError::unsupported("deletegroup"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedPermissions(Permissions);

    #[async_trait]
    impl PermissionLookup for FixedPermissions {
        async fn permissions(&self, _group_id: GroupId) -> Result<Permissions, GroupsError> {
            Ok(self.0)
        }
    }

    // Port 9 is unreachable: any request actually issued would surface as
    // ErrorKind::Sending, so an InadequatePermissions result proves the
    // guarded route was never dialed.
    fn resource_with(perms: Permissions) -> GroupResource {
        let client = crate::GroupsClient::with_base_url("test-token", "http://127.0.0.1:9/");
        GroupResource::new(client.transport(), Arc::new(FixedPermissions(perms)))
    }

    #[tokio::test]
    async fn get_group_short_circuits_without_permission() {
        let resource = resource_with(Permissions::default());
        let err = resource.get_group(GroupId(1)).await.unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InadequatePermissions { group_id } if *group_id == GroupId(1)
        ));
    }

    #[tokio::test]
    async fn update_group_short_circuits_without_permission() {
        let resource = resource_with(Permissions::default());
        let update = GroupUpdate::new().website("https://example.org");
        let err = resource.update_group(GroupId(2), &update).await.unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InadequatePermissions { .. }
        ));
    }

    #[test]
    fn create_subgroup_is_unsupported() {
        let resource = resource_with(Permissions::default());
        let err = resource
            .create_subgroup(GroupId(1), "sub", "desc", GroupPrivacy::None)
            .unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::Unsupported {
                operation: "createsubgroup"
            }
        ));
    }

    #[test]
    fn delete_group_is_unsupported() {
        let resource = resource_with(Permissions::default());
        let err = resource.delete_group(GroupId(1)).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::Unsupported {
                operation: "deletegroup"
            }
        ));
    }
}
