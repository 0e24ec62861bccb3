use groupsio_models::{
    id::{GroupId, SubscriptionId},
    subscription::{Subscription, SubscriptionUpdate},
};
use hyper::Method;
use std::sync::Arc;

use crate::{
    error::{ErrorKind, GroupsError},
    route::Route,
    PermissionLookup, Transport,
};

/// Client-side facade for the membership family of endpoints.
#[derive(Clone)]
pub struct MemberResource {
    transport: Arc<Transport>,
    perms: Arc<dyn PermissionLookup>,
}

impl MemberResource {
    #[must_use]
    pub fn new(transport: Arc<Transport>, perms: Arc<dyn PermissionLookup>) -> Self {
        Self { transport, perms }
    }

    /// Gets every member of a group, following continuation tokens until
    /// the server reports no more pages.
    pub async fn get_members(&self, group_id: GroupId) -> Result<Vec<Subscription>, GroupsError> {
        self.transport
            .collect_pages(|page_token| Route::GetMembers {
                group_id,
                page_token,
            })
            .await
    }

    /// Updates one membership from a sparse [`SubscriptionUpdate`].
    ///
    /// Prechecks `manage_members` on the owning group; the form body
    /// contains exactly the fields set on the update.
    pub async fn update_member(
        &self,
        group_id: GroupId,
        subscription_id: SubscriptionId,
        update: &SubscriptionUpdate,
    ) -> Result<Subscription, GroupsError> {
        let perms = self.perms.permissions(group_id).await?;
        if !perms.manage_members {
            return Err(GroupsError::inadequate_permissions(group_id));
        }

        let body =
            serde_urlencoded::to_string(update.form_pairs()).map_err(|source| GroupsError {
                source: Some(Box::new(source)),
                kind: ErrorKind::BuildingRequest,
            })?;

        self.transport
            .send(
                &Route::UpdateMember { subscription_id },
                Method::POST,
                Some(body),
            )
            .await
    }

    /// Removes one member from a group, returning the removed
    /// subscription. Prechecks `manage_members`.
    pub async fn remove_member(
        &self,
        group_id: GroupId,
        subscription_id: SubscriptionId,
    ) -> Result<Subscription, GroupsError> {
        let perms = self.perms.permissions(group_id).await?;
        if !perms.manage_members {
            return Err(GroupsError::inadequate_permissions(group_id));
        }

        self.transport
            .send(
                &Route::RemoveMember { subscription_id },
                Method::POST,
                Some(String::new()),
            )
            .await
    }

    /// Not implemented by the remote API; fails immediately with
    /// [`ErrorKind::Unsupported`] and performs no I/O.
    pub fn direct_add(
        &self,
        _group_id: GroupId,
        _emails: &[&str],
    ) -> Result<Vec<Subscription>, GroupsError> {
        Err(GroupsError::unsupported("directadd"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use groupsio_models::permissions::Permissions;

    struct FixedPermissions(Permissions);

    #[async_trait]
    impl PermissionLookup for FixedPermissions {
        async fn permissions(&self, _group_id: GroupId) -> Result<Permissions, GroupsError> {
            Ok(self.0)
        }
    }

    fn resource_with(perms: Permissions) -> MemberResource {
        let client = crate::GroupsClient::with_base_url("test-token", "http://127.0.0.1:9/");
        MemberResource::new(client.transport(), Arc::new(FixedPermissions(perms)))
    }

    #[tokio::test]
    async fn update_member_short_circuits_without_permission() {
        let resource = resource_with(Permissions::default());
        let update = SubscriptionUpdate::new().full_name("New Name");
        let err = resource
            .update_member(GroupId(1), SubscriptionId(9), &update)
            .await
            .unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InadequatePermissions { .. }
        ));
    }

    #[test]
    fn direct_add_is_unsupported() {
        let resource = resource_with(Permissions::default());
        let err = resource
            .direct_add(GroupId(1), &["someone@example.org"])
            .unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::Unsupported {
                operation: "directadd"
            }
        ));
    }
}
