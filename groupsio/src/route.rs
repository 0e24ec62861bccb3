use groupsio_models::{
    id::{GroupId, SubscriptionId},
    page::PageToken,
};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Fixed page size sent on every list request.
pub const MAX_RESULTS: u32 = 100;

/// Endpoint suffixes relative to the client's base URL.
pub enum Route {
    GetPermissions {
        group_id: GroupId,
    },
    GetGroup {
        group_id: GroupId,
    },
    GetSubgroups {
        group_id: GroupId,
        page_token: Option<PageToken>,
    },
    UpdateGroup {
        group_id: GroupId,
    },
    GetMembers {
        group_id: GroupId,
        page_token: Option<PageToken>,
    },
    UpdateMember {
        subscription_id: SubscriptionId,
    },
    RemoveMember {
        subscription_id: SubscriptionId,
    },
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Route::GetPermissions { group_id } => {
                write!(f, "getperms?group_id={group_id}")
            }
            Route::GetGroup { group_id } => {
                write!(f, "getgroup?group_id={group_id}")
            }
            Route::GetSubgroups {
                group_id,
                page_token,
            } => {
                write!(f, "getsubgroups?group_id={group_id}&limit={MAX_RESULTS}")?;
                if let Some(page_token) = page_token {
                    write!(f, "&page_token={page_token}")?;
                }
                Ok(())
            }
            Route::UpdateGroup { group_id } => {
                write!(f, "updategroup?group_id={group_id}")
            }
            Route::GetMembers {
                group_id,
                page_token,
            } => {
                write!(f, "getmembers?group_id={group_id}&limit={MAX_RESULTS}")?;
                if let Some(page_token) = page_token {
                    write!(f, "&page_token={page_token}")?;
                }
                Ok(())
            }
            Route::UpdateMember { subscription_id } => {
                write!(f, "updatemember?sub_id={subscription_id}")
            }
            Route::RemoveMember { subscription_id } => {
                write!(f, "removemember?sub_id={subscription_id}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_list_request_has_no_token() {
        let route = Route::GetSubgroups {
            group_id: GroupId(1),
            page_token: None,
        };
        assert_eq!(route.to_string(), "getsubgroups?group_id=1&limit=100");
    }

    #[test]
    fn continuation_request_carries_token() {
        let route = Route::GetMembers {
            group_id: GroupId(7),
            page_token: Some(PageToken::from("A")),
        };
        assert_eq!(
            route.to_string(),
            "getmembers?group_id=7&limit=100&page_token=A"
        );
    }

    #[test]
    fn point_routes() {
        assert_eq!(
            Route::GetPermissions {
                group_id: GroupId(42)
            }
            .to_string(),
            "getperms?group_id=42"
        );
        assert_eq!(
            Route::UpdateMember {
                subscription_id: SubscriptionId(9)
            }
            .to_string(),
            "updatemember?sub_id=9"
        );
    }
}
