//! Group and invitation service.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::{ApiRequest, Transport};
use crate::models::{
    AcceptInvitationRequest, CreateGroupOptions, CreateInvitationOptions, Group, GroupMember,
    GroupRole, Invitation, UpdateGroupRequest,
};
use crate::Result;

/// Service for tenant groups, their members and roles, and user invitations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: coreauth_rs::CoreAuthClient) -> coreauth_rs::Result<()> {
/// let group = client
///     .groups()
///     .create("t1", "Engineering", Default::default())
///     .await?;
/// let group_id = group.id.unwrap_or_default();
///
/// client.groups().add_member("t1", &group_id, "user-42", Some("admin")).await?;
/// client
///     .groups()
///     .create_invitation("t1", "new.hire@example.com", Default::default())
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct GroupsService {
    inner: Arc<Transport>,
}

impl GroupsService {
    pub(crate) fn new(inner: Arc<Transport>) -> Self {
        Self { inner }
    }

    /// Create a group.
    pub async fn create(&self, tenant_id: &str, name: &str, options: CreateGroupOptions) -> Result<Group> {
        #[derive(Serialize)]
        struct Request<'a> {
            name: &'a str,
            #[serde(flatten)]
            options: CreateGroupOptions,
        }

        self.inner
            .post(&groups_path(tenant_id), &Request { name, options })
            .await
    }

    /// List the groups of a tenant.
    pub async fn list(&self, tenant_id: &str) -> Result<Value> {
        self.inner.get(&groups_path(tenant_id)).await
    }

    /// Get a group.
    pub async fn get(&self, tenant_id: &str, group_id: &str) -> Result<Group> {
        self.inner.get(&group_path(tenant_id, group_id)).await
    }

    /// Update a group.
    pub async fn update(
        &self,
        tenant_id: &str,
        group_id: &str,
        changes: &UpdateGroupRequest,
    ) -> Result<Group> {
        self.inner.put(&group_path(tenant_id, group_id), changes).await
    }

    /// Delete a group.
    pub async fn delete(&self, tenant_id: &str, group_id: &str) -> Result<()> {
        self.inner.delete(&group_path(tenant_id, group_id)).await
    }

    /// Add a user to a group.
    pub async fn add_member(
        &self,
        tenant_id: &str,
        group_id: &str,
        user_id: &str,
        role: Option<&str>,
    ) -> Result<GroupMember> {
        #[derive(Serialize)]
        struct Request<'a> {
            user_id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            role: Option<&'a str>,
        }

        self.inner
            .post(
                &format!("{}/members", group_path(tenant_id, group_id)),
                &Request { user_id, role },
            )
            .await
    }

    /// List the members of a group.
    pub async fn list_members(&self, tenant_id: &str, group_id: &str) -> Result<Value> {
        self.inner
            .get(&format!("{}/members", group_path(tenant_id, group_id)))
            .await
    }

    /// Change a member's role within the group.
    pub async fn update_member(
        &self,
        tenant_id: &str,
        group_id: &str,
        user_id: &str,
        role: &str,
    ) -> Result<GroupMember> {
        self.inner
            .patch(
                &member_path(tenant_id, group_id, user_id),
                &json!({ "role": role }),
            )
            .await
    }

    /// Remove a user from a group.
    pub async fn remove_member(&self, tenant_id: &str, group_id: &str, user_id: &str) -> Result<()> {
        self.inner
            .delete(&member_path(tenant_id, group_id, user_id))
            .await
    }

    /// Grant a role to every member of a group.
    pub async fn assign_role(&self, tenant_id: &str, group_id: &str, role_id: &str) -> Result<GroupRole> {
        self.inner
            .post(
                &format!("{}/roles", group_path(tenant_id, group_id)),
                &json!({ "role_id": role_id }),
            )
            .await
    }

    /// List the roles granted to a group.
    pub async fn list_roles(&self, tenant_id: &str, group_id: &str) -> Result<Value> {
        self.inner
            .get(&format!("{}/roles", group_path(tenant_id, group_id)))
            .await
    }

    /// Take a role away from a group.
    pub async fn remove_role(&self, tenant_id: &str, group_id: &str, role_id: &str) -> Result<()> {
        self.inner
            .delete(&format!("{}/roles/{}", group_path(tenant_id, group_id), role_id))
            .await
    }

    /// Groups a user belongs to.
    pub async fn get_user_groups(&self, tenant_id: &str, user_id: &str) -> Result<Value> {
        self.inner
            .get(&format!("/api/tenants/{}/users/{}/groups", tenant_id, user_id))
            .await
    }

    /// Invite someone to a tenant by email.
    pub async fn create_invitation(
        &self,
        tenant_id: &str,
        email: &str,
        options: CreateInvitationOptions,
    ) -> Result<Invitation> {
        #[derive(Serialize)]
        struct Request<'a> {
            email: &'a str,
            #[serde(flatten)]
            options: CreateInvitationOptions,
        }

        self.inner
            .post(&invitations_path(tenant_id), &Request { email, options })
            .await
    }

    /// List the invitations of a tenant.
    pub async fn list_invitations(&self, tenant_id: &str) -> Result<Value> {
        self.inner.get(&invitations_path(tenant_id)).await
    }

    /// Revoke a pending invitation.
    pub async fn revoke_invitation(&self, tenant_id: &str, invitation_id: &str) -> Result<()> {
        self.inner
            .delete(&format!("{}/{}", invitations_path(tenant_id), invitation_id))
            .await
    }

    /// Send the invitation email again.
    pub async fn resend_invitation(&self, tenant_id: &str, invitation_id: &str) -> Result<Value> {
        self.inner
            .post_empty(&format!(
                "{}/{}/resend",
                invitations_path(tenant_id),
                invitation_id
            ))
            .await
    }

    /// Check an invitation token before showing the sign-up form.
    pub async fn verify_invitation(&self, token: &str) -> Result<Value> {
        self.inner
            .send(ApiRequest::get("/api/invitations/verify").query_param("token", Some(token)))
            .await
    }

    /// Accept an invitation and create the account.
    pub async fn accept_invitation(&self, request: &AcceptInvitationRequest) -> Result<Value> {
        self.inner.post("/api/invitations/accept", request).await
    }
}

fn groups_path(tenant_id: &str) -> String {
    format!("/api/tenants/{}/groups", tenant_id)
}

fn group_path(tenant_id: &str, group_id: &str) -> String {
    format!("{}/{}", groups_path(tenant_id), group_id)
}

fn member_path(tenant_id: &str, group_id: &str, user_id: &str) -> String {
    format!("{}/members/{}", group_path(tenant_id, group_id), user_id)
}

fn invitations_path(tenant_id: &str) -> String {
    format!("/api/tenants/{}/invitations", tenant_id)
}
