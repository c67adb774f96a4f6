//! Application service: tenant applications, org OAuth apps and email templates.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::{ApiRequest, Transport};
use crate::models::{
    Application, ApplicationWithSecret, CreateApplicationOptions, CreateOAuthAppOptions,
    EmailTemplate, PreviewTemplateRequest, UpdateApplicationRequest, UpdateEmailTemplateRequest,
    UpdateOAuthAppRequest,
};
use crate::Result;

/// Service for client applications.
///
/// Two families live here. Tenant applications are addressed by
/// `(app_id, tenant_id)` and authenticate machine clients. Organization
/// OAuth apps are the relying parties that users log in to. Secrets are only
/// returned in plaintext by creation and rotation.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: coreauth_rs::CoreAuthClient) -> coreauth_rs::Result<()> {
/// let app = client
///     .applications()
///     .create(
///         "tenant-1",
///         "Billing worker",
///         "service",
///         &[],
///         &["read:invoices".to_string()],
///         Default::default(),
///     )
///     .await?;
/// println!("secret: {:?}", app.client_secret_plain);
/// # Ok(())
/// # }
/// ```
pub struct ApplicationsService {
    inner: Arc<Transport>,
}

impl ApplicationsService {
    pub(crate) fn new(inner: Arc<Transport>) -> Self {
        Self { inner }
    }

    /// Create a tenant application.
    ///
    /// `application_type` is `web`, `spa`, `native` or `service`.
    pub async fn create(
        &self,
        tenant_id: &str,
        name: &str,
        application_type: &str,
        redirect_uris: &[String],
        allowed_scopes: &[String],
        options: CreateApplicationOptions,
    ) -> Result<ApplicationWithSecret> {
        #[derive(Serialize)]
        struct Request<'a> {
            tenant_id: &'a str,
            name: &'a str,
            application_type: &'a str,
            redirect_uris: &'a [String],
            allowed_scopes: &'a [String],
            #[serde(flatten)]
            options: CreateApplicationOptions,
        }

        self.inner
            .post(
                "/api/applications",
                &Request {
                    tenant_id,
                    name,
                    application_type,
                    redirect_uris,
                    allowed_scopes,
                    options,
                },
            )
            .await
    }

    /// List the applications of a tenant.
    pub async fn list(&self, tenant_id: &str) -> Result<Value> {
        self.inner
            .get(&format!("/api/tenants/{}/applications", tenant_id))
            .await
    }

    /// Get a tenant application.
    pub async fn get(&self, app_id: &str, tenant_id: &str) -> Result<Application> {
        self.inner.get(&app_path(app_id, tenant_id)).await
    }

    /// Update a tenant application.
    ///
    /// The server takes updates as a POST on the application resource.
    pub async fn update(
        &self,
        app_id: &str,
        tenant_id: &str,
        changes: &UpdateApplicationRequest,
    ) -> Result<Application> {
        self.inner.post(&app_path(app_id, tenant_id), changes).await
    }

    /// Delete a tenant application.
    pub async fn delete(&self, app_id: &str, tenant_id: &str) -> Result<()> {
        self.inner.delete(&app_path(app_id, tenant_id)).await
    }

    /// Issue a new client secret; the old one stops working.
    pub async fn rotate_secret(&self, app_id: &str, tenant_id: &str) -> Result<ApplicationWithSecret> {
        self.inner
            .post_empty(&format!("{}/rotate-secret", app_path(app_id, tenant_id)))
            .await
    }

    /// Check a client id and secret pair.
    pub async fn authenticate(&self, client_id: &str, client_secret: &str) -> Result<Value> {
        self.inner
            .post(
                "/api/applications/authenticate",
                &json!({ "client_id": client_id, "client_secret": client_secret }),
            )
            .await
    }

    /// Create an organization OAuth app.
    pub async fn create_oauth_app(
        &self,
        org_id: &str,
        name: &str,
        slug: &str,
        app_type: &str,
        callback_urls: &[String],
        options: CreateOAuthAppOptions,
    ) -> Result<ApplicationWithSecret> {
        #[derive(Serialize)]
        struct Request<'a> {
            name: &'a str,
            slug: &'a str,
            app_type: &'a str,
            callback_urls: &'a [String],
            #[serde(flatten)]
            options: CreateOAuthAppOptions,
        }

        self.inner
            .post(
                &format!("/api/organizations/{}/applications", org_id),
                &Request {
                    name,
                    slug,
                    app_type,
                    callback_urls,
                    options,
                },
            )
            .await
    }

    /// List the OAuth apps of an organization.
    pub async fn list_oauth_apps(&self, org_id: &str) -> Result<Value> {
        self.inner
            .get(&format!("/api/organizations/{}/applications", org_id))
            .await
    }

    /// Get an OAuth app.
    pub async fn get_oauth_app(&self, org_id: &str, app_id: &str) -> Result<Application> {
        self.inner.get(&oauth_app_path(org_id, app_id)).await
    }

    /// Update an OAuth app.
    pub async fn update_oauth_app(
        &self,
        org_id: &str,
        app_id: &str,
        changes: &UpdateOAuthAppRequest,
    ) -> Result<Application> {
        self.inner.put(&oauth_app_path(org_id, app_id), changes).await
    }

    /// Delete an OAuth app.
    pub async fn delete_oauth_app(&self, org_id: &str, app_id: &str) -> Result<()> {
        self.inner.delete(&oauth_app_path(org_id, app_id)).await
    }

    /// Issue a new secret for an OAuth app.
    pub async fn rotate_oauth_secret(&self, org_id: &str, app_id: &str) -> Result<ApplicationWithSecret> {
        self.inner
            .post_empty(&format!("{}/rotate-secret", oauth_app_path(org_id, app_id)))
            .await
    }

    /// List the email templates of an organization.
    pub async fn list_email_templates(&self, org_id: &str) -> Result<Value> {
        self.inner
            .get(&format!("/api/organizations/{}/email-templates", org_id))
            .await
    }

    /// Get one email template; the platform default is returned when none
    /// has been customized.
    pub async fn get_email_template(&self, org_id: &str, template_type: &str) -> Result<EmailTemplate> {
        self.inner.get(&template_path(org_id, template_type)).await
    }

    /// Customize an email template.
    pub async fn update_email_template(
        &self,
        org_id: &str,
        template_type: &str,
        changes: &UpdateEmailTemplateRequest,
    ) -> Result<EmailTemplate> {
        self.inner
            .put(&template_path(org_id, template_type), changes)
            .await
    }

    /// Drop a customization and fall back to the platform default.
    pub async fn delete_email_template(&self, org_id: &str, template_type: &str) -> Result<()> {
        self.inner.delete(&template_path(org_id, template_type)).await
    }

    /// Render a template with sample data.
    ///
    /// With `draft` set, the unsaved subject and bodies are rendered instead
    /// of the stored template. Without it no body is sent.
    pub async fn preview_email_template(
        &self,
        org_id: &str,
        template_type: &str,
        draft: Option<&PreviewTemplateRequest>,
    ) -> Result<Value> {
        let mut request =
            ApiRequest::post(format!("{}/preview", template_path(org_id, template_type)));
        if let Some(draft) = draft {
            request = request.json(draft)?;
        }
        self.inner.send(request).await
    }
}

fn app_path(app_id: &str, tenant_id: &str) -> String {
    format!("/api/applications/{}/tenants/{}", app_id, tenant_id)
}

fn oauth_app_path(org_id: &str, app_id: &str) -> String {
    format!("/api/organizations/{}/applications/{}", org_id, app_id)
}

fn template_path(org_id: &str, template_type: &str) -> String {
    format!("/api/organizations/{}/email-templates/{}", org_id, template_type)
}
