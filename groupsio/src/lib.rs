#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

pub mod error;
pub mod group;
pub mod member;
pub mod request;
mod route;

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::{
    body::Bytes,
    header::{HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE},
    http::response::Parts,
    Method, Request as HyperRequest,
};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client as HyperClient},
    rt::TokioExecutor,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use groupsio_models::{
    error::ApiError,
    id::GroupId,
    page::{Page, PageToken},
    permissions::Permissions,
};

use crate::{
    error::{DeserializeBodyError, ErrorKind, GroupsError},
    group::GroupResource,
    member::MemberResource,
    request::Request,
    route::Route,
};

pub use crate::route::MAX_RESULTS;

/// Production endpoint prefix. Tests point the client elsewhere with
/// [`GroupsClient::with_base_url`].
pub const DEFAULT_BASE_URL: &str = "https://groups.io/api/v1/";

/// Upper bound on sequential page fetches in one aggregation. The remote
/// service's behavior on malformed tokens is unspecified, so a cyclic token
/// must not loop forever.
const MAX_PAGE_FETCHES: usize = 500;

/// Narrow capability for the client-side permission precheck.
///
/// Resources depend on this instead of reaching back into the owning
/// client, so tests can substitute a stub. The check is an optimization to
/// fail fast, not a substitute for server-side authorization.
#[async_trait]
pub trait PermissionLookup: Send + Sync {
    async fn permissions(&self, group_id: GroupId) -> Result<Permissions, GroupsError>;
}

struct PermsEndpoint {
    transport: Arc<Transport>,
}

#[async_trait]
impl PermissionLookup for PermsEndpoint {
    async fn permissions(&self, group_id: GroupId) -> Result<Permissions, GroupsError> {
        self.transport
            .send(&Route::GetPermissions { group_id }, Method::GET, None)
            .await
    }
}

/// Facade exposing one resource per entity family.
#[derive(Clone)]
pub struct GroupsClient {
    transport: Arc<Transport>,
}

impl GroupsClient {
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    #[must_use]
    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        Self {
            transport: Arc::new(Transport::new(token, base_url)),
        }
    }

    #[must_use]
    pub fn groups(&self) -> GroupResource {
        let perms = Arc::new(PermsEndpoint {
            transport: Arc::clone(&self.transport),
        });
        GroupResource::new(Arc::clone(&self.transport), perms)
    }

    #[must_use]
    pub fn members(&self) -> MemberResource {
        let perms = Arc::new(PermsEndpoint {
            transport: Arc::clone(&self.transport),
        });
        MemberResource::new(Arc::clone(&self.transport), perms)
    }

    #[must_use]
    pub fn transport(&self) -> Arc<Transport> {
        Arc::clone(&self.transport)
    }
}

/// Base collaborator: sends one request, enforces the status contract, and
/// deserializes the body into the requested shape.
pub struct Transport {
    client: HyperClient<HttpsConnector<HttpConnector>, Full<Bytes>>,
    base_url: String,
    auth: String,
}

impl Transport {
    fn new(token: &str, base_url: &str) -> Self {
        let connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client = HyperClient::builder(TokioExecutor::new()).build(connector);
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            client,
            base_url,
            auth: format!("Bearer {token}"),
        }
    }

    /// Single round trip: on HTTP success the body deserializes into `T`;
    /// on failure the server's error body (if structured) becomes
    /// [`ErrorKind::Api`], anything else [`ErrorKind::Response`].
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        route: &Route,
        method: Method,
        form_body: Option<String>,
    ) -> Result<T, GroupsError> {
        let auth = HeaderValue::from_str(&self.auth).map_err(|source| GroupsError {
            source: Some(Box::new(source)),
            kind: ErrorKind::BuildingRequest,
        })?;

        let mut request = Request::new()
            .uri(format!("{}{route}", self.base_url))
            .method(method.clone())
            .header(AUTHORIZATION, auth);
        if let Some(form_body) = form_body {
            let bytes = form_body.into_bytes();
            request = request
                .header(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                )
                .header(CONTENT_LENGTH, bytes.len())
                .body(Full::new(Bytes::from(bytes)));
        }
        let request = request.build().map_err(|source| GroupsError {
            source: Some(Box::new(source)),
            kind: ErrorKind::BuildingRequest,
        })?;

        tracing::debug!(%route, %method, "dispatching request");
        let (parts, bytes) = self.request(request).await?;

        if !parts.status.is_success() {
            if let Ok(error) = serde_json::from_slice::<ApiError>(&bytes) {
                return Err(GroupsError {
                    source: None,
                    kind: ErrorKind::Api {
                        route: route.to_string(),
                        status: parts.status,
                        error,
                    },
                });
            }
            return Err(GroupsError {
                source: None,
                kind: ErrorKind::Response {
                    route: route.to_string(),
                    status: parts.status,
                    bytes,
                },
            });
        }

        serde_json::from_slice::<T>(&bytes).map_err(|source| GroupsError {
            source: Some(Box::new(DeserializeBodyError {
                source: Some(Box::new(source)),
                bytes,
            })),
            kind: ErrorKind::Deserialize,
        })
    }

    async fn request(
        &self,
        request: HyperRequest<Full<Bytes>>,
    ) -> Result<(Parts, Vec<u8>), GroupsError> {
        let res = self
            .client
            .request(request)
            .await
            .map_err(|source| GroupsError {
                source: Some(Box::new(source)),
                kind: ErrorKind::Sending,
            })?;

        let (parts, body) = res.into_parts();
        let bytes = body
            .collect()
            .await
            .map_err(|source| GroupsError {
                source: Some(Box::new(source)),
                kind: ErrorKind::ChunkingResponse,
            })?
            .to_bytes();

        Ok((parts, bytes.into()))
    }

    /// Follows a list endpoint's continuation tokens until the server
    /// reports no more data, accumulating items in arrival order.
    ///
    /// Any page failure aborts the whole aggregation; partial results are
    /// discarded. A missing, repeated, or cyclic token fails with
    /// [`ErrorKind::PaginationStalled`] instead of looping.
    pub(crate) async fn collect_pages<T, F>(&self, make_route: F) -> Result<Vec<T>, GroupsError>
    where
        T: DeserializeOwned,
        F: Fn(Option<PageToken>) -> Route,
    {
        let mut items = Vec::new();
        let mut token: Option<PageToken> = None;
        let mut pages = 0_usize;

        loop {
            let route = make_route(token.clone());
            let page: Page<T> = self.send(&route, Method::GET, None).await?;
            pages += 1;
            tracing::trace!(%route, pages, count = page.data.len(), "fetched page");
            items.extend(page.data);

            if !page.has_more {
                break;
            }
            let next = match page.next_page_token {
                Some(next) if token.as_ref() != Some(&next) => next,
                _ => {
                    return Err(GroupsError {
                        source: None,
                        kind: ErrorKind::PaginationStalled {
                            route: route.to_string(),
                            pages,
                        },
                    })
                }
            };
            if pages >= MAX_PAGE_FETCHES {
                return Err(GroupsError {
                    source: None,
                    kind: ErrorKind::PaginationStalled {
                        route: route.to_string(),
                        pages,
                    },
                });
            }
            token = Some(next);
        }

        Ok(items)
    }
}
