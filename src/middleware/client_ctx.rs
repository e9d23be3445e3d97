use crate::db::get_db_pool;
use crate::orm::admins::{self, AdminRole};
use actix_web::dev::{
    self, Extensions, Payload, Service, ServiceRequest, ServiceResponse, Transform,
};
use actix_web::http::header;
use actix_web::{error, web::Data, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

/// Client data stored for a single request cycle.
/// Distinct from ClientCtx because it is defined through request data.
#[derive(Clone, Debug, Default)]
pub struct ClientCtxInner {
    /// Authenticated admin. None is an anonymous caller.
    pub admin: Option<admins::Model>,
}

impl ClientCtxInner {
    /// Resolve the `Authorization: Bearer` header to an admin account.
    ///
    /// The credential is carried explicitly in this context from here on;
    /// handlers never consult ambient token state.
    pub async fn from_request_token(req: &HttpRequest) -> Self {
        let token = match bearer_token(req) {
            Some(token) => token,
            None => return Self::default(),
        };

        let admin = match crate::auth::authenticate_token(get_db_pool(), &token).await {
            Ok(admin) => admin,
            Err(e) => {
                log::error!("Token lookup failed: {}", e);
                None
            }
        };

        ClientCtxInner { admin }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Admin context passed to routes.
/// Wraps ClientCtxInner, which is set at the beginning of the request.
#[derive(Clone, Debug)]
pub struct ClientCtx(Data<ClientCtxInner>);

impl Default for ClientCtx {
    fn default() -> Self {
        Self(Data::new(ClientCtxInner::default()))
    }
}

impl ClientCtx {
    fn get_or_default_from_extensions(extensions: &mut Extensions) -> Self {
        match extensions.get::<Data<ClientCtxInner>>() {
            // Existing record in extensions; pull it and return clone.
            Some(cbox) => Self(cbox.clone()),
            // No existing record; create and insert it.
            None => {
                let cbox = Data::new(ClientCtxInner::default());
                extensions.insert(cbox.clone());
                Self(cbox)
            }
        }
    }

    /// Returns either the admin's id or None.
    pub fn get_id(&self) -> Option<i32> {
        self.0.admin.as_ref().map(|a| a.id)
    }

    pub fn is_superadmin(&self) -> bool {
        matches!(
            self.0.admin.as_ref().map(|a| &a.role),
            Some(AdminRole::SuperAdmin)
        )
    }

    /// Require a valid bearer token. Returns admin_id or ErrorUnauthorized.
    pub fn require_admin(&self) -> Result<i32, Error> {
        self.get_id()
            .ok_or_else(|| error::ErrorUnauthorized("Valid bearer token required"))
    }

    /// Require the superadmin role. Returns admin_id, ErrorUnauthorized
    /// for anonymous callers or ErrorForbidden for lesser roles.
    pub fn require_superadmin(&self) -> Result<i32, Error> {
        let id = self.require_admin()?;
        if !self.is_superadmin() {
            return Err(error::ErrorForbidden("Superadmin privilege required"));
        }
        Ok(id)
    }
}

/// This implementation is what actually provides the `client: ClientCtx` in
/// the parameters of route functions.
impl FromRequest for ClientCtx {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(ClientCtx::get_or_default_from_extensions(
            &mut req.extensions_mut(),
        )))
    }
}

impl<S: 'static, B> Transform<S, ServiceRequest> for ClientCtx
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ClientCtxMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ClientCtxMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Admin context middleware
pub struct ClientCtxMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ClientCtxMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();

        Box::pin(async move {
            let inner = ClientCtxInner::from_request_token(req.request()).await;
            req.extensions_mut().insert(Data::new(inner));
            svc.call(req).await
        })
    }
}
