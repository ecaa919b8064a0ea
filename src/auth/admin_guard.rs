use std::future::Future;
use std::pin::Pin;

use actix_web::{dev, web, FromRequest, HttpRequest};

use crate::auth::credentials::bearer_token;
use crate::auth::AdminIdentity;
use crate::crypto::SigningKey;
use crate::error::RestError;

/// Request guard for admin-only endpoints. A missing, malformed, or
/// badly-signed session token means the caller is treated as logged out.
#[derive(Debug)]
pub struct Administrator(AdminIdentity);

impl FromRequest for Administrator {
    type Error = RestError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            // NOTE: Must be registered with the application at startup
            let signing_key: &SigningKey = req
                .app_data::<web::Data<SigningKey>>()
                .expect("SigningKey not registered for application");

            let token = bearer_token(req.headers())
                .map_err(|_| RestError::Unauthorized("Missing session token".into()))?;

            let identity = AdminIdentity::verify_token(signing_key, token)
                .map_err(|_| RestError::Unauthorized("Invalid session token".into()))?;

            Ok(Administrator(identity))
        })
    }
}

impl AsRef<AdminIdentity> for Administrator {
    fn as_ref(&self) -> &AdminIdentity {
        &self.0
    }
}
