use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, dev::Payload, error::InternalError,
    http::StatusCode,
};
use futures_util::future::{Ready, ready};

use crate::models::{ErrorCode, auth::entities::Principal};

use super::create_error_response;

// 处理程序以参数形式接收调用者；缺失说明路由未经过 RequireJWT
impl FromRequest for Principal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let principal = req.extensions().get::<Principal>().cloned();
        ready(principal.ok_or_else(|| {
            let response = create_error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::Unauthorized,
                "Authentication required",
            );
            InternalError::from_response("missing principal", response).into()
        }))
    }
}
