//! 各服务共用的访问检查
//!
//! 失败时直接给出可返回的 `HttpResponse`，调用方用 `match` 提前返回。

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use tracing::error;

use crate::errors::GradebookError;
use crate::models::auth::entities::Principal;
use crate::models::sections::entities::SectionContext;
use crate::models::{ApiResponse, ErrorCode};
use crate::registrar::RegistrarNotifier;
use crate::storage::Storage;

/// 缺失的教学班如何响应
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSection {
    /// 教学班是请求直接操作的资源
    NotFound,
    /// 教学班只是被请求引用
    BadRequest,
}

pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

pub(crate) fn registrar_from_request(request: &HttpRequest) -> Arc<dyn RegistrarNotifier> {
    request
        .app_data::<web::Data<Arc<dyn RegistrarNotifier>>>()
        .expect("Registrar not found in app data")
        .get_ref()
        .clone()
}

pub(crate) fn internal_error(context: &str, e: GradebookError) -> HttpResponse {
    error!("{}: {}", context, e);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {}", e.message()),
    ))
}

pub(crate) fn forbidden(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::SectionPermissionDenied,
        message,
    ))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

/// 加载教学班并确认调用者是任课教师
pub(crate) async fn load_owned_section(
    storage: &Arc<dyn Storage>,
    section_no: i64,
    principal: &Principal,
    missing: MissingSection,
) -> Result<SectionContext, HttpResponse> {
    let context = match storage.get_section_context(section_no).await {
        Ok(Some(context)) => context,
        Ok(None) => {
            let message = format!("教学班 {section_no} 不存在");
            return Err(match missing {
                MissingSection::NotFound => HttpResponse::NotFound()
                    .json(ApiResponse::error_empty(ErrorCode::SectionNotFound, message)),
                MissingSection::BadRequest => bad_request(ErrorCode::SectionNotFound, message),
            });
        }
        Err(e) => return Err(internal_error("查询教学班失败", e)),
    };

    if !context.section.is_taught_by(&principal.email) {
        return Err(forbidden(format!("不是教学班 {section_no} 的任课教师")));
    }

    Ok(context)
}
